//! Build script for tridial-service
//!
//! Validates the embedded tridial.toml at compile time so a broken default
//! configuration never reaches the Pi.

use std::fs;
use std::path::Path;

use tridial_core::config::ClockConfig;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    validate_config();
}

/// Parse and validate tridial.toml
fn validate_config() {
    println!("cargo:rerun-if-changed=tridial.toml");

    let config_path = Path::new("tridial.toml");

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Failed to read tridial.toml                              ║\n\
            ║                                                                  ║\n\
            ║  Error: {:<56} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            e
        ),
    };

    let config: ClockConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid tridial.toml                                     ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n\
            {}\n",
            e
        ),
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: tridial.toml failed validation                           ║\n\
            ║                                                                  ║\n\
            ║  {:<64}║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            e.to_string()
        );
    }
}
