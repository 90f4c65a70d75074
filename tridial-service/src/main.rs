//! Tridial - three-dial clock service
//!
//! Drives three PWM dials through the pigpio daemon. A single button
//! cycles the dials between clock, weather and test modes.

use embassy_executor::Spawner;
use log::{error, info};
use static_cell::StaticCell;
use tridial_core::config::ClockConfig;

mod channels;
mod config;
mod error;
mod launcher;
mod logging;
mod scheduler;
mod tasks;

use crate::channels::FATAL;
use crate::error::FatalError;
use crate::launcher::TaskLauncher;

// Configuration lives for the whole run; mode tasks borrow it
static CONFIG: StaticCell<ClockConfig> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let loaded = config::load();
    let log_file = loaded
        .as_ref()
        .ok()
        .and_then(|config| config.logging.file.as_ref())
        .map(|file| file.as_str());
    logging::init(log_file);

    info!("Tridial starting...");

    let config: &'static ClockConfig = match loaded {
        Ok(config) => CONFIG.init(config),
        Err(e) => exit_fatal(e.into()),
    };
    config::log_summary(config);

    if let Err(e) = tasks::start_button_listener(config) {
        exit_fatal(e);
    }

    let launcher = TaskLauncher::new(spawner, config);
    if spawner.spawn(tasks::controller_task(launcher)).is_err() {
        exit_fatal(FatalError::Spawn("controller"));
    }

    info!("All tasks spawned, service running");

    let e = FATAL.wait().await;
    exit_fatal(e)
}

fn exit_fatal(e: FatalError) -> ! {
    error!("{}", e);
    std::process::exit(1)
}
