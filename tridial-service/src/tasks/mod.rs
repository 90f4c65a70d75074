//! Embassy async tasks
//!
//! The controller owns the mode scheduler. Each mode runs as its own task
//! and writes to the dials until told to stop. The button listener is a
//! plain OS thread because it blocks on the notification FIFO.

pub mod button;
pub mod clock;
pub mod controller;
pub mod test_pattern;
pub mod weather;

pub use button::start_button_listener;
pub use clock::clock_task;
pub use controller::controller_task;
pub use test_pattern::test_pattern_task;
pub use weather::weather_task;

use tridial_core::dial::DialActuator;
use tridial_drivers::pigpio::PigsChannel;

/// The three dials as driven through `pigs`
pub type Dials = DialActuator<PigsChannel>;
