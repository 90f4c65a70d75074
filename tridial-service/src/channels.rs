//! Inter-task communication channels
//!
//! Static channels and signals shared between the button thread, the
//! controller and the mode tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use tridial_protocol::PressEvent;

use crate::error::FatalError;
use crate::scheduler::ModeCancel;

/// Channel capacity for debounced button presses
const PRESS_CHANNEL_SIZE: usize = 4;

/// Debounced presses from the button listener to the controller
pub static PRESS_CHANNEL: Channel<CriticalSectionRawMutex, PressEvent, PRESS_CHANNEL_SIZE> =
    Channel::new();

/// First fatal error raised by any task; `main` exits on it
pub static FATAL: Signal<CriticalSectionRawMutex, FatalError> = Signal::new();

/// Stop token for the running clock task
pub static CLOCK_CANCEL: ModeCancel = ModeCancel::new();

/// Stop token for the running weather task
pub static WEATHER_CANCEL: ModeCancel = ModeCancel::new();
