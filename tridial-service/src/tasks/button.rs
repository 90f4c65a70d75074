//! Button listener thread
//!
//! Reading the notification FIFO blocks, so it runs on its own thread and
//! hands each debounced press to the executor through [`PRESS_CHANNEL`].
//! The thread never waits on the executor: while a mode switch is still
//! in progress presses queue up, and once the queue is full further
//! presses are dropped.

use std::thread;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{info, warn};
use tridial_core::config::ClockConfig;
use tridial_drivers::pigpio::{Pigs, PigpioNotifier};
use tridial_protocol::PressEvent;

use crate::channels::PRESS_CHANNEL;
use crate::error::FatalError;

/// Set up pigpio notifications for the button and start forwarding presses
///
/// Setup errors are returned; once running, the listener never stops.
pub fn start_button_listener(config: &ClockConfig) -> Result<(), FatalError> {
    let pigs = Pigs::new(config.pigpio.program.as_str());
    let notifier = PigpioNotifier::open(pigs)?;
    info!(
        "notification handle {}, pipe {}",
        notifier.handle(),
        notifier.pipe().display()
    );

    let listener = notifier.listen(config.button.pin, config.button.debounce_ms)?;

    thread::Builder::new()
        .name("button".into())
        .spawn(move || {
            info!("Button listener started");
            listener.run(|press| {
                forward(&PRESS_CHANNEL, press);
            })
        })
        .map_err(FatalError::ButtonThread)?;

    Ok(())
}

/// Queue a press without blocking; returns false if it was dropped
fn forward<const N: usize>(
    channel: &Channel<CriticalSectionRawMutex, PressEvent, N>,
    press: PressEvent,
) -> bool {
    match channel.try_send(press) {
        Ok(()) => true,
        Err(_) => {
            warn!("dropping button press, {} presses already waiting", N);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_queues_presses() {
        let channel: Channel<CriticalSectionRawMutex, PressEvent, 2> = Channel::new();
        assert!(forward(&channel, PressEvent));
        assert!(forward(&channel, PressEvent));
        assert_eq!(channel.len(), 2);
    }

    #[test]
    fn test_full_queue_drops_press() {
        let channel: Channel<CriticalSectionRawMutex, PressEvent, 2> = Channel::new();
        forward(&channel, PressEvent);
        forward(&channel, PressEvent);

        assert!(!forward(&channel, PressEvent));
        assert_eq!(channel.len(), 2);

        // Room again once the controller takes one
        assert!(channel.try_receive().is_ok());
        assert!(forward(&channel, PressEvent));
        assert_eq!(channel.len(), 2);
    }
}
