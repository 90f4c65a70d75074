//! Controller task
//!
//! Receives debounced presses and switches modes through the scheduler.

use log::{debug, info};

use crate::channels::{FATAL, PRESS_CHANNEL};
use crate::launcher::TaskLauncher;
use crate::scheduler::ModeScheduler;

#[embassy_executor::task]
pub async fn controller_task(launcher: TaskLauncher) {
    info!("Controller task started");

    let mut scheduler = match ModeScheduler::start(launcher) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            FATAL.signal(e);
            return;
        }
    };

    loop {
        let press = PRESS_CHANNEL.receive().await;
        debug!("button pressed in {} mode", scheduler.current());

        if let Err(e) = scheduler.on_press(press).await {
            FATAL.signal(e);
            return;
        }
    }
}
