//! Clock mode
//!
//! Shows local hour, minute and second, refreshed on a fixed period until
//! the scheduler asks it to stop.

use chrono::{Local, Timelike};
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};
use log::info;

use super::Dials;
use crate::channels::FATAL;
use crate::error::FatalError;
use crate::scheduler::ModeCancel;

/// Clock mode task
///
/// Pool of two: a replacement clock may be spawned while the previous one
/// is still returning after acknowledging its stop.
#[embassy_executor::task(pool_size = 2)]
pub async fn clock_task(mut dials: Dials, period: Duration, cancel: &'static ModeCancel) {
    if let Err(e) = run(&mut dials, period, cancel).await {
        FATAL.signal(e);
    }
    cancel.finish();
}

async fn run(dials: &mut Dials, period: Duration, cancel: &ModeCancel) -> Result<(), FatalError> {
    info!("starting clock mode");
    let mut ticker = Ticker::every(period);
    show_time(dials, &Local::now())?;

    loop {
        match select(ticker.next(), cancel.requested()).await {
            Either::First(()) => {
                info!("clock ticking");
                show_time(dials, &Local::now())?;
            }
            Either::Second(()) => {
                info!("stopped clock");
                return Ok(());
            }
        }
    }
}

/// Write a time of day to the dials
pub fn show_time(dials: &mut Dials, now: &impl Timelike) -> Result<(), FatalError> {
    // chrono keeps these within 0-23 and 0-59
    dials.set_time(now.hour() as u8, now.minute() as u8, now.second() as u8)?;
    Ok(())
}
