//! Spawns mode tasks on the executor

use embassy_executor::Spawner;
use embassy_time::Duration;
use log::debug;
use tridial_core::config::ClockConfig;
use tridial_core::mode::Mode;
use tridial_drivers::pigpio::Pigs;

use crate::channels::{CLOCK_CANCEL, WEATHER_CANCEL};
use crate::error::FatalError;
use crate::scheduler::{ModeLauncher, ModeTaskHandle};
use crate::tasks::{clock_task, test_pattern_task, weather_task, Dials};

/// Launches each mode as an embassy task driving the configured dials
pub struct TaskLauncher {
    spawner: Spawner,
    config: &'static ClockConfig,
    pigs: Pigs,
}

impl TaskLauncher {
    pub fn new(spawner: Spawner, config: &'static ClockConfig) -> Self {
        Self {
            spawner,
            config,
            pigs: Pigs::new(config.pigpio.program.as_str()),
        }
    }

    fn dials(&self) -> Dials {
        let pins = &self.config.dials;
        Dials::new(
            self.pigs.pwm_channel(pins.primary),
            self.pigs.pwm_channel(pins.secondary),
            self.pigs.pwm_channel(pins.tertiary),
        )
    }
}

impl ModeLauncher for TaskLauncher {
    fn launch(&mut self, mode: Mode) -> Result<ModeTaskHandle, FatalError> {
        debug!("launching {} mode", mode);
        let dials = self.dials();

        match mode {
            Mode::Clock => {
                CLOCK_CANCEL.reset();
                let period = Duration::from_millis(self.config.clock.refresh_ms);
                self.spawner
                    .spawn(clock_task(dials, period, &CLOCK_CANCEL))
                    .map_err(|_| FatalError::Spawn("clock"))?;
                Ok(ModeTaskHandle::cancellable(mode, &CLOCK_CANCEL))
            }
            Mode::Weather => {
                WEATHER_CANCEL.reset();
                self.spawner
                    .spawn(weather_task(dials, self.config, &WEATHER_CANCEL))
                    .map_err(|_| FatalError::Spawn("weather"))?;
                Ok(ModeTaskHandle::cancellable(mode, &WEATHER_CANCEL))
            }
            Mode::Test => {
                self.spawner
                    .spawn(test_pattern_task(dials, self.config.test_pattern.duty))
                    .map_err(|_| FatalError::Spawn("test pattern"))?;
                Ok(ModeTaskHandle::detached(mode))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::testing::{config, run_executor, TIMEOUT};
    use std::sync::mpsc;

    #[test]
    fn test_exhausted_pool_is_fatal() {
        let config = config("true", "WU_API_KEY");

        let (tx, rx) = mpsc::channel();
        run_executor(move |spawner| {
            let mut launcher = TaskLauncher::new(spawner, config);
            // None of these run before init returns, so each holds a pool slot
            let results: Vec<_> = (0..3)
                .map(|_| launcher.launch(Mode::Test).map(|handle| handle.mode()))
                .collect();
            let _ = tx.send(results);
        });

        let results = rx.recv_timeout(TIMEOUT).unwrap();
        assert!(matches!(results[0], Ok(Mode::Test)));
        assert!(matches!(results[1], Ok(Mode::Test)));
        assert!(matches!(results[2], Err(FatalError::Spawn("test pattern"))));
    }
}
