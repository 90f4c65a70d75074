//! Weather mode
//!
//! Fetches current conditions from Weather Underground, shows them, and
//! refreshes on a fixed period until the scheduler asks it to stop. Any
//! fetch or write error ends the service.

use std::env;

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};
use log::info;
use tridial_core::config::ClockConfig;
use tridial_core::traits::{Conditions, Location, WeatherSource};
use tridial_drivers::weather::WuClient;

use super::Dials;
use crate::channels::FATAL;
use crate::error::FatalError;
use crate::scheduler::ModeCancel;

#[embassy_executor::task(pool_size = 2)]
pub async fn weather_task(
    mut dials: Dials,
    config: &'static ClockConfig,
    cancel: &'static ModeCancel,
) {
    info!("starting weather mode");
    let period = Duration::from_secs(config.weather.refresh_secs);
    let result = match api_key(config.weather.api_key_env.as_str()) {
        Ok(key) => {
            let mut client = WuClient::new(key);
            run(&mut dials, &mut client, &config.weather.location, period, cancel).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        FATAL.signal(e);
    }
    cancel.finish();
}

/// Provider API key from the environment variable `var`
fn api_key(var: &str) -> Result<String, FatalError> {
    env::var(var)
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| FatalError::MissingApiKey(var.to_string()))
}

async fn run<W: WeatherSource>(
    dials: &mut Dials,
    source: &mut W,
    location: &Location,
    period: Duration,
    cancel: &ModeCancel,
) -> Result<(), FatalError> {
    refresh(dials, source, location)?;

    let mut ticker = Ticker::every(period);
    loop {
        match select(ticker.next(), cancel.requested()).await {
            Either::First(()) => {
                info!("weather ticking");
                refresh(dials, source, location)?;
            }
            Either::Second(()) => {
                info!("stopped weather");
                return Ok(());
            }
        }
    }
}

/// Fetch current conditions and show them
pub fn refresh<W: WeatherSource>(
    dials: &mut Dials,
    source: &mut W,
    location: &Location,
) -> Result<Conditions, FatalError> {
    let conditions = source.current(location)?;
    info!(
        "{}/{}: {}°F, {}% humidity, {}% precipitation",
        location.region.as_str(),
        location.city.as_str(),
        conditions.temp_f,
        conditions.humidity,
        conditions.precipitation
    );
    dials.set_weather(conditions.temp_f, conditions.humidity, conditions.precipitation)?;
    Ok(conditions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::testing::{config, dials, report_finished, run_executor, TIMEOUT};
    use std::sync::mpsc::{self, Sender};
    use std::thread;
    use tridial_core::dial::Reading;
    use tridial_core::traits::WeatherError;

    /// Never set in the test environment
    const UNSET_KEY_VAR: &str = "TRIDIAL_TEST_UNSET_WEATHER_KEY";

    struct FixedWeather {
        result: Result<Conditions, WeatherError>,
        requests: usize,
    }

    impl FixedWeather {
        fn new(result: Result<Conditions, WeatherError>) -> Self {
            Self {
                result,
                requests: 0,
            }
        }
    }

    impl WeatherSource for FixedWeather {
        fn current(&mut self, _location: &Location) -> Result<Conditions, WeatherError> {
            self.requests += 1;
            self.result
        }
    }

    fn sunny() -> Conditions {
        Conditions {
            temp_f: 40,
            temp_c: 4,
            humidity: 100,
            precipitation: 100,
        }
    }

    /// Runs the weather loop and reports its result with the request count
    #[embassy_executor::task(pool_size = 4)]
    async fn drive_weather(
        result: Result<Conditions, WeatherError>,
        cancel: &'static ModeCancel,
        done: Sender<(Result<(), FatalError>, usize)>,
    ) {
        let mut dials = dials("true");
        let mut source = FixedWeather::new(result);
        let period = Duration::from_millis(10);
        let result = run(&mut dials, &mut source, &Location::default(), period, cancel).await;
        let _ = done.send((result, source.requests));
    }

    #[test]
    fn test_refresh_shows_conditions() {
        let mut source = FixedWeather::new(Ok(sunny()));
        let conditions = refresh(&mut dials("true"), &mut source, &Location::default()).unwrap();
        assert_eq!(conditions, sunny());
        assert_eq!(source.requests, 1);
    }

    #[test]
    fn test_fetch_failure_is_fatal() {
        let mut source = FixedWeather::new(Err(WeatherError::EmptyForecast));
        let result = refresh(&mut dials("true"), &mut source, &Location::default());
        assert!(matches!(
            result,
            Err(FatalError::Weather(WeatherError::EmptyForecast))
        ));
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let mut source = FixedWeather::new(Ok(sunny()));
        match refresh(&mut dials("false"), &mut source, &Location::default()) {
            Err(FatalError::Actuator(e)) => assert_eq!(e.reading, Reading::Temperature),
            other => panic!("expected actuator error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_api_key() {
        match api_key(UNSET_KEY_VAR) {
            Err(FatalError::MissingApiKey(var)) => assert_eq!(var, UNSET_KEY_VAR),
            other => panic!("expected missing key, got {:?}", other),
        }
    }

    #[test]
    fn test_latched_stop_after_first_refresh() {
        static CANCEL: ModeCancel = ModeCancel::new();
        CANCEL.request();

        let (tx, rx) = mpsc::channel();
        run_executor(move |spawner| spawner.spawn(drive_weather(Ok(sunny()), &CANCEL, tx)).unwrap());

        let (result, requests) = rx.recv_timeout(TIMEOUT).unwrap();
        assert!(result.is_ok());
        assert_eq!(requests, 1);
    }

    #[test]
    fn test_refreshes_until_stopped() {
        static CANCEL: ModeCancel = ModeCancel::new();

        let (tx, rx) = mpsc::channel();
        run_executor(move |spawner| spawner.spawn(drive_weather(Ok(sunny()), &CANCEL, tx)).unwrap());

        thread::sleep(std::time::Duration::from_millis(100));
        CANCEL.request();

        let (result, requests) = rx.recv_timeout(TIMEOUT).unwrap();
        assert!(result.is_ok());
        assert!(requests >= 2, "only {} fetches", requests);
    }

    #[test]
    fn test_fetch_failure_ends_run() {
        static CANCEL: ModeCancel = ModeCancel::new();

        let (tx, rx) = mpsc::channel();
        run_executor(move |spawner| {
            let failing = Err(WeatherError::EmptyForecast);
            spawner.spawn(drive_weather(failing, &CANCEL, tx)).unwrap()
        });

        let (result, requests) = rx.recv_timeout(TIMEOUT).unwrap();
        assert!(matches!(
            result,
            Err(FatalError::Weather(WeatherError::EmptyForecast))
        ));
        assert_eq!(requests, 1);
    }

    #[test]
    fn test_task_acknowledges_missing_key() {
        static CANCEL: ModeCancel = ModeCancel::new();
        let config = config("true", UNSET_KEY_VAR);

        let (tx, rx) = mpsc::channel();
        run_executor(move |spawner| {
            spawner.spawn(weather_task(dials("true"), config, &CANCEL)).unwrap();
            spawner.spawn(report_finished(&CANCEL, tx)).unwrap();
        });
        assert!(rx.recv_timeout(TIMEOUT).is_ok());
    }
}
