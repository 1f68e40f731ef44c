use std::time::Duration;

use tokio::time::{interval, sleep, Instant, MissedTickBehavior};

use crate::core::{AppError, Result};

/// Tuning knobs for [`wait_for_condition`].
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Delay between predicate probes
    pub interval: Duration,
    /// Overall deadline
    pub timeout: Duration,
    /// Extra delay after the condition is met, for state to settle
    pub settle: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            timeout: Duration::from_secs(10),
            settle: None,
        }
    }
}

/// Poll `predicate` until it returns true or the timeout elapses.
///
/// The first probe happens immediately, so a condition that already holds
/// resolves within one interval. The deadline is only checked after a failed
/// probe, which guarantees the timeout can never fire once the condition has
/// been observed.
pub async fn wait_for_condition<F>(mut predicate: F, options: WaitOptions) -> Result<()>
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + options.timeout;
    let mut ticker = interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if predicate() {
            if let Some(settle) = options.settle {
                sleep(settle).await;
            }
            return Ok(());
        }

        if Instant::now() >= deadline {
            return Err(AppError::timeout(format!(
                "Condition not met within {:?}",
                options.timeout
            )));
        }
    }
}
