use std::time::Duration;

/// Delay before the single retry of a lazily created element.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmulatorSettings {
    pub retry_delay: Duration,
}

impl EmulatorSettings {
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

impl Default for EmulatorSettings {
    fn default() -> Self {
        Self { retry_delay: DEFAULT_RETRY_DELAY }
    }
}
