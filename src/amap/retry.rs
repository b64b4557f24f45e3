use std::{thread, time::Duration};

use crate::{config::PipelineConfig, error::Result};

/// Fixed-delay retry for transient vendor failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self { max_attempts: config.max_attempts.max(1), delay: config.retry_delay() }
    }

    /// Run `op` until it succeeds, fails with a non-transient error, or the
    /// attempts run out. The last error is returned on exhaustion.
    pub fn run<T>(&self, mut op: impl FnMut() -> Result<T>) -> Result<T> {
        let mut attempt = 1;
        loop {
            match op() {
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    log::warn!("attempt {attempt}/{} failed: {err}", self.max_attempts);
                    thread::sleep(self.delay);
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}
