use std::time::Duration;

/// Fixed-delay retry with a long cooldown once too many failures pile up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub wait: Duration,
    pub max_errors: u32,
    pub cooldown: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Still attempting: short fixed delay.
    Retry(Duration),
    /// Threshold exceeded: suspected rate limiting, counter was reset.
    CoolDown(Duration),
}

impl Backoff {
    pub fn duration(&self) -> Duration {
        match self {
            Backoff::Retry(d) | Backoff::CoolDown(d) => *d,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryState {
    policy: RetryPolicy,
    attempts: u32,
    cooldowns: u32,
}

impl RetryState {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempts: 0,
            cooldowns: 0,
        }
    }

    pub fn record_failure(&mut self) -> Backoff {
        self.attempts += 1;
        if self.attempts > self.policy.max_errors {
            self.attempts = 0;
            self.cooldowns += 1;
            Backoff::CoolDown(self.policy.cooldown)
        } else {
            Backoff::Retry(self.policy.wait)
        }
    }

    /// Failures since the last cooldown.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn cooldowns(&self) -> u32 {
        self.cooldowns
    }
}
