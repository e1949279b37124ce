//! Bounded, sequential retries with a linear backoff.
//!
//! The delay after failed attempt `n` is `backoff_base * n`. Sleeping goes through the
//! [`Sleeper`] trait so the schedule can be checked without waiting on a real clock.

use log::warn;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        (**self).sleep(duration)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returned by [`RetryPolicy::run`] when every attempt failed.
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last: E,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
}

impl RetryPolicy {
    /// A `max_attempts` of 0 is treated as 1.
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    /// Delay before the attempt following failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt
    }

    /// Runs `operation` until it succeeds or `max_attempts` attempts have failed.
    ///
    /// The operation receives the 1-based attempt number. Every failure is logged.
    /// No sleep happens after the final attempt.
    pub async fn run<T, E, F, Fut, S>(
        &self,
        sleeper: &S,
        mut operation: F,
    ) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        S: Sleeper,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("    attempt {}: {}", attempt, e);
                    if attempt >= self.max_attempts {
                        return Err(RetryExhausted { attempts: attempt, last: e });
                    }
                    sleeper.sleep(self.delay_for(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}
