use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use super::decoder::{Decoder, PrometheusDecoder};
use super::fetcher::{Fetcher, HttpFetcher};
use crate::error::{Error, Result};
use crate::model::{Snapshot, Timestamp, TimestampTrait};

pub const DEFAULT_ATTEMPTS: u32 = 40;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(250);

/// How hard the retriever tries before giving up on an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS, DEFAULT_DELAY)
    }
}

pub trait Sleeper: Send + Sync {
    fn sleep(&self, d: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, d: Duration) {
        thread::sleep(d);
    }
}

/// Fetches the exposition text from one endpoint, polling until it answers,
/// and decodes it into a fresh snapshot.
pub struct Retriever {
    url: String,
    fetcher: Box<dyn Fetcher>,
    decoder: Box<dyn Decoder>,
    sleeper: Box<dyn Sleeper>,
    policy: RetryPolicy,
}

impl Retriever {
    pub fn new<U: Into<String>>(url: U) -> Self {
        Self::with_parts(
            url,
            Box::new(HttpFetcher::default()),
            Box::new(PrometheusDecoder::new()),
            Box::new(ThreadSleeper),
            RetryPolicy::default(),
        )
    }

    pub fn with_parts<U: Into<String>>(
        url: U,
        fetcher: Box<dyn Fetcher>,
        decoder: Box<dyn Decoder>,
        sleeper: Box<dyn Sleeper>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            url: url.into(),
            fetcher,
            decoder,
            sleeper,
            policy,
        }
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn retrieve(&self) -> Result<Snapshot> {
        let body = self.poll()?;
        let records = self.decoder.decode(&body)?;
        let snapshot = Snapshot::from_records(self.url.as_str(), Timestamp::now(), records);

        info!(
            "retrieved {} samples of {} metrics from {}",
            snapshot.sample_count(),
            snapshot.len(),
            self.url
        );
        Ok(snapshot)
    }

    fn poll(&self) -> Result<String> {
        let attempts = self.policy.attempts;

        for attempt in 1..=attempts {
            // An endpoint that answers with nothing is not ready yet.
            let fetched = self.fetcher.fetch(&self.url).and_then(|body| {
                if body.is_empty() {
                    Err("empty response body".into())
                } else {
                    Ok(body)
                }
            });

            match fetched {
                Ok(body) => return Ok(body),
                Err(err) => {
                    debug!(
                        "attempt {}/{} to fetch {} failed: {}",
                        attempt, attempts, self.url, err
                    );
                    if attempt < attempts {
                        self.sleeper.sleep(self.policy.delay);
                    }
                }
            }
        }

        warn!("giving up on {} after {} attempts", self.url, attempts);
        Err(Error::Unavailable {
            url: self.url.clone(),
            attempts,
        })
    }
}
