use std::time::Duration;

pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

pub type FetchResult<T> = std::result::Result<T, FetchError>;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Transport used by the retriever. Every failure, whatever its cause, is
/// reported as an `Err` so the retry loop can treat them alike.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> FetchResult<String>;
}

/// Plain HTTP GET. Connection errors, timeouts and non-2xx statuses all come
/// back from `ureq` as errors.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchResult<String> {
        let body = self.agent.get(url).call()?.into_string()?;
        Ok(body)
    }
}
