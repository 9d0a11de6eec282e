#![cfg(test)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::fetcher::{FetchResult, Fetcher};
use super::retriever::Sleeper;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().expect("test state lock poisoned")
}

/// Plays back a fixed sequence of responses: `Some(body)` succeeds, `None`
/// fails as a refused connection would. Fails once the script runs out.
#[derive(Clone)]
pub struct ScriptedFetcher {
    script: Arc<Mutex<VecDeque<Option<String>>>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedFetcher {
    pub fn new(script: Vec<Option<&str>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(
                script.into_iter().map(|s| s.map(String::from)).collect(),
            )),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue more responses for later retrievals.
    pub fn push(&self, response: Option<&str>) {
        lock(&self.script).push_back(response.map(String::from));
    }

    pub fn calls(&self) -> usize {
        *lock(&self.calls)
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch(&self, _url: &str) -> FetchResult<String> {
        *lock(&self.calls) += 1;
        match lock(&self.script).pop_front() {
            Some(Some(body)) => Ok(body),
            Some(None) => Err("connection refused".into()),
            None => Err("script exhausted".into()),
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        lock(&self.sleeps).clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, d: Duration) {
        lock(&self.sleeps).push(d);
    }
}
