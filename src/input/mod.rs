mod decoder;
mod fetcher;
mod retriever;
pub(crate) mod testing;

pub use decoder::{Decoder, PrometheusDecoder};
pub use fetcher::{FetchError, FetchResult, Fetcher, HttpFetcher, DEFAULT_TIMEOUT};
pub use retriever::{
    Retriever, RetryPolicy, Sleeper, ThreadSleeper, DEFAULT_ATTEMPTS, DEFAULT_DELAY,
};
