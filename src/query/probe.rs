use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use super::expect::{check_first, Expected};
use super::matcher::select;
use crate::error::Result;
use crate::input::Retriever;
use crate::model::{Sample, Snapshot};
use crate::parser::parse_selector;

/// Queries one metrics endpoint by selector.
///
/// The endpoint is scraped lazily on the first query and the snapshot is then
/// reused until [`Probe::refresh`] is called. A refresh swaps the whole
/// snapshot, so concurrent readers see either the old one or the new one.
pub struct Probe {
    retriever: Retriever,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
}

impl Probe {
    pub fn new<U: Into<String>>(url: U) -> Self {
        Self::with_retriever(Retriever::new(url))
    }

    pub fn with_retriever(retriever: Retriever) -> Self {
        Self {
            retriever,
            snapshot: RwLock::new(None),
        }
    }

    #[inline]
    pub fn url(&self) -> &str {
        self.retriever.url()
    }

    /// Scrape the endpoint now and replace the live snapshot.
    pub fn refresh(&self) -> Result<Arc<Snapshot>> {
        let snapshot = Arc::new(self.retriever.retrieve()?);
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// The live snapshot, if the endpoint has been scraped yet.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn current(&self) -> Result<Arc<Snapshot>> {
        match self.snapshot() {
            Some(snapshot) => Ok(snapshot),
            None => {
                debug!("no snapshot of {} yet, retrieving", self.url());
                self.refresh()
            }
        }
    }

    /// All samples matching `selector`, in the order the endpoint exposed them.
    /// An unknown metric name gives an empty result.
    pub fn query(&self, selector: &str) -> Result<Vec<Sample>> {
        let parsed = parse_selector(selector)?;
        let snapshot = self.current()?;

        let matches = select(&snapshot, &parsed).cloned().collect::<Vec<_>>();
        debug!("{} matched {} samples", parsed, matches.len());
        Ok(matches)
    }

    /// Assert that the first sample matching `selector` has exactly the
    /// expected value.
    pub fn expect_value<E: Into<Expected>>(&self, selector: &str, expected: E) -> Result<()> {
        let matches = self.query(selector)?;
        check_first(selector, &matches, &expected.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::input::testing::{RecordingSleeper, ScriptedFetcher};
    use crate::input::{PrometheusDecoder, RetryPolicy};

    const CPU: &str = r#"# TYPE cpu gauge
cpu{env="prod",region="us"} 0.5
cpu{env="dev",region="us"} 0.9
"#;

    const MEM: &str = r#"# TYPE mem gauge
mem{env="prod"} 2048
"#;

    fn probe(fetcher: &ScriptedFetcher) -> Probe {
        Probe::with_retriever(Retriever::with_parts(
            "http://127.0.0.1:9187/metrics",
            Box::new(fetcher.clone()),
            Box::new(PrometheusDecoder::new()),
            Box::new(RecordingSleeper::new()),
            RetryPolicy::default(),
        ))
    }

    #[test]
    fn test_probe_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Probe>();
    }

    #[test]
    fn test_query_fetches_lazily_once() -> Result<()> {
        let fetcher = ScriptedFetcher::new(vec![Some(CPU)]);
        let probe = probe(&fetcher);

        assert!(probe.snapshot().is_none());
        assert_eq!(fetcher.calls(), 0);

        assert_eq!(probe.query("cpu")?.len(), 2);
        assert_eq!(probe.query("cpu{env=dev}")?.len(), 1);
        assert_eq!(fetcher.calls(), 1);
        assert!(probe.snapshot().is_some());
        Ok(())
    }

    #[test]
    fn test_query_filters_by_labels() -> Result<()> {
        let fetcher = ScriptedFetcher::new(vec![Some(CPU)]);
        let probe = probe(&fetcher);

        let matches = probe.query("cpu{env=prod}")?;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value(), 0.5);
        assert_eq!(matches[0].label("env").map(String::as_str), Some("prod"));

        let matches = probe.query("cpu{region=\"us\"}")?;
        assert_eq!(
            matches.iter().map(Sample::value).collect::<Vec<_>>(),
            vec![0.5, 0.9]
        );

        assert!(probe.query("cpu{env=staging}")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_query_missing_metric() -> Result<()> {
        let fetcher = ScriptedFetcher::new(vec![Some(CPU)]);
        let probe = probe(&fetcher);

        assert!(probe.query("missing_metric")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_selector_does_not_fetch() {
        let fetcher = ScriptedFetcher::new(vec![Some(CPU)]);
        let probe = probe(&fetcher);

        assert!(matches!(
            probe.query("cpu{envprod}"),
            Err(Error::MalformedSelector { .. })
        ));
        assert_eq!(fetcher.calls(), 0);
    }

    #[test]
    fn test_expect_value() -> Result<()> {
        let fetcher = ScriptedFetcher::new(vec![Some(CPU)]);
        let probe = probe(&fetcher);

        probe.expect_value("cpu{env=prod}", 0.5)?;
        probe.expect_value("cpu{env=\"dev\"}", "0.9")?;

        match probe.expect_value("cpu{env=prod}", 0.6) {
            Err(Error::ValueMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 0.6);
                assert_eq!(actual, 0.5);
            }
            other => panic!("expected value mismatch, got {:?}", other),
        }

        match probe.expect_value("cpu{env=staging}", 0.5) {
            Err(err @ Error::NoMatch { .. }) => assert!(err.is_assertion_failure()),
            other => panic!("expected no match, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_refresh_replaces_snapshot() -> Result<()> {
        let fetcher = ScriptedFetcher::new(vec![Some(CPU), Some(MEM)]);
        let probe = probe(&fetcher);

        let first = probe.refresh()?;
        assert_eq!(probe.query("cpu")?.len(), 2);
        assert!(Arc::ptr_eq(&first, &probe.snapshot().expect("snapshot")));
        assert_eq!(fetcher.calls(), 1);

        let second = probe.refresh()?;
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(probe.query("cpu")?.is_empty());
        assert_eq!(probe.query("mem{env=prod}")?[0].value(), 2048.0);
        assert_eq!(fetcher.calls(), 2);
        Ok(())
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() -> Result<()> {
        let fetcher = ScriptedFetcher::new(vec![Some(CPU)]);
        let probe = Probe::with_retriever(Retriever::with_parts(
            "http://127.0.0.1:9187/metrics",
            Box::new(fetcher.clone()),
            Box::new(PrometheusDecoder::new()),
            Box::new(RecordingSleeper::new()),
            RetryPolicy::new(2, RetryPolicy::default().delay),
        ));

        probe.refresh()?;
        assert!(matches!(
            probe.refresh(),
            Err(Error::Unavailable { attempts: 2, .. })
        ));
        assert_eq!(probe.query("cpu")?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_empty_body_is_not_an_empty_snapshot() {
        let fetcher = ScriptedFetcher::new(vec![Some("")]);
        let probe = probe(&fetcher);

        assert!(matches!(
            probe.query("up"),
            Err(Error::Unavailable { attempts: 40, .. })
        ));
        assert!(probe.snapshot().is_none());
    }

    #[test]
    fn test_unavailable_query_retries_next_time() -> Result<()> {
        let fetcher = ScriptedFetcher::new(vec![None; 40]);
        let probe = probe(&fetcher);

        assert!(matches!(
            probe.query("cpu"),
            Err(Error::Unavailable { attempts: 40, .. })
        ));
        assert!(probe.snapshot().is_none());

        fetcher.push(Some(CPU));
        assert_eq!(probe.query("cpu")?.len(), 2);
        assert_eq!(fetcher.calls(), 41);
        Ok(())
    }
}
