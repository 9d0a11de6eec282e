use std::collections::HashMap;

use super::record::Record;
use super::sample::Sample;
use super::timestamp::Timestamp;
use super::MetricName;

/// All samples decoded from one retrieval, grouped by metric name.
///
/// Samples of a metric keep the order in which the decoder emitted them, so
/// "first match" lookups are deterministic. Metric names keep the order of
/// their first appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    url: String,
    fetched_at: Timestamp,
    names: Vec<MetricName>,
    metrics: HashMap<MetricName, Vec<Sample>>,
}

impl Snapshot {
    pub fn new<U: Into<String>>(url: U, fetched_at: Timestamp) -> Self {
        Self {
            url: url.into(),
            fetched_at,
            names: vec![],
            metrics: HashMap::new(),
        }
    }

    pub fn from_records<U, I>(url: U, fetched_at: Timestamp, records: I) -> Self
    where
        U: Into<String>,
        I: IntoIterator<Item = Record>,
    {
        let mut snapshot = Self::new(url, fetched_at);
        for Record(name, labels, value) in records {
            snapshot.push(name, Sample::new(labels, value));
        }
        snapshot
    }

    fn push(&mut self, name: MetricName, sample: Sample) {
        match self.metrics.get_mut(&name) {
            Some(samples) => samples.push(sample),
            None => {
                self.names.push(name.clone());
                self.metrics.insert(name, vec![sample]);
            }
        }
    }

    /// Samples of the given metric in decode order, or an empty slice.
    pub fn samples(&self, name: &str) -> &[Sample] {
        self.metrics.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &MetricName> {
        self.names.iter()
    }

    /// Number of distinct metric names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.metrics.values().map(Vec::len).sum()
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn fetched_at(&self) -> Timestamp {
        self.fetched_at
    }
}
