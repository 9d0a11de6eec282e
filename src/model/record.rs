use super::labels::Labels;
use super::sample::SampleValue;
use super::MetricName;

/// A decoded `(name, labels, value)` triple, before it is grouped into a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(pub MetricName, pub Labels, pub SampleValue);
