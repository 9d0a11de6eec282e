use super::formatter::{Formatter, Value};
use crate::error::Result;
use crate::model::{LabelsTrait, MetricName, Sample, Snapshot, TimestampTrait};

pub struct HumanReadableFormatter {}

impl HumanReadableFormatter {
    pub fn new() -> Self {
        Self {}
    }

    fn format_sample(&self, name: &MetricName, sample: &Sample) -> Vec<u8> {
        if sample.labels().is_empty() {
            format!("{} {}", name, sample.value()).into_bytes()
        } else {
            format!("{}{} {}", name, sample.labels().format(), sample.value()).into_bytes()
        }
    }

    fn format_snapshot(&self, snapshot: &Snapshot) -> Vec<u8> {
        format!(
            "# {} {}: {} samples of {} metrics",
            snapshot.fetched_at().to_string_millis(),
            snapshot.url(),
            snapshot.sample_count(),
            snapshot.len(),
        )
        .into_bytes()
    }
}

impl Default for HumanReadableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for HumanReadableFormatter {
    fn format(&self, value: &Value) -> Result<Vec<u8>> {
        match value {
            Value::Sample(name, sample) => Ok(self.format_sample(name, sample)),
            Value::Snapshot(snapshot) => Ok(self.format_snapshot(snapshot)),
        }
    }
}
