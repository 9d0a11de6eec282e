use std::collections::BTreeMap;

use serde::Serialize;

use super::formatter::{Formatter, Value};
use crate::error::Result;
use crate::model::{LabelsTrait, SampleValue, Timestamp};

#[derive(Serialize)]
struct SampleRepr<'a> {
    name: &'a str,
    labels: BTreeMap<&'a String, &'a String>,
    value: SampleValue,
}

#[derive(Serialize)]
struct SnapshotRepr<'a> {
    url: &'a str,
    fetched_at: Timestamp,
    metrics: usize,
    samples: usize,
}

pub struct JSONFormatter {}

impl JSONFormatter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for JSONFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JSONFormatter {
    fn format(&self, value: &Value) -> Result<Vec<u8>> {
        let buf = match value {
            Value::Sample(name, sample) => serde_json::to_vec(&SampleRepr {
                name,
                labels: sample.labels().sorted(),
                value: sample.value(),
            }),
            Value::Snapshot(snapshot) => serde_json::to_vec(&SnapshotRepr {
                url: snapshot.url(),
                fetched_at: snapshot.fetched_at(),
                metrics: snapshot.len(),
                samples: snapshot.sample_count(),
            }),
        }?;
        Ok(buf)
    }
}
