use std::io;

use log::trace;
use prometheus_parse::LineInfo;

use crate::error::{Error, Result};
use crate::model::{Labels, Record, SampleValue};
use crate::parser::parse_label_set;

pub trait Decoder: Send + Sync {
    fn decode(&self, text: &str) -> Result<Vec<Record>>;
}

/// Decodes the Prometheus text exposition format.
///
/// Lines are classified by `prometheus-parse`. Every sample line becomes one
/// record, in the order the endpoint exposed it. Histogram buckets and summary
/// quantiles are no exception: they stay `<name>_bucket{le=...}` and
/// `<name>{quantile=...}` records, and their label values keep the exposed
/// text (`le="1e+06"` is not rewritten to `1000000`).
///
/// A sample line with an unparseable value or label block fails the whole
/// decode. Comments and lines that are not samples are skipped.
pub struct PrometheusDecoder;

impl PrometheusDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PrometheusDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for PrometheusDecoder {
    fn decode(&self, text: &str) -> Result<Vec<Record>> {
        let mut records = vec![];

        for (n, line) in text.lines().enumerate() {
            match LineInfo::parse(line) {
                LineInfo::Sample {
                    metric_name,
                    labels,
                    value,
                    ..
                } => {
                    let value = value.parse::<SampleValue>().map_err(|_| {
                        invalid_line(n, format!("invalid sample value \"{}\"", value))
                    })?;
                    let labels = match labels {
                        Some(labels) => parse_label_set(labels)?,
                        None => Labels::new(),
                    };
                    records.push(Record(metric_name.to_owned(), labels, value));
                }
                LineInfo::Ignored if !line.trim_start().starts_with('#') => {
                    trace!("skipping unrecognized line {}: {}", n + 1, line);
                }
                _ => (),
            }
        }

        Ok(records)
    }
}

fn invalid_line(n: usize, message: String) -> Error {
    Error::Decode(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("line {}: {}", n + 1, message),
    ))
}
