use crate::error::Result;
use crate::model::{MetricName, Sample, Snapshot};

pub enum Value<'a> {
    Sample(&'a MetricName, &'a Sample),
    Snapshot(&'a Snapshot),
}

pub trait Formatter {
    fn format(&self, value: &Value) -> Result<Vec<u8>>;
}
