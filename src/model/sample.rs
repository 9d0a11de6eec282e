use super::labels::{LabelValue, Labels};

pub type SampleValue = f64;

/// One observed value of a metric, as decoded from a single retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    labels: Labels,
    value: SampleValue,
}

impl Sample {
    pub fn new(labels: Labels, value: SampleValue) -> Self {
        Self { labels, value }
    }

    #[inline]
    pub fn value(&self) -> SampleValue {
        self.value
    }

    #[inline]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn label(&self, name: &str) -> Option<&LabelValue> {
        self.labels.get(name)
    }
}
