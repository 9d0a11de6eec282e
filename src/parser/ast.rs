use std::collections::BTreeMap;
use std::fmt;

use crate::model::{LabelName, LabelValue, MetricName};

/// Required label values, keyed by label name.
pub type Constraints = BTreeMap<LabelName, LabelValue>;

/// A parsed `metric_name{k1="v1",k2="v2"}` selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    name: MetricName,
    constraints: Constraints,
}

impl Selector {
    pub fn new<N: Into<MetricName>>(name: N, constraints: Constraints) -> Self {
        Self {
            name: name.into(),
            constraints,
        }
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn into_parts(self) -> (MetricName, Constraints) {
        (self.name, self.constraints)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.constraints.is_empty() {
            return Ok(());
        }
        let clauses = self
            .constraints
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect::<Vec<_>>();
        write!(f, "{{{}}}", clauses.join(","))
    }
}
