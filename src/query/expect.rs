use crate::error::{Error, Result};
use crate::model::{Sample, SampleValue};

/// An expected sample value, given either as a number or as its text form.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Number(SampleValue),
    Text(String),
}

impl Expected {
    pub fn to_value(&self) -> Result<SampleValue> {
        match self {
            Expected::Number(v) => Ok(*v),
            Expected::Text(s) => s.trim().parse::<SampleValue>().map_err(|_| {
                Error::InvalidExpectedValue {
                    value: s.to_owned(),
                }
            }),
        }
    }
}

impl From<f64> for Expected {
    fn from(v: f64) -> Self {
        Expected::Number(v)
    }
}

impl From<i32> for Expected {
    fn from(v: i32) -> Self {
        Expected::Number(v.into())
    }
}

impl From<u32> for Expected {
    fn from(v: u32) -> Self {
        Expected::Number(v.into())
    }
}

impl From<&str> for Expected {
    fn from(s: &str) -> Self {
        Expected::Text(s.to_owned())
    }
}

impl From<String> for Expected {
    fn from(s: String) -> Self {
        Expected::Text(s)
    }
}

/// Compare the first match against the expected value. Exact float equality,
/// no tolerance.
pub(super) fn check_first(selector: &str, matches: &[Sample], expected: &Expected) -> Result<()> {
    let first = matches.first().ok_or_else(|| Error::NoMatch {
        selector: selector.to_owned(),
    })?;

    let expected = expected.to_value()?;
    if first.value() == expected {
        Ok(())
    } else {
        Err(Error::ValueMismatch {
            selector: selector.to_owned(),
            expected,
            actual: first.value(),
        })
    }
}
