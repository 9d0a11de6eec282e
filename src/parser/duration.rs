use std::time::Duration;

use nom::{branch::alt, bytes::complete::tag, character::complete::digit1};

use super::result::{IResult, ParseError, Span};
use crate::error::{Error, Result};

pub fn parse_duration(s: &str) -> Result<Duration> {
    match duration(Span::new(s)) {
        Ok((rest, d)) if rest.fragment().is_empty() => Ok(d),
        Ok((rest, _)) => Err(Error::from(format!(
            "unexpected \"{}\" in duration literal \"{}\"",
            rest.fragment(),
            s
        ))),
        Err(e) => Err(Error::from(ParseError::from(e).message())),
    }
}

/// Parse Go-like duration string: `250ms`, `1m30s`.
/// - Only positive durations.
/// - No fractional units.
/// - Units are always ordered from longest to shortest.
pub(super) fn duration(input: Span) -> IResult<Duration> {
    let (rest, duration) = duration_inner(input, Unit::Hour)?;

    if duration == Duration::from_millis(0) {
        return Err(nom::Err::Failure(ParseError::new(
            "duration must be greater than 0",
            input,
        )));
    }

    Ok((rest, duration))
}

#[derive(Clone, Copy)]
enum Unit {
    Millisecond,
    Second,
    Minute,
    Hour,
}

impl Unit {
    fn from_literal(u: &str) -> Option<Self> {
        use Unit::*;
        match u {
            "h" => Some(Hour),
            "m" => Some(Minute),
            "s" => Some(Second),
            "ms" => Some(Millisecond),
            _ => None,
        }
    }

    fn milliseconds(self) -> u64 {
        use Unit::*;
        match self {
            Millisecond => 1,
            Second => 1000,
            Minute => 60 * 1000,
            Hour => 60 * 60 * 1000,
        }
    }

    fn descendant(self) -> Option<Self> {
        use Unit::*;
        match self {
            Millisecond => None,
            Second => Some(Millisecond),
            Minute => Some(Second),
            Hour => Some(Minute),
        }
    }
}

fn duration_inner(input: Span, max_allowed_unit: Unit) -> IResult<Duration> {
    let (rest, multiplier) = digit1(input)?;

    let (rest, unit) = alt((tag("ms"), tag("s"), tag("m"), tag("h")))(rest)?;

    let unit = match Unit::from_literal(unit.fragment()) {
        Some(unit) if unit.milliseconds() <= max_allowed_unit.milliseconds() => unit,
        _ => {
            return Err(nom::Err::Failure(ParseError::new(
                "invalid duration literal",
                input,
            )))
        }
    };

    let duration = multiplier
        .fragment()
        .parse::<u32>()
        .ok()
        .and_then(|m| Duration::from_millis(unit.milliseconds()).checked_mul(m))
        .ok_or_else(|| nom::Err::Failure(ParseError::new("duration overflow", input)))?;

    let next_unit = match unit.descendant() {
        Some(next_unit) => next_unit,
        None => return Ok((rest, duration)),
    };

    let (rest, more_duration) = match duration_inner(rest, next_unit) {
        Ok((rest, more_duration)) => (rest, more_duration),
        Err(nom::Err::Error(_)) => (rest, Duration::from_millis(0)),
        Err(e) => return Err(e),
    };

    let total = duration
        .checked_add(more_duration)
        .ok_or_else(|| nom::Err::Failure(ParseError::new("duration overflow", input)))?;
    Ok((rest, total))
}
