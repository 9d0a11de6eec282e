use log::trace;
use nom::{
    bytes::complete::{is_not, take_till},
    character::complete::char as nom_char,
    combinator::{all_consuming, opt, rest as nom_rest},
    multi::separated_list1,
    sequence::{preceded, separated_pair},
    Slice,
};

use super::ast::{Constraints, Selector};
use super::result::{IResult, ParseError, Span};
use crate::error::{Error, Result};
use crate::model::{LabelName, LabelValue};

/// Parse a `metric_name` or `metric_name{k1=v1,k2="v2",...}` selector.
///
/// The grammar is deliberately loose: everything before the first `{` is the
/// metric name, trailing `}` are dropped (a missing one is tolerated), and
/// label values may or may not be double-quoted. There is no escaping, so a
/// value can't contain `,`, `=` or `"`. Clauses that would silently change
/// meaning because of that (a second `=`, a dangling quote) are rejected.
pub fn parse_selector(input: &str) -> Result<Selector> {
    let (_, selector) = selector(Span::new(input)).map_err(|e| {
        let e = ParseError::from(e);
        Error::MalformedSelector {
            selector: input.to_owned(),
            offset: e.offset(),
            message: e.message().to_owned(),
        }
    })?;

    trace!("parsed selector {:?} as {}", input, selector);
    Ok(selector)
}

fn selector(input: Span) -> IResult<Selector> {
    // metric_name | metric_name LEFT_BRACE label_clauses RIGHT_BRACE
    let (rest, name) = take_till(|c: char| c == '{')(input)?;
    let (rest, body) = opt(preceded(nom_char('{'), nom_rest))(rest)?;

    let constraints = match body {
        Some(body) => label_constraints(without_closing_brace(body))?.1,
        None => Constraints::new(),
    };

    Ok((rest, Selector::new(*name.fragment(), constraints)))
}

fn without_closing_brace(body: Span) -> Span {
    let kept = body.fragment().trim_end_matches('}').len();
    body.slice(..kept)
}

fn label_constraints(input: Span) -> IResult<Constraints> {
    // EMPTY | label_clause (COMMA label_clause)*
    if input.fragment().is_empty() {
        return Ok((input, Constraints::new()));
    }

    let (rest, clauses) = separated_list1(nom_char(','), take_till(|c: char| c == ','))(input)?;

    // Repeated label names: the last one wins.
    let mut constraints = Constraints::new();
    for clause in clauses {
        let (_, (name, value)) = label_clause(clause)?;
        constraints.insert(name, value);
    }

    Ok((rest, constraints))
}

fn label_clause(input: Span) -> IResult<(LabelName, LabelValue)> {
    // label_name EQL label_value
    let (rest, (name, value)) = all_consuming(separated_pair(
        is_not("="),
        nom_char('='),
        take_till(|c: char| c == '='),
    ))(input)
    .map_err(|_: nom::Err<ParseError<'_>>| {
        nom::Err::Failure(ParseError::new(
            format!("expected label=value, found \"{}\"", input.fragment()),
            input,
        ))
    })?;

    let name = name.fragment().trim();
    if name.is_empty() {
        return Err(nom::Err::Failure(ParseError::new("empty label name", input)));
    }

    let (_, value) = label_value(value)?;
    Ok((rest, (name.to_owned(), value)))
}

fn label_value(input: Span) -> IResult<LabelValue> {
    // STRING | DQUOTE STRING DQUOTE
    let value = input.fragment().trim();
    let opening = value.starts_with('"');
    let closing = value.len() > 1 && value.ends_with('"');

    let value = match (opening, closing) {
        (true, true) => &value[1..value.len() - 1],
        (false, false) => value,
        _ => {
            return Err(nom::Err::Failure(ParseError::new(
                "unbalanced quotes in label value",
                input,
            )))
        }
    };

    Ok((input.slice(input.fragment().len()..), value.to_owned()))
}
