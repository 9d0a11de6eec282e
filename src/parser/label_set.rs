use std::io;

use nom::{
    bytes::complete::take_while1,
    character::complete::{char as nom_char, multispace0},
    combinator::{all_consuming, cut, opt},
    multi::separated_list0,
    sequence::{delimited, pair, separated_pair},
    Slice,
};

use super::result::{IResult, ParseError, Span};
use crate::error::{Error, Result};
use crate::model::{LabelName, LabelValue, Labels};

/// Parse the inside of an exposition label block, e.g. `code="200",le="1e+06"`.
///
/// Values are kept as exposed. Only the `\\`, `\"` and `\n` escapes are
/// interpreted.
pub fn parse_label_set(input: &str) -> Result<Labels> {
    let (_, labels) = label_set(Span::new(input)).map_err(|e| {
        let e = ParseError::from(e);
        Error::Decode(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "malformed labels \"{}\" at offset {}: {}",
                input,
                e.offset(),
                e.message()
            ),
        ))
    })?;
    Ok(labels)
}

fn label_set(input: Span) -> IResult<Labels> {
    // EMPTY | label_pair (COMMA label_pair)* COMMA?
    let (rest, pairs) = all_consuming(delimited(
        multispace0,
        separated_list0(nom_char(','), label_pair),
        opt(pair(nom_char(','), multispace0)),
    ))(input)?;

    Ok((rest, pairs.into_iter().collect()))
}

fn label_pair(input: Span) -> IResult<(LabelName, LabelValue)> {
    // label_name EQL DQUOTE label_value DQUOTE
    let (rest, (name, value)) = delimited(
        multispace0,
        separated_pair(
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
            delimited(multispace0, nom_char('='), multispace0),
            cut(quoted_value),
        ),
        multispace0,
    )(input)?;

    Ok((rest, (name.fragment().to_string(), value)))
}

fn quoted_value(input: Span) -> IResult<LabelValue> {
    let (mut rest, _) = nom_char('"')(input)?;
    let mut value = LabelValue::new();

    loop {
        let mut chars = rest.fragment().chars();
        match chars.next() {
            None => {
                return Err(nom::Err::Failure(ParseError::new(
                    "unterminated label value",
                    input,
                )))
            }
            Some('"') => return Ok((rest.slice(1..), value)),
            Some('\\') => {
                let escaped = match chars.next() {
                    Some('n') => '\n',
                    Some(c) if c == '\\' || c == '"' => c,
                    _ => {
                        return Err(nom::Err::Failure(ParseError::new(
                            "invalid escape in label value",
                            rest,
                        )))
                    }
                };
                value.push(escaped);
                rest = rest.slice(2..);
            }
            Some(c) => {
                value.push(c);
                rest = rest.slice(c.len_utf8()..);
            }
        }
    }
}
