//! Parsers for OFX SGML element names and values.

use std::borrow::Cow;

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take, take_till, take_until},
    character::complete::u32,
    combinator::{all_consuming, map, opt, value},
    multi::many0,
    sequence::{preceded, tuple},
    IResult,
};

use crate::ofx::{value::parse_enum, Direction, MessageSet, MessageSetType};

/// Parses a character entity, or a lone `&` that starts none.
fn entity(input: &str) -> IResult<&str, &str> {
    alt((
        value("<", tag("&lt;")),
        value(">", tag("&gt;")),
        value("&", tag("&amp;")),
        value(" ", tag("&nbsp;")),
        take(1u8),
    ))(input)
}

/// Parses the text of an element, decoding character entities.
pub(crate) fn elem_value(input: &str) -> IResult<&str, Cow<'_, str>> {
    map(many0(alt((is_not("&"), entity))), |vs: Vec<&str>| {
        match vs.len() {
            0 => Cow::Borrowed(""),
            1 => Cow::Borrowed(vs[0]),
            _ => Cow::Owned(vs.concat()),
        }
    })(input)
}

/// Decodes the character entities of element text.
pub fn decode_value(input: &str) -> Cow<'_, str> {
    match all_consuming(elem_value)(input) {
        Ok((_, decoded)) => decoded,
        Err(_) => Cow::Borrowed(input),
    }
}

fn escape_markup(input: &str, escaped: &mut String) {
    for c in input.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            c => escaped.push(c),
        }
    }
}

/// Escapes the characters that would otherwise read back as markup.
///
/// Spaces at either end are written as `&nbsp;`, since element text is read trimmed.
pub fn escape_value(input: &str) -> Cow<'_, str> {
    let after_lead = input.trim_start_matches(' ');
    let body = after_lead.trim_end_matches(' ');
    let lead = input.len() - after_lead.len();
    let trail = after_lead.len() - body.len();
    if lead == 0 && trail == 0 && !input.contains(|c: char| matches!(c, '<' | '>' | '&')) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 8);
    escaped.push_str(&"&nbsp;".repeat(lead));
    escape_markup(body, &mut escaped);
    escaped.push_str(&"&nbsp;".repeat(trail));
    Cow::Owned(escaped)
}

/// Parses a message set name `<CATEGORY>MSGS<RQ|RS>V<version>` into its parts.
fn message_set_name(input: &str) -> IResult<&str, (&str, Direction, Option<u32>)> {
    tuple((
        take_until("MSGS"),
        preceded(
            tag("MSGS"),
            alt((
                value(Direction::Request, tag("RQ")),
                value(Direction::Response, tag("RS")),
                value(Direction::Unknown, take_till(|c: char| c == 'V')),
            )),
        ),
        opt(preceded(tag("V"), u32)),
    ))(input)
}

/// Describes the message set opened by the element `name`.
///
/// Names that do not follow the message set pattern still describe a set, of unknown type and
/// direction, version 0.
pub fn message_set_from_name(name: &str) -> MessageSet {
    let upper = name.trim().to_ascii_uppercase();
    let (set_type, direction, version) = match message_set_name(&upper) {
        Ok((_, (category, direction, version))) => (
            parse_enum::<MessageSetType>(category),
            direction,
            version.unwrap_or(0),
        ),
        Err(_) => (MessageSetType::Unknown, Direction::Unknown, 0),
    };
    MessageSet {
        name: String::from(name.trim()),
        set_type,
        direction,
        version,
        messages: Vec::new(),
    }
}
