//! Readers for the `KEY:VALUE` header block of an OFX 1.x document.

use log::{debug, warn};
use nom::{
    bytes::complete::is_not,
    character::complete::char,
    combinator::{all_consuming, map, opt},
    sequence::separated_pair,
    IResult,
};

use super::Source;
use crate::ofx::header::{Headers, DEFAULT_HEADERS};

/// Parses a header line holding exactly one `:` separator.
fn header_line(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(separated_pair(
        is_not(":"),
        char(':'),
        map(opt(is_not(":")), |v| v.unwrap_or_default()),
    ))(input)
}

/// Returns true when the unread input starts the element body.
fn at_body(source: &Source) -> bool {
    source.rest().trim_start().starts_with('<')
}

/// Reads one header line.
///
/// Blank and malformed lines yield `None` but are still consumed; callers stop reading headers
/// at the first `None`. The element body is never consumed.
pub fn try_read_header(source: &mut Source) -> Option<(String, String)> {
    if at_body(source) {
        return None;
    }
    let line = source.read_line()?;
    if line.trim().is_empty() {
        return None;
    }
    let (_, (key, value)) = header_line(line).ok()?;
    let key = key.trim();
    if key.is_empty() {
        debug!("skipping header line with blank key: {:?}", line);
        return None;
    }
    Some((String::from(key), String::from(value.trim())))
}

/// Reads header lines until the first blank or malformed one.
pub fn read_headers(source: &mut Source) -> Headers {
    let mut headers = Headers::new();
    while let Some((key, value)) = try_read_header(source) {
        headers.set(key, value);
    }
    headers
}

/// Scans a malformed header block for the standard header keys.
///
/// Lines may be blank, indented, hold several `KEY:VALUE` fields or values containing `:`; text
/// that is not a standard key is skipped. Scanning stops at the element body. Succeeds only when
/// every standard key was found, leaving `source` at the body; otherwise `source` is left
/// untouched.
pub fn try_force_read_headers(source: &mut Source) -> Option<Headers> {
    let start = *source;
    let mut headers = Headers::new();

    while !at_body(source) {
        let Some(line) = source.read_line() else {
            break;
        };
        let mut fields = line.split_whitespace().peekable();
        while let Some(field) = fields.next() {
            let Some((key, value)) = field.split_once(':') else {
                continue;
            };
            let key = key.to_ascii_uppercase();
            if !DEFAULT_HEADERS.iter().any(|(k, _)| *k == key) || headers.contains_key(&key) {
                continue;
            }
            // `KEY: VALUE` splits into two fields.
            let value = match fields.peek() {
                Some(next) if value.is_empty() && !next.contains(':') => fields.next().unwrap_or(""),
                _ => value,
            };
            headers.set(key, value);
        }
    }

    if headers.len() == DEFAULT_HEADERS.len() {
        debug!("recovered {} headers from a malformed header block", headers.len());
        Some(headers)
    } else {
        warn!(
            "header recovery found {} of {} headers",
            headers.len(),
            DEFAULT_HEADERS.len()
        );
        *source = start;
        None
    }
}
