//! Typed views of property values.
//!
//! Every accessor falls back to a default when the value is absent or unparsable; none of them
//! fail.

use std::str::FromStr;

use nom::{
    character::complete::{char, digit1, multispace0, one_of},
    bytes::complete::take_until,
    combinator::{map_res, opt, recognize},
    sequence::{delimited, pair, tuple},
    IResult,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::de::{
    value::{Error as DeError, StrDeserializer},
    DeserializeOwned, IntoDeserializer,
};
use time::{macros::format_description, Date, Duration, OffsetDateTime, PrimitiveDateTime};

use super::Property;
use crate::models::{
    AccountType, Currency, Language, PositionAccountType, PositionType, TransactionType,
};

/// Parses the hour offset of a date suffix such as `[-5:EST]` or `[ +3.5 : XYZ ]`.
fn offset_suffix(input: &str) -> IResult<&str, Decimal> {
    let (input, (sign, hours)) = delimited(
        pair(char('['), multispace0),
        pair(
            opt(one_of("+-")),
            map_res(recognize(pair(digit1, opt(pair(char('.'), digit1)))), Decimal::from_str),
        ),
        tuple((
            multispace0,
            opt(pair(char(':'), take_until("]"))),
            char(']'),
        )),
    )(input)?;

    Ok((input, if sign == Some('-') { -hours } else { hours }))
}

/// Splits a date value into the date-time text and the offset of its bracketed suffix.
///
/// An unreadable suffix counts as no offset; one too large to represent gives `None`.
fn split_offset(value: &str) -> (&str, Option<Duration>) {
    match value.find('[') {
        Some(i) => {
            let offset = match offset_suffix(&value[i..]) {
                Ok((_, hours)) => hours
                    .checked_mul(Decimal::from(3600))
                    .and_then(|seconds| seconds.round().to_i64())
                    .map(Duration::seconds),
                Err(_) => Some(Duration::ZERO),
            };
            (value[..i].trim_end(), offset)
        }
        None => (value, Some(Duration::ZERO)),
    }
}

fn parse_moment(value: &str) -> Option<PrimitiveDateTime> {
    PrimitiveDateTime::parse(
        value,
        format_description!("[year][month][day][hour][minute][second]"),
    )
    .or_else(|_| PrimitiveDateTime::parse(value, format_description!("[year][month][day][hour][minute]")))
    .or_else(|_| Date::parse(value, format_description!("[year][month][day]")).map(Date::midnight))
    .or_else(|_| {
        PrimitiveDateTime::parse(
            value,
            format_description!("[year][month][day][hour][minute][second].[subsecond]"),
        )
    })
    .ok()
}

/// Parses an OFX date-time.
///
/// A bracketed suffix is removed and its hour offset is added to the parsed value, which is
/// otherwise taken as UTC: `19640311075000[-5:EST]` is `1964-03-11 02:50:00 UTC`.
pub fn parse_date(value: &str) -> Option<OffsetDateTime> {
    let (moment, offset) = split_offset(value.trim());
    parse_moment(moment)?.assume_utc().checked_add(offset?)
}

/// Formats a date-time as `yyyyMMddHHmmss` in UTC.
pub fn format_date(value: OffsetDateTime) -> String {
    let utc = value.to_offset(time::UtcOffset::UTC);
    utc.format(format_description!("[year][month][day][hour][minute][second]"))
        .unwrap_or_default()
}

/// Parses a decimal number, ignoring surrounding whitespace and a leading `+`.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    Decimal::from_str(value.strip_prefix('+').unwrap_or(value)).ok()
}

/// Parses one of a closed set of OFX values, matched case-insensitively. Unknown text yields the
/// type's default variant.
pub fn parse_enum<T>(value: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let value = value.trim().to_ascii_uppercase();
    let deserializer: StrDeserializer<'_, DeError> = value.as_str().into_deserializer();
    T::deserialize(deserializer).unwrap_or_default()
}

impl Property {
    /// The value as a date-time, or `default`, or the current instant when no default is given.
    pub fn as_date(&self, default: Option<OffsetDateTime>) -> OffsetDateTime {
        self.as_date_opt()
            .or(default)
            .unwrap_or_else(OffsetDateTime::now_utc)
    }

    pub fn as_date_opt(&self) -> Option<OffsetDateTime> {
        parse_date(&self.value)
    }

    pub fn as_decimal(&self, default: Decimal) -> Decimal {
        parse_decimal(&self.value).unwrap_or(default)
    }

    pub fn as_integer(&self, default: i64) -> i64 {
        let value = self.value.trim();
        value
            .strip_prefix('+')
            .unwrap_or(value)
            .parse()
            .unwrap_or(default)
    }

    /// The first character of the value read as a flag: `1`, `Y` or `T` is true and `0`, `N`
    /// or `F` is false.
    pub fn as_boolean(&self, default: bool) -> bool {
        match self.value.trim_start().chars().next() {
            Some(c) => match c.to_ascii_uppercase() {
                '1' | 'Y' | 'T' => true,
                '0' | 'N' | 'F' => false,
                _ => default,
            },
            None => default,
        }
    }

    /// The value as one of a closed set of OFX values; see [`parse_enum`].
    pub fn as_enum<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        parse_enum(&self.value)
    }

    pub fn as_currency(&self) -> Currency {
        self.as_enum()
    }

    pub fn as_transaction_type(&self) -> TransactionType {
        self.as_enum()
    }

    pub fn as_account_type(&self) -> AccountType {
        self.as_enum()
    }

    pub fn as_position_type(&self) -> PositionType {
        self.as_enum()
    }

    pub fn as_position_account_type(&self) -> PositionAccountType {
        self.as_enum()
    }

    pub fn as_language(&self) -> Language {
        self.as_enum()
    }
}
