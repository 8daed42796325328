//! The in-memory model of an OFX document.

pub use self::document::Document;
pub use self::header::Headers;
pub use self::message::{Direction, Message, MessageSet, MessageSetType};
pub use self::property::{Descendants, Property};

pub mod document;
pub mod header;
pub mod message;
pub mod property;
pub mod value;

ofx_enum! {
    pub enum Severity {
        Info = "INFO",
        Warn = "WARN",
        Error = "ERROR",
        #[default]
        Unknown = "UNKNOWN",
    }
}

/// The `<STATUS>` aggregate of a message.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Status {
    pub code: i64,
    pub message: String,
    pub severity: Severity,
}

impl Status {
    /// Reads a status from a `<STATUS>` property. Absent or unparsable fields take their defaults
    /// independently of each other.
    pub fn from_property(property: &Property) -> Self {
        Status {
            code: property.child("CODE").as_integer(0),
            message: property.child("MESSAGE").value.clone(),
            severity: property.child("SEVERITY").as_enum(),
        }
    }

    pub fn to_property(&self) -> Property {
        let mut status = Property::new("STATUS")
            .with_child(Property::leaf("CODE", self.code.to_string()))
            .with_child(Property::leaf("SEVERITY", self.severity.as_str()));
        if !self.message.is_empty() {
            status.push(Property::leaf("MESSAGE", self.message.as_str()));
        }
        status
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn status(code: &str, severity: &str, message: &str) -> Property {
        Property::new("STATUS")
            .with_child(Property::leaf("CODE", code))
            .with_child(Property::leaf("SEVERITY", severity))
            .with_child(Property::leaf("MESSAGE", message))
    }

    #[test_case(status("0", "INFO", "OK")     , 0    , Severity::Info   , "OK" ; "well formed"      )]
    #[test_case(status("2000", "error", "")   , 2000 , Severity::Error  , ""   ; "lowercase severity")]
    #[test_case(status("x", "WARN", "late")   , 0    , Severity::Warn   , "late"; "bad code"        )]
    #[test_case(status("15500", "BAD", "")    , 15500, Severity::Unknown, ""   ; "bad severity"     )]
    #[test_case(Property::new("STATUS")       , 0    , Severity::Unknown, ""   ; "empty"            )]
    fn status__from_property(input: Property, code: i64, severity: Severity, message: &str) {
        let status = Status::from_property(&input);

        assert_eq!(status.code, code);
        assert_eq!(status.severity, severity);
        assert_eq!(status.message, message);
    }

    #[test]
    fn status__to_property__omits_empty_message() {
        let status = Status {
            code: 0,
            message: String::new(),
            severity: Severity::Info,
        };

        assert_eq!(
            status.to_property(),
            Property::new("STATUS")
                .with_child(Property::leaf("CODE", "0"))
                .with_child(Property::leaf("SEVERITY", "INFO"))
        );
    }
}
