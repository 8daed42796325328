//! Reading of OFX 1.x (SGML) documents.
//!
//! A document is a block of `KEY:VALUE` header lines followed by an `<OFX>` element whose end
//! tags may be left out. Reading goes in three layers: [`Tokenizer`] scans tags and content,
//! the header readers consume the header block, and [`OfxReader`] rebuilds message sets and
//! messages from the tokens.

use log::{debug, warn};

pub use self::element::{decode_value, escape_value, message_set_from_name};
pub use self::header::{read_headers, try_force_read_headers, try_read_header};
pub use self::reader::OfxReader;
pub use self::source::Source;
pub use self::token::{Token, TokenKind, Tokenizer, DEFAULT_MAX_TOKEN_LEN};
use crate::error::Result;
use crate::ofx::Document;

mod element;
mod header;
mod reader;
mod source;
mod token;

/// Settings for reading a document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    /// The longest tag or content run accepted, in characters.
    pub max_token_len: usize,
    /// Whether to scan a malformed header block for the standard headers.
    pub force_headers: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
            force_headers: true,
        }
    }
}

/// Reads a whole document.
///
/// Missing structure is tolerated: a document without an `<OFX>` element has no message sets,
/// and reading stops at the first message that is not properly closed, keeping what came
/// before it. Only a token longer than `options.max_token_len` is an error.
pub fn parse_document(input: &str, options: ParseOptions) -> Result<Document> {
    let mut source = Source::new(input);
    let mut headers = read_headers(&mut source);

    if headers.is_empty() && options.force_headers {
        let mut forced = Source::new(input);
        match try_force_read_headers(&mut forced) {
            Some(recovered) => {
                warn!("recovered a malformed header block");
                headers = recovered;
                source = forced;
            }
            None => {
                warn!("no header block found");
                source = Source::new(input);
            }
        }
    }

    let mut document = Document::new(headers);
    let tokens = Tokenizer::from_source(source).with_max_token_len(options.max_token_len);
    let mut reader = OfxReader::new(tokens);

    if reader.try_move_to_start(Some("OFX"))?.is_none() {
        warn!("document has no <OFX> element");
        return Ok(document);
    }

    while let Some(set) = reader.try_read_message_set()? {
        debug!(
            "read <{}> with {} message(s)",
            set.name,
            set.messages.len()
        );
        document.message_sets.push(set);
    }
    if reader.failed() {
        warn!(
            "document truncated after {} message set(s)",
            document.message_sets.len()
        );
    }

    Ok(document)
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;
    use crate::ofx::{Direction, MessageSetType};

    const SIGNON: &str = "OFXHEADER:100\r\n\
        DATA:OFXSGML\r\n\
        VERSION:102\r\n\
        \r\n\
        <OFX>\r\n\
        <SIGNONMSGSRSV1>\r\n\
        <SONRS>\r\n\
        <STATUS><CODE>0<SEVERITY>INFO</STATUS>\r\n\
        <LANGUAGE>ENG\r\n\
        </SONRS>\r\n\
        </SIGNONMSGSRSV1>\r\n\
        </OFX>\r\n";

    #[test]
    fn parse_document__signon() {
        let document = parse_document(SIGNON, ParseOptions::default()).unwrap();

        assert_eq!(document.headers.len(), 3);
        assert_eq!(&document.headers["VERSION"], "102");
        assert_eq!(document.message_sets.len(), 1);

        let set = &document.message_sets[0];
        assert_eq!(set.set_type, MessageSetType::Signon);
        assert_eq!(set.direction, Direction::Response);
        assert_eq!(set.messages[0].find("LANGUAGE").map(|p| p.value.as_str()), Some("ENG"));
    }

    #[test]
    fn parse_document__no_body() {
        let document = parse_document("OFXHEADER:100\r\n\r\n", ParseOptions::default()).unwrap();

        assert_eq!(document.headers.len(), 1);
        assert!(document.message_sets.is_empty());
    }

    #[test]
    fn parse_document__no_headers() {
        let document = parse_document("<OFX><BANKMSGSRSV1></BANKMSGSRSV1></OFX>", ParseOptions::default())
            .unwrap();

        assert!(document.headers.is_empty());
        assert_eq!(document.message_sets.len(), 1);
    }

    #[test]
    fn parse_document__token_too_long() {
        let options = ParseOptions {
            max_token_len: 8,
            ..Default::default()
        };

        assert!(matches!(
            parse_document("<OFX><AVERYLONGTAGNAME></OFX>", options),
            Err(Error::TokenTooLong { limit: 8 })
        ));
    }
}
