//! Writing of documents as OFX 1.x SGML.
//!
//! Leaf elements are written without end tags, the way OFX 1.x producers write them; containers
//! are always closed. Message sets are written in [`MessageSetType`] order rather than the
//! order they were read in.
//!
//! [`MessageSetType`]: crate::ofx::MessageSetType

use std::fmt::{self, Write};

use crate::error::Result;
use crate::ofx::{Document, MessageSet, Property};
use crate::parse::sgml::escape_value;

/// Spaces per nesting level when indenting.
pub const INDENT_WIDTH: usize = 2;

/// Settings for writing a document.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WriteOptions {
    /// Puts every tag after the first on its own line, indented by nesting depth.
    pub indent: bool,
}

struct SgmlWriter<'w, W> {
    out: &'w mut W,
    indent: bool,
    depth: usize,
    started: bool,
}

impl<'w, W: Write> SgmlWriter<'w, W> {
    fn new(out: &'w mut W, options: WriteOptions) -> Self {
        SgmlWriter {
            out,
            indent: options.indent,
            depth: 0,
            started: false,
        }
    }

    fn break_line(&mut self) -> fmt::Result {
        if self.indent && self.started {
            write!(self.out, "\r\n{:width$}", "", width = self.depth * INDENT_WIDTH)?;
        }
        self.started = true;
        Ok(())
    }

    fn open(&mut self, name: &str) -> fmt::Result {
        self.break_line()?;
        write!(self.out, "<{}>", name.to_ascii_uppercase())?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, name: &str) -> fmt::Result {
        self.depth = self.depth.saturating_sub(1);
        self.break_line()?;
        write!(self.out, "</{}>", name.to_ascii_uppercase())
    }

    fn property(&mut self, property: &Property) -> fmt::Result {
        if !property.is_leaf() {
            self.open(&property.name)?;
            if !property.value.is_empty() {
                write!(self.out, "{}", escape_value(&property.value))?;
            }
            for child in &property.children {
                self.property(child)?;
            }
            return self.close(&property.name);
        }

        let name = property.name.to_ascii_uppercase();
        self.break_line()?;
        if property.value.is_empty() {
            write!(self.out, "<{name}></{name}>")
        } else {
            write!(self.out, "<{name}>{}", escape_value(&property.value))
        }
    }
}

/// Writes `document` to a text sink.
pub fn write_document<W: Write>(out: &mut W, document: &Document, options: WriteOptions) -> Result<()> {
    if !document.headers.is_empty() {
        write!(out, "{}", document.headers)?;
    }

    let mut sets: Vec<&MessageSet> = document.message_sets.iter().collect();
    sets.sort_by_key(|set| set.set_type);

    let mut writer = SgmlWriter::new(out, options);
    writer.open("OFX")?;
    for set in sets {
        writer.property(&set.to_property())?;
    }
    writer.close("OFX")?;
    if options.indent {
        out.write_str("\r\n")?;
    }
    Ok(())
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ofx::{Direction, Headers, Message, MessageSetType};

    fn write(document: &Document, indent: bool) -> String {
        let mut out = String::new();
        write_document(&mut out, document, WriteOptions { indent }).unwrap();
        out
    }

    fn signon() -> MessageSet {
        MessageSet::new(MessageSetType::Signon, Direction::Response, 1).with_message(
            Message::new("SONRS")
                .with_property(Property::leaf("LANGUAGE", "ENG"))
                .with_property(Property::new("fi").with_child(Property::leaf("org", "A&B"))),
        )
    }

    #[test]
    fn write_document__compact() {
        let document = Document::default().with_message_set(signon());

        assert_eq!(
            write(&document, false),
            "<OFX><SIGNONMSGSRSV1><SONRS><LANGUAGE>ENG<FI><ORG>A&amp;B</FI></SONRS>\
             </SIGNONMSGSRSV1></OFX>"
        );
    }

    #[test]
    fn write_document__indented() {
        let headers: Headers = [("OFXHEADER", "100"), ("VERSION", "102")].into_iter().collect();
        let document = Document::new(headers).with_message_set(signon());

        let expected = "OFXHEADER:100\r\n\
                        VERSION:102\r\n\
                        \r\n\
                        <OFX>\r\n\
                        \x20 <SIGNONMSGSRSV1>\r\n\
                        \x20   <SONRS>\r\n\
                        \x20     <LANGUAGE>ENG\r\n\
                        \x20     <FI>\r\n\
                        \x20       <ORG>A&amp;B\r\n\
                        \x20     </FI>\r\n\
                        \x20   </SONRS>\r\n\
                        \x20 </SIGNONMSGSRSV1>\r\n\
                        </OFX>\r\n";
        assert_eq!(write(&document, true), expected);
    }

    #[test]
    fn write_document__orders_message_sets_by_type() {
        let document = Document::default()
            .with_message_set(MessageSet::new(MessageSetType::SecList, Direction::Response, 1))
            .with_message_set(MessageSet::new(MessageSetType::Investment, Direction::Response, 1))
            .with_message_set(signon());

        let written = write(&document, false);
        let signon = written.find("<SIGNONMSGSRSV1>").unwrap();
        let investment = written.find("<INVSTMTMSGSRSV1>").unwrap();
        let seclist = written.find("<SECLISTMSGSRSV1>").unwrap();
        assert!(signon < investment && investment < seclist);
    }

    #[test]
    fn write_document__blank_value_and_container_text() {
        let set = MessageSet::new(MessageSetType::Bank, Direction::Response, 1).with_message(
            Message::new("STMTTRNRS")
                .with_property(Property::leaf("X", " "))
                .with_property(Property::leaf("A", "note").with_child(Property::leaf("B", "1"))),
        );
        let document = Document::default().with_message_set(set);

        assert_eq!(
            write(&document, false),
            "<OFX><BANKMSGSRSV1><STMTTRNRS><X>&nbsp;<A>note<B>1</A></STMTTRNRS></BANKMSGSRSV1></OFX>"
        );
    }

    #[test]
    fn write_document__empty_leaf_and_empty_set() {
        let set = MessageSet::new(MessageSetType::Bank, Direction::Request, 1)
            .with_message(Message::new("STMTTRNRQ").with_property(Property::leaf("MEMO", "")));
        let document = Document::default().with_message_set(set);

        assert_eq!(
            write(&document, false),
            "<OFX><BANKMSGSRQV1><STMTTRNRQ><MEMO></MEMO></STMTTRNRQ></BANKMSGSRQV1></OFX>"
        );
    }
}
