//! Reading and writing of OFX 1.x (SGML) documents as property trees, with converters from
//! those trees to typed financial entities.
//!
//! ```no_run
//! use ofx_tree::convert::OfxPropertyConverter;
//!
//! let document = ofx_tree::from_str(&std::fs::read_to_string("statement.ofx")?)?;
//! let converter = OfxPropertyConverter::default();
//! for set in &document.message_sets {
//!     for message in &set.messages {
//!         if let Some(transactions) = converter.get_transaction_list(&message.to_property()) {
//!             println!("{} transactions, total {}", transactions.len(), transactions.total());
//!         }
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[macro_use]
mod macros;

pub mod convert;
mod error;
pub mod models;
pub mod ofx;
pub mod parse;
pub mod write;

use std::io::{Read, Write};

pub use error::{Error, Result};
use ofx::Document;
use parse::sgml::{parse_document, ParseOptions};
use write::{write_document, WriteOptions};

/// Reads a document with the default [`ParseOptions`].
pub fn from_str(input: &str) -> Result<Document> {
    from_str_with(input, ParseOptions::default())
}

pub fn from_str_with(input: &str, options: ParseOptions) -> Result<Document> {
    parse_document(input, options)
}

/// Reads a document from a UTF-8 byte stream.
pub fn from_reader<R: Read>(mut reader: R) -> Result<Document> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    from_str(&input)
}

/// Writes a document, on one line unless `indent` is set.
pub fn to_string(document: &Document, indent: bool) -> Result<String> {
    to_string_with(document, WriteOptions { indent })
}

pub fn to_string_with(document: &Document, options: WriteOptions) -> Result<String> {
    let mut out = String::new();
    write_document(&mut out, document, options)?;
    Ok(out)
}

pub fn to_writer<W: Write>(mut writer: W, document: &Document, indent: bool) -> Result<()> {
    writer.write_all(to_string(document, indent)?.as_bytes())?;
    Ok(())
}
