//! Parsers for OFX documents.

pub mod sgml;
