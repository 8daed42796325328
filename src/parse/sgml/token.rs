//! Scanning of OFX SGML text into tags and content.

use log::trace;

use super::Source;
use crate::error::{Error, Result};

/// Tokens longer than this are rejected unless configured otherwise.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 4096;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    StartTag,
    EndTag,
    Content,
    Whitespace,
    EndOfFile,
}

/// A lexical unit of the element body.
///
/// For tags `text` is the bare element name; for content it is the right-trimmed text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Token { kind, text }
    }

    /// Classifies a raw token: a tag `<NAME>` or `</NAME>`, blank text, or content.
    fn classify(raw: &'a str) -> Self {
        if raw.is_empty() {
            return Token::new(TokenKind::EndOfFile, "");
        }
        if raw.trim().is_empty() {
            return Token::new(TokenKind::Whitespace, raw);
        }
        if raw.len() >= 2 && raw.starts_with('<') && raw.ends_with('>') {
            let inner = &raw[1..raw.len() - 1];
            let kind = if inner.starts_with('/') {
                TokenKind::EndTag
            } else {
                TokenKind::StartTag
            };
            let name = inner.trim_matches(|c: char| c == '/' || c.is_whitespace());
            return Token::new(kind, name);
        }
        Token::new(TokenKind::Content, raw.trim_end())
    }
}

/// A single-lookahead scanner over OFX SGML text.
///
/// Also an iterator: it yields every token up to and including the first `EndOfFile`, then
/// stops.
pub struct Tokenizer<'a> {
    source: Source<'a>,
    peeked: Option<Token<'a>>,
    max_token_len: usize,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::from_source(Source::new(input))
    }

    /// Continues scanning where `source` left off, e.g. after the header block.
    pub fn from_source(source: Source<'a>) -> Self {
        Tokenizer {
            source,
            peeked: None,
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
            finished: false,
        }
    }

    pub fn with_max_token_len(mut self, max_token_len: usize) -> Self {
        self.max_token_len = max_token_len;
        self
    }

    /// Consumes and returns the next token.
    pub fn read(&mut self) -> Result<Token<'a>> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan(),
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<Token<'a>> {
        match self.peeked {
            Some(token) => Ok(token),
            None => {
                let token = self.scan()?;
                self.peeked = Some(token);
                Ok(token)
            }
        }
    }

    fn scan(&mut self) -> Result<Token<'a>> {
        let rest = self.source.rest();
        let end = if let Some(tag) = rest.strip_prefix('<') {
            // A tag runs to its '>', or stops short before a '<' that starts another one.
            match tag.find(|c: char| c == '<' || c == '>') {
                Some(i) if tag.as_bytes()[i] == b'>' => i + 2,
                Some(i) => i + 1,
                None => rest.len(),
            }
        } else {
            rest.find('<').unwrap_or(rest.len())
        };

        let raw = &rest[..end];
        if raw.len() > self.max_token_len && raw.chars().count() > self.max_token_len {
            return Err(Error::TokenTooLong {
                limit: self.max_token_len,
            });
        }
        self.source.advance(end);

        let token = Token::classify(raw);
        trace!("scanned {:?} at {}", token, self.source.position());
        Ok(token)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.read();
        self.finished = !matches!(token, Ok(Token { kind, .. }) if kind != TokenKind::EndOfFile);
        Some(token)
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::TokenKind::*;
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Tokenizer::new(input).map(|t| t.unwrap()).collect()
    }

    #[test]
    fn tokenizer__exhaustive_sequence() {
        let expected = vec![
            Token::new(StartTag, "one"),
            Token::new(StartTag, "two"),
            Token::new(StartTag, "three"),
            Token::new(Content, "3"),
            Token::new(StartTag, "four"),
            Token::new(Content, "4"),
            Token::new(EndTag, "four"),
            Token::new(EndTag, "two"),
            Token::new(EndTag, "one"),
            Token::new(EndOfFile, ""),
        ];

        assert_eq!(
            tokens("<one><two><three>3<four>4  </four></two></one>"),
            expected
        );
    }

    #[test_case("<TAG>"        , Token::new(StartTag  , "TAG")        ; "start tag"           )]
    #[test_case("</TAG>"       , Token::new(EndTag    , "TAG")        ; "end tag"             )]
    #[test_case("< TAG >"      , Token::new(StartTag  , "TAG")        ; "padded start tag"    )]
    #[test_case("</ TAG>"      , Token::new(EndTag    , "TAG")        ; "padded end tag"      )]
    #[test_case("<  >"         , Token::new(StartTag  , "")           ; "blank name"          )]
    #[test_case("text  \r\n"   , Token::new(Content   , "text")       ; "content right trimmed")]
    #[test_case(" \r\n\t"      , Token::new(Whitespace, " \r\n\t")    ; "whitespace"          )]
    #[test_case("a > b"        , Token::new(Content   , "a > b")      ; "bracket in content"  )]
    #[test_case("<OPEN"        , Token::new(Content   , "<OPEN")      ; "unterminated tag"    )]
    #[test_case(""             , Token::new(EndOfFile , "")           ; "eof"                 )]
    fn tokenizer__read(input: &str, expected: Token) {
        assert_eq!(Tokenizer::new(input).read().unwrap(), expected);
    }

    #[test]
    fn tokenizer__unterminated_tag_stops_before_next_tag() {
        assert_eq!(
            tokens("<A<B>"),
            vec![
                Token::new(Content, "<A"),
                Token::new(StartTag, "B"),
                Token::new(EndOfFile, ""),
            ]
        );
    }

    #[test]
    fn tokenizer__peek_is_idempotent() {
        let mut tokenizer = Tokenizer::new("<A>1<B>");

        let first = tokenizer.peek().unwrap();
        let second = tokenizer.peek().unwrap();
        assert_eq!(first, second);
        assert_eq!(tokenizer.read().unwrap(), first);
        assert_eq!(tokenizer.read().unwrap(), Token::new(Content, "1"));
        assert_eq!(tokenizer.peek().unwrap(), Token::new(StartTag, "B"));
    }

    #[test]
    fn tokenizer__iterator_ends_after_eof() {
        let mut tokenizer = Tokenizer::new("<A>");

        assert_eq!(tokenizer.next().unwrap().unwrap(), Token::new(StartTag, "A"));
        assert_eq!(tokenizer.next().unwrap().unwrap(), Token::new(EndOfFile, ""));
        assert!(tokenizer.next().is_none());
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn tokenizer__token_too_long() {
        let mut tokenizer = Tokenizer::new("<A>0123456789<B>").with_max_token_len(5);

        assert_eq!(tokenizer.read().unwrap(), Token::new(StartTag, "A"));
        assert!(matches!(
            tokenizer.read(),
            Err(Error::TokenTooLong { limit: 5 })
        ));
    }

    #[test]
    fn tokenizer__multibyte_content_within_limit() {
        let mut tokenizer = Tokenizer::new("ééé<A>").with_max_token_len(3);

        assert_eq!(tokenizer.read().unwrap(), Token::new(Content, "ééé"));
    }
}
