//! Reconstruction of the element tree from tokens.
//!
//! OFX SGML lets elements go unclosed: a leaf ends where the next tag starts, and a container
//! ends when an end tag for one of its ancestors appears. The reader keeps the open elements on
//! a stack; an end tag pops elements, closing each implicitly, until it meets the element it
//! names.

use log::{debug, trace, warn};

use super::element::{decode_value, message_set_from_name};
use super::token::{Token, TokenKind, Tokenizer};
use crate::error::Result;
use crate::ofx::{Message, MessageSet, MessageSetType, Property};

/// Reads message sets, messages and property trees from a token stream.
pub struct OfxReader<'a> {
    tokens: Tokenizer<'a>,
    /// Set once a message fails to read; nothing after it is trusted.
    failed: bool,
}

impl<'a> OfxReader<'a> {
    pub fn new(tokens: Tokenizer<'a>) -> Self {
        OfxReader {
            tokens,
            failed: false,
        }
    }

    /// Whether reading stopped at a message that could not be read.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Skips ahead to the next start tag, or the next one named `name`, and consumes it.
    /// Returns `None` at end of input.
    pub fn try_move_to_start(&mut self, name: Option<&str>) -> Result<Option<Token<'a>>> {
        self.move_to(TokenKind::StartTag, name)
    }

    /// Skips ahead to the next end tag named `name` and consumes it. Returns `None` at end of
    /// input.
    pub fn try_move_to_end(&mut self, name: &str) -> Result<Option<Token<'a>>> {
        self.move_to(TokenKind::EndTag, Some(name))
    }

    fn move_to(&mut self, kind: TokenKind, name: Option<&str>) -> Result<Option<Token<'a>>> {
        loop {
            let token = self.tokens.read()?;
            if token.kind == TokenKind::EndOfFile {
                return Ok(None);
            }
            if token.kind == kind && name.map_or(true, |n| token.text.eq_ignore_ascii_case(n)) {
                return Ok(Some(token));
            }
            trace!("skipping {:?}", token);
        }
    }

    /// Consumes whitespace and stray content, returning the next significant token unconsumed.
    fn peek_significant(&mut self) -> Result<Token<'a>> {
        loop {
            let token = self.tokens.peek()?;
            match token.kind {
                TokenKind::Whitespace => {}
                TokenKind::Content => debug!("skipping stray content {:?}", token.text),
                _ => return Ok(token),
            }
            self.tokens.read()?;
        }
    }

    /// Reads the element opened by the start tag `name`, which has already been consumed, up to
    /// and including its end tag.
    ///
    /// Returns `None` when input ends with elements still open, or when an end tag matches neither
    /// an open element nor a leaf closed before it. In `<A>note<B>1</B></A>` the leaf rule closes
    /// `A` at `<B>`; `</A>` then reopens it, making `B` its child.
    pub fn read_element(&mut self, name: &str) -> Result<Option<Property>> {
        let mut stack = vec![Property::new(name)];

        loop {
            let token = self.tokens.peek()?;
            match token.kind {
                TokenKind::EndOfFile => {
                    debug!("input ended inside <{}>", name);
                    return Ok(None);
                }
                TokenKind::Whitespace => {
                    self.tokens.read()?;
                }
                TokenKind::Content => {
                    self.tokens.read()?;
                    if let Some(top) = stack.last_mut() {
                        top.value = decode_value(token.text.trim_start()).into_owned();
                    }
                }
                TokenKind::StartTag => {
                    // An element holding a value is a leaf; the next tag ends it.
                    if stack.last().map_or(false, |top| top.is_leaf() && !top.value.is_empty()) {
                        if stack.len() == 1 {
                            return Ok(stack.pop());
                        }
                        close_top(&mut stack);
                    }
                    self.tokens.read()?;
                    stack.push(Property::new(token.text));
                }
                TokenKind::EndTag => {
                    self.tokens.read()?;
                    if !stack.iter().any(|p| p.is_named(token.text))
                        && reopen_leaf(&mut stack, token.text)
                    {
                        trace!("</{}> closes text that preceded its children", token.text);
                        continue;
                    }
                    loop {
                        let Some(top) = stack.pop() else {
                            return Ok(None);
                        };
                        let matched = top.is_named(token.text);
                        match stack.last_mut() {
                            Some(parent) => parent.push(top),
                            None if matched => return Ok(Some(top)),
                            None => {
                                debug!("</{}> matches no open element of <{}>", token.text, name);
                                return Ok(None);
                            }
                        }
                        if matched {
                            break;
                        }
                        trace!("implicitly closed an element before </{}>", token.text);
                    }
                }
            }
        }
    }

    /// Reads the next message: a start tag and everything up to its end tag.
    ///
    /// Returns `None` when no start tag remains or the message is not properly closed.
    pub fn try_read_message(&mut self) -> Result<Option<Message>> {
        let Some(open) = self.try_move_to_start(None)? else {
            return Ok(None);
        };
        Ok(self.read_element(open.text)?.map(Message::from_property))
    }

    /// Reads the next message set and its messages.
    ///
    /// Returns `None` at an end tag (normally `</OFX>`, which is consumed) or end of input. A set
    /// whose name is not recognized is still read. When one of its messages cannot be read the
    /// set is returned with the messages before it, and every later call returns `None`.
    pub fn try_read_message_set(&mut self) -> Result<Option<MessageSet>> {
        if self.failed {
            return Ok(None);
        }

        let open = self.peek_significant()?;
        match open.kind {
            TokenKind::StartTag => {
                self.tokens.read()?;
            }
            TokenKind::EndTag => {
                self.tokens.read()?;
                return Ok(None);
            }
            _ => return Ok(None),
        }

        let mut set = message_set_from_name(open.text);
        if set.set_type == MessageSetType::Unknown {
            debug!("reading unrecognized message set <{}>", open.text);
        }

        loop {
            let token = self.peek_significant()?;
            match token.kind {
                TokenKind::StartTag => match self.try_read_message()? {
                    Some(message) => set.push(message),
                    None => {
                        warn!(
                            "stopped reading at an unterminated message in <{}>",
                            set.name
                        );
                        self.failed = true;
                        return Ok(Some(set));
                    }
                },
                TokenKind::EndTag => {
                    if token.text.eq_ignore_ascii_case(&set.name) {
                        self.tokens.read()?;
                    } else {
                        debug!("</{}> implicitly closes <{}>", token.text, set.name);
                    }
                    return Ok(Some(set));
                }
                _ => {
                    debug!("input ended inside <{}>", set.name);
                    return Ok(Some(set));
                }
            }
        }
    }
}

/// Pops the innermost open element into its parent.
fn close_top(stack: &mut Vec<Property>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(top) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.push(top);
        }
    }
}

/// Turns the last closed leaf named `name` back into a container holding the siblings that
/// followed it. Returns false when no open element has such a child.
fn reopen_leaf(stack: &mut Vec<Property>, name: &str) -> bool {
    let is_closed_leaf = |p: &Property| p.is_leaf() && p.is_named(name);
    let Some(level) = stack
        .iter()
        .rposition(|p| p.children.iter().any(is_closed_leaf))
    else {
        return false;
    };
    while stack.len() > level + 1 {
        close_top(stack);
    }

    let Some(parent) = stack.last_mut() else {
        return false;
    };
    let Some(index) = parent.children.iter().rposition(is_closed_leaf) else {
        return false;
    };
    let siblings = parent.children.split_off(index + 1);
    parent.children[index].children.extend(siblings);
    true
}
