/// A read position in OFX text, shared by the header readers and the tokenizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Source<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Source<'a> {
    pub fn new(input: &'a str) -> Self {
        Source { input, pos: 0 }
    }

    /// The unread remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consumes `len` bytes. `len` must fall on a character boundary of the remainder.
    pub(crate) fn advance(&mut self, len: usize) {
        self.pos = (self.pos + len).min(self.input.len());
    }

    /// Consumes and returns the next line without its terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        let (line, consumed) = match rest.find('\n') {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        self.advance(consumed);
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source__read_line() {
        let mut source = Source::new("A:1\r\nB:2\n\nrest");

        assert_eq!(source.read_line(), Some("A:1"));
        assert_eq!(source.read_line(), Some("B:2"));
        assert_eq!(source.read_line(), Some(""));
        assert_eq!(source.rest(), "rest");
        assert_eq!(source.read_line(), Some("rest"));
        assert_eq!(source.read_line(), None);
        assert!(source.is_empty());
    }
}
