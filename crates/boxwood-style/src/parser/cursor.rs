//! Character cursor over preprocessed stylesheet text.

/// A position in the source text that only moves forward.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Byte offset of the next character.
    pub(crate) const fn offset(&self) -> usize {
        self.pos
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn starts_with(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    pub(crate) fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `c` if it is next.
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume `pattern` if the text continues with it.
    pub(crate) fn eat_str(&mut self, pattern: &str) -> bool {
        if self.starts_with(pattern) {
            self.pos += pattern.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        let _ = self.take_while(char::is_whitespace);
    }

    pub(crate) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }
}

/// Characters allowed in names: properties, elements, classes and ids.
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_while_and_offsets() {
        let mut cursor = Cursor::new("  abc-d:e");
        cursor.skip_whitespace();
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.take_while(is_ident_char), "abc-d");
        assert!(cursor.eat(':'));
        assert!(!cursor.eat(':'));
        assert_eq!(cursor.consume(), Some('e'));
        assert!(cursor.is_empty());
        assert_eq!(cursor.consume(), None);
    }

    #[test]
    fn test_eat_str() {
        let mut cursor = Cursor::new(":hover");
        assert!(!cursor.eat_str(":active"));
        assert!(cursor.eat_str(":hover"));
        assert!(cursor.is_empty());
    }
}
