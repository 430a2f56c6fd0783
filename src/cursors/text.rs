use crate::cursor::Cursor;

/// Cursor over UTF-8 text
///
/// Positions are byte offsets and always lie on a char boundary, so any two
/// positions produced by the cursor delimit a valid `&str` slice.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrCursor<'code> {
    Valid { data: &'code str, position: usize },
    EndOfFile { data: &'code str },
}

impl<'code> StrCursor<'code> {
    pub fn new(data: &'code str) -> Self {
        if data.is_empty() {
            return StrCursor::EndOfFile { data };
        }
        StrCursor::Valid { data, position: 0 }
    }

    /// Create a cursor at `position`, or `None` if it is not a char boundary
    pub fn at(data: &'code str, position: usize) -> Option<Self> {
        if !data.is_char_boundary(position) {
            return None;
        }
        if position >= data.len() {
            Some(StrCursor::EndOfFile { data })
        } else {
            Some(StrCursor::Valid { data, position })
        }
    }

    /// The input that has not been consumed yet
    pub fn rest(&self) -> &'code str {
        match self {
            StrCursor::Valid { data, position } => data.get(*position..).unwrap_or_default(),
            StrCursor::EndOfFile { .. } => "",
        }
    }

    /// Advance by `bytes`, which must end on a char boundary of the input
    ///
    /// Callers pass the byte length of something they just matched against
    /// `rest()`, which keeps the new position on a boundary.
    pub fn advance(self, bytes: usize) -> Self {
        match self {
            StrCursor::Valid { data, position } => {
                let target = position + bytes;
                StrCursor::at(data, target).unwrap_or(StrCursor::EndOfFile { data })
            }
            StrCursor::EndOfFile { data } => StrCursor::EndOfFile { data },
        }
    }
}

impl<'code> Cursor<'code> for StrCursor<'code> {
    type Element = char;

    fn value(&self) -> Option<Self::Element> {
        self.rest().chars().next()
    }

    fn next(self) -> Self {
        match self.value() {
            Some(c) => self.advance(c.len_utf8()),
            None => self,
        }
    }

    fn position(&self) -> usize {
        match self {
            StrCursor::Valid { position, .. } => *position,
            StrCursor::EndOfFile { data } => data.len(),
        }
    }

    fn source(&self) -> &'code str {
        match self {
            StrCursor::Valid { data, .. } => data,
            StrCursor::EndOfFile { data } => data,
        }
    }

    fn inner(self) -> (&'code str, usize) {
        match self {
            StrCursor::Valid { data, position } => (data, position),
            StrCursor::EndOfFile { data } => (data, data.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let data = "hello\nworld";
        let cursor = StrCursor::new(data);

        assert_eq!(cursor.value(), Some('h'));

        let cursor = cursor.next();
        assert_eq!(cursor.value(), Some('e'));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_multibyte_chars() {
        let data = "aé中🚀";
        let mut cursor = StrCursor::new(data);

        assert_eq!(cursor.value(), Some('a'));
        cursor = cursor.next();
        assert_eq!(cursor.value(), Some('é'));
        assert_eq!(cursor.position(), 1);
        cursor = cursor.next();
        assert_eq!(cursor.value(), Some('中'));
        assert_eq!(cursor.position(), 3);
        cursor = cursor.next();
        assert_eq!(cursor.value(), Some('🚀'));
        assert_eq!(cursor.position(), 6);
        cursor = cursor.next();
        assert!(matches!(cursor, StrCursor::EndOfFile { .. }));
        assert_eq!(cursor.position(), 10);
    }

    #[test]
    fn test_empty_data() {
        let cursor = StrCursor::new("");

        assert!(matches!(cursor, StrCursor::EndOfFile { .. }));
        assert!(cursor.eos());
        assert_eq!(cursor.value(), None);
    }

    #[test]
    fn test_next_at_eof_stays_at_eof() {
        let cursor = StrCursor::new("x").next();
        assert!(matches!(cursor, StrCursor::EndOfFile { .. }));

        let cursor = cursor.next();
        assert!(matches!(cursor, StrCursor::EndOfFile { .. }));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_rest_and_advance() {
        let cursor = StrCursor::new("let x = 1");
        assert_eq!(cursor.rest(), "let x = 1");

        let cursor = cursor.advance(4);
        assert_eq!(cursor.rest(), "x = 1");
        assert_eq!(cursor.position(), 4);

        let cursor = cursor.advance(5);
        assert!(cursor.eos());
        assert_eq!(cursor.rest(), "");
    }

    #[test]
    fn test_at_rejects_non_boundary() {
        let data = "é";
        assert!(StrCursor::at(data, 1).is_none());
        assert!(matches!(
            StrCursor::at(data, 2),
            Some(StrCursor::EndOfFile { .. })
        ));
        assert_eq!(StrCursor::at(data, 0), Some(StrCursor::new(data)));
    }

    #[test]
    fn test_copy_independence() {
        let data = "abcd";
        let cursor = StrCursor::new(data);

        let saved_at_a = cursor;

        let cursor = cursor.next();
        assert_eq!(cursor.value(), Some('b'));

        // Saved copies are unaffected
        assert_eq!(saved_at_a.value(), Some('a'));

        let saved_at_b = cursor;
        let cursor = cursor.next();
        assert_eq!(cursor.value(), Some('c'));

        assert_eq!(saved_at_a.next().value(), Some('b'));
        assert_eq!(saved_at_b.next().value(), Some('c'));
    }

    #[test]
    fn test_inner() {
        let data = "xyz";
        let cursor = StrCursor::new(data).next().next();

        let (source, pos) = cursor.inner();
        assert_eq!(source, "xyz");
        assert_eq!(pos, 2);
    }
}
