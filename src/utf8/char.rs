use crate::context::Context;
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::{PResult, ParseError};
use crate::parser::Parser;
use std::borrow::Cow;

/// Parser that consumes a single character accepted by a predicate
///
/// Every character leaf is one of these; `expected` names what was wanted
/// when the character is missing or rejected.
pub struct Satisfy<F> {
    predicate: F,
    expected: Cow<'static, str>,
}

impl<F> Satisfy<F>
where
    F: Fn(char) -> bool,
{
    pub fn new(predicate: F, expected: impl Into<Cow<'static, str>>) -> Self {
        Satisfy {
            predicate,
            expected: expected.into(),
        }
    }
}

impl<'code, F> Parser<'code> for Satisfy<F>
where
    F: Fn(char) -> bool,
{
    type Output = char;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let cursor = ctx.skip(cursor);
        match cursor.value() {
            Some(c) if (self.predicate)(c) => Ok((c, cursor.next())),
            _ => Err(ctx.soft(ParseError::expected(self.expected.clone(), cursor))),
        }
    }
}

/// Parser that matches any single character
pub fn any_char() -> Satisfy<impl Fn(char) -> bool> {
    Satisfy::new(|_| true, "any character")
}

/// Parser that matches exactly `expected`
pub fn ch(expected: char) -> Satisfy<impl Fn(char) -> bool> {
    Satisfy::new(move |c| c == expected, format!("{:?}", expected))
}

/// Parser that matches a character in `low..=high`
pub fn char_range(low: char, high: char) -> Satisfy<impl Fn(char) -> bool> {
    Satisfy::new(
        move |c| (low..=high).contains(&c),
        format!("character in {:?}..={:?}", low, high),
    )
}

/// Parser that matches any character of `set`
pub fn one_of(set: &'static str) -> Satisfy<impl Fn(char) -> bool> {
    Satisfy::new(move |c| set.contains(c), format!("one of {:?}", set))
}

/// Parser that matches any character not in `set`
pub fn none_of(set: &'static str) -> Satisfy<impl Fn(char) -> bool> {
    Satisfy::new(move |c| !set.contains(c), format!("none of {:?}", set))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::utf8::class::space;

    #[test]
    fn test_any_char_multibyte() {
        let data = "é中🚀";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        let (c1, cursor) = any_char().parse(cursor, &mut ctx).unwrap();
        let (c2, cursor) = any_char().parse(cursor, &mut ctx).unwrap();
        let (c3, cursor) = any_char().parse(cursor, &mut ctx).unwrap();
        assert_eq!((c1, c2, c3), ('é', '中', '🚀'));
        assert!(matches!(cursor, StrCursor::EndOfFile { .. }));
    }

    #[test]
    fn test_any_char_empty_input() {
        let data = "";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        let failure = any_char().parse(cursor, &mut ctx).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "expected any character at line 1, byte offset 0"
        );
    }

    #[test]
    fn test_ch_is_case_sensitive() {
        let data = "a";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        assert!(ch('A').parse(cursor, &mut ctx).is_err());
        let (c, cursor) = ch('a').parse(cursor, &mut ctx).unwrap();
        assert_eq!(c, 'a');
        assert!(cursor.eos());
    }

    #[test]
    fn test_char_range() {
        let data = "m";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        assert!(char_range('a', 'z').parse(cursor, &mut ctx).is_ok());
        let failure = char_range('0', '9').parse(cursor, &mut ctx).unwrap_err();
        assert!(failure.to_string().starts_with("expected character in '0'..='9'"));
    }

    #[test]
    fn test_one_of_and_none_of() {
        let data = "+x";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        let (op, rest) = one_of("+-*/").parse(cursor, &mut ctx).unwrap();
        assert_eq!(op, '+');
        assert!(one_of("+-*/").parse(rest, &mut ctx).is_err());
        assert!(none_of("+-").parse(cursor, &mut ctx).is_err());
        assert_eq!(none_of("+-").parse(rest, &mut ctx).unwrap().0, 'x');
    }

    #[test]
    fn test_leaf_pre_skips() {
        let data = "\t\n x";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::from_config(data, Config::new().skip(space()));

        let (c, cursor) = ch('x').parse(cursor, &mut ctx).unwrap();
        assert_eq!(c, 'x');
        assert!(cursor.eos());
    }

    #[test]
    fn test_failure_does_not_consume_skipped_input() {
        let data = "  y";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::from_config(data, Config::new().skip(space()));

        // The failure points past the skipped input, the caller's cursor is untouched
        let failure = ch('x').parse(cursor, &mut ctx).unwrap_err();
        assert_eq!(failure.position(), 2);
        assert_eq!(cursor.position(), 0);
    }
}
