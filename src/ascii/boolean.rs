use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::{PResult, ParseError};
use crate::parser::Parser;

/// Parser that matches `true` or `false`
pub struct Boolean;

impl<'code> Parser<'code> for Boolean {
    type Output = bool;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let cursor = ctx.skip(cursor);
        let rest = cursor.rest();
        if rest.starts_with("true") {
            Ok((true, cursor.advance(4)))
        } else if rest.starts_with("false") {
            Ok((false, cursor.advance(5)))
        } else {
            Err(ctx.soft(ParseError::expected("boolean", cursor)))
        }
    }
}

/// Convenience function to create a Boolean parser
pub fn boolean() -> Boolean {
    Boolean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use rstest::rstest;

    #[rstest]
    #[case("true", Some(true), 4)]
    #[case("false", Some(false), 5)]
    #[case("trueish", Some(true), 4)]
    #[case("True", None, 0)]
    #[case("fals", None, 0)]
    #[case("", None, 0)]
    fn test_boolean(#[case] input: &str, #[case] expected: Option<bool>, #[case] consumed: usize) {
        let cursor = StrCursor::new(input);
        let mut ctx = Context::new(input);

        match boolean().parse(cursor, &mut ctx) {
            Ok((value, cursor)) => {
                assert_eq!(Some(value), expected);
                assert_eq!(cursor.position(), consumed);
            }
            Err(failure) => {
                assert_eq!(expected, None);
                assert_eq!(failure.position(), consumed);
            }
        }
    }
}
