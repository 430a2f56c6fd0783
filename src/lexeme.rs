use crate::context::{Context, Flags};
use crate::cursors::StrCursor;
use crate::error::PResult;
use crate::parser::Parser;

/// Parser combinator that matches its body as one token
///
/// Skips once before the body, then runs the body with skipping disabled.
pub struct Lexeme<P> {
    parser: P,
}

impl<P> Lexeme<P> {
    pub fn new(parser: P) -> Self {
        Lexeme { parser }
    }
}

impl<'code, P> Parser<'code> for Lexeme<P>
where
    P: Parser<'code>,
{
    type Output = P::Output;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let cursor = ctx.skip(cursor);
        let flags = ctx.replace_flags(ctx.flags() - Flags::USE_SKIP);
        let result = self.parser.parse(cursor, ctx);
        ctx.replace_flags(flags);
        result
    }
}

/// Convenience function to create a Lexeme parser
pub fn lexeme<'code, P>(parser: P) -> Lexeme<P>
where
    P: Parser<'code>,
{
    Lexeme::new(parser)
}

/// Extension trait to add .lexeme() method support for parsers
pub trait LexemeExt<'code>: Parser<'code> + Sized {
    fn lexeme(self) -> Lexeme<Self> {
        Lexeme::new(self)
    }
}

/// Implement LexemeExt for all parsers
impl<'code, P> LexemeExt<'code> for P where P: Parser<'code> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::cursor::Cursor;
    use crate::prelude::*;

    #[test]
    fn test_lexeme_disables_skipping_inside() {
        let data = "  ab";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::from_config(data, Config::new().skip(space()));
        let parser = ch('a').then(ch('b')).lexeme();

        let ((a, b), cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!((a, b), ('a', 'b'));
        assert!(cursor.eos());
    }

    #[test]
    fn test_lexeme_rejects_inner_whitespace() {
        let data = "a b";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::from_config(data, Config::new().skip(space()));
        let parser = lexeme(ch('a').then(ch('b')));

        let failure = parser.parse(cursor, &mut ctx).unwrap_err();
        assert_eq!(failure.position(), 1);
        // Flag restored after failure
        assert!(ctx.flags().contains(Flags::USE_SKIP));
    }
}
