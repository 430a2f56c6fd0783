use crate::context::{Context, Flags};
use crate::cursors::StrCursor;
use crate::error::PResult;
use crate::parser::Parser;
use std::rc::Rc;

/// A parser run between tokens to discard insignificant input
///
/// Any parser works as a skipper; its attribute is dropped and its failures
/// only end the skipping.
pub trait Skipper {
    fn skip_once<'code>(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> Option<StrCursor<'code>>;
}

impl<P> Skipper for P
where
    P: for<'code> Parser<'code>,
{
    fn skip_once<'code>(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> Option<StrCursor<'code>> {
        self.parse(cursor, ctx).ok().map(|(_, cursor)| cursor)
    }
}

/// Parser combinator that runs its body with a different skipper
pub struct SkipWith<P> {
    parser: P,
    skipper: Rc<dyn Skipper>,
}

impl<P> SkipWith<P> {
    pub fn new<S>(parser: P, skipper: S) -> Self
    where
        S: for<'code> Parser<'code> + 'static,
    {
        SkipWith {
            parser,
            skipper: Rc::new(skipper),
        }
    }
}

impl<'code, P> Parser<'code> for SkipWith<P>
where
    P: Parser<'code>,
{
    type Output = P::Output;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let skipper = ctx.replace_skipper(Some(Rc::clone(&self.skipper)));
        let flags = ctx.replace_flags(ctx.flags() | Flags::USE_SKIP);
        let result = self.parser.parse(cursor, ctx);
        ctx.replace_flags(flags);
        ctx.replace_skipper(skipper);
        result
    }
}

/// Parser combinator that turns skipping back on inside a `lexeme`
pub struct WithSkip<P> {
    parser: P,
}

impl<P> WithSkip<P> {
    pub fn new(parser: P) -> Self {
        WithSkip { parser }
    }
}

impl<'code, P> Parser<'code> for WithSkip<P>
where
    P: Parser<'code>,
{
    type Output = P::Output;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let flags = ctx.replace_flags(ctx.flags() | Flags::USE_SKIP);
        let result = self.parser.parse(cursor, ctx);
        ctx.replace_flags(flags);
        result
    }
}

/// Convenience function to create a SkipWith parser
pub fn skip_with<'code, P, S>(parser: P, skipper: S) -> SkipWith<P>
where
    P: Parser<'code>,
    S: for<'c> Parser<'c> + 'static,
{
    SkipWith::new(parser, skipper)
}

/// Extension trait to add .skip_with() and .with_skip() method support for parsers
pub trait SkipExt<'code>: Parser<'code> + Sized {
    fn skip_with<S>(self, skipper: S) -> SkipWith<Self>
    where
        S: for<'c> Parser<'c> + 'static,
    {
        SkipWith::new(self, skipper)
    }

    fn with_skip(self) -> WithSkip<Self> {
        WithSkip::new(self)
    }
}

/// Implement SkipExt for all parsers
impl<'code, P> SkipExt<'code> for P where P: Parser<'code> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::prelude::*;

    #[test]
    fn test_skip_with_installs_skipper() {
        let data = "  a  b";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = ch('a').then(ch('b')).skip_with(space());

        let ((a, b), cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!((a, b), ('a', 'b'));
        assert!(matches!(cursor, StrCursor::EndOfFile { .. }));
    }

    #[test]
    fn test_skip_with_restores_previous_state() {
        let data = " a";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = ch('a').skip_with(space());

        parser.parse(cursor, &mut ctx).unwrap();
        assert!(!ctx.flags().contains(Flags::USE_SKIP));
        assert!(!ctx.has_skipper());

        // Restored on failure too
        let result = ch('x').skip_with(space()).parse(cursor, &mut ctx);
        assert!(result.is_err());
        assert!(!ctx.flags().contains(Flags::USE_SKIP));
        assert!(!ctx.has_skipper());
    }

    #[test]
    fn test_failed_inner_skip_with_restores_outer_skipper() {
        let data = " a";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let inner = ch('x').skip_with(lit('-'));
        let parser = inner.or(ch('a')).skip_with(space());

        // `ch('a')` runs after the inner alternative failed and still skips spaces
        let (a, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(a, 'a');
        assert_eq!(cursor.position(), 2);
        assert!(!ctx.has_skipper());
    }

    #[test]
    fn test_inner_skip_with_failure_leaves_outer_state() {
        let data = " -x";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        let outer = ctx.replace_skipper(Some(Rc::new(space())));
        let flags = ctx.replace_flags(ctx.flags() | Flags::USE_SKIP);
        assert!(outer.is_none());

        // The inner skipper eats '-' but not the leading space
        let result = ch('x').skip_with(lit('-')).parse(cursor, &mut ctx);
        assert!(result.is_err());
        assert!(ctx.flags().contains(Flags::USE_SKIP));
        assert_eq!(ctx.skip(cursor).position(), 1);

        ctx.replace_flags(flags);
        ctx.replace_skipper(outer);
        assert!(!ctx.has_skipper());
    }

    #[test]
    fn test_with_skip_inside_lexeme() {
        let data = "ab c";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = ch('a')
            .then(ch('b'))
            .then(ch('c').with_skip())
            .lexeme()
            .skip_with(blank());

        let (((_, _), c), cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(c, 'c');
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_multi_char_skipper() {
        let data = "--x";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let skipper = lit('-').then(lit('-')).committed();
        let parser = ch('x').skip_with(skipper);

        let (x, _) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(x, 'x');
    }
}
