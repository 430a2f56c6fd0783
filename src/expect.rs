use crate::context::{Context, Flags};
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::{CodeLoc, Failure, PResult, ParseError};
use crate::parser::Parser;

/// Parser combinator that performs positive lookahead
///
/// Succeeds with () if the given parser matches at the current position and
/// fails if it does not. Never consumes any input regardless of outcome.
pub struct Expect<P> {
    parser: P,
}

impl<P> Expect<P> {
    pub fn new(parser: P) -> Self {
        Expect { parser }
    }
}

impl<'code, P> Parser<'code> for Expect<P>
where
    P: Parser<'code>,
{
    type Output = ();

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let flags = ctx.replace_flags(ctx.flags() - Flags::GEN_ATTRS);
        let result = self.parser.parse(cursor, ctx);
        ctx.replace_flags(flags);
        result.map(|_| ((), cursor))
    }
}

/// Parser combinator that performs negative lookahead
///
/// Succeeds with () if the given parser fails at the current position.
/// Fails if the given parser succeeds.
/// Never consumes any input regardless of outcome, and the failures of the
/// given parser never show up in diagnostics.
pub struct Not<P> {
    parser: P,
}

impl<P> Not<P> {
    pub fn new(parser: P) -> Self {
        Not { parser }
    }
}

impl<'code, P> Parser<'code> for Not<P>
where
    P: Parser<'code>,
{
    type Output = ();

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let flags = ctx.replace_flags(ctx.flags() - Flags::GEN_ATTRS);
        let furthest = ctx.take_furthest();
        let result = self.parser.parse(cursor, ctx);
        ctx.restore_furthest(furthest);
        ctx.replace_flags(flags);

        match result {
            Ok((_, end)) => {
                // Parser succeeded when we wanted it to fail
                let matched = cursor
                    .source()
                    .get(cursor.position()..end.position())
                    .unwrap_or_default();
                Err(Failure::Soft(ParseError::Unexpected {
                    found: format!("{:?}", matched).into(),
                    loc: CodeLoc::at(cursor),
                }))
            }
            Err(Failure::Soft(_)) => Ok(((), cursor)),
            Err(hard) => Err(hard),
        }
    }
}

/// Convenience function to create an Expect parser for positive lookahead
pub fn expect<'code, P>(parser: P) -> Expect<P>
where
    P: Parser<'code>,
{
    Expect::new(parser)
}

/// Convenience function to create a Not parser for negative lookahead
pub fn not<'code, P>(parser: P) -> Not<P>
where
    P: Parser<'code>,
{
    Not::new(parser)
}

/// Extension trait to add .and_predicate() and .not() method support for parsers
pub trait LookaheadExt<'code>: Parser<'code> + Sized {
    fn and_predicate(self) -> Expect<Self> {
        Expect::new(self)
    }

    fn not(self) -> Not<Self> {
        Not::new(self)
    }
}

/// Implement LookaheadExt for all parsers
impl<'code, P> LookaheadExt<'code> for P where P: Parser<'code> {}
