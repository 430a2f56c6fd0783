use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::PResult;
use std::rc::Rc;

/// Core parser trait for parser combinators
///
/// The attribute a parser produces is its `Output`; composing parsers computes
/// the composed `Output` in the type system, so the shape of every grammar's
/// result is fixed before any input is seen.
pub trait Parser<'code> {
    type Output;

    /// Attempt to parse from the given cursor position
    ///
    /// Returns the attribute and the advanced cursor on success. On failure no
    /// cursor is returned, so the caller's copy still marks where the attempt
    /// started. The same `Context` is threaded through every sub-parse.
    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output>;
}

impl<'code, P> Parser<'code> for &P
where
    P: Parser<'code> + ?Sized,
{
    type Output = P::Output;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        (**self).parse(cursor, ctx)
    }
}

impl<'code, P> Parser<'code> for Box<P>
where
    P: Parser<'code> + ?Sized,
{
    type Output = P::Output;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        (**self).parse(cursor, ctx)
    }
}

impl<'code, P> Parser<'code> for Rc<P>
where
    P: Parser<'code> + ?Sized,
{
    type Output = P::Output;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        (**self).parse(cursor, ctx)
    }
}
