use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::{PResult, ParseError};
use crate::parser::Parser;

/// Parser that matches the empty string
pub struct Eps;

impl<'code> Parser<'code> for Eps {
    type Output = ();

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        _ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        Ok(((), cursor))
    }
}

/// Parser that matches the empty string when a predicate on the context holds
pub struct EpsIf<F> {
    predicate: F,
}

impl<'code, F> Parser<'code> for EpsIf<F>
where
    F: Fn(&Context<'code, '_>) -> bool,
{
    type Output = ();

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        if (self.predicate)(ctx) {
            Ok(((), cursor))
        } else {
            Err(ctx.soft(ParseError::expected("condition to hold", cursor)))
        }
    }
}

/// Convenience function to create an Eps parser
pub fn eps() -> Eps {
    Eps
}

/// Convenience function to create an EpsIf parser
pub fn eps_if<F>(predicate: F) -> EpsIf<F>
where
    F: Fn(&Context<'_, '_>) -> bool,
{
    EpsIf { predicate }
}
