use crate::context::Context;
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::{PResult, ParseError};
use crate::parser::Parser;

/// Parser that matches only at the end of the input
pub struct Eoi;

impl<'code> Parser<'code> for Eoi {
    type Output = ();

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let cursor = ctx.skip(cursor);
        if cursor.eos() {
            Ok(((), cursor))
        } else {
            Err(ctx.soft(ParseError::expected("end of input", cursor)))
        }
    }
}

/// Convenience function to create an Eoi parser
pub fn eoi() -> Eoi {
    Eoi
}
