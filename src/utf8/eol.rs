use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::{PResult, ParseError};
use crate::parser::Parser;

/// Parser that matches one line break
///
/// Accepts `"\r\n"` as a single break, or any one of the mandatory break
/// characters: LF, VT, FF, CR, NEL, LINE SEPARATOR and PARAGRAPH SEPARATOR.
pub struct Eol;

pub(crate) fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\u{000A}' | '\u{000B}' | '\u{000C}' | '\u{000D}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

impl<'code> Parser<'code> for Eol {
    type Output = ();

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let cursor = ctx.skip(cursor);
        let rest = cursor.rest();
        if rest.starts_with("\r\n") {
            return Ok(((), cursor.advance(2)));
        }
        match rest.chars().next() {
            Some(c) if is_line_break(c) => Ok(((), cursor.advance(c.len_utf8()))),
            _ => Err(ctx.soft(ParseError::expected("end of line", cursor))),
        }
    }
}

/// Convenience function to create an Eol parser
pub fn eol() -> Eol {
    Eol
}
