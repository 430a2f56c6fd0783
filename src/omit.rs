use crate::context::{Context, Flags};
use crate::cursors::StrCursor;
use crate::error::PResult;
use crate::parser::Parser;

/// Parser combinator that matches its body and discards the attribute
///
/// The body runs with `Flags::GEN_ATTRS` cleared, so rules inside it do not
/// report to callbacks.
pub struct Omit<P> {
    parser: P,
}

impl<P> Omit<P> {
    pub fn new(parser: P) -> Self {
        Omit { parser }
    }
}

impl<'code, P> Parser<'code> for Omit<P>
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
        let (_, cursor) = result?;
        Ok(((), cursor))
    }
}

/// Convenience function to create an Omit parser
pub fn omit<'code, P>(parser: P) -> Omit<P>
where
    P: Parser<'code>,
{
    Omit::new(parser)
}

/// Extension trait to add .omit() method support for parsers
pub trait OmitExt<'code>: Parser<'code> + Sized {
    fn omit(self) -> Omit<Self> {
        Omit::new(self)
    }
}

/// Implement OmitExt for all parsers
impl<'code, P> OmitExt<'code> for P where P: Parser<'code> {}
