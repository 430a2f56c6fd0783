use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::{Failure, PResult};
use crate::parser::Parser;

/// Parser combinator that matches its body zero or one time
///
/// A soft failure of the body becomes `None` at the original position; hard
/// failures still propagate.
pub struct Optional<P> {
    parser: P,
}

impl<P> Optional<P> {
    pub fn new(parser: P) -> Self {
        Optional { parser }
    }
}

impl<'code, P> Parser<'code> for Optional<P>
where
    P: Parser<'code>,
{
    type Output = Option<P::Output>;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        match self.parser.parse(cursor, ctx) {
            Ok((value, cursor)) => Ok((Some(value), cursor)),
            Err(Failure::Soft(_)) => Ok((None, cursor)),
            Err(hard) => Err(hard),
        }
    }
}

/// Convenience function to create an Optional parser
pub fn optional<'code, P>(parser: P) -> Optional<P>
where
    P: Parser<'code>,
{
    Optional::new(parser)
}

/// Extension trait to add .optional() method support for parsers
pub trait OptionalExt<'code>: Parser<'code> + Sized {
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }
}

/// Implement OptionalExt for all parsers
impl<'code, P> OptionalExt<'code> for P where P: Parser<'code> {}
