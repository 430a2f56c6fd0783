use crate::context::{Context, Flags};
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::{CodeLoc, PResult, ParseError};
use crate::parser::Parser;
use crate::position::Span;

/// Parser combinator that runs a semantic action after its body matched
///
/// The action gets the body's attribute by mutable reference and the
/// context. While it runs, `Context::span` is the matched input and
/// `Context::pass` starts out `true`; calling `Context::reject` turns the
/// match into a soft failure at the position the body started from.
pub struct Action<P, F> {
    parser: P,
    action: F,
}

impl<P, F> Action<P, F> {
    pub fn new(parser: P, action: F) -> Self {
        Action { parser, action }
    }
}

impl<'code, P, F> Parser<'code> for Action<P, F>
where
    P: Parser<'code>,
    F: Fn(&mut P::Output, &mut Context<'code, '_>),
{
    type Output = P::Output;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let start = ctx.skip(cursor);
        let flags = ctx.replace_flags(ctx.flags() | Flags::IN_APPLY_PARSER);
        let result = self.parser.parse(start, ctx);
        ctx.replace_flags(flags);
        let (mut value, end) = result?;

        let span = Span::new(start.source(), start.position(), end.position());
        let outer_span = ctx.replace_span(Some(span));
        let outer_pass = ctx.replace_pass(true);
        (self.action)(&mut value, ctx);
        let pass = ctx.replace_pass(outer_pass);
        ctx.replace_span(outer_span);

        if pass {
            Ok((value, end))
        } else {
            Err(ctx.soft(ParseError::Rejected {
                loc: CodeLoc::at(start),
            }))
        }
    }
}

/// Convenience function to create an Action parser
pub fn action<'code, P, F>(parser: P, action: F) -> Action<P, F>
where
    P: Parser<'code>,
    F: Fn(&mut P::Output, &mut Context<'_, '_>),
{
    Action::new(parser, action)
}

/// Extension trait to add .action() method support for parsers
pub trait ActionExt<'code>: Parser<'code> + Sized {
    fn action<F>(self, action: F) -> Action<Self, F>
    where
        F: Fn(&mut Self::Output, &mut Context<'_, '_>),
    {
        Action::new(self, action)
    }
}

/// Implement ActionExt for all parsers
impl<'code, P> ActionExt<'code> for P where P: Parser<'code> {}
