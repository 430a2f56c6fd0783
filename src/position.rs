use crate::context::Context;
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::PResult;
use crate::parser::Parser;

/// Represents a span in the source code with start and end positions
/// and a reference to the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'code> {
    /// Reference to the source code
    pub source: &'code str,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl<'code> Span<'code> {
    /// Create a new span
    pub fn new(source: &'code str, start: usize, end: usize) -> Self {
        Span { source, start, end }
    }

    /// Get the length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Get the text that this span covers
    pub fn as_str(&self) -> &'code str {
        self.source.get(self.start..self.end).unwrap_or_default()
    }
}

/// A parser combinator that captures the span of a successful parse
///
/// Input skipped before the body is not part of the span.
pub struct Spanned<P> {
    parser: P,
}

impl<P> Spanned<P> {
    pub fn new(parser: P) -> Self {
        Spanned { parser }
    }
}

impl<'code, P> Parser<'code> for Spanned<P>
where
    P: Parser<'code>,
{
    type Output = (P::Output, Span<'code>);

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let start = ctx.skip(cursor);
        let (output, new_cursor) = self.parser.parse(start, ctx)?;

        let span = Span::new(start.source(), start.position(), new_cursor.position());
        Ok(((output, span), new_cursor))
    }
}

/// Extension trait to add span tracking to any parser
pub trait SpannedExt<'code>: Parser<'code> + Sized {
    /// Wrap this parser to capture its span
    fn spanned(self) -> Spanned<Self> {
        Spanned::new(self)
    }
}

impl<'code, P> SpannedExt<'code> for P where P: Parser<'code> {}

/// Convenience function to create a Spanned combinator
pub fn spanned<P>(parser: P) -> Spanned<P> {
    Spanned::new(parser)
}
