use crate::context::Context;
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::PResult;
use crate::parser::Parser;

/// Parser combinator whose attribute is the input its body matched
///
/// Input skipped before the body is not part of the slice.
pub struct Raw<P> {
    parser: P,
}

impl<P> Raw<P> {
    pub fn new(parser: P) -> Self {
        Raw { parser }
    }
}

impl<'code, P> Parser<'code> for Raw<P>
where
    P: Parser<'code>,
{
    type Output = &'code str;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let start = ctx.skip(cursor);
        let (_, end) = self.parser.parse(start, ctx)?;
        let matched = start
            .source()
            .get(start.position()..end.position())
            .unwrap_or_default();
        Ok((matched, end))
    }
}

/// Convenience function to create a Raw parser
pub fn raw<'code, P>(parser: P) -> Raw<P>
where
    P: Parser<'code>,
{
    Raw::new(parser)
}

/// Extension trait to add .raw() method support for parsers
pub trait RawExt<'code>: Parser<'code> + Sized {
    fn raw(self) -> Raw<Self> {
        Raw::new(self)
    }
}

/// Implement RawExt for all parsers
impl<'code, P> RawExt<'code> for P where P: Parser<'code> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::prelude::*;

    #[test]
    fn test_raw_returns_matched_slice() {
        let data = "foo_bar1 = 3";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let identifier = alpha().then(alnum().or(ch('_')).repeated()).raw();

        let (name, cursor) = identifier.parse(cursor, &mut ctx).unwrap();
        assert_eq!(name, "foo_bar1");
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_raw_excludes_skipped_prefix() {
        let data = "   42";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::from_config(data, Config::new().skip(space()));
        let parser = digit().repeated().at_least(1).raw();

        let (text, _) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(text, "42");
    }

    #[test]
    fn test_raw_multibyte() {
        let data = "héllo wörld";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = alpha().repeated().raw();

        let (word, _) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(word, "héllo");
    }
}
