use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::{Failure, PResult};
use crate::parser::Parser;

/// Attribute of `either`: which alternative matched, with its attribute
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

/// Run `first`, then `second` from the same position if `first` failed softly
///
/// Hard failures are returned at once. When both fail softly the error that
/// got further into the input wins.
fn alternate<'code, A, B>(
    cursor: StrCursor<'code>,
    ctx: &mut Context<'code, '_>,
    first: impl FnOnce(StrCursor<'code>, &mut Context<'code, '_>) -> PResult<'code, A>,
    second: impl FnOnce(StrCursor<'code>, &mut Context<'code, '_>) -> PResult<'code, B>,
) -> Result<Either<(A, StrCursor<'code>), (B, StrCursor<'code>)>, Failure<'code>> {
    let first_error = match first(cursor, ctx) {
        Ok(result) => return Ok(Either::Left(result)),
        Err(Failure::Soft(error)) => error,
        Err(hard) => return Err(hard),
    };
    match second(cursor, ctx) {
        Ok(result) => Ok(Either::Right(result)),
        Err(Failure::Soft(error)) => Err(Failure::Soft(first_error.furthest(error))),
        Err(hard) => Err(hard),
    }
}

/// Parser combinator that tries the first parser, and if it fails, tries the second parser
pub struct Or<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Or<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Or { parser1, parser2 }
    }
}

impl<'code, P1, P2, O> Parser<'code> for Or<P1, P2>
where
    P1: Parser<'code, Output = O>,
    P2: Parser<'code, Output = O>,
{
    type Output = O;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let matched = alternate(
            cursor,
            ctx,
            |cursor, ctx| self.parser1.parse(cursor, ctx),
            |cursor, ctx| self.parser2.parse(cursor, ctx),
        )?;
        match matched {
            Either::Left(result) | Either::Right(result) => Ok(result),
        }
    }
}

/// Parser combinator like `Or` for alternatives with different attributes
pub struct EitherOf<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> EitherOf<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        EitherOf { parser1, parser2 }
    }
}

impl<'code, P1, P2> Parser<'code> for EitherOf<P1, P2>
where
    P1: Parser<'code>,
    P2: Parser<'code>,
{
    type Output = Either<P1::Output, P2::Output>;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let matched = alternate(
            cursor,
            ctx,
            |cursor, ctx| self.parser1.parse(cursor, ctx),
            |cursor, ctx| self.parser2.parse(cursor, ctx),
        )?;
        Ok(match matched {
            Either::Left((value, cursor)) => (Either::Left(value), cursor),
            Either::Right((value, cursor)) => (Either::Right(value), cursor),
        })
    }
}

/// Extension trait to add .or() and .either() method support for parsers
pub trait OrExt<'code>: Parser<'code> + Sized {
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        P: Parser<'code, Output = Self::Output>,
    {
        Or::new(self, other)
    }

    fn either<P>(self, other: P) -> EitherOf<Self, P>
    where
        P: Parser<'code>,
    {
        EitherOf::new(self, other)
    }
}

/// Implement OrExt for all parsers
impl<'code, P> OrExt<'code> for P where P: Parser<'code> {}

/// Convenience function to create an Or parser
pub fn or<'code, P1, P2, O>(parser1: P1, parser2: P2) -> Or<P1, P2>
where
    P1: Parser<'code, Output = O>,
    P2: Parser<'code, Output = O>,
{
    Or::new(parser1, parser2)
}

/// Convenience function to create an EitherOf parser
pub fn either<'code, P1, P2>(parser1: P1, parser2: P2) -> EitherOf<P1, P2>
where
    P1: Parser<'code>,
    P2: Parser<'code>,
{
    EitherOf::new(parser1, parser2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::error::ParseError;
    use crate::prelude::*;

    #[test]
    fn test_or_first_succeeds() {
        let data = "abc";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = or(ch('a'), ch('b'));

        let (c, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(c, 'a');
        assert_eq!(cursor.value().unwrap(), 'b');
    }

    #[test]
    fn test_or_second_succeeds() {
        let data = "bcd";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = or(ch('a'), ch('b'));

        let (c, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(c, 'b');
        assert_eq!(cursor.value().unwrap(), 'c');
    }

    #[test]
    fn test_or_both_fail() {
        let data = "xyz";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = or(ch('a'), ch('b'));

        let result = parser.parse(cursor, &mut ctx);
        assert!(matches!(result, Err(Failure::Soft(_))));
    }

    #[test]
    fn test_or_method_chain() {
        let data = "c";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = ch('a').or(ch('b')).or(ch('c'));

        let (c, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(c, 'c');
        assert!(matches!(cursor, StrCursor::EndOfFile { .. }));
    }

    #[test]
    fn test_or_second_alternative_starts_from_snapshot() {
        let data = "abd";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = string("abc").or(string("ab"));

        let (matched, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(matched, "ab");
        assert_eq!(cursor.value().unwrap(), 'd');
    }

    #[test]
    fn test_or_returns_furthest_error() {
        let data = "12x";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = uint::<u32>().then_ignore(lit(';')).or(alpha().map(|_| 0));

        let failure = parser.parse(cursor, &mut ctx).unwrap_err();
        assert_eq!(
            failure.into_error(),
            ParseError::expected("';'", StrCursor::new(data).advance(2))
        );
    }

    #[test]
    fn test_or_does_not_catch_hard_failure() {
        let data = "(x";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parenthesized = lit('(').then(digit()).committed().map(|(_, d)| d);
        let parser = parenthesized.or(any_char());

        let failure = parser.parse(cursor, &mut ctx).unwrap_err();
        assert!(failure.is_hard());
        assert_eq!(failure.position(), 1);
    }

    #[test]
    fn test_either_tags_alternative() {
        let data = "7b";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = uint::<u8>().either(alpha()).repeated();

        let (values, _) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(values, vec![Either::Left(7), Either::Right('b')]);
    }
}
