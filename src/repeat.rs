use crate::bound::Bound;
use crate::context::Context;
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::{Failure, PResult, ParseError};
use crate::parser::Parser;

/// Delimiter of an undelimited repetition; always matches, consumes nothing
#[derive(Debug, Copy, Clone, Default)]
pub struct NoDelimiter;

impl<'code> Parser<'code> for NoDelimiter {
    type Output = ();

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        _ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        Ok(((), cursor))
    }
}

/// Parser combinator that matches its body between `min` and `max` times
///
/// Greedy: it takes as many matches as the body and the bound allow. Each
/// iteration starts from a snapshot; an iteration that fails softly (in the
/// delimiter or the body) is discarded and ends the repetition. Hard failures
/// propagate. The repetition itself fails only when fewer than `min` items
/// matched.
pub struct Repeat<P, D = NoDelimiter> {
    parser: P,
    delimiter: D,
    min: usize,
    max: Bound,
}

impl<P> Repeat<P> {
    pub fn new(parser: P) -> Self {
        Repeat {
            parser,
            delimiter: NoDelimiter,
            min: 0,
            max: Bound::Unbounded,
        }
    }
}

impl<P, D> Repeat<P, D> {
    pub fn at_least(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    pub fn at_most(mut self, max: usize) -> Self {
        self.max = Bound::Finite(max);
        self
    }

    pub fn exactly(mut self, count: usize) -> Self {
        self.min = count;
        self.max = Bound::Finite(count);
        self
    }

    pub fn bounds(mut self, min: usize, max: Bound) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Require `delimiter` between consecutive items; its attribute is dropped
    pub fn separated_by<D2>(self, delimiter: D2) -> Repeat<P, D2> {
        Repeat {
            parser: self.parser,
            delimiter,
            min: self.min,
            max: self.max,
        }
    }
}

impl<'code, P, D> Parser<'code> for Repeat<P, D>
where
    P: Parser<'code>,
    D: Parser<'code>,
{
    type Output = Vec<P::Output>;

    fn parse(
        &self,
        mut cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let mut results = Vec::new();
        let mut last_error = None;

        while self.max.allows_more(results.len()) {
            let snapshot = cursor;
            let mut item_start = cursor;
            if !results.is_empty() {
                match self.delimiter.parse(item_start, ctx) {
                    Ok((_, next)) => item_start = next,
                    Err(Failure::Soft(error)) => {
                        last_error = Some(error);
                        break;
                    }
                    Err(hard) => return Err(hard),
                }
            }

            match self.parser.parse(item_start, ctx) {
                Ok((value, next)) => {
                    results.push(value);
                    cursor = next;
                    // An unbounded loop over a body that matches empty input would never end
                    let stalled = next.position() == snapshot.position();
                    if stalled && self.max.is_unbounded() && results.len() >= self.min {
                        break;
                    }
                }
                Err(Failure::Soft(error)) => {
                    last_error = Some(error);
                    break;
                }
                Err(hard) => return Err(hard),
            }
        }

        if results.len() < self.min {
            let error = last_error.unwrap_or_else(|| {
                ParseError::expected(format!("at least {} repetitions", self.min), cursor)
            });
            return Err(ctx.soft(error));
        }

        Ok((results, cursor))
    }
}

/// Convenience function to create a repetition of zero or more items
pub fn many<'code, P>(parser: P) -> Repeat<P>
where
    P: Parser<'code>,
{
    Repeat::new(parser)
}

/// Convenience function to create a repetition of one or more items
pub fn some<'code, P>(parser: P) -> Repeat<P>
where
    P: Parser<'code>,
{
    Repeat::new(parser).at_least(1)
}

/// Convenience function to create a delimited list of one or more items
pub fn separated_list<'code, P, D>(parser: P, delimiter: D) -> Repeat<P, D>
where
    P: Parser<'code>,
    D: Parser<'code>,
{
    Repeat::new(parser).at_least(1).separated_by(delimiter)
}

/// Convenience function to create a repetition of `min` to `max` items
pub fn repeat<'code, P>(parser: P, min: usize, max: Bound) -> Repeat<P>
where
    P: Parser<'code>,
{
    Repeat::new(parser).bounds(min, max)
}

/// Extension trait to add .repeated() method support for parsers
pub trait RepeatExt<'code>: Parser<'code> + Sized {
    fn repeated(self) -> Repeat<Self> {
        Repeat::new(self)
    }
}

/// Implement RepeatExt for all parsers
impl<'code, P> RepeatExt<'code> for P where P: Parser<'code> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use proptest::prelude::*;

    #[test]
    fn test_many_zero_matches() {
        let data = "xyz";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = many(ch('a'));

        let (results, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(results, vec![]);
        assert_eq!(cursor.value().unwrap(), 'x');
    }

    #[test]
    fn test_many_multiple_matches() {
        let data = "aaabcd";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = many(ch('a'));

        let (results, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(results, vec!['a', 'a', 'a']);
        assert_eq!(cursor.value().unwrap(), 'b');
    }

    #[test]
    fn test_many_empty_input() {
        let data = "";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = many(ch('a'));

        let (results, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert!(results.is_empty());
        assert!(matches!(cursor, StrCursor::EndOfFile { .. }));
    }

    #[test]
    fn test_some_requires_one() {
        let data = "xyz";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = some(ch('a'));

        let failure = parser.parse(cursor, &mut ctx).unwrap_err();
        assert!(!failure.is_hard());
        assert_eq!(failure.position(), 0);
    }

    #[test]
    fn test_some_multiple() {
        let data = "aab";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = some(ch('a'));

        let (results, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_separated_list_trailing_delimiter_not_consumed() {
        let data = "1,2,3,";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = separated_list(uint::<u32>(), lit(','));

        let (values, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn test_separated_list_single_item() {
        let data = "42";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = separated_list(uint::<u32>(), lit(','));

        let (values, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(values, vec![42]);
        assert!(cursor.eos());
    }

    #[test]
    fn test_exactly() {
        let data = "aaaa";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);

        let (results, cursor) = ch('a').repeated().exactly(3).parse(cursor, &mut ctx).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(cursor.position(), 3);

        let short = StrCursor::new("aa");
        let mut ctx = Context::new("aa");
        assert!(ch('a').repeated().exactly(3).parse(short, &mut ctx).is_err());
    }

    #[test]
    fn test_min_greater_than_max_never_matches() {
        let data = "aaaa";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = repeat(ch('a'), 3, Bound::Finite(2));

        let failure = parser.parse(cursor, &mut ctx).unwrap_err();
        assert!(!failure.is_hard());
    }

    #[test]
    fn test_zero_width_body_terminates() {
        let data = "abc";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = eps().repeated();

        let (results, cursor) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_zero_width_body_reaches_min() {
        let data = "";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let parser = eps().repeated().at_least(3);

        let (results, _) = parser.parse(cursor, &mut ctx).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_hard_failure_propagates() {
        let data = "(1)(x)";
        let cursor = StrCursor::new(data);
        let mut ctx = Context::new(data);
        let group = lit('(').then(uint::<u8>().then_ignore(lit(')'))).committed();
        let parser = group.repeated();

        let failure = parser.parse(cursor, &mut ctx).unwrap_err();
        assert!(failure.is_hard());
        assert_eq!(failure.position(), 4);
    }

    proptest! {
        #[test]
        fn prop_repeat_respects_bounds(count in 0usize..12, min in 0usize..6, max in 0usize..8) {
            let data = "a".repeat(count);
            let cursor = StrCursor::new(&data);
            let mut ctx = Context::new(&data);
            let parser = ch('a').repeated().bounds(min, Bound::Finite(max));

            match parser.parse(cursor, &mut ctx) {
                Ok((items, cursor)) => {
                    prop_assert!(items.len() >= min && items.len() <= max);
                    prop_assert_eq!(items.len(), count.min(max));
                    prop_assert_eq!(cursor.position(), items.len());
                }
                Err(failure) => {
                    prop_assert!(!failure.is_hard());
                    prop_assert!(count.min(max) < min);
                }
            }
        }
    }
}
