use crate::context::Context;
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::PResult;
use crate::parser::Parser;
use std::marker::PhantomData;

/// Which attributes of a two-element sequence are kept
pub trait Keep<A, B> {
    type Output;
    fn keep(first: A, second: B) -> Self::Output;
}

/// Keep both attributes as a tuple
pub struct Both;
/// Keep only the first attribute
pub struct Left;
/// Keep only the second attribute
pub struct Right;

impl<A, B> Keep<A, B> for Both {
    type Output = (A, B);
    fn keep(first: A, second: B) -> (A, B) {
        (first, second)
    }
}

impl<A, B> Keep<A, B> for Left {
    type Output = A;
    fn keep(first: A, _: B) -> A {
        first
    }
}

impl<A, B> Keep<A, B> for Right {
    type Output = B;
    fn keep(_: A, second: B) -> B {
        second
    }
}

/// Put the first attribute in front of the list the second one produced
pub struct Prepend;

impl<A> Keep<A, Vec<A>> for Prepend {
    type Output = Vec<A>;
    fn keep(first: A, mut rest: Vec<A>) -> Vec<A> {
        rest.insert(0, first);
        rest
    }
}

/// Whether the second element of a sequence may fail softly
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Backtrack {
    Allow,
    /// Once the first element matched, a failure of the second is hard
    Commit,
}

/// Parser combinator that sequences two parsers
///
/// Note: When chaining multiple `.then()` calls, this produces nested tuples like
/// `(((a, b), c), d)` rather than flat tuples like `(a, b, c, d)`. Use
/// `ignore_then`/`then_ignore` to drop attributes that carry no information.
///
/// Unit attributes are kept as well: `lit('a').then(uint::<u32>())` yields
/// `((), u32)`. Only `ignore_then`, `then_ignore` and `omit` drop attributes.
/// `chain` joins an element and a repetition of the same element into one
/// `Vec`.
///
/// Example:
/// ```
/// use parsirule::prelude::*;
///
/// let parser = uint::<u32>().then_ignore(lit('.')).then(uint::<u32>());
/// let (int_part, frac_part) = parse("123.456", &parser).unwrap();
/// assert_eq!(int_part, 123);
/// assert_eq!(frac_part, 456);
/// ```
pub struct Then<P1, P2, K = Both> {
    first: P1,
    second: P2,
    backtrack: Backtrack,
    _keep: PhantomData<fn() -> K>,
}

impl<P1, P2, K> Then<P1, P2, K> {
    pub fn new(first: P1, second: P2) -> Self {
        Then {
            first,
            second,
            backtrack: Backtrack::Allow,
            _keep: PhantomData,
        }
    }

    /// Make a failure of the second element a hard failure
    ///
    /// Enclosing alternatives and repetitions then stop trying, and the error
    /// points at the deepest failure inside the second element.
    pub fn committed(mut self) -> Self {
        self.backtrack = Backtrack::Commit;
        self
    }
}

impl<'code, P1, P2, K> Parser<'code> for Then<P1, P2, K>
where
    P1: Parser<'code>,
    P2: Parser<'code>,
    K: Keep<P1::Output, P2::Output>,
{
    type Output = K::Output;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let (first, cursor) = self.first.parse(cursor, ctx)?;
        let element_start = cursor.position();
        let (second, cursor) = match self.second.parse(cursor, ctx) {
            Ok(result) => result,
            Err(failure) => {
                return Err(match self.backtrack {
                    Backtrack::Allow => failure,
                    Backtrack::Commit => ctx.harden(failure, element_start),
                });
            }
        };
        Ok((K::keep(first, second), cursor))
    }
}

/// Convenience function to create a Then parser
pub fn then<'code, P1, P2>(first: P1, second: P2) -> Then<P1, P2>
where
    P1: Parser<'code>,
    P2: Parser<'code>,
{
    Then::new(first, second)
}

/// Extension trait to add .then() method support for parsers
pub trait ThenExt<'code>: Parser<'code> + Sized {
    fn then<P>(self, other: P) -> Then<Self, P>
    where
        P: Parser<'code>,
    {
        Then::new(self, other)
    }

    fn ignore_then<P>(self, other: P) -> Then<Self, P, Right>
    where
        P: Parser<'code>,
    {
        Then::new(self, other)
    }

    fn then_ignore<P>(self, other: P) -> Then<Self, P, Left>
    where
        P: Parser<'code>,
    {
        Then::new(self, other)
    }

    /// Sequence with a parser producing more of this attribute, as one list
    fn chain<P>(self, rest: P) -> Then<Self, P, Prepend>
    where
        P: Parser<'code, Output = Vec<Self::Output>>,
    {
        Then::new(self, rest)
    }
}

/// Implement ThenExt for all parsers
impl<'code, P> ThenExt<'code> for P where P: Parser<'code> {}
