use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::{Failure, PResult, ParseError};
use crate::parser::Parser;

/// Empty case list of a `switch` that has no cases yet
pub struct NoCase;

/// One `value => parser` case, after the cases in `rest`
pub struct Case<C, V, P> {
    rest: C,
    value: V,
    parser: P,
}

/// Ordered case list of a `Switch`
pub trait Cases<'code, V, O> {
    /// Run the cases whose value equals `selected`, in order
    ///
    /// Returns `None` when no case carries `selected`.
    fn run(
        &self,
        selected: &V,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> Option<PResult<'code, O>>;
}

impl<'code, V, O> Cases<'code, V, O> for NoCase {
    fn run(
        &self,
        _selected: &V,
        _cursor: StrCursor<'code>,
        _ctx: &mut Context<'code, '_>,
    ) -> Option<PResult<'code, O>> {
        None
    }
}

impl<'code, C, V, P> Cases<'code, V, P::Output> for Case<C, V, P>
where
    C: Cases<'code, V, P::Output>,
    V: PartialEq,
    P: Parser<'code>,
{
    fn run(
        &self,
        selected: &V,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> Option<PResult<'code, P::Output>> {
        let earlier = match self.rest.run(selected, cursor, ctx) {
            None => None,
            Some(Err(Failure::Soft(error))) => Some(error),
            decided => return decided,
        };
        if self.value != *selected {
            return earlier.map(|error| Err(Failure::Soft(error)));
        }
        Some(match self.parser.parse(cursor, ctx) {
            Err(Failure::Soft(error)) => Err(Failure::Soft(match earlier {
                Some(earlier) => earlier.furthest(error),
                None => error,
            })),
            result => result,
        })
    }
}

/// Parser combinator that picks its body by a value computed from the context
///
/// Cases whose value equals the selected one are tried in the order they were
/// added, like alternatives of `or`. Cases with other values are never run.
pub struct Switch<F, C> {
    selector: F,
    cases: C,
}

impl<F, C> Switch<F, C> {
    /// Add a case tried after the existing ones
    pub fn case<V, P>(self, value: V, parser: P) -> Switch<F, Case<C, V, P>> {
        Switch {
            selector: self.selector,
            cases: Case {
                rest: self.cases,
                value,
                parser,
            },
        }
    }
}

impl<'code, F, C, V, P> Parser<'code> for Switch<F, Case<C, V, P>>
where
    F: Fn(&Context<'code, '_>) -> V,
    Case<C, V, P>: Cases<'code, V, P::Output>,
    P: Parser<'code>,
{
    type Output = P::Output;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let selected = (self.selector)(ctx);
        match self.cases.run(&selected, cursor, ctx) {
            Some(result) => result,
            None => Err(ctx.soft(ParseError::expected("matching switch case", cursor))),
        }
    }
}

/// Convenience function to create a Switch parser; add cases with `.case()`
pub fn switch<F, V>(selector: F) -> Switch<F, NoCase>
where
    F: Fn(&Context<'_, '_>) -> V,
{
    Switch {
        selector,
        cases: NoCase,
    }
}
