use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::PResult;
use crate::parser::Parser;
use std::marker::PhantomData;

/// Parser that always succeeds without consuming input and returns a clone of its value
pub struct Attr<T> {
    value: T,
}

impl<T> Attr<T> {
    pub fn new(value: T) -> Self {
        Attr { value }
    }
}

impl<'code, T> Parser<'code> for Attr<T>
where
    T: Clone,
{
    type Output = T;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        _ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        Ok((self.value.clone(), cursor))
    }
}

/// Convenience function to create an Attr parser
pub fn attr<T: Clone>(value: T) -> Attr<T> {
    Attr::new(value)
}

/// Parser that always succeeds without consuming input and returns the default value of T
pub struct DefaultParser<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> DefaultParser<T> {
    pub fn new() -> Self {
        DefaultParser {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for DefaultParser<T> {
    fn default() -> Self {
        DefaultParser::new()
    }
}

impl<'code, T> Parser<'code> for DefaultParser<T>
where
    T: Default,
{
    type Output = T;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        _ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        Ok((T::default(), cursor))
    }
}

/// Convenience function to create a default parser
pub fn default<T>() -> DefaultParser<T>
where
    T: Default,
{
    DefaultParser::new()
}
