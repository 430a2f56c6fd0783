//! Named, recursive grammar rules.
//!
//! A `Rule` is declared first and given its body later, so bodies can refer
//! to rules that are not defined yet, including themselves. Bodies hold
//! `RuleRef`s, which do not keep the rule alive; the grammar's owner keeps
//! the `Rule` handles.
//!
//! ```
//! use parsirule::prelude::*;
//!
//! // list := '[' (list | digit)* ']'
//! let list: Rule<usize> = Rule::new("list");
//! let item = list.by_ref().or(digit().map(|_| 0));
//! list.define(
//!     lit('[')
//!         .ignore_then(item.repeated())
//!         .then_ignore(lit(']'))
//!         .map(|items| items.len()),
//! )
//! .unwrap();
//!
//! assert_eq!(parse("[1[2]3]", &list).unwrap(), 3);
//! ```

use crate::context::{Context, Flags};
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::{CodeLoc, Failure, PResult, ParseError, RuleError};
use crate::parser::Parser;
use std::any::Any;
use std::borrow::Cow;
use std::cell::{Cell, OnceCell};
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

type Body<O> = Box<dyn for<'code> Parser<'code, Output = O>>;

/// A rule invocation, erased over the rule's locals and parameter types
trait Invoke<O> {
    fn invoke<'code>(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
        params: Box<dyn Any>,
    ) -> PResult<'code, O>;
}

struct RuleInner<O, L, A> {
    name: Cow<'static, str>,
    body: OnceCell<Body<O>>,
    callbacks: Cell<bool>,
    _frame: PhantomData<fn() -> (L, A)>,
}

impl<O, L, A> Invoke<O> for RuleInner<O, L, A>
where
    O: 'static,
    L: Default + 'static,
{
    fn invoke<'code>(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
        params: Box<dyn Any>,
    ) -> PResult<'code, O> {
        let cursor = ctx.skip(cursor);
        let Some(body) = self.body.get() else {
            return Err(undefined(self.name.clone(), cursor));
        };

        ctx.trace_enter(&self.name, cursor);
        ctx.push_frame(Box::new(L::default()), params);
        let result = body.parse(cursor, ctx);
        ctx.pop_frame();

        let result = match result {
            // Nothing inside the rule matched; name the rule instead
            Err(Failure::Soft(error)) if error.position() == cursor.position() => Err(
                ctx.soft(ParseError::expected(self.name.clone(), cursor)),
            ),
            other => other,
        };

        match &result {
            Ok((value, end)) => {
                ctx.trace_exit(&self.name, end.position(), true);
                if self.callbacks.get() && ctx.flags().contains(Flags::GEN_ATTRS) {
                    ctx.callback(&self.name, value);
                }
            }
            Err(failure) => ctx.trace_exit(&self.name, failure.position(), false),
        }
        result
    }
}

fn undefined<'code>(rule: Cow<'static, str>, cursor: StrCursor<'code>) -> Failure<'code> {
    Failure::Hard(ParseError::UndefinedRule {
        rule,
        loc: CodeLoc::at(cursor),
    })
}

/// A named rule producing `O`, with locals `L` and parameters `A`
///
/// Each invocation gets a fresh `L::default()` reachable through
/// `Context::locals` and the parameters given to `with`, reachable through
/// `Context::params`. Both are dropped when the invocation returns.
pub struct Rule<O, L = (), A = ()> {
    inner: Rc<RuleInner<O, L, A>>,
}

impl<O, L, A> Clone for Rule<O, L, A> {
    fn clone(&self) -> Self {
        Rule {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<O, L, A> Rule<O, L, A>
where
    O: 'static,
    L: Default + 'static,
    A: 'static,
{
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Rule {
            inner: Rc::new(RuleInner {
                name: name.into(),
                body: OnceCell::new(),
                callbacks: Cell::new(false),
                _frame: PhantomData,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Give the rule its body; a rule can only be defined once
    pub fn define<P>(&self, body: P) -> Result<(), RuleError>
    where
        P: for<'code> Parser<'code, Output = O> + 'static,
    {
        self.inner
            .body
            .set(Box::new(body))
            .map_err(|_| RuleError::AlreadyDefined(self.inner.name.clone()))
    }

    pub fn is_defined(&self) -> bool {
        self.inner.body.get().is_some()
    }

    /// Report this rule's attribute to the configured callbacks
    pub fn callbacks(self) -> Self {
        self.inner.callbacks.set(true);
        self
    }

    /// Non-owning handle for use inside rule bodies
    pub fn by_ref(&self) -> RuleRef<O> {
        let weak: Weak<RuleInner<O, L, A>> = Rc::downgrade(&self.inner);
        RuleRef {
            name: self.inner.name.clone(),
            inner: weak,
        }
    }

    /// Invoke the rule with parameters
    pub fn with(&self, params: A) -> RuleCall<O, A>
    where
        A: Clone,
    {
        RuleCall {
            target: self.by_ref(),
            params,
        }
    }
}

impl<'code, O, L, A> Parser<'code> for Rule<O, L, A>
where
    O: 'static,
    L: Default + 'static,
    A: 'static,
{
    type Output = O;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        self.inner.invoke(cursor, ctx, Box::new(()))
    }
}

/// Weak handle to a rule, usable as a parser while the rule is alive
pub struct RuleRef<O> {
    name: Cow<'static, str>,
    inner: Weak<dyn Invoke<O>>,
}

impl<O> Clone for RuleRef<O> {
    fn clone(&self) -> Self {
        RuleRef {
            name: self.name.clone(),
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<O> RuleRef<O> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the rule with parameters
    ///
    /// `A` must be the rule's parameter type for `Context::params` to find it.
    pub fn with<A: Clone + 'static>(&self, params: A) -> RuleCall<O, A> {
        RuleCall {
            target: self.clone(),
            params,
        }
    }

    fn invoke<'code>(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
        params: Box<dyn Any>,
    ) -> PResult<'code, O> {
        match self.inner.upgrade() {
            Some(rule) => rule.invoke(cursor, ctx, params),
            None => Err(undefined(self.name.clone(), ctx.skip(cursor))),
        }
    }
}

impl<'code, O> Parser<'code> for RuleRef<O> {
    type Output = O;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        self.invoke(cursor, ctx, Box::new(()))
    }
}

/// A rule invocation with parameters
pub struct RuleCall<O, A> {
    target: RuleRef<O>,
    params: A,
}

impl<'code, O, A> Parser<'code> for RuleCall<O, A>
where
    A: Clone + 'static,
{
    type Output = O;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        self.target.invoke(cursor, ctx, Box::new(self.params.clone()))
    }
}
