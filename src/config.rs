//! Options for a single top-level parse.

use crate::error::ParseError;
use crate::parser::Parser;
use crate::skip::Skipper;
use std::any::Any;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use tracing::warn;

/// What the entry point should do after a failed parse attempt
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// Give up and return the error
    Fail,
    /// Run the grammar again from byte offset `resume_at`
    ///
    /// Only honored when `resume_at` lies strictly after the previous
    /// attempt's start and on a char boundary of the input.
    Retry { resume_at: usize },
}

/// Receives the diagnostic of every failed attempt
///
/// The error carries the input and the failure point:
/// `error.loc().source()` is the whole input, `error.position()` the byte
/// offset of the deepest failure and `error.expectation()` what was expected
/// there. The handler does not see the `Context`, so it cannot change
/// globals or symbol tables.
pub trait ErrorHandler {
    fn on_error(&self, error: &ParseError<'_>) -> Recovery;
}

impl<F> ErrorHandler for F
where
    F: Fn(&ParseError<'_>) -> Recovery,
{
    fn on_error(&self, error: &ParseError<'_>) -> Recovery {
        self(error)
    }
}

/// Error handler that writes the full report to a sink and gives up
pub struct WriteErrorHandler<W> {
    writer: RefCell<W>,
}

impl<W: io::Write> WriteErrorHandler<W> {
    pub fn new(writer: W) -> Self {
        WriteErrorHandler {
            writer: RefCell::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: io::Write> ErrorHandler for WriteErrorHandler<W> {
    fn on_error(&self, error: &ParseError<'_>) -> Recovery {
        let mut writer = self.writer.borrow_mut();
        if let Err(io_error) = writer.write_all(error.report().as_bytes()) {
            warn!("failed to write parse error report: {}", io_error);
        }
        Recovery::Fail
    }
}

/// Receives the attributes of rules declared with `Rule::callbacks`
pub trait Callbacks {
    fn on_rule(&mut self, rule: &str, attribute: &dyn Any);
}

impl<F> Callbacks for F
where
    F: FnMut(&str, &dyn Any),
{
    fn on_rule(&mut self, rule: &str, attribute: &dyn Any) {
        self(rule, attribute)
    }
}

/// Builder for the options of `parse_with`
///
/// Borrowed parts (globals, error handler, callbacks) live for `'env`, which
/// only needs to outlast the call.
#[derive(Default)]
pub struct Config<'env> {
    pub(crate) skipper: Option<Rc<dyn Skipper>>,
    pub(crate) globals: Option<&'env mut dyn Any>,
    pub(crate) error_handler: Option<&'env dyn ErrorHandler>,
    pub(crate) callbacks: Option<&'env mut dyn Callbacks>,
    pub(crate) partial: bool,
    pub(crate) trace: bool,
}

impl<'env> Config<'env> {
    pub fn new() -> Self {
        Config::default()
    }

    /// Skip input matched by `skipper` before every leaf
    pub fn skip<S>(mut self, skipper: S) -> Self
    where
        S: for<'code> Parser<'code> + 'static,
    {
        self.skipper = Some(Rc::new(skipper));
        self
    }

    /// Make `globals` reachable from semantic actions via `Context::globals`
    pub fn globals<G: Any>(mut self, globals: &'env mut G) -> Self {
        self.globals = Some(globals);
        self
    }

    pub fn error_handler<H: ErrorHandler>(mut self, handler: &'env H) -> Self {
        self.error_handler = Some(handler);
        self
    }

    pub fn callbacks<C: Callbacks>(mut self, callbacks: &'env mut C) -> Self {
        self.callbacks = Some(callbacks);
        self
    }

    /// Succeed without requiring the grammar to consume the whole input
    pub fn partial(mut self) -> Self {
        self.partial = true;
        self
    }

    /// Emit rule enter/exit events at `TRACE` level
    pub fn trace(mut self) -> Self {
        self.trace = true;
        self
    }
}

/// Successful result of `parse_with`
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<O> {
    pub value: O,
    /// Byte offset just past the last consumed input
    pub consumed: usize,
}
