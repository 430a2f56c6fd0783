//! Per-call parsing environment.
//!
//! One `Context` exists for each top-level parse. It carries everything a
//! combinator may need besides the cursor: flags, the active skipper, the
//! globals handed in by the caller, the locals and parameter frames of the
//! rules currently executing, the symbol-table undo log, and the deepest
//! failure seen so far.

use crate::config::{Callbacks, Config, ErrorHandler, Recovery};
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::{Failure, ParseError};
use crate::position::Span;
use crate::skip::Skipper;
use bitflags::bitflags;
use std::any::Any;
use std::rc::Rc;
use tracing::trace;

bitflags! {
    /// Switches that combinators flip on and off for their sub-parsers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Flags: u8 {
        /// Attributes will be used. Cleared inside `omit` and lookahead.
        const GEN_ATTRS = 1 << 0;
        /// Leaves run the active skipper before matching.
        const USE_SKIP = 1 << 1;
        /// Rules emit enter/exit trace events.
        const TRACE = 1 << 2;
        /// Set while a parser runs as the body of a semantic action.
        const IN_APPLY_PARSER = 1 << 3;
    }
}

/// A mutation that is undone when the owning parse ends
pub(crate) trait Revert {
    fn revert(self: Box<Self>);
}

pub struct Context<'code, 'env> {
    source: &'code str,
    pass: bool,
    span: Option<Span<'code>>,
    flags: Flags,
    skipper: Option<Rc<dyn Skipper>>,
    globals: Option<&'env mut dyn Any>,
    locals: Vec<Box<dyn Any>>,
    params: Vec<Box<dyn Any>>,
    undo: Vec<Box<dyn Revert>>,
    trace_depth: usize,
    error_handler: Option<&'env dyn ErrorHandler>,
    callbacks: Option<&'env mut dyn Callbacks>,
    furthest: Option<ParseError<'code>>,
}

impl<'code> Context<'code, 'static> {
    /// A context with no skipper, globals, handler or callbacks
    pub fn new(source: &'code str) -> Self {
        Context::from_config(source, Config::new())
    }
}

impl<'code, 'env> Context<'code, 'env> {
    pub(crate) fn from_config(source: &'code str, config: Config<'env>) -> Self {
        let mut flags = Flags::GEN_ATTRS;
        if config.skipper.is_some() {
            flags |= Flags::USE_SKIP;
        }
        if config.trace {
            flags |= Flags::TRACE;
        }
        Context {
            source,
            pass: true,
            span: None,
            flags,
            skipper: config.skipper,
            globals: config.globals,
            locals: Vec::new(),
            params: Vec::new(),
            undo: Vec::new(),
            trace_depth: 0,
            error_handler: config.error_handler,
            callbacks: config.callbacks,
            furthest: None,
        }
    }

    /// The whole input of this parse
    pub fn source(&self) -> &'code str {
        self.source
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Replace the flags, returning the previous ones for restoring
    pub(crate) fn replace_flags(&mut self, flags: Flags) -> Flags {
        std::mem::replace(&mut self.flags, flags)
    }

    /// Whether the running semantic action still accepts its match
    pub fn pass(&self) -> bool {
        self.pass
    }

    pub fn set_pass(&mut self, pass: bool) {
        self.pass = pass;
    }

    /// Reject the match the running semantic action is attached to
    pub fn reject(&mut self) {
        self.pass = false;
    }

    pub(crate) fn replace_pass(&mut self, pass: bool) -> bool {
        std::mem::replace(&mut self.pass, pass)
    }

    /// Input matched by the parser the running semantic action is attached to
    pub fn span(&self) -> Option<Span<'code>> {
        self.span
    }

    pub(crate) fn replace_span(&mut self, span: Option<Span<'code>>) -> Option<Span<'code>> {
        std::mem::replace(&mut self.span, span)
    }

    /// The globals value handed to `Config::globals`, if it has type `G`
    pub fn globals<G: Any>(&mut self) -> Option<&mut G> {
        self.globals.as_deref_mut()?.downcast_mut::<G>()
    }

    /// Locals of the innermost executing rule, if they have type `L`
    pub fn locals<L: Any>(&mut self) -> Option<&mut L> {
        self.locals.last_mut()?.downcast_mut::<L>()
    }

    /// Parameters of the innermost executing rule, if they have type `A`
    pub fn params<A: Any>(&self) -> Option<&A> {
        self.params.last()?.downcast_ref::<A>()
    }

    pub(crate) fn push_frame(&mut self, locals: Box<dyn Any>, params: Box<dyn Any>) {
        self.locals.push(locals);
        self.params.push(params);
    }

    pub(crate) fn pop_frame(&mut self) {
        self.locals.pop();
        self.params.pop();
    }

    #[cfg(test)]
    pub(crate) fn frame_depth(&self) -> usize {
        self.locals.len()
    }

    pub(crate) fn log_undo(&mut self, entry: Box<dyn Revert>) {
        self.undo.push(entry);
    }

    pub(crate) fn replace_skipper(
        &mut self,
        skipper: Option<Rc<dyn Skipper>>,
    ) -> Option<Rc<dyn Skipper>> {
        std::mem::replace(&mut self.skipper, skipper)
    }

    #[cfg(test)]
    pub(crate) fn has_skipper(&self) -> bool {
        self.skipper.is_some()
    }

    /// Run the active skipper as long as it matches, if skipping is enabled
    ///
    /// The skipper runs with skipping disabled, and its failures never show up
    /// in diagnostics.
    pub fn skip(&mut self, mut cursor: StrCursor<'code>) -> StrCursor<'code> {
        if !self.flags.contains(Flags::USE_SKIP) {
            return cursor;
        }
        let Some(skipper) = self.skipper.clone() else {
            return cursor;
        };

        let flags = self.replace_flags(self.flags - Flags::USE_SKIP);
        let furthest = self.furthest.take();
        while let Some(next) = skipper.skip_once(cursor, self) {
            if next.position() == cursor.position() {
                break;
            }
            cursor = next;
        }
        self.furthest = furthest;
        self.flags = flags;
        cursor
    }

    /// Build a soft failure, remembering it if it is the deepest one so far
    pub fn soft(&mut self, error: ParseError<'code>) -> Failure<'code> {
        let deeper = self
            .furthest
            .as_ref()
            .is_none_or(|furthest| error.position() >= furthest.position());
        if deeper {
            self.furthest = Some(error.clone());
        }
        Failure::Soft(error)
    }

    /// Turn a failure of a committed sequence element into a hard failure
    ///
    /// The reported error is the deepest failure recorded since the element
    /// started, which is usually more specific than the element's own error.
    pub(crate) fn harden(&mut self, failure: Failure<'code>, element_start: usize) -> Failure<'code> {
        match failure {
            Failure::Hard(_) => failure,
            Failure::Soft(error) => {
                let error = match &self.furthest {
                    Some(furthest)
                        if furthest.position() >= element_start
                            && furthest.position() > error.position() =>
                    {
                        furthest.clone()
                    }
                    _ => error,
                };
                Failure::Hard(error)
            }
        }
    }

    pub(crate) fn take_furthest(&mut self) -> Option<ParseError<'code>> {
        self.furthest.take()
    }

    pub(crate) fn restore_furthest(&mut self, furthest: Option<ParseError<'code>>) {
        self.furthest = furthest;
    }

    /// The error to report for a failure that reached the top level
    pub(crate) fn diagnose(&mut self, failure: Failure<'code>) -> ParseError<'code> {
        match failure {
            Failure::Hard(error) => error,
            Failure::Soft(error) => match self.furthest.take() {
                Some(furthest) if furthest.position() > error.position() => furthest,
                _ => error,
            },
        }
    }

    pub(crate) fn handle_error(&self, error: &ParseError<'code>) -> Recovery {
        match self.error_handler {
            Some(handler) => handler.on_error(error),
            None => Recovery::Fail,
        }
    }

    pub(crate) fn callback(&mut self, rule: &str, attribute: &dyn Any) {
        if let Some(callbacks) = self.callbacks.as_deref_mut() {
            callbacks.on_rule(rule, attribute);
        }
    }

    pub(crate) fn trace_enter(&mut self, name: &str, cursor: StrCursor<'code>) {
        if !self.flags.contains(Flags::TRACE) {
            return;
        }
        trace!(
            depth = self.trace_depth,
            position = cursor.position(),
            "{:indent$}[{}] enter",
            "",
            name,
            indent = self.trace_depth * 2
        );
        self.trace_depth += 1;
    }

    pub(crate) fn trace_exit(&mut self, name: &str, position: usize, matched: bool) {
        if !self.flags.contains(Flags::TRACE) {
            return;
        }
        self.trace_depth = self.trace_depth.saturating_sub(1);
        trace!(
            depth = self.trace_depth,
            position,
            matched,
            "{:indent$}[{}] {}",
            "",
            name,
            if matched { "matched" } else { "failed" },
            indent = self.trace_depth * 2
        );
    }
}

impl Drop for Context<'_, '_> {
    fn drop(&mut self) {
        while let Some(entry) = self.undo.pop() {
            entry.revert();
        }
    }
}
