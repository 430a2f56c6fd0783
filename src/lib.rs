//! # parsirule - Rule-Based Parser Combinators
//!
//! A parser combinator library for text grammars: leaf parsers for characters,
//! literals and numbers, combinators for sequencing, alternation, repetition
//! and lookahead, semantic actions, named recursive rules, and symbol tables
//! that can change while a parse runs.
//!
//! Every parse threads a [`Context`] through the grammar. It carries the
//! active skipper, the caller's globals, the locals and parameters of the
//! running rules, and the deepest failure seen so far, which is what the
//! top-level error points at.
//!
//! - **Zero panics**: All parsing errors are handled through `Result` types
//! - **Rich error reporting**: Provides line numbers, context, and detailed error messages
//! - **Composability**: Small parsers combine into larger ones using combinators
//! - **Selective backtracking**: Committed sequences turn later failures into hard errors
//!
//! ```
//! use parsirule::prelude::*;
//!
//! let pair = lit('(')
//!     .ignore_then(int::<i32>())
//!     .then_ignore(lit(','))
//!     .then(int::<i32>())
//!     .then_ignore(lit(')'));
//!
//! let parsed = parse_with("( 1, -2 )", &pair, Config::new().skip(space())).unwrap();
//! assert_eq!(parsed.value, (1, -2));
//! ```

pub mod action;
pub mod ascii;
pub mod attr;
pub mod bound;
pub mod config;
pub mod context;
pub mod cursor;
pub mod cursors;
pub mod entry;
pub mod eoi;
pub mod eps;
pub mod error;
pub mod expect;
pub mod filter;
pub mod lexeme;
pub mod map;
pub mod omit;
pub mod optional;
pub mod or;
pub mod parser;
pub mod position;
pub mod raw;
pub mod repeat;
pub mod rule;
pub mod skip;
pub mod switch;
pub mod symbols;
pub mod then;
pub mod utf8;

pub use bound::Bound;
pub use config::{Callbacks, Config, ErrorHandler, Parsed, Recovery, WriteErrorHandler};
pub use context::{Context, Flags};
pub use cursor::Cursor;
pub use cursors::StrCursor;
pub use entry::{parse, parse_with};
pub use error::{CodeLoc, Failure, PResult, ParseError, RuleError};
pub use or::Either;
pub use parser::Parser;
pub use position::Span;
pub use rule::{Rule, RuleCall, RuleRef};
pub use symbols::Symbols;

/// Everything needed to write and run a grammar
pub mod prelude {
    pub use crate::action::{ActionExt, action};
    pub use crate::ascii::{Number, Radix, boolean, float, int, number, uint};
    pub use crate::attr::{attr, default};
    pub use crate::bound::Bound;
    pub use crate::config::{Callbacks, Config, ErrorHandler, Parsed, Recovery, WriteErrorHandler};
    pub use crate::context::{Context, Flags};
    pub use crate::cursor::Cursor;
    pub use crate::cursors::StrCursor;
    pub use crate::entry::{parse, parse_with};
    pub use crate::eoi::eoi;
    pub use crate::eps::{eps, eps_if};
    pub use crate::error::{Failure, ParseError};
    pub use crate::expect::{LookaheadExt, expect, not};
    pub use crate::filter::{FilterExt, filter};
    pub use crate::lexeme::{LexemeExt, lexeme};
    pub use crate::map::{MapExt, map};
    pub use crate::omit::{OmitExt, omit};
    pub use crate::optional::{OptionalExt, optional};
    pub use crate::or::{Either, OrExt, either, or};
    pub use crate::parser::Parser;
    pub use crate::position::{Span, SpannedExt, spanned};
    pub use crate::raw::{RawExt, raw};
    pub use crate::repeat::{RepeatExt, many, repeat, separated_list, some};
    pub use crate::rule::{Rule, RuleRef};
    pub use crate::skip::{SkipExt, skip_with};
    pub use crate::switch::switch;
    pub use crate::symbols::Symbols;
    pub use crate::then::{ThenExt, then};
    pub use crate::utf8::{
        alnum, alpha, any_char, blank, ch, char_range, digit, eol, lit, none_of, one_of, space,
        string,
    };
}
