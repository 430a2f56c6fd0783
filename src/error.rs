use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Result of running a parser: the attribute and the advanced cursor, or a failure
///
/// On failure no cursor is returned, so the caller naturally keeps the copy it
/// started from. That is what makes every failure leave the position untouched.
pub type PResult<'code, T> = Result<(T, StrCursor<'code>), Failure<'code>>;

#[derive(Debug)]
pub struct ReadablePosition {
    pub line: usize,
    pub byte_offset: usize,
}

/// A location in the input, kept together with the input for rendering
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CodeLoc<'code> {
    code: &'code str,
    /// The byte position in `code` where the error was detected
    loc: usize,
}

impl<'code> CodeLoc<'code> {
    pub fn new(code: &'code str, loc: usize) -> Self {
        Self { code, loc }
    }

    pub fn at(cursor: StrCursor<'code>) -> Self {
        let (code, loc) = cursor.inner();
        Self { code, loc }
    }

    pub fn position(&self) -> usize {
        self.loc
    }

    /// The whole input the position points into
    pub fn source(&self) -> &'code str {
        self.code
    }

    /// Calculate line number and byte offset within that line
    ///
    /// A byte offset rather than a column: columns depend on tab width and on
    /// how the terminal renders wide or combining characters.
    pub fn readable_position(&self) -> ReadablePosition {
        let before = self.code.get(..self.loc).unwrap_or(self.code);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        ReadablePosition {
            line,
            byte_offset: self.loc.saturating_sub(line_start),
        }
    }

    /// Up to two lines before and after the error line, with a pointer under it
    fn context_lines(&self) -> Vec<String> {
        let pos = self.readable_position();
        let first = pos.line.saturating_sub(2).max(1);
        let last = pos.line + 2;
        let mut lines = Vec::new();

        // `split` keeps a final empty line after a trailing newline, which is
        // exactly where an end-of-input error points.
        for (index, content) in self.code.split('\n').enumerate() {
            let number = index + 1;
            if number < first || number > last {
                continue;
            }
            let prefix = if number == pos.line {
                format!("  > {} | ", number)
            } else {
                format!("    {} | ", number)
            };
            lines.push(format!("{}{}", prefix, content.trim_end_matches('\r')));
            if number == pos.line {
                let pointer_offset = prefix.len() + pos.byte_offset;
                lines.push(format!("{}^--- here", " ".repeat(pointer_offset)));
            }
        }

        lines
    }
}

impl fmt::Display for CodeLoc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.readable_position();
        write!(f, "line {}, byte offset {}", pos.line, pos.byte_offset)
    }
}

/// Why a parse did not match
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError<'code> {
    #[error("expected {expected} at {loc}")]
    Expected {
        expected: Cow<'static, str>,
        loc: CodeLoc<'code>,
    },
    #[error("unexpected {found} at {loc}")]
    Unexpected {
        found: Cow<'static, str>,
        loc: CodeLoc<'code>,
    },
    #[error("number does not fit in {ty} at {loc}")]
    OutOfRange { ty: &'static str, loc: CodeLoc<'code> },
    #[error("match rejected by semantic action at {loc}")]
    Rejected { loc: CodeLoc<'code> },
    #[error("rule `{rule}` has no body at {loc}")]
    UndefinedRule {
        rule: Cow<'static, str>,
        loc: CodeLoc<'code>,
    },
    #[error("unexpected trailing input at {loc}")]
    TrailingInput { loc: CodeLoc<'code> },
}

impl<'code> ParseError<'code> {
    pub fn expected(expected: impl Into<Cow<'static, str>>, cursor: StrCursor<'code>) -> Self {
        ParseError::Expected {
            expected: expected.into(),
            loc: CodeLoc::at(cursor),
        }
    }

    pub fn loc(&self) -> CodeLoc<'code> {
        match self {
            ParseError::Expected { loc, .. }
            | ParseError::Unexpected { loc, .. }
            | ParseError::OutOfRange { loc, .. }
            | ParseError::Rejected { loc }
            | ParseError::UndefinedRule { loc, .. }
            | ParseError::TrailingInput { loc } => *loc,
        }
    }

    /// Byte offset where the error was detected
    pub fn position(&self) -> usize {
        self.loc().position()
    }

    /// Description of what was expected, for `Expected` errors
    pub fn expectation(&self) -> Option<&str> {
        match self {
            ParseError::Expected { expected, .. } => Some(expected.as_ref()),
            _ => None,
        }
    }

    /// Multi-line description with the surrounding source lines
    pub fn report(&self) -> String {
        let mut out = format!("error: {}\n\n", self);
        for line in self.loc().context_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Pick whichever of two errors got further into the input
    ///
    /// Ties go to `other`, the more recent attempt.
    pub fn furthest(self, other: Self) -> Self {
        if self.position() > other.position() {
            self
        } else {
            other
        }
    }
}

/// A parse failure together with its severity
///
/// `Soft` failures are ordinary mismatches: the nearest enclosing alternative,
/// optional or repetition recovers from them. `Hard` failures happen after a
/// commit point and travel straight up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<'code> {
    Soft(ParseError<'code>),
    Hard(ParseError<'code>),
}

impl<'code> Failure<'code> {
    pub fn is_hard(&self) -> bool {
        matches!(self, Failure::Hard(_))
    }

    pub fn error(&self) -> &ParseError<'code> {
        match self {
            Failure::Soft(error) | Failure::Hard(error) => error,
        }
    }

    pub fn into_error(self) -> ParseError<'code> {
        match self {
            Failure::Soft(error) | Failure::Hard(error) => error,
        }
    }

    pub fn position(&self) -> usize {
        self.error().position()
    }
}

impl fmt::Display for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Soft(error) => write!(f, "{}", error),
            Failure::Hard(error) => write!(f, "{} (after commit point)", error),
        }
    }
}

/// Mistakes made while building a grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule `{0}` already has a body")]
    AlreadyDefined(Cow<'static, str>),
}
