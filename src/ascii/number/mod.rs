use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::{CodeLoc, PResult, ParseError};
use crate::parser::Parser;

pub mod float;
pub mod integer;

pub use float::{Float, FloatParser, float};
pub use integer::{IntParser, Integer, int, uint};

/// Base of an integer literal
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    pub(crate) fn describe(self) -> &'static str {
        match self {
            Radix::Binary => "binary digit",
            Radix::Octal => "octal digit",
            Radix::Decimal => "decimal digit",
            Radix::Hexadecimal => "hexadecimal digit",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Parser that matches either an integer or a float and returns a Number enum
///
/// Literals with a fraction, an exponent or a special value are floats;
/// plain digit runs are `i64`.
pub struct NumberParser;

impl<'code> Parser<'code> for NumberParser {
    type Output = Number;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let start = ctx.skip(cursor);
        match float::scan_number(start.rest()) {
            Some(lexical) if !lexical.fractional && !lexical.special => {
                let (value, cursor) = int::<i64>().parse(start, ctx)?;
                Ok((Number::Int(value), cursor))
            }
            Some(_) => {
                let (value, cursor) = float::<f64>().parse(start, ctx)?;
                Ok((Number::Float(value), cursor))
            }
            None => Err(ctx.soft(ParseError::Expected {
                expected: "number".into(),
                loc: CodeLoc::at(start),
            })),
        }
    }
}

/// Convenience function to create a NumberParser
pub fn number() -> NumberParser {
    NumberParser
}
