use super::Radix;
use crate::bound::Bound;
use crate::context::Context;
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::{CodeLoc, PResult, ParseError};
use crate::parser::Parser;
use std::fmt;
use std::marker::PhantomData;

/// Primitive integer types the integer parsers can produce
pub trait Integer: Copy + PartialEq + fmt::Debug {
    /// Type name used in out-of-range diagnostics
    const NAME: &'static str;
    const ZERO: Self;

    /// `self * radix + digit`, or `self * radix - digit` for negative numbers
    ///
    /// Returns `None` when the result does not fit.
    fn accumulate(self, digit: u32, radix: u32, negative: bool) -> Option<Self>;
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Integer for $ty {
                const NAME: &'static str = stringify!($ty);
                const ZERO: Self = 0;

                fn accumulate(self, digit: u32, radix: u32, negative: bool) -> Option<Self> {
                    let radix = <$ty>::try_from(radix).ok()?;
                    let digit = <$ty>::try_from(digit).ok()?;
                    let shifted = self.checked_mul(radix)?;
                    if negative {
                        shifted.checked_sub(digit)
                    } else {
                        shifted.checked_add(digit)
                    }
                }
            }
        )*
    };
}

impl_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Parser for integers in a given radix
///
/// Digits are taken greedily up to `max_digits`. The parser fails softly
/// when fewer than `min_digits` digits are present, when the value does not
/// fit in `T`, or when it differs from the `expected` value.
pub struct IntParser<T> {
    signed: bool,
    radix: Radix,
    min_digits: usize,
    max_digits: Bound,
    expected: Option<T>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Integer> IntParser<T> {
    fn new(signed: bool) -> Self {
        IntParser {
            signed,
            radix: Radix::Decimal,
            min_digits: 1,
            max_digits: Bound::Unbounded,
            expected: None,
            _phantom: PhantomData,
        }
    }

    pub fn radix(mut self, radix: Radix) -> Self {
        self.radix = radix;
        self
    }

    /// At least one digit is always required
    pub fn min_digits(mut self, min: usize) -> Self {
        self.min_digits = min.max(1);
        self
    }

    pub fn max_digits(mut self, max: Bound) -> Self {
        self.max_digits = max;
        self
    }

    /// Exactly `count` digits
    pub fn digits(self, count: usize) -> Self {
        self.min_digits(count).max_digits(Bound::Finite(count))
    }

    /// Only match the number `value`
    pub fn expected(mut self, value: T) -> Self {
        self.expected = Some(value);
        self
    }
}

impl<'code, T> Parser<'code> for IntParser<T>
where
    T: Integer,
{
    type Output = T;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let start = ctx.skip(cursor);
        let mut cursor = start;

        let mut negative = false;
        if self.signed {
            match cursor.value() {
                Some('-') => {
                    negative = true;
                    cursor = cursor.next();
                }
                Some('+') => cursor = cursor.next(),
                _ => {}
            }
        }

        let radix = self.radix.base();
        let mut value = Some(T::ZERO);
        let mut count = 0;
        while self.max_digits.allows_more(count) {
            let Some(digit) = cursor.value().and_then(|c| c.to_digit(radix)) else {
                break;
            };
            value = value.and_then(|value| value.accumulate(digit, radix, negative));
            count += 1;
            cursor = cursor.next();
        }

        if count < self.min_digits {
            return Err(ctx.soft(ParseError::expected(self.radix.describe(), cursor)));
        }
        let Some(value) = value else {
            return Err(ctx.soft(ParseError::OutOfRange {
                ty: T::NAME,
                loc: CodeLoc::at(start),
            }));
        };
        if let Some(expected) = self.expected {
            if value != expected {
                return Err(ctx.soft(ParseError::expected(format!("{:?}", expected), start)));
            }
        }

        Ok((value, cursor))
    }
}

/// Parser for unsigned integers (no sign accepted)
pub fn uint<T: Integer>() -> IntParser<T> {
    IntParser::new(false)
}

/// Parser for integers with an optional leading `+` or `-`
pub fn int<T: Integer>() -> IntParser<T> {
    IntParser::new(true)
}
