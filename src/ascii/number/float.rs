use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::{CodeLoc, PResult, ParseError};
use crate::parser::Parser;
use std::marker::PhantomData;
use std::str::FromStr;

/// Floating point types the float parser can produce
pub trait Float: Copy + FromStr {
    /// Type name used in out-of-range diagnostics
    const NAME: &'static str;

    fn is_infinite(self) -> bool;
}

impl Float for f32 {
    const NAME: &'static str = "f32";

    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
}

impl Float for f64 {
    const NAME: &'static str = "f64";

    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
}

/// Shape of a scanned number literal
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Lexical {
    /// Byte length of the literal
    pub len: usize,
    /// Has a fraction or an exponent
    pub fractional: bool,
    /// Is `inf`, `infinity` or `nan`
    pub special: bool,
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn starts_with_ignore_case(text: &[u8], prefix: &str) -> bool {
    text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Scan `[+-]? (digits [. digits*] | . digits) ([eE] [+-]? digits)?` or a
/// special value from the start of `text`
pub(crate) fn scan_number(text: &str) -> Option<Lexical> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let rest = &bytes[pos..];
    for special in ["infinity", "inf", "nan"] {
        if starts_with_ignore_case(rest, special) {
            return Some(Lexical {
                len: pos + special.len(),
                fractional: false,
                special: true,
            });
        }
    }

    let int_digits = count_digits(rest);
    pos += int_digits;
    let mut fractional = false;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits == 0 && frac_digits == 0 {
            return None;
        }
        fractional = true;
        pos += 1 + frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        // A marker without digits is not part of the number
        if exp_digits > 0 {
            fractional = true;
            pos = exp + exp_digits;
        }
    }

    Some(Lexical {
        len: pos,
        fractional,
        special: false,
    })
}

/// Parser for decimal floating point numbers
pub struct FloatParser<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<'code, T> Parser<'code> for FloatParser<T>
where
    T: Float,
{
    type Output = T;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        let cursor = ctx.skip(cursor);
        let rest = cursor.rest();
        let Some(lexical) = scan_number(rest) else {
            return Err(ctx.soft(ParseError::expected("floating point number", cursor)));
        };

        let text = rest.get(..lexical.len).unwrap_or_default();
        let value = match text.parse::<T>() {
            Ok(value) if lexical.special || !value.is_infinite() => value,
            _ => {
                return Err(ctx.soft(ParseError::OutOfRange {
                    ty: T::NAME,
                    loc: CodeLoc::at(cursor),
                }));
            }
        };
        Ok((value, cursor.advance(lexical.len)))
    }
}

/// Parser for `f32` or `f64` numbers, including `inf`, `infinity` and `nan`
pub fn float<T: Float>() -> FloatParser<T> {
    FloatParser {
        _phantom: PhantomData,
    }
}
