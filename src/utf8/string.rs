use crate::context::Context;
use crate::cursors::StrCursor;
use crate::error::{PResult, ParseError};
use crate::parser::Parser;
use std::borrow::Cow;

/// Text a literal parser matches
pub trait LiteralText {
    fn into_text(self) -> Cow<'static, str>;
}

impl LiteralText for char {
    fn into_text(self) -> Cow<'static, str> {
        Cow::Owned(self.to_string())
    }
}

impl LiteralText for &'static str {
    fn into_text(self) -> Cow<'static, str> {
        Cow::Borrowed(self)
    }
}

impl LiteralText for String {
    fn into_text(self) -> Cow<'static, str> {
        Cow::Owned(self)
    }
}

/// Match `text` exactly after pre-skipping, returning the cursor past it
fn match_text<'code>(
    text: &str,
    expected: &Cow<'static, str>,
    cursor: StrCursor<'code>,
    ctx: &mut Context<'code, '_>,
) -> Result<StrCursor<'code>, ParseError<'code>> {
    let cursor = ctx.skip(cursor);
    if cursor.rest().starts_with(text) {
        Ok(cursor.advance(text.len()))
    } else {
        Err(ParseError::expected(expected.clone(), cursor))
    }
}

/// Parser that matches an exact string and returns it
pub struct StringParser {
    text: Cow<'static, str>,
    expected: Cow<'static, str>,
}

impl StringParser {
    pub fn new(text: impl LiteralText) -> Self {
        let text = text.into_text();
        let expected = format!("{:?}", text).into();
        StringParser { text, expected }
    }
}

impl<'code> Parser<'code> for StringParser {
    type Output = Cow<'static, str>;

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        match match_text(&self.text, &self.expected, cursor, ctx) {
            Ok(cursor) => Ok((self.text.clone(), cursor)),
            Err(error) => Err(ctx.soft(error)),
        }
    }
}

/// Parser that matches an exact character or string and produces no attribute
pub struct Lit {
    text: Cow<'static, str>,
    expected: Cow<'static, str>,
}

impl Lit {
    pub fn new(text: impl LiteralText) -> Self {
        let text = text.into_text();
        // Single characters are described the way `ch` describes them
        let mut chars = text.chars();
        let expected = match (chars.next(), chars.next()) {
            (Some(c), None) => format!("{:?}", c),
            _ => format!("{:?}", text),
        };
        Lit {
            text,
            expected: expected.into(),
        }
    }
}

impl<'code> Parser<'code> for Lit {
    type Output = ();

    fn parse(
        &self,
        cursor: StrCursor<'code>,
        ctx: &mut Context<'code, '_>,
    ) -> PResult<'code, Self::Output> {
        match match_text(&self.text, &self.expected, cursor, ctx) {
            Ok(cursor) => Ok(((), cursor)),
            Err(error) => Err(ctx.soft(error)),
        }
    }
}

/// Parser that matches `text` exactly and returns it
pub fn string(text: impl LiteralText) -> StringParser {
    StringParser::new(text)
}

/// Parser that matches `text` exactly and discards it
pub fn lit(text: impl LiteralText) -> Lit {
    Lit::new(text)
}
