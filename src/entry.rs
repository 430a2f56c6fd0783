//! Top-level entry points.

use crate::config::{Config, Parsed, Recovery};
use crate::context::Context;
use crate::cursor::Cursor;
use crate::cursors::StrCursor;
use crate::error::{CodeLoc, PResult, ParseError};
use crate::parser::Parser;
use tracing::debug;

/// Parse all of `input` with `parser` and default options
///
/// ```
/// use parsirule::prelude::*;
///
/// let list = separated_list(uint::<u32>(), lit(','));
/// assert_eq!(parse("1,2,3", &list).unwrap(), vec![1, 2, 3]);
/// assert!(parse("1,2,", &list).is_err());
/// ```
pub fn parse<'code, P>(input: &'code str, parser: &P) -> Result<P::Output, ParseError<'code>>
where
    P: Parser<'code>,
{
    parse_with(input, parser, Config::new()).map(|parsed| parsed.value)
}

/// Parse `input` with `parser` under the options in `config`
///
/// Unless `config` is partial, the input left after the grammar is skipped
/// with the configured skipper and must then be empty. A failed attempt is
/// reported to the error handler, which may ask for another attempt from a
/// later offset.
pub fn parse_with<'code, 'env, P>(
    input: &'code str,
    parser: &P,
    config: Config<'env>,
) -> Result<Parsed<P::Output>, ParseError<'code>>
where
    P: Parser<'code>,
{
    let partial = config.partial;
    let mut ctx = Context::from_config(input, config);
    let mut start = StrCursor::new(input);

    loop {
        let failure = match run(parser, start, &mut ctx, partial) {
            Ok((value, end)) => {
                return Ok(Parsed {
                    value,
                    consumed: end.position(),
                });
            }
            Err(failure) => failure,
        };

        let error = ctx.diagnose(failure);
        debug!(
            start = start.position(),
            position = error.position(),
            "parse failed: {}",
            error
        );

        let resume = match ctx.handle_error(&error) {
            Recovery::Retry { resume_at } if resume_at > start.position() => {
                StrCursor::at(input, resume_at)
            }
            Recovery::Retry { resume_at } => {
                debug!(resume_at, "ignoring retry that does not move forward");
                None
            }
            Recovery::Fail => None,
        };
        let Some(next) = resume else {
            return Err(error);
        };

        debug!(resume_at = next.position(), "retrying parse");
        ctx.take_furthest();
        start = next;
    }
}

fn run<'code, P>(
    parser: &P,
    cursor: StrCursor<'code>,
    ctx: &mut Context<'code, '_>,
    partial: bool,
) -> PResult<'code, P::Output>
where
    P: Parser<'code>,
{
    let (value, end) = parser.parse(cursor, ctx)?;
    if partial {
        return Ok((value, end));
    }

    let end = ctx.skip(end);
    if !end.eos() {
        return Err(ctx.soft(ParseError::TrailingInput {
            loc: CodeLoc::at(end),
        }));
    }
    Ok((value, end))
}
