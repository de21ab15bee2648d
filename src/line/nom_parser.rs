//! Nom-based IRC line tokenizer.
//!
//! This module splits one raw protocol line into its prefix, command and
//! parameters using the nom parser combinator library. Slices borrow from
//! the input; [`super::ParsedLine`] owns the final result.

use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    error::{context, VerboseError, VerboseErrorKind},
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::MessageParseError;

type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

/// Parse message prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing message prefix",
        terminated(
            preceded(char(':'), take_while1(|c| c != ' ')),
            take_while1(|c| c == ' '),
        ),
    )(input)
}

/// Parse the command token (letters or a numeric).
fn parse_command(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing IRC command",
        take_while1(|c: char| c.is_ascii_alphanumeric()),
    )(input)
}

/// Whether a command token is either all letters or exactly three digits.
fn is_valid_command(command: &str) -> bool {
    command.bytes().all(|b| b.is_ascii_alphabetic())
        || (command.len() == 3 && command.bytes().all(|b| b.is_ascii_digit()))
}

/// Borrowed pieces of one tokenized line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawParts<'a> {
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: Vec<&'a str>,
}

/// Split parameters off the remainder of a line.
///
/// Runs of spaces separate parameters. A parameter introduced by `:` swallows
/// the rest of the line, spaces and colons included.
fn parse_params(input: &str) -> (Vec<&str>, &str) {
    let mut params = Vec::new();
    let mut rest = input;

    loop {
        let trimmed = rest.trim_start_matches(' ');
        if trimmed.len() == rest.len() {
            break;
        }
        rest = trimmed;

        if rest.is_empty() || rest.starts_with(['\r', '\n']) {
            break;
        }

        if let Some(trailing) = rest.strip_prefix(':') {
            let end = trailing.find(['\r', '\n']).unwrap_or(trailing.len());
            params.push(&trailing[..end]);
            rest = &trailing[end..];
            break;
        }

        let end = rest.find([' ', '\r', '\n']).unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }

    (params, rest)
}

/// Tokenize one IRC line.
///
/// IRC line format:
/// ```text
/// [:prefix] <command> [params...] [:trailing]
/// ```
pub(crate) fn parse_line(input: &str) -> Result<RawParts<'_>, MessageParseError> {
    let (rest, prefix) = if input.starts_with(':') {
        let (rest, prefix) = parse_prefix(input).map_err(|e| to_context_error(input, e))?;
        (rest, Some(prefix))
    } else {
        (input, None)
    };

    let (rest, command) = parse_command(rest).map_err(|e| to_context_error(input, e))?;
    if !is_valid_command(command) {
        return Err(MessageParseError::InvalidCommand);
    }

    let (params, rest) = parse_params(rest);

    let leftover = rest.trim_end_matches(['\r', '\n']);
    if !leftover.is_empty() {
        return Err(MessageParseError::ParseContext {
            position: input.len() - rest.len(),
            context: "unexpected input after command".to_string(),
        });
    }

    Ok(RawParts {
        prefix,
        command,
        params,
    })
}

/// Turn a nom error into a positioned parse error, keeping the innermost context.
fn to_context_error(input: &str, err: nom::Err<VerboseError<&str>>) -> MessageParseError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let mut context_info = "parsing line";
            let mut position = input.len();

            for (error_input, error_kind) in &e.errors {
                position = input.len() - error_input.len();
                if let VerboseErrorKind::Context(ctx) = error_kind {
                    context_info = ctx;
                }
            }

            MessageParseError::ParseContext {
                position,
                context: context_info.to_string(),
            }
        }
        nom::Err::Incomplete(_) => MessageParseError::ParseContext {
            position: input.len(),
            context: "incomplete input".to_string(),
        },
    }
}
