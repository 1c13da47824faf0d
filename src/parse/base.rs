use nom::branch::alt;
use nom::bytes::complete::{is_not, tag};
use nom::character::complete::{alpha1, alphanumeric1, char, multispace0, satisfy};
use nom::combinator::{not, recognize};
use nom::error::{ErrorKind, ParseError as _, VerboseError};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::{Err, IResult};

pub type NomResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub fn ws0(input: &str) -> NomResult<&str> {
    multispace0(input)
}

/// 包装 parser，跳过两边空白
///
/// Comments are already gone by the time the signature parsers run, so only
/// whitespace is skipped here.
pub fn hws<'a, F: 'a, O>(mut inner: F) -> impl FnMut(&'a str) -> NomResult<'a, O>
where
    F: FnMut(&'a str) -> NomResult<'a, O>,
{
    move |input: &'a str| {
        let (input, _) = ws0(input)?;
        let (input, res) = inner(input)?;
        let (input, _) = ws0(input)?;
        Ok((input, res))
    }
}

macro_rules! wrap_parser {
    ($parser:expr, $input:expr, $ctx:expr) => {
        match $parser {
            Ok(v) => Ok(v),
            Err(Err::Incomplete(n)) => Err(Err::Incomplete(n)),
            Err(Err::Error(_)) => Err(Err::Error(nom::error::VerboseError {
                errors: [($input, nom::error::VerboseErrorKind::Context($ctx))].into(),
            })),
            Err(Err::Failure(_)) => Err(Err::Failure(nom::error::VerboseError {
                errors: [($input, nom::error::VerboseErrorKind::Context($ctx))].into(),
            })),
        }
    };
}

pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// typical identifier
// ie. abcdef, de234, jkl_mn, _x
pub fn identifier(input: &str) -> NomResult<&str> {
    fn _identifier(input: &str) -> NomResult<&str> {
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        ))(input)
    }
    wrap_parser!(_identifier(input), input, "identifier")
}

/// A reserved word that is not the prefix of a longer identifier,
/// so `reg` does not match the start of `region`.
pub fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> NomResult<'a, &'a str> {
    move |input: &'a str| {
        let parsed: NomResult<&str> = terminated(tag(word), not(satisfy(is_ident_char)))(input);
        wrap_parser!(parsed, input, word)
    }
}

/// Shortest `( … )` group whose closing parenthesis is followed by text that
/// `tail` accepts. `input` starts right after the opening parenthesis.
///
/// Returns the trimmed group content together with whatever `tail` produced.
pub fn lazy_group<'a, F, O>(input: &'a str, mut tail: F) -> NomResult<'a, (&'a str, O)>
where
    F: FnMut(&'a str) -> NomResult<'a, O>,
{
    for (at, _) in input.match_indices(')') {
        if let Ok((rest, out)) = tail(&input[at + 1..]) {
            return Ok((rest, (input[..at].trim(), out)));
        }
    }
    Err(Err::Error(VerboseError::from_error_kind(input, ErrorKind::Char)))
}

/// `( … )` followed by optional whitespace and `;`. Nothing after the `;`
/// is consumed.
pub fn group_then_semicolon(input: &str) -> NomResult<&str> {
    let (input, _) = hws(char('('))(input)?;
    let (input, (content, _)) = lazy_group(input, |rest| preceded(multispace0, char(';'))(rest))?;
    Ok((input, content))
}

/// Bracketed range kept verbatim, ie. `[7:0]`, `[WIDTH-1:0]`
pub fn bracket_range(input: &str) -> NomResult<&str> {
    recognize(delimited(
        char('['),
        is_not("]"),
        char(']'),
    ))(input)
}
