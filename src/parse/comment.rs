use nom::bytes::complete::{tag, take_till, take_until};
use nom::combinator::recognize;
use nom::sequence::{delimited, preceded};

use super::base::NomResult;

/// 多行注释: /* ... */
fn block_comment(input: &str) -> NomResult<&str> {
    recognize(delimited(tag("/*"), take_until("*/"), tag("*/")))(input)
}

/// 单行注释: // ... (换行保留)
fn line_comment(input: &str) -> NomResult<&str> {
    recognize(preceded(tag("//"), take_till(|c: char| c == '\n')))(input)
}

/// Remove every match of `comment`, scanning left to right from each `open`.
///
/// Stops at the first `open` the parser rejects: nothing after an
/// unterminated comment opener can be a comment of the same kind.
fn remove_all<'a>(source: &'a str, open: &str, comment: fn(&'a str) -> NomResult<'a, &'a str>) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(at) = rest.find(open) {
        match comment(&rest[at..]) {
            Ok((after, _)) => {
                out.push_str(&rest[..at]);
                rest = after;
            }
            Err(_) => break,
        }
    }
    out.push_str(rest);
    out
}

/// Strip block comments, then line comments from what is left.
///
/// There is no notion of string literals: `"a // b"` loses its tail. Block
/// comment removal repeats until nothing changes, since deleting `/*x*/` from
/// `/ /*x*/ *` (without the spaces) opens a new comment.
pub fn strip_comments(source: &str) -> String {
    let mut text = remove_all(source, "/*", block_comment);
    loop {
        let next = remove_all(&text, "/*", block_comment);
        if next.len() == text.len() {
            break;
        }
        text = next;
    }
    remove_all(&text, "//", line_comment)
}
