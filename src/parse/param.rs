use crate::model::Parameter;

use super::base::{keyword, ws0, NomResult};
use super::ParseError;

/// Drop a leading `parameter` keyword, if any.
fn without_keyword(segment: &str) -> &str {
    fn _keyword(input: &str) -> NomResult<&str> {
        let (input, _) = keyword("parameter")(input)?;
        ws0(input)
    }
    match _keyword(segment) {
        Ok((rest, _)) => rest,
        Err(_) => segment,
    }
}

/// Parse the text between `#(` and `)` into name/value pairs.
///
/// Every comma starts a new declaration, so `parameter A = 1, B = 2` works
/// while a value containing a comma (`'{1, 2}`) is cut apart.
pub fn parse_parameters(text: &str) -> Result<Vec<Parameter>, ParseError> {
    text.split(',')
        .map(|segment| without_keyword(segment.trim()))
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| -> Result<Parameter, ParseError> {
            let (name, value) = segment.split_once('=').ok_or_else(|| ParseError::MalformedParameter {
                segment: segment.trim().to_string(),
            })?;
            Ok(Parameter {
                name: name.trim().to_string(),
                value: value.trim().to_string(),
            })
        })
        .collect()
}
