use nom::branch::alt;
use nom::bytes::complete::{tag, take_until};
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::map;
use nom::sequence::{preceded, terminated};

use super::base::{group_then_semicolon, hws, identifier, is_ident_char, keyword, lazy_group, NomResult};

/// A `module … endmodule` region cut out of comment-free source text.
///
/// Lists are trimmed; they are empty when the header has no such group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawModule<'a> {
    pub name: &'a str,
    pub parameters: &'a str,
    pub ports: &'a str,
    pub body: &'a str,
}

/// Find every module region in `source`, in order.
///
/// A `module` keyword whose header does not match, or that is never closed
/// by `endmodule`, is passed over and the scan goes on behind it.
pub fn segment(source: &str) -> Vec<RawModule<'_>> {
    let mut modules = vec![];
    let mut rest = source;
    while let Some(at) = find_module_keyword(rest) {
        let candidate = &rest[at..];
        match module_region(candidate) {
            Ok((after, raw)) => {
                log::debug!(
                    "found module '{}' ({} parameter bytes, {} port bytes)",
                    raw.name,
                    raw.parameters.len(),
                    raw.ports.len()
                );
                modules.push(raw);
                rest = after;
            }
            Err(_) => {
                log::trace!("'module' at byte {} does not start a module region", source.len() - candidate.len());
                rest = &candidate["module".len()..];
            }
        }
    }
    modules
}

fn find_module_keyword(input: &str) -> Option<usize> {
    input
        .match_indices("module")
        .map(|(at, _)| at)
        .find(|&at| !input[..at].ends_with(is_ident_char))
}

/// module <name> [#(<parameters>)] [(<ports>)] ; <body> endmodule
pub fn module_region(input: &str) -> NomResult<RawModule<'_>> {
    let (input, _) = keyword("module")(input)?;
    let (input, name) = preceded(multispace1, identifier)(input)?;
    let (input, (parameters, ports)) = preceded(multispace0, header_lists)(input)?;
    map(terminated(take_until("endmodule"), tag("endmodule")), move |body| RawModule {
        name,
        parameters,
        ports,
        body,
    })(input)
}

/// Everything from after the module name up to and including the header `;`.
fn header_lists(input: &str) -> NomResult<(&str, &str)> {
    alt((
        map(char(';'), |_| ("", "")),
        map(group_then_semicolon, |ports| ("", ports)),
        parameter_group,
    ))(input)
}

/// #(<parameters>) followed by `;` or by a port group.
///
/// The parameter list ends at the first `)` after which the rest of the
/// header still matches, so `#(W = (8))` keeps its inner parentheses.
fn parameter_group(input: &str) -> NomResult<(&str, &str)> {
    let (input, _) = hws(char('#'))(input)?;
    let (input, _) = hws(char('('))(input)?;
    lazy_group(input, |rest| {
        preceded(multispace0, alt((map(char(';'), |_| ""), group_then_semicolon)))(rest)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_module() {
        assert!(segment("").is_empty());
        assert!(segment("wire a; assign a = 1'b0;").is_empty());
        assert!(segment("endmodule").is_empty());
    }

    #[test]
    fn test_bare_module() {
        let raws = segment("module top;\n  wire x;\nendmodule\n");
        assert_eq!(
            raws,
            vec![RawModule { name: "top", parameters: "", ports: "", body: "\n  wire x;\n" }]
        );
    }

    #[test]
    fn test_ports_only() {
        let raws = segment("module m ( input a, output b ) ; assign b = a; endmodule");
        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].name, "m");
        assert_eq!(raws[0].parameters, "");
        assert_eq!(raws[0].ports, "input a, output b");
        assert_eq!(raws[0].body, " assign b = a; ");
    }

    #[test]
    fn test_parameters_and_ports() {
        let src = r#"
module fifo #(
    parameter WIDTH = 8,
    parameter DEPTH = (1 << 4)
) (
    input clk,
    input [WIDTH-1:0] din
);
endmodule
"#;
        let raws = segment(src);
        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].name, "fifo");
        assert_eq!(raws[0].parameters, "parameter WIDTH = 8,\n    parameter DEPTH = (1 << 4)");
        assert_eq!(raws[0].ports, "input clk,\n    input [WIDTH-1:0] din");
        assert_eq!(raws[0].body, "\n");
    }

    #[test]
    fn test_parameters_only() {
        let raws = segment("module c #(parameter N = 2);\nendmodule");
        assert_eq!(raws[0].parameters, "parameter N = 2");
        assert_eq!(raws[0].ports, "");
    }

    #[test]
    fn test_header_whitespace() {
        let raws = segment("module c # ( parameter N = 2 ) ( input a ) ;endmodule");
        assert_eq!(
            raws,
            vec![RawModule { name: "c", parameters: "parameter N = 2", ports: "input a", body: "" }]
        );
        assert!(segment("modulec;endmodule").is_empty());
    }

    #[test]
    fn test_multiple_modules_in_order() {
        let src = "module a(input x); endmodule\nmodule b(output y); endmodule";
        let names: Vec<_> = segment(src).iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_body_stops_at_first_endmodule() {
        let raws = segment("module a; x endmodule y endmodule");
        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].body, " x ");
    }

    #[test]
    fn test_unclosed_module_is_skipped() {
        assert!(segment("module a(input x);\nwire y;\n").is_empty());
        let raws = segment("module broken(; module ok; endmodule");
        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].name, "ok");
    }

    #[test]
    fn test_module_keyword_needs_boundary() {
        let raws = segment("submodule x; endmodule module y; endmodule");
        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].name, "y");
        assert!(segment("modulex;endmodule").is_empty());
    }
}
