use nom::branch::alt;
use nom::combinator::{map, opt};

use crate::model::{NetKind, Port, PortDirection, SCALAR_WIDTH};

use super::base::{bracket_range, hws, identifier, keyword, NomResult};

/// One port list entry as written; only the name is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortDecl<'a> {
    pub direction: Option<PortDirection>,
    pub kind: Option<NetKind>,
    pub signed: bool,
    pub width: Option<&'a str>,
    pub name: &'a str,
}

/// Attributes handed from one port list entry to the next.
///
/// An explicit attribute resets every narrower one before the rest is
/// inherited: direction > kind > signed > width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarryState {
    pub direction: Option<PortDirection>,
    pub kind: Option<NetKind>,
    pub signed: bool,
    pub width: String,
}

impl Default for CarryState {
    fn default() -> Self {
        Self {
            direction: None,
            kind: None,
            signed: false,
            width: SCALAR_WIDTH.to_string(),
        }
    }
}

impl CarryState {
    /// Resolve `decl` against the carried attributes and carry the result on.
    pub fn apply(&mut self, decl: &PortDecl<'_>) -> Port {
        if let Some(direction) = decl.direction {
            self.direction = Some(direction);
            self.kind = Some(NetKind::Wire);
            self.signed = false;
            self.width = SCALAR_WIDTH.to_string();
        }
        if let Some(kind) = decl.kind {
            self.kind = Some(kind);
            self.signed = false;
            self.width = SCALAR_WIDTH.to_string();
        }
        if decl.signed {
            self.signed = true;
            self.width = SCALAR_WIDTH.to_string();
        }
        if let Some(width) = decl.width {
            self.width = width.to_string();
        }

        Port {
            name: decl.name.to_string(),
            direction: self.direction,
            kind: self.kind,
            signed: self.signed,
            width: self.width.clone(),
            route_to_top: true,
        }
    }
}

/// Ports of one module plus the number of entries that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortList {
    pub ports: Vec<Port>,
    pub skipped: usize,
}

pub fn port_direction(input: &str) -> NomResult<PortDirection> {
    alt((
        map(keyword("input"), |_| PortDirection::Input),
        map(keyword("output"), |_| PortDirection::Output),
        map(keyword("inout"), |_| PortDirection::Inout),
    ))(input)
}

pub fn net_kind(input: &str) -> NomResult<NetKind> {
    alt((
        map(keyword("wire"), |_| NetKind::Wire),
        map(keyword("reg"), |_| NetKind::Reg),
    ))(input)
}

/// [input|output|inout] [wire|reg] [signed] [range] name
///
/// Whatever follows the name (an initializer, say) is left unconsumed.
pub fn port_decl(input: &str) -> NomResult<PortDecl<'_>> {
    let (input, direction) = opt(hws(port_direction))(input)?;
    let (input, kind) = opt(hws(net_kind))(input)?;
    let (input, signed) = opt(hws(keyword("signed")))(input)?;
    let (input, width) = opt(hws(bracket_range))(input)?;
    let (input, name) = hws(identifier)(input)?;
    Ok((input, PortDecl {
        direction,
        kind,
        signed: signed.is_some(),
        width,
        name,
    }))
}

/// Parse the text between a module's port parentheses.
///
/// The carried attributes start out empty for every call, so nothing leaks
/// from one module to the next.
pub fn parse_ports(text: &str) -> PortList {
    let mut state = CarryState::default();
    let mut list = PortList::default();

    for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match port_decl(entry) {
            Ok((rest, decl)) => {
                if !rest.is_empty() {
                    log::trace!("ignoring '{}' after port '{}'", rest, decl.name);
                }
                let port = state.apply(&decl);
                log::trace!(
                    "port '{}': {:?} {:?} signed={} width={}",
                    port.name,
                    port.direction,
                    port.kind,
                    port.signed,
                    port.width
                );
                list.ports.push(port);
            }
            Err(_) => {
                log::warn!("skipping port entry '{}'", entry);
                list.skipped += 1;
            }
        }
    }
    list
}
