use std::{path::Path, str::FromStr};
use crate::parse::{self, ParseError, ParseOptions};

#[cfg(feature = "serialize")]
use serde::Serialize;

/// 一个源文件中解析出的全部模块
#[derive(Debug, Default)]
pub struct Verilog {
    pub modules: Vec<Module>,
    /// Regions that looked like modules but whose parameter or port list was rejected.
    pub rejected: Vec<ParseError>,
}

impl Verilog {
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        parse::load_file(path)
    }

    pub fn load_file_with<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self, ParseError> {
        parse::load_file_with(path, options)
    }

    pub fn load_str_with(source: &str, options: &ParseOptions) -> Self {
        parse::load_str_with(source, options)
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }
}

impl FromStr for Verilog {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse::load_str(s))
    }
}

/// 模块签名
///
/// `Clone` yields an independent deep copy, which is what a duplicated
/// instantiation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Module {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub ports: Vec<Port>,
    /// Everything between the header `;` and `endmodule`, untouched.
    pub body: String,
    /// Port list entries that did not match `[dir] [kind] [signed] [range] name`.
    pub skipped_ports: usize,
}

impl Module {
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// 参数声明, value 保持原样不求值
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

/// 模块端口
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Port {
    pub name: String,
    /// `None` only when no entry of the list ever named a direction.
    pub direction: Option<PortDirection>,
    /// `None` only when no entry of the list ever named a direction or kind.
    pub kind: Option<NetKind>,
    pub signed: bool,
    /// `"1"` for scalars, otherwise the bracketed range verbatim, e.g. `"[7:0]"`.
    pub width: String,
    /// Owned by the consumer; the parser always sets it to `true`.
    pub route_to_top: bool,
}

impl Port {
    pub fn is_scalar(&self) -> bool {
        self.width == SCALAR_WIDTH
    }
}

pub const SCALAR_WIDTH: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum PortDirection {
    Input,
    Output,
    Inout,
}

impl PortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
            PortDirection::Inout => "inout",
        }
    }
}

impl std::fmt::Display for PortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum NetKind {
    Wire,
    Reg,
}

impl NetKind {
    pub fn keyword(self) -> &'static str {
        match self {
            NetKind::Wire => "wire",
            NetKind::Reg => "reg",
        }
    }
}

impl std::fmt::Display for NetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
