use std::ffi::OsStr;
use std::path::Path;

pub const DEFAULT_EXTENSION: &str = "v";

/// Knobs for reading Verilog sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Files without this extension are ignored (not an error).
    pub extension: String,
    /// Reject a module whose port list has entries that could not be read,
    /// instead of dropping those entries.
    pub strict_ports: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            strict_ports: false,
        }
    }
}

impl ParseOptions {
    pub fn with_extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_strict_ports(mut self, strict: bool) -> Self {
        self.strict_ports = strict;
        self
    }

    /// Whether `path` names a file this parser should look at.
    pub fn accepts(&self, path: &Path) -> bool {
        !path.as_os_str().is_empty() && path.extension() == Some(OsStr::new(&self.extension))
    }
}
