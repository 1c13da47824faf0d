mod base;
mod comment;
pub mod error;
mod options;
mod param;
mod port;
mod segment;

pub use comment::strip_comments;
pub use error::ParseError;
pub use options::{ParseOptions, DEFAULT_EXTENSION};
pub use param::parse_parameters;
pub use port::{parse_ports, port_decl, CarryState, PortDecl, PortList};
pub use segment::{segment, RawModule};

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;

use crate::model::{Module, Verilog};

pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Verilog, ParseError> {
    load_file_with(path, &ParseOptions::default())
}

/// Read and parse one source file.
///
/// An empty path, a path with the wrong extension, or a file that does not
/// exist gives an empty result. Other IO failures are errors. Bytes that are
/// not valid UTF-8 are replaced with U+FFFD.
pub fn load_file_with<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Verilog, ParseError> {
    let path = path.as_ref();
    if !options.accepts(path) {
        log::debug!("ignoring '{}': not a .{} file", path.display(), options.extension);
        return Ok(Verilog::default());
    }
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("'{}' does not exist", path.display());
            return Ok(Verilog::default());
        }
        Err(e) => return Err(e.into()),
    };
    let source = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = source {
        log::warn!("'{}' is not valid UTF-8, undecodable bytes were replaced", path.display());
    }
    log::debug!("loaded '{}' ({} bytes)", path.display(), bytes.len());
    Ok(load_str_with(&source, options))
}

pub fn load_str(source: &str) -> Verilog {
    load_str_with(source, &ParseOptions::default())
}

/// Parse every module in `source`.
///
/// A module whose parameter or port list is rejected ends up in
/// [`Verilog::rejected`]; the modules around it are still parsed.
pub fn load_str_with(source: &str, options: &ParseOptions) -> Verilog {
    let mut verilog = Verilog::default();
    for result in parse_modules(source, options) {
        match result {
            Ok(module) => verilog.modules.push(module),
            Err(e) => {
                log::warn!("{}", e);
                verilog.rejected.push(e);
            }
        }
    }
    verilog
}

/// One result per module region, in source order.
pub fn parse_modules(source: &str, options: &ParseOptions) -> Vec<Result<Module, ParseError>> {
    let text = strip_comments(source);
    segment(&text).iter().map(|raw| module(raw, options)).collect()
}

/// Turn a raw region into a [`Module`].
pub fn module(raw: &RawModule<'_>, options: &ParseOptions) -> Result<Module, ParseError> {
    let parameters = parse_parameters(raw.parameters).map_err(|e| ParseError::in_module(raw.name, e))?;

    let PortList { ports, skipped } = parse_ports(raw.ports);
    if skipped > 0 && options.strict_ports {
        return Err(ParseError::MalformedPort {
            module: raw.name.to_string(),
            skipped,
        });
    }

    Ok(Module {
        name: raw.name.to_string(),
        parameters,
        ports,
        body: raw.body.to_string(),
        skipped_ports: skipped,
    })
}
