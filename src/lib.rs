//! Module signatures (name, parameters, ports) from Verilog sources.
//!
//! ```
//! use reda_vsig::model::{NetKind, PortDirection, Verilog};
//!
//! let v: Verilog = "module m(input a, output reg signed [7:0] b, c); endmodule".parse().unwrap();
//! let c = v.modules[0].port("c").unwrap();
//! assert_eq!(c.direction, Some(PortDirection::Output));
//! assert_eq!(c.kind, Some(NetKind::Reg));
//! assert!(c.signed);
//! assert_eq!(c.width, "[7:0]");
//! ```
pub mod design;
pub mod model;
pub mod naming;
pub mod parse;

pub use design::{Design, DesignError, SubModule};
pub use model::{Module, NetKind, Parameter, Port, PortDirection, Verilog};
pub use naming::{first_instance_name, unique_name, InstanceNamer};
pub use parse::{load_file, load_str, ParseError, ParseOptions};
