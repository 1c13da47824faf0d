use std::str::FromStr;

use reda_vsig::{model::Verilog, Design, DesignError, ParseOptions};

fn print_module(module: &reda_vsig::Module) {
    println!("module {}", module.name);
    for p in &module.parameters {
        println!("  parameter {} = {}", p.name, p.value);
    }
    for p in &module.ports {
        let direction = p.direction.map(|d| d.keyword()).unwrap_or("-");
        let kind = p.kind.map(|k| k.keyword()).unwrap_or("-");
        let signed = if p.signed { "signed" } else { "" };
        println!("  {:6} {:4} {:6} {:>10} {}", direction, kind, signed, p.width, p.name);
    }
    if module.skipped_ports > 0 {
        println!("  ({} unreadable port entries)", module.skipped_ports);
    }
}

fn main() -> Result<(), DesignError> {
    env_logger::Builder::new()
        .format_timestamp(None)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let files: Vec<String> = std::env::args().skip(1).collect();
    if !files.is_empty() {
        let options = ParseOptions::default();
        let mut design = Design::new();
        for file in &files {
            design.add_file(file, &options)?;
        }
        for sub in design.sub_modules() {
            println!("{} ({})", sub.instance, sub.filename);
            print_module(&sub.module);
        }
        return Ok(());
    }

    let source = r#"
module adder #(
    parameter WIDTH = 4
) (
    input  wire [WIDTH-1:0] a, b,
    output reg  [WIDTH:0]   sum
);
    always @(*) sum = a + b; // body is kept verbatim
endmodule
    "#;

    let verilog = Verilog::from_str(source)?;
    for module in &verilog.modules {
        print_module(module);
    }
    Ok(())
}
