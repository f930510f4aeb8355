mod output;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use hlir_core::{
    generate_ast_from_json, generate_error_report, lower_ast_to_ir, render_ir, HlirErrorExt, Operator,
    SourceFile, SourceUnit,
};
use serde::Serialize;

fn main() -> ExitCode {
    let cli = Command::new("hlir")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lower Python source trees into a region-based IR");

    let cli = setup_cli(cli);
    let matches = cli.get_matches();
    match dispatch_commands(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut stderr = output::stderr_handler();
            let _ = stderr.error(&generate_error_report(err.as_ref()));
            let _ = stderr.flush();
            ExitCode::FAILURE
        }
    }
}

/// Sets up the CLI with subcommands and arguments.
fn setup_cli(cli: Command) -> Command {
    cli.subcommand_required(true)
        .subcommand(
            Command::new("build")
                .about("Lower a JSON source tree and print its IR")
                .arg(
                    Arg::new("file")
                        .help("The JSON tree dump to lower")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("dump")
                        .help("Write an intermediate stage to dumped_<stage>.txt")
                        .short('d')
                        .long("dump")
                        .value_parser(["ast", "ir"])
                        .value_name("STAGE"),
                )
                .arg(
                    Arg::new("output")
                        .help("Write the IR to this file instead of stdout")
                        .short('o')
                        .long("output")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_name("FILE"),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Count the operators of the lowered IR by opcode")
                .arg(
                    Arg::new("file")
                        .help("The JSON tree dump to lower")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .help("Print the counts as JSON")
                        .long("json")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(matches: &ArgMatches) -> Result<(), Box<dyn HlirErrorExt>> {
    match matches.subcommand() {
        Some(("build", sub_m)) => {
            let (unit, module) = load_and_lower(sub_m)?;

            if let Some(stage) = sub_m.get_one::<String>("dump") {
                let (path, contents) = match stage.as_str() {
                    "ast" => ("dumped_ast.txt", format!("{:#?}", unit)),
                    _ => ("dumped_ir.txt", format!("{:#?}", module)),
                };
                if let Err(err) = fs::write(path, contents) {
                    let _ = output::stderr_handler().warning(&format!("Could not write {}: {}", path, err));
                }
            }

            let rendered = format!("{}\n", render_ir(&module));
            match sub_m.get_one::<PathBuf>("output") {
                Some(path) => {
                    fs::write(path, &rendered).map_err(|err| {
                        Box::new(WriteError { path: path.clone(), reason: err.to_string() }) as Box<dyn HlirErrorExt>
                    })?;
                    let _ = output::stdout_handler().success(&format!("IR written to {}", path.display()));
                }
                None => print!("{}", rendered),
            }
            Ok(())
        }
        Some(("stats", sub_m)) => {
            let (_, module) = load_and_lower(sub_m)?;
            let counts = opcode_counts(&module);

            if sub_m.get_flag("json") {
                let rows: Vec<OpcodeCount> =
                    counts.into_iter().map(|(opcode, count)| OpcodeCount { opcode, count }).collect();
                println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
            } else {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["Opcode", "Count"]);
                for (opcode, count) in &counts {
                    table.add_row(vec![opcode.clone(), count.to_string()]);
                }
                let _ = output::stdout_handler().title(&format!("{} operators", counts.values().sum::<usize>()));
                println!("{table}");
            }
            Ok(())
        }
        _ => {
            let _ = output::stdout_handler().info("No valid subcommand was used. Use --help for more information.");
            Ok(())
        }
    }
}

fn load_and_lower(sub_m: &ArgMatches) -> Result<(SourceUnit, Operator), Box<dyn HlirErrorExt>> {
    let file = sub_m.get_one::<String>("file").cloned().unwrap_or_default();
    let source = SourceFile::new(PathBuf::from(file))?;
    let unit = generate_ast_from_json(&source.content).map_err(|e| Box::new(e) as Box<dyn HlirErrorExt>)?;
    let module = lower_ast_to_ir(&unit).map_err(|e| Box::new(e) as Box<dyn HlirErrorExt>)?;
    Ok((unit, module))
}

#[derive(Debug, Serialize)]
struct OpcodeCount {
    opcode: String,
    count: usize,
}

fn opcode_counts(module: &Operator) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    module.walk(&mut |op: &Operator| {
        *counts.entry(op.opcode()).or_insert(0) += 1;
    });
    counts
}

#[derive(Debug, Clone)]
struct WriteError {
    path: PathBuf,
    reason: String,
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not write {:?}: {}", self.path, self.reason)
    }
}

impl std::error::Error for WriteError {}

impl HlirErrorExt for WriteError {
    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "hlir.cli".to_string()
    }
}
