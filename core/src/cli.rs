use crate::compiler::{Compiler, Diagnostic, Stmt};
use crate::config::Config;
use crate::demo::{DemoAnalysis, Module, Runtime, Val};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cogen")]
#[command(about = "cogen - compile and drive generator functions", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Skip the simplification pass
    #[arg(long, global = true)]
    pub no_optimize: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the lowered tree of each function as JSON
    Compile {
        /// Program file (JSON)
        program: PathBuf,

        /// Only print this function
        #[arg(short = 'f', long = "function")]
        function: Option<String>,
    },

    /// Validate a program and list every diagnostic
    Check {
        /// Program file (JSON)
        program: PathBuf,
    },

    /// Run a function and print each yielded value
    Run {
        /// Program file (JSON)
        program: PathBuf,

        /// Function to start (default: from config, else "main")
        #[arg(short = 'e', long = "entry")]
        entry: Option<String>,

        /// Integer argument, repeatable
        #[arg(long = "arg", allow_hyphen_values = true)]
        args: Vec<i64>,

        /// Stop after this many values
        #[arg(short = 'l', long = "limit")]
        limit: Option<usize>,

        /// Integer delivered with send before pulling the rest, repeatable
        #[arg(long = "send", allow_hyphen_values = true)]
        send: Vec<i64>,
    },
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments
pub fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

fn run_cli_with_args(cli: Cli) -> Result<()> {
    let config = Config::builder()
        .config_path(cli.config.map(PathBuf::from))
        .optimize(cli.no_optimize.then_some(false))
        .build()
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Compile { program, function } => {
            let runtime = Runtime::with_options(&read_module(&program)?, config.compile)?;
            let mut out = BTreeMap::new();
            for name in runtime.function_names() {
                if function.as_deref().map_or(true, |f| f == name) {
                    if let Some(program) = runtime.program(name) {
                        out.insert(name, program);
                    }
                }
            }
            if let Some(name) = &function {
                if out.is_empty() {
                    bail!("unknown function '{}'", name);
                }
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Commands::Check { program } => {
            let module = read_module(&program)?;
            let compiler = Compiler::with_options(config.compile);
            let mut errors = 0;
            for (name, function) in &module.functions {
                let body = Stmt::block(function.body.clone());
                let diagnostics: Vec<Diagnostic> = compiler.check(&body, &DemoAnalysis);
                for diagnostic in &diagnostics {
                    println!("{}: {}", name, diagnostic);
                }
                errors += diagnostics.iter().filter(|d| d.is_error()).count();
            }
            if errors > 0 {
                bail!("{} error(s) found", errors);
            }
            println!("{} function(s) ok", module.functions.len());
        }

        Commands::Run {
            program,
            entry,
            args,
            limit,
            send,
        } => {
            let runtime = Runtime::with_options(&read_module(&program)?, config.compile)?;
            let entry = entry.unwrap_or(config.run.entry);
            let limit = limit.or(config.run.limit).unwrap_or(usize::MAX);
            let args = args.into_iter().map(Val::Int).collect();
            let mut gen = runtime.start(&entry, args)?;

            let mut printed = 0;
            for value in send {
                if printed >= limit {
                    break;
                }
                match gen.send(Val::Int(value)) {
                    Some(yielded) => {
                        println!("{}", yielded);
                        printed += 1;
                    }
                    None => break,
                }
            }
            while printed < limit && gen.move_next() {
                println!("{}", gen.current());
                printed += 1;
            }

            for value in runtime.take_emitted() {
                eprintln!("emit {}", value);
            }
            if *gen.result() != Val::Null {
                eprintln!("return {}", gen.result());
            }
        }
    }

    Ok(())
}

fn read_module(path: &Path) -> Result<Module> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("Failed to parse {}", path.display()))
}
