//! # langforge Command Line Interface
//!
//! A thin CLI wrapper around the `langforge` library that drives the
//! compile pipeline (`compile`) or inspects an intermediate stage of it
//! (`dump`), per SPEC_FULL.md §6a.
//!
//! Mirrors the separation the library itself keeps: this binary only
//! parses arguments, initializes logging, and prints results or errors —
//! all processing lives in `langforge::{compile, compile_and_emit}`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use langforge::emit::EmitOptions;
use langforge::{compile, compile_and_emit, description, CompileError, Result};

/// Compiles a declarative language description into a lexer spec, grammar
/// spec, typed AST class hierarchy, base visitor, and source printer.
#[derive(Parser, Debug)]
#[command(name = "langforge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline and write the five generated artifacts under
    /// `<folder>/gen/`.
    Compile {
        /// Folder containing `<lang-key>.lang`
        folder: PathBuf,
        /// The language description's key (file stem)
        lang_key: String,
        /// Emit the `.l`/`.y` sources but skip invoking flex/bison
        #[arg(long)]
        skip_external: bool,
        /// Enable debug-level logging
        #[arg(long)]
        verbose: bool,
    },
    /// Read the description or run the pipeline and print one intermediate
    /// stage, without writing any generated artifacts.
    Dump {
        /// Folder containing `<lang-key>.lang`
        folder: PathBuf,
        /// The language description's key (file stem)
        lang_key: String,
        #[arg(long, value_enum)]
        stage: Stage,
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Stage {
    /// The parsed Description Model, before any pass runs.
    Description,
    /// The fully cross-linked language model, after all seven passes.
    Model,
    /// Ast/list/enum grammar rules only (Passes 4–5).
    Rules,
    /// Ast classes and enums only (Pass 6).
    Classes,
    /// Printer-case indices only (Pass 7).
    PrinterCases,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Debug,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Command::Compile { verbose: true, .. });
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("langforge: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Compile { folder, lang_key, skip_external, verbose: _ } => {
            let options = EmitOptions { skip_external };
            let result = compile_and_emit(&folder, &lang_key, &options)?;
            println!("wrote {} files to {}", result.files.len(), result.gen_dir.display());
            Ok(())
        }
        Command::Dump { folder, lang_key, stage, format } => run_dump(&folder, &lang_key, stage, format),
    }
}

fn run_dump(folder: &std::path::Path, lang_key: &str, stage: Stage, format: Format) -> Result<()> {
    match stage {
        Stage::Description => {
            let path = folder.join(format!("{lang_key}.lang"));
            let text = std::fs::read_to_string(&path).map_err(|e| CompileError::Io { path, source: e })?;
            let source = description::parser::read(&text)?;
            print_value(&source, format);
        }
        Stage::Model => {
            let model = compile(folder, lang_key)?;
            print_value(&model, format);
        }
        Stage::Rules => {
            let model = compile(folder, lang_key)?;
            print_value(&(&model.ast_grammars, &model.list_grammars, &model.enum_grammars), format);
        }
        Stage::Classes => {
            let model = compile(folder, lang_key)?;
            print_value(&(&model.ast_classes, &model.ast_enums), format);
        }
        Stage::PrinterCases => {
            let model = compile(folder, lang_key)?;
            print_value(&(&model.class_cases, &model.keyed_cases), format);
        }
    }
    Ok(())
}

fn print_value<T: serde::Serialize + std::fmt::Debug>(value: &T, format: Format) {
    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string()))
        }
        Format::Debug => println!("{value:#?}"),
    }
}
