//! Invokes the external lexer and grammar generators on the emitted `.l`
//! and `.y` files. Their own output is not interpreted — only the process
//! exit status is checked, matching §4.9 ("External generator invocation").

use std::path::Path;
use std::process::Command;

use crate::error::{CompileError, Result};

const LEXER_GENERATOR: &str = "flex";
const GRAMMAR_GENERATOR: &str = "bison";

pub fn run_generators(gen_dir: &Path, lang_key: &str) -> Result<()> {
    run_tool(LEXER_GENERATOR, &["-o", &out_path(gen_dir, lang_key, "yy.cpp"), &source_path(gen_dir, lang_key, "l")])?;
    run_tool(
        GRAMMAR_GENERATOR,
        &["-d", "-o", &out_path(gen_dir, lang_key, "tab.cpp"), &source_path(gen_dir, lang_key, "y")],
    )?;
    Ok(())
}

fn source_path(gen_dir: &Path, lang_key: &str, ext: &str) -> String {
    gen_dir.join(format!("{lang_key}.{ext}")).to_string_lossy().into_owned()
}

fn out_path(gen_dir: &Path, lang_key: &str, ext: &str) -> String {
    gen_dir.join(format!("{lang_key}.{ext}")).to_string_lossy().into_owned()
}

fn run_tool(tool: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(tool).args(args).status().map_err(|e| CompileError::ExternalTool {
        tool: tool.to_string(),
        message: e.to_string(),
    })?;
    if !status.success() {
        return Err(CompileError::ExternalTool {
            tool: tool.to_string(),
            message: format!("exited with {status}"),
        });
    }
    Ok(())
}
