use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use cs2_backend_strict::{emit_function_to_string, StrictBackend, StrictOptions};
use cs2_core::error::CoreError;
use cs2_core::ir::Module;
use cs2_core::names::NameTable;
use cs2_core::pipeline::{
    default_pipeline, Backend, BackendInput, DebugConfig, PassConfig, VALID_PASS_NAMES,
};

use crate::cli::{Cli, Command, EmitArgs};

mod cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Emit(args) => emit(args),
        Command::Passes => {
            for name in VALID_PASS_NAMES {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn emit(args: EmitArgs) -> Result<()> {
    for name in &args.skip_pass {
        if !VALID_PASS_NAMES.contains(&name.as_str()) {
            bail!(
                "unknown pass {name:?} (valid passes: {})",
                VALID_PASS_NAMES.join(", ")
            );
        }
    }

    let module = Module::load(&args.input)
        .with_context(|| format!("failed to load IR module {}", args.input.display()))?;
    eprintln!(
        "[cs2] loaded {} scripts from {}",
        module.functions.len(),
        args.input.display()
    );
    let names = load_names(args.names.as_deref())?;

    let skip: Vec<&str> = args.skip_pass.iter().map(String::as_str).collect();
    let pipeline = default_pipeline(&PassConfig::from_skip_list(&skip));
    let debug = DebugConfig {
        dump_ir: args.dump_ir,
        function_filter: args.filter,
    };
    let module = pipeline.run_with_debug(module, &debug, &names)?;

    let options = StrictOptions {
        indent: if args.tabs { "\t".into() } else { "    ".into() },
    };
    match args.output {
        Some(output_dir) => StrictBackend::new(Box::new(names))
            .with_options(options)
            .emit(BackendInput { module, output_dir })?,
        None => print_scripts(&module, &names, &options)?,
    }
    Ok(())
}

/// Load name tables from `explicit`, or from the per-user config directory
/// when it exists. Without either, every lookup misses.
fn load_names(explicit: Option<&Path>) -> Result<NameTable> {
    let dir: PathBuf = match explicit {
        Some(dir) => {
            if !dir.is_dir() {
                bail!("names directory {} does not exist", dir.display());
            }
            dir.to_path_buf()
        }
        None => match dirs::config_dir().map(|base| base.join("cs2").join("names")) {
            Some(dir) if dir.is_dir() => dir,
            _ => return Ok(NameTable::new()),
        },
    };
    let table = NameTable::load_dir(&dir)?;
    eprintln!("[cs2] loaded {} names from {}", table.len(), dir.display());
    Ok(table)
}

/// Print every script to stdout, separated by blank lines. Failed scripts are
/// reported on stderr and left out.
fn print_scripts(module: &Module, names: &NameTable, options: &StrictOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let total = module.functions.len();
    let mut failed = 0;
    let mut first = true;
    for func in &module.functions {
        match emit_function_to_string(func, names, options) {
            Ok(text) => {
                if !first {
                    writeln!(out)?;
                }
                first = false;
                out.write_all(text.as_bytes())?;
            }
            Err(err) => {
                eprintln!("[cs2] script {}: {err}", func.id);
                failed += 1;
            }
        }
    }
    out.flush()?;
    if failed > 0 {
        return Err(CoreError::EmitFailures { failed, total }.into());
    }
    Ok(())
}
