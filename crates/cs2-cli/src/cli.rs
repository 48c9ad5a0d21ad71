use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cs2", version, about = "Render decompiled ClientScript IR as strict pseudo-source")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Emit pseudo-source for every script in an IR module
    Emit(EmitArgs),
    /// List the transform passes accepted by `--skip-pass`
    Passes,
}

#[derive(Args)]
pub struct EmitArgs {
    /// Path to a JSON-serialized IR module
    pub input: PathBuf,

    /// Directory of `<kind>.tsv` name tables (default: <config dir>/cs2/names)
    #[arg(long, value_name = "DIR")]
    pub names: Option<PathBuf>,

    /// Write one `.cs2` file per script into this directory instead of stdout
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Skip a transform pass by name (repeatable)
    #[arg(long = "skip-pass", value_name = "NAME")]
    pub skip_pass: Vec<String>,

    /// Dump post-transform IR to stderr
    #[arg(long, default_value_t = false)]
    pub dump_ir: bool,

    /// Only dump scripts whose name contains this string
    #[arg(long, value_name = "NAME")]
    pub filter: Option<String>,

    /// Indent nested blocks with tabs instead of four spaces
    #[arg(long, default_value_t = false)]
    pub tabs: bool,
}
