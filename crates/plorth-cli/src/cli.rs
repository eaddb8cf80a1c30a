use clap::Parser;
use std::path::PathBuf;

/// Command-line surface for the `plorth` interpreter driver.
#[derive(Parser, Debug)]
#[command(name = "plorth")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for the Plorth programming language", long_about = None)]
pub struct Cli {
    /// Parse the program and exit without running it
    #[arg(short = 'c', long = "check")]
    pub check: bool,

    /// Evaluate PROGRAM instead of a program file; repeatable, joined with newlines
    #[arg(short = 'e', long = "eval", value_name = "PROGRAM")]
    pub eval: Vec<String>,

    /// Fork to the background before executing, where the host supports it
    #[arg(short = 'f', long = "fork")]
    pub fork: bool,

    /// Import a module before executing the program; repeatable
    #[arg(short = 'r', long = "require", value_name = "PATH")]
    pub require: Vec<String>,

    /// Program file to run; omit to use -e or read from stdin
    pub programfile: Option<PathBuf>,

    /// Arguments passed through to the program (exposed via the `args` word)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
