mod cli;
mod error;
mod logging;

use clap::Parser;
use cli::Cli;
use error::DriverError;
use plorth_core::{Context, Runtime};
use std::io::Read;
use std::process;
use std::rc::Rc;
use tracing::debug;

const EX_USAGE: i32 = 64;

fn main() {
    logging::init();

    match run() {
        Ok(()) => process::exit(0),
        Err(err) => {
            eprintln!("Error: {err}");
            let code = match err {
                DriverError::Usage(_) => EX_USAGE,
                DriverError::Io(_) | DriverError::Uncaught(_) => 1,
            };
            process::exit(code);
        }
    }
}

fn run() -> Result<(), DriverError> {
    let cli = parse_args()?;

    if cli.fork {
        fork_to_background();
    }

    let module_paths = std::env::var("PLORTHPATH")
        .map(|value| split_path_list(&value))
        .unwrap_or_default();

    let runtime = Rc::new(Runtime::with_args(cli.args.clone(), module_paths));
    let filename = cli
        .programfile
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());

    let mut ctx = match &filename {
        Some(name) => Context::with_filename(runtime.clone(), name.clone()),
        None => Context::new(runtime.clone()),
    };

    for path in &cli.require {
        if !plorth_core::module_loader::import(&mut ctx, path) {
            return Err(DriverError::Uncaught(take_error(&mut ctx)));
        }
    }

    let source = gather_source(&cli)?;
    debug!(bytes = source.len(), ?filename, "compiling program");

    let quote = match ctx.compile(&source) {
        Some(quote) => quote,
        None => return Err(DriverError::Uncaught(take_error(&mut ctx))),
    };

    if cli.check {
        eprintln!("Syntax OK.");
        return Ok(());
    }

    if !quote.call(&mut ctx) {
        return Err(DriverError::Uncaught(take_error(&mut ctx)));
    }

    Ok(())
}

/// Parses argv, honoring clap's own help/version exit path but translating
/// every other parse failure into `DriverError::Usage` so the caller can
/// enforce EX_USAGE instead of clap's default exit code.
fn parse_args() -> Result<Cli, DriverError> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e) => {
            use clap::error::ErrorKind as ClapErrorKind;
            if matches!(
                e.kind(),
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion
            ) {
                let _ = e.print();
                process::exit(0);
            }
            Err(DriverError::Usage(e.to_string()))
        }
    }
}

fn gather_source(cli: &Cli) -> Result<String, DriverError> {
    if !cli.eval.is_empty() {
        return Ok(cli.eval.join("\n"));
    }

    if let Some(path) = &cli.programfile {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    Ok(source)
}

fn take_error(ctx: &mut Context) -> plorth_core::Error {
    ctx.clear_error()
        .expect("a failed compile/call leaves an error set")
}

fn split_path_list(value: &str) -> Vec<String> {
    let separator = if cfg!(windows) { ';' } else { ':' };
    value
        .split(separator)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(unix)]
fn fork_to_background() {
    // SAFETY: fork() duplicates the process with no shared mutable state
    // touched between the call and the child/parent branching below.
    match unsafe { libc::fork() } {
        -1 => debug!("fork() failed, continuing in the foreground"),
        0 => {
            // SAFETY: setsid() is called once, immediately after fork, in the child only.
            unsafe {
                libc::setsid();
            }
        }
        _ => process::exit(0),
    }
}

#[cfg(not(unix))]
fn fork_to_background() {
    debug!("-f/--fork has no effect on this platform");
}
