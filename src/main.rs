use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use detsort::cli::{Cli, ColorMode};
use detsort::config::Config;
use detsort::process::process_file;

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so `detsort --dry x.json | head`
    // terminates quietly instead of failing on a closed stdout.
    reset_sigpipe();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "detsort", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_tracing(cli.verbose);

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("detsort: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    let use_color = resolve_color_mode(config.color_mode);

    let mut report = String::new();
    if let Err(e) = process_file(&config, use_color, &mut report) {
        // Fatal errors print no partial report.
        eprintln!("detsort: {e}");
        return ExitCode::from(e.exit_code());
    }

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(report.as_bytes()).and_then(|()| stdout.flush()) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("detsort: write error: {e}");
            return ExitCode::from(2);
        }
    }

    ExitCode::SUCCESS
}

/// Install a stderr subscriber when `--verbose` is given.
///
/// `RUST_LOG` still narrows the output; the default directive is `debug`.
fn init_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(io::stderr)
            .init();
    }
}

/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors need a terminal.
fn resolve_color_mode(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            // FORCE_COLOR applies even when stdout is redirected.
            if std::env::var_os("FORCE_COLOR").is_some_and(|v| !v.is_empty()) {
                return true;
            }
            if std::env::var("TERM").is_ok_and(|v| v == "dumb") {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// Restoring `SIG_DFL` lets the OS handle the signal normally when the
/// report is piped into a pager or `head`.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
