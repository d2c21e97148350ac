pub mod cli;
pub mod commands;
pub mod logging;

#[cfg(test)]
pub mod test_util;

use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;

use sheha_lib::output::ConsoleIO;
use sheha_lib::runtime::Runtime;

use cli::{Cli, Command, ModelCommand};

/// Main CLI entry point. Parses args and dispatches to the appropriate command.
///
/// A `--dataset` flag overrides the dataset path from `runtime`.
pub fn try_run<IN, OUT, ERR>(
    args: &[&str],
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let cli = Cli::try_parse_from(args)?;
    let runtime = runtime.clone().with_dataset(cli.dataset);

    match cli.command {
        Command::Chat => commands::chat::run_chat_cmd(&runtime, io),
        Command::Ask { text } => commands::ask::run_ask_cmd(&text, &runtime, io),
        Command::Model { model_command } => match model_command {
            ModelCommand::Download { force } => {
                commands::model::run_model_download(force, &runtime, io)
            }
        },
    }
}

/// Run [`try_run`] and turn its outcome into a process exit code.
///
/// Help and version output go to stdout with status 0. Other clap errors
/// and command failures are written to stderr.
pub fn run<IN, OUT, ERR>(
    args: &[&str],
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> ExitCode
where
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let Err(err) = try_run(args, runtime, io) else {
        return ExitCode::SUCCESS;
    };

    if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
        let rendered = clap_err.render();
        let written = if clap_err.use_stderr() {
            write!(io.stderr(), "{rendered}")
        } else {
            write!(io.stdout(), "{rendered}")
        };
        if written.is_err() {
            return ExitCode::FAILURE;
        }
        return u8::try_from(clap_err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from);
    }

    // Nothing left to report to if stderr itself fails.
    let _ = writeln!(io.stderr(), "Error: {err:#}");
    ExitCode::FAILURE
}
