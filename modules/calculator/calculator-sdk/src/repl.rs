//! Line-oriented interactive loop shared by the CLI binaries.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::api::CalculatorClientV1;
use crate::command::Command;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplOptions {
    /// Print `Executing: <line>` before handling each line.
    pub echo_input: bool,
}

/// Read commands from `input` until EOF or a quit word, writing prompts and
/// results to `output`.
///
/// Command and calculation failures are printed as `Error: <message>` and the
/// loop continues.
///
/// # Errors
/// Returns the I/O error if reading `input` or writing `output` fails.
pub async fn run_repl<C, R, W>(
    client: &C,
    input: R,
    output: &mut W,
    options: ReplOptions,
) -> io::Result<()>
where
    C: CalculatorClientV1 + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        debug!(input = %line, "user input");
        if options.echo_input {
            writeln!(output, "Executing: {line}")?;
        }

        let outcome = match Command::parse(&line) {
            Ok(Command::Quit) => {
                info!("user requested to quit");
                writeln!(output, "Goodbye!")?;
                break;
            }
            Ok(Command::Calculate { operation, a, b }) => {
                client.calculate(operation, a, b).await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                info!(result, "successful calculation");
                writeln!(output, "Result: {result}")?;
            }
            Err(e) => {
                warn!(error = %e, "command processing error");
                writeln!(output, "Error: {e}")?;
            }
        }
    }

    Ok(())
}
