//! Delivery of expanded commands to the printer.
//!
//! Commands are sent one per line, in order. Klipper exposes a virtual serial
//! port (a pseudo-tty, `/tmp/printer` by default) that accepts G-code lines;
//! alternatively an external program can receive them on stdin.

use crate::config::ConnectionConfig;
use crate::error::{KmacroError, Result};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Something that accepts an ordered list of textual commands.
pub trait CommandSink {
    /// Send every command, in order. Stops at the first failure.
    fn send(&mut self, commands: &[String]) -> Result<()>;
}

/// Writes commands to the printer's virtual serial port.
#[derive(Debug)]
pub struct PortSink {
    path: PathBuf,
}

impl PortSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CommandSink for PortSink {
    fn send(&mut self, commands: &[String]) -> Result<()> {
        let mut port = OpenOptions::new()
            .write(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                KmacroError::TransportError(format!(
                    "failed to open printer port '{}': {}\n\n\
                     Fix: check that Klipper is running and connection.port points at its virtual serial port.",
                    self.path.display(),
                    e
                ))
            })?;

        for command in commands {
            debug!(port = %self.path.display(), command = %command, "sending command");
            writeln!(port, "{}", command)
                .and_then(|_| port.flush())
                .map_err(|e| {
                    KmacroError::TransportError(format!(
                        "failed to write '{}' to '{}': {}",
                        command,
                        self.path.display(),
                        e
                    ))
                })?;
        }

        Ok(())
    }
}

/// Pipes commands into an external program's stdin.
///
/// The command line is split with shell-words for deterministic execution
/// without invoking a shell.
#[derive(Debug)]
pub struct ProcessSink {
    command_line: String,
}

impl ProcessSink {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
        }
    }
}

impl CommandSink for ProcessSink {
    fn send(&mut self, commands: &[String]) -> Result<()> {
        let args = shell_words::split(&self.command_line).map_err(|e| {
            KmacroError::TransportError(format!(
                "failed to parse connection.command '{}': {}",
                self.command_line, e
            ))
        })?;
        let Some((program, program_args)) = args.split_first() else {
            return Err(KmacroError::TransportError(
                "connection.command is empty after parsing".to_string(),
            ));
        };

        let mut child = Command::new(program)
            .args(program_args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| {
                KmacroError::TransportError(format!(
                    "failed to execute connection.command '{}': {}\n\n\
                     Fix: ensure the command is installed and in PATH.",
                    self.command_line, e
                ))
            })?;

        let mut delivered = 0;
        if let Some(mut stdin) = child.stdin.take() {
            for command in commands {
                debug!(program = %program, command = %command, "sending command");
                match writeln!(stdin, "{}", command) {
                    Ok(()) => delivered += 1,
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => break,
                    Err(e) => {
                        return Err(KmacroError::TransportError(format!(
                            "failed to write '{}' to '{}': {}",
                            command, self.command_line, e
                        )));
                    }
                }
            }
        }

        let status = child.wait().map_err(|e| {
            KmacroError::TransportError(format!(
                "failed waiting for '{}': {}",
                self.command_line, e
            ))
        })?;

        if delivered < commands.len() {
            return Err(KmacroError::TransportError(format!(
                "'{}' stopped reading after {} of {} command(s) (exit code {})",
                self.command_line,
                delivered,
                commands.len(),
                status.code().unwrap_or(-1)
            )));
        }

        if !status.success() {
            return Err(KmacroError::TransportError(format!(
                "'{}' exited with code {}",
                self.command_line,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}

/// Writes commands to any writer; stdout for dry runs.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CommandSink for WriterSink<W> {
    fn send(&mut self, commands: &[String]) -> Result<()> {
        for command in commands {
            writeln!(self.writer, "{}", command)
                .map_err(|e| KmacroError::TransportError(format!("failed to write output: {}", e)))?;
        }
        self.writer
            .flush()
            .map_err(|e| KmacroError::TransportError(format!("failed to flush output: {}", e)))
    }
}

/// Build the sink described by the connection settings.
///
/// `dry_run` always prints to stdout instead of touching the printer.
pub fn open_sink(connection: &ConnectionConfig, dry_run: bool) -> Box<dyn CommandSink> {
    if dry_run {
        return Box::new(WriterSink::stdout());
    }
    match &connection.command {
        Some(command) => Box::new(ProcessSink::new(command.clone())),
        None => Box::new(PortSink::new(&connection.port)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn commands(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_writer_sink_writes_one_line_per_command() {
        let mut sink = WriterSink::new(Vec::new());
        sink.send(&commands(&["G28", "G1 X10"])).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "G28\nG1 X10\n");
    }

    #[test]
    fn test_port_sink_appends_commands() {
        let temp = TempDir::new().unwrap();
        let port = temp.path().join("printer");
        std::fs::write(&port, "").unwrap();

        let mut sink = PortSink::new(&port);
        sink.send(&commands(&["M104 S200"])).unwrap();
        sink.send(&commands(&["M140 S60", "M400"])).unwrap();

        assert_eq!(
            std::fs::read_to_string(&port).unwrap(),
            "M104 S200\nM140 S60\nM400\n"
        );
    }

    #[test]
    fn test_port_sink_missing_port_is_transport_error() {
        let temp = TempDir::new().unwrap();
        let mut sink = PortSink::new(temp.path().join("missing").join("printer"));
        let err = sink.send(&commands(&["M112"])).unwrap_err();
        assert!(matches!(err, KmacroError::TransportError(_)));
        assert!(err.to_string().contains("failed to open printer port"));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_sink_pipes_stdin() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("received.txt");
        let command_line = format!(
            "sh -c {}",
            shell_words::quote(&format!("cat > '{}'", out.display()))
        );

        let mut sink = ProcessSink::new(command_line);
        sink.send(&commands(&["G28", "M84"])).unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "G28\nM84\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_process_sink_nonzero_exit_is_error() {
        let mut sink = ProcessSink::new("sh -c 'exit 3'");
        let err = sink.send(&commands(&["G28"])).unwrap_err();
        assert!(err.to_string().contains("code 3"));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_sink_reports_undelivered_commands() {
        // `true` exits without reading stdin; the pipe buffer cannot hold all of these.
        let many: Vec<String> = (0..200_000).map(|i| format!("G1 X{}", i)).collect();

        let mut sink = ProcessSink::new("true");
        let err = sink.send(&many).unwrap_err();

        assert!(matches!(err, KmacroError::TransportError(_)));
        let message = err.to_string();
        assert!(message.contains("stopped reading after"));
        assert!(message.contains("of 200000 command(s)"));
        assert!(message.contains("exit code 0"));
    }

    #[test]
    fn test_process_sink_missing_program() {
        let mut sink = ProcessSink::new("kmacro-definitely-not-a-program");
        let err = sink.send(&commands(&["G28"])).unwrap_err();
        assert!(matches!(err, KmacroError::TransportError(_)));
    }
}
