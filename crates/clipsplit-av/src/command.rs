//! Builder for executing external tool commands with timeout support.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::process::ToolProcess;

/// Default command timeout: 5 minutes.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl ToolOutput {
    /// First non-empty line written to stdout, trimmed.
    pub fn first_stdout_line(&self) -> Option<&str> {
        first_line(&self.stdout)
    }

    /// First non-empty line written to stderr, trimmed.
    pub fn first_stderr_line(&self) -> Option<&str> {
        first_line(&self.stderr)
    }
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|l| !l.is_empty())
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use clipsplit_av::ToolCommand;
/// use std::path::PathBuf;
///
/// # async fn example() -> clipsplit_core::Result<()> {
/// let duration = ToolCommand::new(PathBuf::from("ffprobe"))
///     .args(["-v", "error", "-show_entries", "format=duration"])
///     .args(["-of", "default=noprint_wrappers=1:nokey=1"])
///     .arg("/path/to/talk.mp3")
///     .first_line()
///     .await?;
/// println!("{duration:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
    stdin_data: Option<Vec<u8>>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            stdin_data: None,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = d;
        self
    }

    /// Provide data to be written to the process's stdin.
    pub fn stdin(&mut self, data: Vec<u8>) -> &mut Self {
        self.stdin_data = Some(data);
        self
    }

    /// The arguments collected so far.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Short name of the program, used in errors and logs.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Start the process and return a handle to it.
    ///
    /// Stdout and stderr are piped. Stdin is piped when data was given with
    /// [`stdin`](Self::stdin) and closed otherwise, so tools never wait for
    /// interactive input. The child is killed when the handle is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`clipsplit_core::Error::Tool`] if spawning the process fails.
    pub fn spawn(&self) -> clipsplit_core::Result<ToolProcess> {
        let program_name = self.program_name();
        tracing::debug!("spawn: {} {}", self.program.display(), self.args.join(" "));

        let mut cmd = Command::new(&self.program);
        let stdin = if self.stdin_data.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        cmd.args(&self.args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| clipsplit_core::Error::tool(&program_name, format!("failed to spawn: {e}")))?;

        Ok(ToolProcess::new(
            program_name,
            child,
            self.timeout,
            self.stdin_data.clone(),
        ))
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - Returns [`clipsplit_core::Error::Tool`] if the process times out
    ///   (message includes the timeout duration).
    /// - Returns [`clipsplit_core::Error::Tool`] if the process exits with a
    ///   non-zero status (message includes the first stderr line).
    /// - Returns [`clipsplit_core::Error::Tool`] if spawning the process fails.
    pub async fn execute(&self) -> clipsplit_core::Result<ToolOutput> {
        let output = self.spawn()?.wait().await?;

        if !output.status.success() {
            return Err(clipsplit_core::Error::tool(
                self.program_name(),
                format!(
                    "exited with status {}: {}",
                    output.status,
                    output.first_stderr_line().unwrap_or("")
                ),
            ));
        }

        Ok(output)
    }

    /// Run to completion and return the first line the tool printed.
    ///
    /// Any line on stderr counts as a failure, even with a zero exit status,
    /// because the tools are run with `-v error`. Otherwise a non-zero exit
    /// fails and a zero exit resolves with the first stdout line (`None` if
    /// the tool printed nothing).
    pub async fn first_line(&self) -> clipsplit_core::Result<Option<String>> {
        let output = self.spawn()?.wait().await?;

        if let Some(line) = output.first_stderr_line() {
            return Err(clipsplit_core::Error::tool(self.program_name(), line));
        }
        if !output.status.success() {
            return Err(clipsplit_core::Error::tool(
                self.program_name(),
                format!("exited with status {}", output.status),
            ));
        }

        Ok(output.first_stdout_line().map(str::to_string))
    }
}
