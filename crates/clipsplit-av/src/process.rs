//! Handle to a running external tool.
//!
//! A [`ToolProcess`] is created by [`ToolCommand::spawn`](crate::ToolCommand::spawn)
//! and owns the child process until it finishes, is killed, or the handle is
//! dropped (which also kills it).

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin};

use crate::command::ToolOutput;

/// A running external tool.
#[derive(Debug)]
pub struct ToolProcess {
    tool: String,
    child: Child,
    timeout: Duration,
    stdin_data: Option<Vec<u8>>,
}

impl ToolProcess {
    pub(crate) fn new(
        tool: String,
        child: Child,
        timeout: Duration,
        stdin_data: Option<Vec<u8>>,
    ) -> Self {
        Self {
            tool,
            child,
            timeout,
            stdin_data,
        }
    }

    /// Name of the tool this process runs.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// OS process id, or `None` once the process has been reaped.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Terminate the process and wait for it to exit.
    pub async fn kill(&mut self) -> clipsplit_core::Result<()> {
        tracing::debug!(tool = %self.tool, pid = ?self.child.id(), "killing process");
        self.child
            .kill()
            .await
            .map_err(|e| clipsplit_core::Error::tool(&self.tool, format!("failed to kill: {e}")))
    }

    /// Wait for the process to exit and collect its output.
    ///
    /// Data given with [`ToolCommand::stdin`](crate::ToolCommand::stdin) is
    /// written while the output is read, then stdin is closed. The exit
    /// status is returned as-is; interpreting it is up to the caller. If the
    /// configured timeout elapses first the process is killed.
    ///
    /// # Errors
    ///
    /// Returns [`clipsplit_core::Error::Tool`] on timeout or when reading the
    /// process output fails.
    pub async fn wait(mut self) -> clipsplit_core::Result<ToolOutput> {
        let stdin = self.child.stdin.take();
        let stdout = self.child.stdout.take();
        let stderr = self.child.stderr.take();
        let data = self.stdin_data.take();
        let child = &mut self.child;

        let collect = async move {
            let (written, status, stdout, stderr) = tokio::join!(
                write_pipe(stdin, data),
                child.wait(),
                read_pipe(stdout),
                read_pipe(stderr)
            );
            written?;
            Ok::<_, std::io::Error>(ToolOutput {
                status: status?,
                stdout: String::from_utf8_lossy(&stdout?).to_string(),
                stderr: String::from_utf8_lossy(&stderr?).to_string(),
            })
        };
        let result = tokio::time::timeout(self.timeout, collect).await;

        match result {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(clipsplit_core::Error::tool(
                &self.tool,
                format!("I/O error waiting for process: {e}"),
            )),
            Err(_elapsed) => {
                if let Err(e) = self.child.kill().await {
                    tracing::warn!(tool = %self.tool, "failed to kill timed out process: {e}");
                }
                Err(clipsplit_core::Error::tool(
                    &self.tool,
                    format!("timed out after {:?}", self.timeout),
                ))
            }
        }
    }
}

async fn write_pipe(pipe: Option<ChildStdin>, data: Option<Vec<u8>>) -> std::io::Result<()> {
    let (Some(mut pipe), Some(data)) = (pipe, data) else {
        return Ok(());
    };
    match pipe.write_all(&data).await {
        // The tool may exit without reading all of its input.
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}
