//! Stdio transport for the MCP server.
//!
//! Reads one JSON-RPC message per line from stdin and writes one compact
//! response line to stdout per message, flushing after each. Requests are
//! handled strictly in arrival order; the next line is not read until the
//! current response has been written.

use crate::error::{DbError, DbResult};
use crate::mcp::DbService;
use crate::mcp::message::Response;
use crate::transport::Transport;
use serde_json::Value as JsonValue;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{debug, info, warn};

/// Stdio transport implementation.
pub struct StdioTransport {
    service: DbService,
}

impl StdioTransport {
    pub fn new(service: DbService) -> Self {
        Self { service }
    }

    /// Serve messages from `reader` until end of input.
    ///
    /// Blank lines are skipped. A line that is not valid UTF-8 or not valid
    /// JSON is answered with a server error whose `id` is null.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> DbResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        let mut handled = 0usize;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| DbError::internal(format!("Failed to read input: {}", e)))?;
            if read == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => match serde_json::from_str::<JsonValue>(line) {
                    Ok(message) => self.service.handle(message).await,
                    Err(e) => undecodable(e.to_string()),
                },
                Err(e) => undecodable(e.to_string()),
            };

            write_response(&mut writer, &response).await?;
            handled += 1;
        }

        info!(messages = handled, "Input closed");
        Ok(())
    }
}

fn undecodable(reason: String) -> Response {
    let err = DbError::malformed(reason);
    warn!(error = %err, "Undecodable input line");
    Response::failure(JsonValue::Null, err.into())
}

async fn write_response<W>(writer: &mut W, response: &Response) -> DbResult<()>
where
    W: AsyncWrite + Unpin,
{
    let line = response.to_line()?;
    debug!(bytes = line.len(), error = response.is_error(), "Writing response");

    let io_err = |e: std::io::Error| DbError::internal(format!("Failed to write output: {}", e));
    writer.write_all(line.as_bytes()).await.map_err(io_err)?;
    writer.write_all(b"\n").await.map_err(io_err)?;
    writer.flush().await.map_err(io_err)
}

impl Transport for StdioTransport {
    async fn run(&self) -> DbResult<()> {
        info!("Starting MCP server with stdio transport");

        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();

        tokio::select! {
            result = self.serve(reader, writer) => result,
            _ = wait_for_signal() => {
                // A pending stdin read cannot be cancelled, so leave directly.
                info!("Shutdown signal received, exiting");
                std::process::exit(0);
            }
        }
    }

    fn name(&self) -> &'static str {
        "stdio"
    }
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }
}
