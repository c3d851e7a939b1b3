//! Line-delimited JSON transport for MCP responses

use crate::mcp::error::McpError;
use crate::mcp::protocol::JsonRpcResponse;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::debug;

type Writer = Box<dyn AsyncWrite + Send + Unpin>;

/// Writes one JSON-RPC response per line. Stdout by default.
pub struct StdioTransport {
    out: BufWriter<Writer>,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self::with_writer(tokio::io::stdout())
    }

    pub fn with_writer(writer: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        Self {
            out: BufWriter::new(Box::new(writer)),
        }
    }

    /// Send JSON-RPC response
    pub async fn send_response(&mut self, response: JsonRpcResponse) -> Result<(), McpError> {
        // Notifications get no reply
        if response.id.is_none() && response.result.is_none() && response.error.is_none() {
            return Ok(());
        }

        let json = serde_json::to_string(&response)?;
        debug!("Sending: {}", json);

        self.out.write_all(json.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;

        Ok(())
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}
