//! Newline-delimited JSON-RPC over a byte stream (stdin/stdout in production).
//!
//! Each request runs on its own task so a slow `npm publish` does not block
//! `ping` or `tools/list`. Replies go through a single writer task, which
//! keeps every line on the output intact.

use std::io;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use super::jsonrpc::{INTERNAL_ERROR, json_rpc_error, parse_message};
use super::server::McpServer;

/// Serve requests from `reader` until end of input.
///
/// Lines are read as raw bytes, so malformed input (including invalid UTF-8)
/// only earns that line a parse error. Only an I/O failure on `reader` ends
/// the loop early. Requests still running at end of input are awaited and
/// answered before this returns.
pub async fn serve<R, W>(server: McpServer, reader: R, writer: W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<Value>();
    let writer_task = tokio::spawn(write_replies(writer, rx));

    let mut in_flight = JoinSet::new();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        match parse_message(line) {
            Ok(request) => {
                let server = server.clone();
                let tx = tx.clone();
                in_flight.spawn(async move {
                    let id = request.id.clone();
                    let method = request.method.clone();
                    let handled = tokio::spawn(async move { server.handle(request).await }).await;
                    let reply = match handled {
                        Ok(reply) => reply,
                        Err(e) => {
                            error!(method = %method, error = %e, "Request handler panicked");
                            id.map(|id| {
                                json_rpc_error(Some(id), INTERNAL_ERROR, "Internal error")
                            })
                        }
                    };
                    if let Some(reply) = reply {
                        // Only fails once the writer is gone.
                        let _ = tx.send(reply);
                    }
                });
            }
            Err(reply) => {
                debug!("Rejected malformed message");
                let _ = tx.send(reply);
            }
        }

        while in_flight.try_join_next().is_some() {}
    }

    if !in_flight.is_empty() {
        info!(pending = in_flight.len(), "Input closed, finishing in-flight requests");
    }
    while in_flight.join_next().await.is_some() {}

    drop(tx);
    writer_task.await.map_err(io::Error::other)?
}

async fn write_replies<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<Value>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(reply) = rx.recv().await {
        let mut line = serde_json::to_vec(&reply)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;
    }
    writer.shutdown().await
}
