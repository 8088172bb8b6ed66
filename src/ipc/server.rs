// Bulletin Admin - Rust client core for the Bulletin Board administration panel
// Copyright (C) 2025 Bulletin Board Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! IPC server: newline-delimited JSON over a Unix socket or a named pipe

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::api::AdminApi;
use crate::models::{error_codes, IpcError, IpcMessage};

use super::handler::MessageHandler;

/// Named pipe name for Windows
#[cfg(windows)]
const PIPE_NAME: &str = r"\\.\pipe\bulletin_admin_ipc";

/// Unix socket path
#[cfg(not(windows))]
const PIPE_NAME: &str = "/tmp/bulletin_admin_ipc.sock";

/// Run the IPC server until Ctrl-C
pub async fn run_server<A: AdminApi + 'static>(handler: Arc<MessageHandler<A>>) -> Result<()> {
    info!("Starting IPC server on {}", PIPE_NAME);

    #[cfg(windows)]
    {
        run_windows_pipe_server(handler).await
    }

    #[cfg(not(windows))]
    {
        run_unix_socket_server(handler).await
    }
}

#[cfg(windows)]
async fn run_windows_pipe_server<A: AdminApi + 'static>(handler: Arc<MessageHandler<A>>) -> Result<()> {
    use anyhow::Context;
    use tokio::net::windows::named_pipe::ServerOptions;

    let mut first = true;
    loop {
        let pipe = ServerOptions::new()
            .first_pipe_instance(first)
            .create(PIPE_NAME)
            .context("Failed to create named pipe")?;
        first = false;

        tokio::select! {
            result = pipe.connect() => {
                match result {
                    Ok(()) => {
                        info!("Client connected");
                        let handler = handler.clone();
                        tokio::spawn(async move {
                            let (reader, writer) = tokio::io::split(pipe);
                            if let Err(e) = serve_client(reader, writer, handler).await {
                                error!("Client handler error: {}", e);
                            }
                        });
                    }
                    Err(e) => error!("Failed to accept connection: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(not(windows))]
async fn run_unix_socket_server<A: AdminApi + 'static>(handler: Arc<MessageHandler<A>>) -> Result<()> {
    use anyhow::Context;
    use tokio::net::UnixListener;

    // Remove a socket left behind by a previous run
    let _ = std::fs::remove_file(PIPE_NAME);

    let listener = UnixListener::bind(PIPE_NAME).context("Failed to bind Unix socket")?;

    info!("Listening on {}", PIPE_NAME);

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, _)) => {
                        info!("Client connected");
                        let handler = handler.clone();
                        tokio::spawn(async move {
                            let (reader, writer) = stream.into_split();
                            if let Err(e) = serve_client(reader, writer, handler).await {
                                error!("Client handler error: {}", e);
                            }
                        });
                    }
                    Err(e) => error!("Failed to accept connection: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    let _ = std::fs::remove_file(PIPE_NAME);

    Ok(())
}

/// Answer requests from one client until it disconnects
///
/// Requests on one connection are handled in order; separate connections
/// run concurrently.
pub async fn serve_client<A, R, W>(reader: R, mut writer: W, handler: Arc<MessageHandler<A>>) -> Result<()>
where
    A: AdminApi,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received message: {}", trimmed);

        let response = match serde_json::from_str::<IpcMessage>(trimmed) {
            Ok(msg) => handler.handle_message(msg).await,
            Err(e) => {
                warn!("Failed to parse message: {}", e);
                IpcMessage::response_err(
                    "unknown",
                    IpcError::new(error_codes::PARSE_ERROR, format!("Failed to parse message: {}", e)),
                )
            }
        };

        let response_json = serde_json::to_string(&response)?;
        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;

        debug!("Sent response: {}", response_json);
    }

    info!("Client disconnected");
    Ok(())
}
