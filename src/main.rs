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

//! Bulletin Admin - client core for the Bulletin Board administration panel
//!
//! Runs either as a background process serving the panel UI over IPC, or as
//! a one-shot command that performs a single panel action and prints the
//! rendered slots.

mod api;
mod cli;
mod config;
mod export;
mod ipc;
mod logger;
mod models;
mod panel;
mod view;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use api::{AdminApi, AdminClient, AdminError};
use cli::{Cli, Commands, PostCommand, UserCommand};
use config::AppConfig;
use ipc::handler::MessageHandler;
use logger::{Logger, LoggerConfig};
use panel::AdminPanel;
use view::MemoryPage;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(Some(path.as_path()))?,
        None => AppConfig::load()?,
    };
    if let Some(base_url) = &cli.base_url {
        config.server.base_url = base_url.clone();
    }
    if let Some(session) = &cli.session {
        config.server.session_id = Some(session.clone());
    }

    Logger::init_with_config(LoggerConfig::from(&config.logging))?;

    info!("Bulletin Admin starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let client = AdminClient::from_config(&config.server)?;
    info!("Backend: {}", client.base_url());

    let panel = AdminPanel::new(client).with_timestamp_style(config.export.timestamp_style());

    let mut page = MemoryPage::new();
    let outcome = match cli.command {
        Commands::Serve => {
            let handler = Arc::new(MessageHandler::new(panel));
            if let Err(e) = ipc::server::run_server(handler).await {
                error!("Fatal error in IPC server: {}", e);
                return Err(e);
            }
            info!("Bulletin Admin shutting down gracefully");
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Login { email, password } => panel.login(&mut page, &email, &password).await.map(|session_id| {
            println!("Logged in. Reuse the session with:");
            println!("  export BULLETIN_ADMIN_SESSION={}", session_id);
        }),
        Commands::Post(command) => run_post(&panel, &mut page, command, &config).await,
        Commands::User(command) => run_user(&panel, &mut page, command).await,
    };

    print_page(&page);

    Ok(match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}

async fn run_post<A: AdminApi>(
    panel: &AdminPanel<A>,
    page: &mut MemoryPage,
    command: PostCommand,
    config: &AppConfig,
) -> Result<(), AdminError> {
    match command {
        PostCommand::Detail { id } => {
            panel.go_to_post_detail(page, &id).await?;
        }
        PostCommand::Delete { id, yes } => {
            let (ticket, _) = panel.go_to_post_delete(page, &id).await?;
            if yes {
                panel.post_delete(page, &ticket).await?;
            } else {
                println!("Re-run with --yes to delete post {}", ticket.id());
            }
        }
        PostCommand::Export { out } => {
            let export = panel.download_csv(page).await?;
            let dir = out.unwrap_or_else(|| config.export.download_dir.clone());
            // Disk failures surface the same way a backend failure does
            let path = crate::panel::report(page, export.write_to(&dir))?;
            println!("Saved {}", path.display());
        }
    }
    Ok(())
}

async fn run_user<A: AdminApi>(
    panel: &AdminPanel<A>,
    page: &mut MemoryPage,
    command: UserCommand,
) -> Result<(), AdminError> {
    match command {
        UserCommand::Detail { id } => {
            panel.go_to_user_detail(page, &id).await?;
        }
        UserCommand::Delete { id, yes } => {
            let (ticket, _) = panel.go_to_user_delete(page, &id).await?;
            if yes {
                panel.user_delete(page, &ticket).await?;
            } else {
                println!("Re-run with --yes to delete user {}", ticket.id());
            }
        }
    }
    Ok(())
}

/// Print what an action did to the page
fn print_page(page: &MemoryPage) {
    if page.is_untouched() && page.alerts.is_empty() {
        println!("nothing rendered");
        return;
    }
    for write in &page.writes {
        println!("{:<24} {}", write.slot, write.html);
    }
    for modal in &page.hidden_modals {
        println!("closed {}", modal);
    }
    if page.reloaded {
        println!("page reloaded");
    }
    if let Some(download) = &page.download {
        println!("download {}", download.filename);
    }
    for alert in &page.alerts {
        eprintln!("{}", alert);
    }
}
