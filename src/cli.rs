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

//! Command line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bulletin-admin")]
#[command(about = "Bulletin Board administration panel client", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, env = "BULLETIN_ADMIN_URL", help = "Backend URL (overrides config)")]
    pub base_url: Option<String>,

    #[arg(long, global = true, env = "BULLETIN_ADMIN_SESSION", help = "Backend sessionid cookie")]
    pub session: Option<String>,

    #[arg(long, global = true, help = "Configuration file to load instead of the default")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Serve panel actions to the UI process over IPC")]
    Serve,

    #[command(about = "Log in and print the session id for later commands")]
    Login {
        #[arg(help = "Account email")]
        email: String,

        #[arg(long, env = "BULLETIN_ADMIN_PASSWORD", hide_env_values = true, help = "Account password")]
        password: String,
    },

    /// Post actions
    #[command(subcommand)]
    Post(PostCommand),

    /// User actions
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Debug, Subcommand)]
pub enum PostCommand {
    #[command(about = "Show a post")]
    Detail {
        #[arg(help = "Post id")]
        id: String,
    },

    #[command(about = "Confirm, and with --yes perform, a post delete")]
    Delete {
        #[arg(help = "Post id")]
        id: String,

        #[arg(short, long, help = "Delete after confirming")]
        yes: bool,
    },

    #[command(about = "Download the post list as CSV")]
    Export {
        #[arg(short, long, help = "Directory to write into (overrides config)")]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    #[command(about = "Show a user")]
    Detail {
        #[arg(help = "User id")]
        id: String,
    },

    #[command(about = "Confirm, and with --yes perform, a user delete")]
    Delete {
        #[arg(help = "User id")]
        id: String,

        #[arg(short, long, help = "Delete after confirming")]
        yes: bool,
    },
}
