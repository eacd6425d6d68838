// src/cli/mod.rs — CLI definition (clap derive)

pub mod chat;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wellness",
    about = "Wellness companion: empathetic chat, mood tracking, daily goals",
    version
)]
pub struct Cli {
    /// Model identifier on the inference gateway
    #[arg(short, long)]
    pub model: Option<String>,

    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Serve the HTTP API for the browser front-end (default)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Chat with the companion in this terminal
    Chat,
}
