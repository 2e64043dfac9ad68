use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use commands::{check_data, serve};

#[derive(Parser)]
#[command(name = "econdash")]
#[command(about = "EconDash economic-control dashboard with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// JSON snapshot to seed the in-memory dataset from
        #[arg(short, long, env = "DATA_FILE")]
        data_file: Option<PathBuf>,
        /// Address to bind the HTTP server to
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,
    },
    /// Load a data file, recompute derived figures and print a summary
    CheckData {
        /// JSON snapshot to check
        #[arg(short, long, env = "DATA_FILE")]
        data_file: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                data_file,
                bind_address,
            } => {
                serve(data_file.as_deref(), &bind_address).await?;
            }
            Commands::CheckData { data_file } => {
                check_data(&data_file).await?;
            }
        }
        Ok(())
    }
}
