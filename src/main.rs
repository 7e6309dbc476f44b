//! skiff - command-line client for a skiffd daemon

use anyhow::Result;
use clap::{Parser, Subcommand};
use skiff::{interrupt, net::Connection, remote};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "skiff - talk to a skiffd remote file-transfer daemon"
)]
struct Args {
    /// Daemon to connect to, as host or host:port
    target: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Change the daemon's working directory
    Cd {
        /// Remote directory, in the daemon's path syntax
        dir: String,
    },
    /// Print the daemon's current working directory
    Pwd,
}

fn main() -> Result<()> {
    interrupt::on_interrupt(|| {
        eprintln!("\nInterrupted by user. Exiting (Ctrl-C)...");
        // Exit immediately with 130 (128 + SIGINT)
        std::process::exit(130);
    })?;

    let args = Args::parse();

    let mut conn = Connection::connect(&args.target)?;
    let result = match &args.command {
        Command::Cd { dir } => remote::change_dir(&mut conn, dir),
        Command::Pwd => remote::current_dir(&mut conn).map(|cwd| println!("{cwd}")),
    };
    conn.close();
    result
}
