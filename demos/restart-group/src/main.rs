//! Retrieves an authentication token, lists the mobile devices of a group, or
//! restarts all the devices of a group on a Jamf Pro server.
//!
//! Restarting a group spawns one task per device. Each task transmits its
//! report over a shared channel, which is drained until every task has
//! reported.

use clap::{Parser, Subcommand};

use jamf_client::{Client, Result};

use tokio::sync::mpsc;

use tracing::{Level, error, info, warn};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Jamf Pro server URL.
    #[arg(short, long)]
    url: String,

    /// Username.
    #[arg(short = 'U', long)]
    username: String,

    /// Password.
    #[arg(short, long, env = "JAMF_PASSWORD", hide_env_values = true)]
    password: String,

    /// Print debug logs.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Retrieves an authentication token.
    Token,
    /// Lists the devices of a group.
    Devices {
        /// Group identifier.
        group: String,
        /// Print an empty list when the server response is invalid.
        #[arg(long)]
        lenient: bool,
    },
    /// Restarts all the devices of a group.
    Restart {
        /// Group identifier.
        group: String,
        /// How many reports the channel can hold before tasks wait.
        #[arg(short, long, default_value_t = 1)]
        buffer: usize,
    },
}

async fn restart_group(client: &Client, group: &str, buffer: usize) -> Result<()> {
    let devices = client.devices_in_group(group).await?;

    if devices.is_empty() {
        warn!("Group `{group}` has no devices");
        return Ok(());
    }

    info!("Restarting {} devices of group `{group}`", devices.len());

    // A zero capacity channel is not allowed.
    let (tx, mut rx) = mpsc::channel(buffer.max(1));

    let handles = devices
        .into_iter()
        .map(|device| tokio::spawn(client.restart_task(device, tx.clone())))
        .collect::<Vec<_>>();

    // Only the tasks hold a sender now, so the loop ends once all of them
    // have reported.
    drop(tx);

    let mut sent = 0;
    let mut succeeded = 0;
    while let Some(report) = rx.recv().await {
        println!("{report}");
        sent += usize::from(report.is_sent());
        succeeded += usize::from(report.is_success());
    }

    for handle in handles {
        if let Err(e) = handle.await {
            error!("Failed to await a restart task: {e}");
        }
    }

    info!("Restart commands sent: {sent}, accepted: {succeeded}");

    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let client = Client::new(cli.url, cli.username, cli.password);

    match cli.command {
        Command::Token => {
            let token = client.token_response().await?;
            println!("{} (expires: {})", token.token, token.expires);
        }
        Command::Devices { group, lenient } => {
            let devices = if lenient {
                client.devices_in_group_lenient(&group).await?
            } else {
                client.devices_in_group(&group).await?
            };

            for device in devices {
                println!("{device}");
            }
        }
        Command::Restart { group, buffer } => restart_group(&client, &group, buffer).await?,
    }

    Ok(())
}
