// SPDX-License-Identifier: GPL-3.0-only

//! Command-line front-end for the mount-point editor

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mountpoint_contracts::PartitioningBackend;
use mountpoint_contracts::client::{BusTarget, StorageClient};
use mountpoint_types::{PartitioningData, PartitioningPath};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::{Config, LoggingLevel};
use crate::message::{Message, parse_switch};
use crate::page::{MountPointPage, Notification, Notifier};
use crate::state::PartitionRecordStore;
use crate::update::{Flow, update};
use crate::{logging, view};

/// Assign mount points to existing partitions for installation
#[derive(Parser)]
#[command(name = "anaconda-mountpoints", version)]
#[command(about = "Assign mount points to discovered partitions", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $XDG_CONFIG_HOME/anaconda-mountpoints/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// D-Bus address of the installer bus
    #[arg(long, global = true)]
    bus_address: Option<String>,

    /// Object path of the partitioning to edit (defaults to the latest one)
    #[arg(long, global = true)]
    partitioning: Option<String>,

    #[arg(long, global = true, value_enum)]
    log_level: Option<LoggingLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show partitions and their assignments
    List,
    /// Assign a mount point to a device ("" clears it)
    Assign {
        device: String,
        mount_point: String,
    },
    /// Turn reformatting of a device on or off
    Reformat {
        device: String,
        #[arg(value_parser = parse_switch_arg)]
        enabled: bool,
    },
    /// Edit interactively
    Edit,
}

fn parse_switch_arg(value: &str) -> Result<bool, String> {
    parse_switch(value).map_err(|e| e.to_string())
}

const HELP: &str = "\
commands:
  list                        show partitions
  set <device> <mount-point>  assign a mount point
  clear <device>              remove the mount point
  format <device> on|off      toggle reformatting
  reload                      re-read requests from the installer
  quit                        leave";

/// Prints backend rejections for the user.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&self, notification: Notification) {
        eprintln!("error: {}", notification.message);
    }

    fn validity_changed(&self, valid: bool) {
        tracing::debug!(valid, "request set validity changed");
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(address) = &cli.bus_address {
        config.bus_address = Some(address.clone());
    }
    Ok(config)
}

const DUPLICATES_HINT: &str = "Mount points must be unique before installation can continue.";

fn print_page(page: &MountPointPage) {
    print!("{}", view::render_table(&page.rows()));
    if !page.is_valid() {
        println!("{DUPLICATES_HINT}");
    }
}

/// Render the partitions of `data` as they are, without touching the backend.
///
/// Returns the text and whether the request set is valid.
pub fn listing(data: &PartitioningData, presets: &[String]) -> (String, bool) {
    if !data.is_manual() {
        return (
            "No manual partitioning yet; it is created by the first edit.\n".to_string(),
            true,
        );
    }

    let mut store = PartitionRecordStore::default();
    store.replace(data.requests.clone());

    let mut text = view::render_table(&store.rows(presets));
    if !store.is_valid() {
        text.push_str(DUPLICATES_HINT);
        text.push('\n');
    }
    (text, store.is_valid())
}

/// Mount the page. Returns `false` when manual partitioning could not be set
/// up; the page has already reported why.
pub async fn prepare(page: &mut MountPointPage, data: PartitioningData) -> anyhow::Result<bool> {
    match page.mount(data).await {
        Ok(()) => Ok(true),
        Err(_) if page.setup_error().is_some() => Ok(false),
        Err(e) => Err(e).context("preparing manual partitioning"),
    }
}

fn exit_code(page: &MountPointPage) -> ExitCode {
    if page.submission_error().is_some() || !page.is_valid() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn interactive(page: &mut MountPointPage) -> anyhow::Result<()> {
    print_page(page);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let message = match line.parse::<Message>() {
            Ok(message) => message,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match update(page, message).await {
            Ok(Flow::Render) => print_page(page),
            Ok(Flow::Help) => println!("{HELP}"),
            Ok(Flow::Quit) => break,
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    logging::init(&config)?;

    tracing::info!("Starting {} v{}", crate::config::APP_ID, env!("CARGO_PKG_VERSION"));

    let target = BusTarget::resolve(config.bus_address.as_deref(), &config.bus_address_file);
    let client = StorageClient::new(&target)
        .await
        .context("connecting to the installer storage module")?;
    let backend: Arc<dyn PartitioningBackend> = Arc::new(client);

    let data = match &cli.partitioning {
        Some(path) => backend.partitioning_data(&PartitioningPath::new(path)).await,
        None => backend.current_partitioning_data().await,
    }
    .context("reading partitioning data")?;

    if let Commands::List = cli.command {
        let (text, valid) = listing(&data, &config.mount_point_presets);
        print!("{text}");
        return Ok(if valid {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let mut page = MountPointPage::new(
        backend,
        Arc::new(StderrNotifier),
        config.mount_point_presets.clone(),
    );
    if !prepare(&mut page, data).await? {
        return Ok(ExitCode::FAILURE);
    }

    let message = match cli.command {
        Commands::List => Message::List,
        Commands::Assign {
            device,
            mount_point,
        } => Message::SetMountPoint {
            device,
            mount_point,
        },
        Commands::Reformat { device, enabled } => Message::SetReformat {
            device,
            checked: enabled,
        },
        Commands::Edit => {
            interactive(&mut page).await?;
            return Ok(exit_code(&page));
        }
    };

    update(&mut page, message).await?;
    print_page(&page);
    Ok(exit_code(&page))
}
