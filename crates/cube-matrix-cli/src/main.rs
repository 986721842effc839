//! Cube Matrix Control Tool
//!
//! Batch driver for a networked cube matrix fixture: power, brightness,
//! effect mode, and layout rendering over the JSON/TCP control channel.

mod layout_file;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cube_matrix_client::{DeviceClient, DEFAULT_PORT};
use tracing_subscriber::EnvFilter;

use layout_file::LayoutFile;

#[derive(Parser)]
#[command(name = "cubematrixctl")]
#[command(about = "Control tool for a networked cube matrix fixture")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Fixture IP address
    #[arg(long)]
    host: IpAddr,

    /// Fixture TCP control port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn the fixture on or off
    Power {
        /// "on" or "off"
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
    /// Set the fixture brightness
    Brightness {
        /// Brightness level (1-100)
        level: u8,
    },
    /// Activate an effects mode
    Fx {
        /// Mode name (e.g. "direct")
        mode: String,
    },
    /// Render a layout description and transmit it
    Draw {
        /// TOML layout description file
        layout: PathBuf,
        /// Fire-and-forget: skip reading fixture acks
        #[arg(long)]
        stream: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    let addr = SocketAddr::new(cli.host, cli.port);
    let mut client = DeviceClient::new(addr);

    match cli.command {
        Commands::Power { state } => {
            client
                .set_power_state(state == "on")
                .context("failed to set power state")?;
            println!("Power {state}");
        }
        Commands::Brightness { level } => {
            client
                .set_brightness(level)
                .context("failed to set brightness")?;
            println!("Brightness set to {level}");
        }
        Commands::Fx { mode } => {
            client
                .set_fx_mode(&mode)
                .context("failed to activate fx mode")?;
            println!("Fx mode: {mode}");
        }
        Commands::Draw { layout, stream } => {
            let description = LayoutFile::load(&layout)?;
            let built = description.build()?;
            client.set_streaming(stream);
            client
                .draw_matrices(&built.raw_rgb_data())
                .context("failed to transmit pixel payload")?;
            println!("Layout of {} modules transmitted", built.len());
        }
    }

    Ok(())
}
