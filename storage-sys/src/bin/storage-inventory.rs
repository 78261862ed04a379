// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use storage_sys::{try_enumerate, HostPaths, InventoryConfig, StorageDevice};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "storage-inventory")]
#[command(about = "List the host's block devices and their mounted partitions")]
struct Args {
    /// Read sysfs, procfs and the udev database beneath this directory
    #[arg(long, default_value = "/")]
    root: PathBuf,

    /// TOML file providing `unit`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Size unit divisor, overrides the config file
    #[arg(long)]
    unit: Option<u64>,

    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storage_sys=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => InventoryConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => InventoryConfig::default(),
    };
    if let Some(unit) = args.unit {
        config.unit = unit;
    }

    let paths = HostPaths::under(&args.root);
    tracing::debug!(?paths, unit = config.effective_unit(), "collecting storage inventory");

    let devices = try_enumerate(&paths, &config).context("storage inventory failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    print_table(&devices);
    Ok(())
}

fn print_table(devices: &[StorageDevice]) {
    println!(
        "{:<12} {:<10} {:<10} {:<24} {:<20} {:>10} {:>6}",
        "NAME", "DRIVER", "VENDOR", "MODEL", "SERIAL", "SIZE", "PARTS"
    );

    for device in devices {
        println!(
            "{:<12} {:<10} {:<10} {:<24} {:<20} {:>10} {:>6}",
            device.name,
            device.driver.as_deref().unwrap_or("-"),
            device.vendor.as_deref().unwrap_or("-"),
            device.model.as_deref().unwrap_or("-"),
            device.serial.as_deref().unwrap_or("-"),
            device.size,
            device.partition_count()
        );

        for (name, partition) in device.partitions.iter().flatten() {
            println!(
                "  {:<10} {:<40} size={} available={}",
                name,
                partition.mount_point.as_deref().unwrap_or("-"),
                partition.size,
                partition.available_size
            );
        }
    }
}
