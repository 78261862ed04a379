// SPDX-License-Identifier: GPL-3.0-only

//! Correlates registry, udev, mount and partition data into device records

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use storage_types::{InventoryConfig, Partition, StorageDevice};
use tracing::{debug, warn};

use super::attributes::{read_attribute, read_link_name, read_u64};
use super::mounts::parse_mounts;
use super::partitions::parse_partitions;
use super::paths::{HostPaths, DEV_PREFIX};
use super::registry::{classify, list_devices, BlockCandidate};
use super::serial::resolve_serial;
use super::usage::available_megabytes;
use crate::error::{InventoryError, Result};

/// Unresolved PCI/USB vendor ids are reported by some drivers as "0x1af4"
const HEX_PREFIX: &str = "0x";
const SECTOR_BYTES: u64 = 512;
const PARTITION_BLOCK_BYTES: u64 = 1024;

/// Host-wide tables shared by every device of one enumeration
#[derive(Debug, Default, Clone)]
pub struct HostTables {
    /// Device path → first mount point
    pub mounts: HashMap<String, String>,
    /// Partition name → size in 1 KiB blocks
    pub partition_sizes: HashMap<String, u64>,
}

impl HostTables {
    pub fn read(paths: &HostPaths) -> Result<Self> {
        let mounts =
            fs::read_to_string(&paths.proc_mounts).map_err(|source| InventoryError::MountTable {
                path: paths.proc_mounts.clone(),
                source,
            })?;
        let partitions = fs::read_to_string(&paths.proc_partitions).map_err(|source| {
            InventoryError::PartitionTable {
                path: paths.proc_partitions.clone(),
                source,
            }
        })?;

        Ok(Self {
            mounts: parse_mounts(&mounts),
            partition_sizes: parse_partitions(&partitions),
        })
    }
}

/// Inventory of the live host with default locations.
pub fn inventory(config: &InventoryConfig) -> Vec<StorageDevice> {
    enumerate(&HostPaths::default(), config)
}

/// Best-effort inventory: an unreadable registry or table yields no devices.
pub fn enumerate(paths: &HostPaths, config: &InventoryConfig) -> Vec<StorageDevice> {
    match try_enumerate(paths, config) {
        Ok(devices) => devices,
        Err(e) => {
            warn!(error = %e, "storage information unavailable");
            Vec::new()
        }
    }
}

/// Inventory that reports which host source could not be read.
pub fn try_enumerate(paths: &HostPaths, config: &InventoryConfig) -> Result<Vec<StorageDevice>> {
    let names = list_devices(&paths.sys_block).map_err(|source| InventoryError::Registry {
        path: paths.sys_block.clone(),
        source,
    })?;
    let tables = HostTables::read(paths)?;
    let unit = config.effective_unit();

    let mut devices = Vec::new();
    for name in names {
        let Some(candidate) = BlockCandidate::resolve(&paths.sys_block, &name) else {
            debug!(device = %name, "registry entry is not a link, skipping");
            continue;
        };

        let verdict = classify(&candidate);
        if !verdict.is_accepted() {
            debug!(device = %name, ?verdict, "not a reportable device");
            continue;
        }

        devices.push(assemble_device(&candidate, paths, &tables, unit));
    }

    Ok(devices)
}

/// Build the record of one accepted device.
pub fn assemble_device(
    candidate: &BlockCandidate,
    paths: &HostPaths,
    tables: &HostTables,
    unit: u64,
) -> StorageDevice {
    let device_dir = candidate.path.join("device");

    StorageDevice {
        name: candidate.name.clone(),
        driver: read_link_name(device_dir.join("driver")),
        vendor: non_empty(read_attribute(device_dir.join("vendor")))
            .filter(|vendor| !vendor.starts_with(HEX_PREFIX)),
        model: non_empty(read_attribute(device_dir.join("model"))),
        serial: resolve_serial(&candidate.name, &candidate.path, paths).filter(|s| !s.is_empty()),
        size: sectors_to_megabytes(read_u64(candidate.path.join("size")), unit),
        partitions: collect_partitions(&candidate.name, tables, unit),
    }
}

/// Mounted partitions whose source path starts with `/dev/<device>`.
fn collect_partitions(
    device: &str,
    tables: &HostTables,
    unit: u64,
) -> Option<BTreeMap<String, Partition>> {
    let device_path = format!("{DEV_PREFIX}{device}");
    let mut partitions = BTreeMap::new();

    for (source, mount_point) in &tables.mounts {
        if !source.starts_with(&device_path) {
            continue;
        }

        let name = &source[DEV_PREFIX.len()..];
        let size = tables
            .partition_sizes
            .get(name)
            .map_or(0, |blocks| blocks_to_megabytes(*blocks, unit));
        let available_size = available_megabytes(Path::new(mount_point)).unwrap_or_else(|e| {
            debug!(partition = name, mount_point = %mount_point, error = %e, "free space unknown");
            0
        });

        partitions.insert(
            name.to_string(),
            Partition {
                mount_point: non_empty(mount_point.clone()),
                size,
                available_size,
            },
        );
    }

    (!partitions.is_empty()).then_some(partitions)
}

/// `sectors × 512 / unit²`; a zero unit means `DEFAULT_UNIT`.
pub fn sectors_to_megabytes(sectors: u64, unit: u64) -> u64 {
    let unit = InventoryConfig::with_unit(unit).effective_unit();
    sectors.saturating_mul(SECTOR_BYTES) / unit.saturating_mul(unit)
}

/// `blocks × 1024 / unit / unit`; partition sizes use the same unit² divisor as devices.
pub fn blocks_to_megabytes(blocks: u64, unit: u64) -> u64 {
    let unit = InventoryConfig::with_unit(unit).effective_unit();
    blocks.saturating_mul(PARTITION_BLOCK_BYTES) / unit / unit
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
