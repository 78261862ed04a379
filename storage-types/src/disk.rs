//! Storage device and partition records
//!
//! These types represent one point-in-time inventory of the host's block devices.
//! They are built fresh on every enumeration and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A reportable block device (physical disk, NVMe namespace, USB stick, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StorageDevice {
    /// Leaf name under the block registry (e.g., "sda", "nvme0n1")
    pub name: String,

    /// Kernel driver bound to the device (e.g., "sd", "nvme")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,

    /// Vendor string; never a raw "0x..." numeric id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Disk model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Short hardware serial from the udev database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,

    /// Device size in whole megabytes (see `InventoryConfig::unit`)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: u64,

    /// Mounted partitions keyed by leaf name.
    ///
    /// The map is a keyed set: its iteration order carries no meaning. `None`
    /// when no partition of this device is mounted, never an empty map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitions: Option<BTreeMap<String, Partition>>,
}

impl StorageDevice {
    /// Number of mounted partitions attached to this device
    pub fn partition_count(&self) -> usize {
        self.partitions.as_ref().map_or(0, BTreeMap::len)
    }
}

/// A mounted partition of a `StorageDevice`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    /// Where the partition is mounted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_point: Option<String>,

    /// Partition size in whole megabytes
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: u64,

    /// Space available to unprivileged users in MiB, zero when unknown
    #[serde(default, skip_serializing_if = "is_zero")]
    pub available_size: u64,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}
