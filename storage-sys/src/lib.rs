// SPDX-License-Identifier: GPL-3.0-only

//! Block storage inventory for Linux hosts
//!
//! This crate reads the kernel's view of the host's block storage and turns it
//! into `StorageDevice` records:
//! - Device listing and classification from `/sys/block`
//! - Hardware serials from the udev database
//! - Mounted partitions from `/proc/mounts` and `/proc/partitions`
//! - Free space through `statvfs`
//!
//! Every source is read-only and read once per call; nothing is cached.

pub mod error;
pub mod inventory;

pub use error::{InventoryError, Result};
pub use inventory::{enumerate, inventory, try_enumerate, HostPaths};
pub use storage_types::{InventoryConfig, Partition, StorageDevice};
