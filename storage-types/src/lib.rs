// SPDX-License-Identifier: GPL-3.0-only

//! Block storage inventory models
//!
//! This crate defines the records produced by a storage enumeration and the
//! options that control it:
//!
//! - `StorageDevice` → one reportable block device with its identifying attributes
//! - `Partition` → a mounted partition of that device, keyed by leaf name
//! - `InventoryConfig` → the size unit applied to every figure
//!
//! The records serialize to the compact camelCase shape expected by the
//! host-facts report: empty optional fields and zero sizes are omitted.

pub mod config;
pub mod disk;

pub use config::{ConfigError, DEFAULT_UNIT, InventoryConfig};
pub use disk::{Partition, StorageDevice};
