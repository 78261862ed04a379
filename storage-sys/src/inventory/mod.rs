// SPDX-License-Identifier: GPL-3.0-only

pub mod assemble;
pub mod attributes;
pub mod mounts;
pub mod partitions;
pub mod paths;
pub mod registry;
pub mod serial;
pub mod usage;

pub use assemble::{
    assemble_device, blocks_to_megabytes, enumerate, inventory, sectors_to_megabytes,
    try_enumerate, HostTables,
};
pub use attributes::{read_attribute, read_link_name, read_u64};
pub use mounts::parse_mounts;
pub use partitions::parse_partitions;
pub use paths::{HostPaths, DEV_PREFIX};
pub use registry::{classify, list_devices, BlockCandidate, Classification, RejectReason};
pub use serial::{resolve_serial, scan_serial, SerialSource};
pub use usage::available_megabytes;
