// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

/// Textual prefix of real block-device sources in the mount table
pub const DEV_PREFIX: &str = "/dev/";

/// Host locations read during an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    /// Block-device registry, one symlink per device
    pub sys_block: PathBuf,
    pub proc_mounts: PathBuf,
    pub proc_partitions: PathBuf,
    /// Modern udev database, records named `b<major>:<minor>`
    pub udev_data: PathBuf,
    /// Legacy udev database, records named `block:<name>`
    pub udev_legacy_db: PathBuf,
}

impl Default for HostPaths {
    fn default() -> Self {
        Self::under(Path::new("/"))
    }
}

impl HostPaths {
    /// Every location re-rooted beneath `root` (a captured or synthetic host tree).
    ///
    /// `DEV_PREFIX` is not affected: it matches mount-table text, not files.
    pub fn under(root: &Path) -> Self {
        Self {
            sys_block: root.join("sys/block"),
            proc_mounts: root.join("proc/mounts"),
            proc_partitions: root.join("proc/partitions"),
            udev_data: root.join("run/udev/data"),
            udev_legacy_db: root.join("dev/.udev/db"),
        }
    }
}
