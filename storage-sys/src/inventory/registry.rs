// SPDX-License-Identifier: GPL-3.0-only

//! Block-device registry listing and classification

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::attributes::read_attribute;

const VIRTUAL_PREFIX: &str = "../devices/virtual/";
const FLOPPY_PREFIX: &str = "../devices/platform/floppy";
/// SCSI peripheral type of CD/DVD drives (`TYPE_ROM`)
const OPTICAL_TYPE: &str = "5";

/// One entry of the block-device registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCandidate {
    pub name: String,
    /// Registry entry, e.g. `/sys/block/sda`
    pub path: PathBuf,
    /// Raw symlink target of the entry, e.g. `../devices/pci0000:00/.../block/sda`
    pub target: PathBuf,
}

impl BlockCandidate {
    /// Resolve the registry entry for `name`. `None` if it is not a symlink.
    pub fn resolve(sys_block: &Path, name: &str) -> Option<Self> {
        let path = sys_block.join(name);
        let target = fs::read_link(&path).ok()?;
        Some(Self {
            name: name.to_string(),
            path,
            target,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Virtual,
    Floppy,
    Optical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Accepted,
    Rejected(RejectReason),
}

impl Classification {
    pub fn is_accepted(self) -> bool {
        matches!(self, Classification::Accepted)
    }
}

/// Names in the registry, in directory listing order.
pub fn list_devices(sys_block: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(sys_block)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Decide whether a candidate is a reportable device.
///
/// Removable disks are accepted: hosts booting from USB media must still see
/// their boot disk.
pub fn classify(candidate: &BlockCandidate) -> Classification {
    let target = candidate.target.to_string_lossy();

    if target.starts_with(VIRTUAL_PREFIX) {
        return Classification::Rejected(RejectReason::Virtual);
    }

    if target.starts_with(FLOPPY_PREFIX) {
        return Classification::Rejected(RejectReason::Floppy);
    }

    if read_attribute(candidate.path.join("device").join("type")) == OPTICAL_TYPE {
        return Classification::Rejected(RejectReason::Optical);
    }

    Classification::Accepted
}
