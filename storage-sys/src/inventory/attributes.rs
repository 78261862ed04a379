// SPDX-License-Identifier: GPL-3.0-only

//! Soft-fail readers for sysfs attribute files.
//!
//! Most device attributes are optional per driver, so a missing or unreadable
//! attribute is reported as an empty value instead of an error.

use std::fs;
use std::path::Path;

/// Trimmed file content, or an empty string on any failure.
///
/// Invalid UTF-8 (Latin-1 model strings, for one) is replaced, not dropped.
pub fn read_attribute(path: impl AsRef<Path>) -> String {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default()
}

/// Decimal attribute value, zero when missing or unparseable.
pub fn read_u64(path: impl AsRef<Path>) -> u64 {
    read_attribute(path).parse().unwrap_or(0)
}

/// Last component of a symlink target (e.g. the driver name behind `device/driver`).
pub fn read_link_name(path: impl AsRef<Path>) -> Option<String> {
    let target = fs::read_link(path).ok()?;
    target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
