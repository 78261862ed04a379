// SPDX-License-Identifier: GPL-3.0-only

//! Hardware serial lookup through the udev database

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::trace;

use super::attributes::read_attribute;
use super::paths::HostPaths;

const SERIAL_KEY: &str = "E:ID_SERIAL_SHORT";

/// Where a device's udev record may live, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialSource {
    /// `/run/udev/data/b<major>:<minor>`
    UdevData,
    /// `/dev/.udev/db/block:<name>`
    LegacyUdevDb,
}

impl SerialSource {
    pub const ORDER: [SerialSource; 2] = [SerialSource::UdevData, SerialSource::LegacyUdevDb];

    fn record_path(self, name: &str, device_path: &Path, paths: &HostPaths) -> Option<PathBuf> {
        match self {
            SerialSource::UdevData => {
                let dev = read_attribute(device_path.join("dev"));
                if dev.is_empty() {
                    return None;
                }
                Some(paths.udev_data.join(format!("b{dev}")))
            }
            SerialSource::LegacyUdevDb => Some(paths.udev_legacy_db.join(format!("block:{name}"))),
        }
    }
}

/// Serial of `name`, taken from the first udev record that can be opened.
///
/// A record that opens but carries no serial ends the lookup.
pub fn resolve_serial(name: &str, device_path: &Path, paths: &HostPaths) -> Option<String> {
    let (source, record) = SerialSource::ORDER.iter().find_map(|source| {
        let path = source.record_path(name, device_path, paths)?;
        File::open(path).ok().map(|file| (*source, file))
    })?;

    trace!(device = name, ?source, "scanning udev record");
    scan_serial(BufReader::new(record))
}

/// First `E:ID_SERIAL_SHORT=` value of a udev record; later duplicates are ignored.
///
/// Records are scanned as bytes: other properties may hold non-UTF-8 text.
pub fn scan_serial(reader: impl BufRead) -> Option<String> {
    for line in reader.split(b'\n') {
        let Ok(line) = line else { break };
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        let mut fields = line.split(|byte| *byte == b'=');
        let (Some(key), Some(value), None) = (fields.next(), fields.next(), fields.next()) else {
            continue;
        };
        if key == SERIAL_KEY.as_bytes() {
            return Some(String::from_utf8_lossy(value).into_owned());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const RECORD: &str = "S:disk/by-id/ata-Samsung_SSD_860\nE:ID_MODEL=Samsung_SSD_860\nE:ID_SERIAL=Samsung_SSD_860_S3Z9NB0K123456\nE:ID_SERIAL_SHORT=S3Z9NB0K123456\nE:ID_SERIAL_SHORT=LATER\n";

    fn host(dev: Option<&str>) -> (tempfile::TempDir, HostPaths, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let paths = HostPaths::under(dir.path());
        let device_path = dir.path().join("sys/devices/pci0000:00/block/sda");
        fs::create_dir_all(&device_path).unwrap();
        if let Some(dev) = dev {
            fs::write(device_path.join("dev"), format!("{dev}\n")).unwrap();
        }
        fs::create_dir_all(&paths.udev_data).unwrap();
        fs::create_dir_all(&paths.udev_legacy_db).unwrap();
        (dir, paths, device_path)
    }

    #[test]
    fn first_serial_line_wins() {
        assert_eq!(
            scan_serial(RECORD.as_bytes()).as_deref(),
            Some("S3Z9NB0K123456")
        );
        assert_eq!(scan_serial("E:ID_SERIAL_SHORT=a=b\n".as_bytes()), None);
        assert_eq!(scan_serial("E:ID_MODEL=x\n".as_bytes()), None);
    }

    #[test]
    fn non_utf8_lines_do_not_end_the_scan() {
        let record: &[u8] = b"E:ID_MODEL=Disk\xff\nE:ID_SERIAL_SHORT=ABC123\n";
        assert_eq!(scan_serial(record).as_deref(), Some("ABC123"));

        let crlf: &[u8] = b"E:ID_SERIAL_SHORT=WIN42\r\n";
        assert_eq!(scan_serial(crlf).as_deref(), Some("WIN42"));
    }

    #[test]
    fn modern_record_takes_precedence() {
        let (_dir, paths, device_path) = host(Some("8:0"));
        fs::write(paths.udev_data.join("b8:0"), "E:ID_SERIAL_SHORT=MODERN\n").unwrap();
        fs::write(
            paths.udev_legacy_db.join("block:sda"),
            "E:ID_SERIAL_SHORT=LEGACY\n",
        )
        .unwrap();

        assert_eq!(
            resolve_serial("sda", &device_path, &paths).as_deref(),
            Some("MODERN")
        );
    }

    #[test]
    fn falls_back_to_legacy_database() {
        let (_dir, paths, device_path) = host(Some("8:0"));
        fs::write(
            paths.udev_legacy_db.join("block:sda"),
            "E:ID_SERIAL_SHORT=LEGACY\n",
        )
        .unwrap();

        assert_eq!(
            resolve_serial("sda", &device_path, &paths).as_deref(),
            Some("LEGACY")
        );
    }

    #[test]
    fn missing_dev_attribute_skips_modern_lookup() {
        let (_dir, paths, device_path) = host(None);
        fs::write(
            paths.udev_legacy_db.join("block:sda"),
            "E:ID_SERIAL_SHORT=LEGACY\n",
        )
        .unwrap();

        assert_eq!(
            resolve_serial("sda", &device_path, &paths).as_deref(),
            Some("LEGACY")
        );
    }

    #[test]
    fn opened_record_without_serial_stops_lookup() {
        let (_dir, paths, device_path) = host(Some("8:0"));
        fs::write(paths.udev_data.join("b8:0"), "E:ID_MODEL=x\n").unwrap();
        fs::write(
            paths.udev_legacy_db.join("block:sda"),
            "E:ID_SERIAL_SHORT=LEGACY\n",
        )
        .unwrap();

        assert_eq!(resolve_serial("sda", &device_path, &paths), None);
    }

    #[test]
    fn no_record_means_no_serial() {
        let (_dir, paths, device_path) = host(Some("8:0"));
        assert_eq!(resolve_serial("sda", &device_path, &paths), None);
    }
}
