// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;

use super::paths::DEV_PREFIX;

/// Device path → mount point for every real device in a `/proc/mounts` table.
///
/// Pseudo filesystems (sources not under `/dev/`) are dropped. When a device is
/// mounted more than once, its first mount point is kept.
pub fn parse_mounts(input: &str) -> HashMap<String, String> {
    let mut mounts = HashMap::new();

    for line in input.lines() {
        let mut fields = line.split_whitespace();
        let (Some(source), Some(mount_point)) = (fields.next(), fields.next()) else {
            continue;
        };

        if !source.starts_with(DEV_PREFIX) {
            continue;
        }

        mounts
            .entry(source.to_string())
            .or_insert_with(|| unescape_mount_field(mount_point));
    }

    mounts
}

/// Decode the `\ooo` octal escapes the kernel uses for whitespace in mount points.
fn unescape_mount_field(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'\\'
            && index + 3 < bytes.len()
            && bytes[index + 1..index + 4].iter().all(u8::is_ascii_digit)
        {
            if let Ok(num) = u8::from_str_radix(&value[index + 1..index + 4], 8) {
                decoded.push(num);
                index += 4;
                continue;
            }
        }

        decoded.push(bytes[index]);
        index += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_device_mounts_only() {
        let sample = "sysfs /sys sysfs rw,nosuid,nodev,noexec,relatime 0 0\nproc /proc proc rw 0 0\n/dev/sda1 /mnt ext4 rw 0 0\ntmpfs /run tmpfs rw 0 0\n/dev/nvme0n1p2 / btrfs rw 0 0\n";

        let mounts = parse_mounts(sample);
        assert_eq!(mounts.len(), 2);
        assert_eq!(mounts["/dev/sda1"], "/mnt");
        assert_eq!(mounts["/dev/nvme0n1p2"], "/");
    }

    #[test]
    fn first_mount_of_a_device_wins() {
        let sample = "/dev/sda2 /home ext4 rw 0 0\n/dev/sda2 /srv/bind ext4 rw 0 0\n";

        let mounts = parse_mounts(sample);
        assert_eq!(mounts["/dev/sda2"], "/home");
    }

    #[test]
    fn decodes_escaped_whitespace_and_skips_short_lines() {
        let sample = "/dev/sdb1 /media/usb\\040stick vfat rw 0 0\n/dev/sdc1\n\n";

        let mounts = parse_mounts(sample);
        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts["/dev/sdb1"], "/media/usb stick");
    }
}
