// SPDX-License-Identifier: GPL-3.0-only

use std::ffi::CString;
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

const MIB: u64 = 1024 * 1024;

/// Space available to unprivileged users on the filesystem mounted at `mount_point`, in MiB.
pub fn available_megabytes(mount_point: &Path) -> io::Result<u64> {
    Ok(available_bytes(mount_point)? / MIB)
}

fn available_bytes(mount_point: &Path) -> io::Result<u64> {
    let c_path = CString::new(mount_point.as_os_str().as_bytes()).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("mount point contains NUL byte: {e}"),
        )
    })?;

    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }

    let stat = unsafe { stat.assume_init() };
    // f_bavail counts fragments; some filesystems leave f_frsize unset.
    let frsize = if stat.f_frsize > 0 {
        stat.f_frsize
    } else {
        stat.f_bsize
    };
    #[allow(clippy::unnecessary_cast)]
    let available = (stat.f_bavail as u64).saturating_mul(frsize as u64);

    Ok(available)
}
