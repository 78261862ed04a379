// SPDX-License-Identifier: GPL-3.0-only

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A host source the whole enumeration depends on could not be read
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("cannot list block registry {}: {source}", path.display())]
    Registry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read mount table {}: {source}", path.display())]
    MountTable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read partition table {}: {source}", path.display())]
    PartitionTable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type alias for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
