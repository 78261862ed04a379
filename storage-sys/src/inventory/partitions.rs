// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;

use tracing::debug;

/// Partition name → size in 1 KiB blocks, from a `/proc/partitions` table.
///
/// Rows are `major minor #blocks name`. Rows with any other token count, and
/// rows whose block count is not a number (the header), are skipped.
pub fn parse_partitions(input: &str) -> HashMap<String, u64> {
    let mut sizes = HashMap::new();

    for line in input.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let &[_major, _minor, blocks, name] = tokens.as_slice() else {
            if !tokens.is_empty() {
                debug!(line, "skipping malformed partitions row");
            }
            continue;
        };

        match blocks.parse::<u64>() {
            Ok(blocks) => {
                sizes.insert(name.to_string(), blocks);
            }
            Err(_) => debug!(line, "skipping partitions row without a block count"),
        }
    }

    sizes
}
