//! Splitting of multi-item order cells.
//!
//! A marketplace export packs every item of an order into one cell, each item
//! introduced by a bracketed ordinal:
//!
//! ```text
//! [1] Product Name:Zip Bag; ... Quantity: 2; [2] Product Name:Boot Pack; ...
//! ```
//!
//! The cell is cut in front of every marker except one that opens the cell or
//! directly follows a `[1]` marker.

use std::sync::LazyLock;

use regex::Regex;

static ENTRY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("entry marker pattern"));

const FIRST_MARKER: &str = "[1]";

/// Splits a raw order cell into cleaned item entries.
///
/// Empty entries are dropped, so a blank cell yields no entries and a cell
/// without markers yields exactly one.
pub fn split_entries(cell: &str) -> Vec<String> {
    let mut cuts = vec![0];
    for marker in ENTRY_MARKER.find_iter(cell) {
        let start = marker.start();
        if start == 0 || cell[..start].ends_with(FIRST_MARKER) {
            continue;
        }
        cuts.push(start);
    }
    cuts.push(cell.len());

    cuts.windows(2)
        .map(|bounds| clean_entry(&cell[bounds[0]..bounds[1]]))
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Collapses line breaks and runs of spaces to single spaces and trims.
pub fn clean_entry(raw: &str) -> String {
    let flattened = raw.replace("\r\n", " ").replace(['\r', '\n'], " ");
    flattened
        .split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
