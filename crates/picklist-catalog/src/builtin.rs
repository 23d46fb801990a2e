#![deny(unsafe_code)]

//! Rule tables shipped with the binary.

use crate::rule::{MultiSizeRule, NamedBundleRule, NamedMatch, RuleLine, SingleSizeRule};

const SINGLE_SIZE: &[(&str, &str, u32)] = &[
    ("(10\" x 7\") 5pc", "1152", 1),
    ("(10\" x 7\") 10pc", "1152", 2),
    ("(10\" x 7\") 15pc", "1152", 3),
    ("(10\" x 7\") 20pc", "1152", 4),
    ("(10.5\" x 11\") 5pc", "1153", 1),
    ("(10.5\" x 11\") 10pc", "1153", 2),
    ("(10.5\" x 11\") 15pc", "1153", 3),
    ("(10.5\" x 11\") 20pc", "1153", 4),
    ("(13\" x 16\") 5pc", "1154", 1),
    ("(13\" x 16\") 10pc", "1154", 2),
    ("(13\" x 16\") 15pc", "1154", 3),
    ("(13\" x 16\") 20pc", "1154", 4),
    ("(15\" X 20\") 3pc", "1318", 1),
    ("(15\" X 20\") 6pc", "1318", 2),
    ("(15\" X 20\") 9pc", "1318", 3),
    ("(15\" X 20\") 12pc", "1318", 4),
];

const MULTI_SIZE: &[(&str, &[(&str, u32)])] = &[
    ("(3 SIZES, 5s)", &[("1152", 1), ("1153", 1), ("1154", 1)]),
    ("(3 SIZES, 10s)", &[("1152", 2), ("1153", 2), ("1154", 2)]),
    ("(3 SIZES, 15s)", &[("1152", 3), ("1153", 3), ("1154", 3)]),
    ("(3 SIZES, 20s)", &[("1152", 4), ("1153", 4), ("1154", 4)]),
];

// Checked in this order; the exact SKU match wins over the substring ones.
const NAMED_BUNDLES: &[(&str, NamedMatch, &[(&str, u32)])] = &[
    (
        "RCK-FULLSET",
        NamedMatch::ExactSku,
        &[
            ("74", 1),
            ("924", 1),
            ("925", 1),
            ("926", 1),
            ("927", 1),
            ("940", 1),
            ("1124", 1),
        ],
    ),
    (
        "Boot Polishing Pack",
        NamedMatch::Contains,
        &[("941", 1), ("6425", 1)],
    ),
    ("Pouch and Stick", NamedMatch::Contains, &[("019", 1), ("169", 1)]),
];

fn lines(items: &[(&str, u32)]) -> Vec<RuleLine> {
    items
        .iter()
        .map(|(sku, multiplier)| RuleLine::new(*sku, *multiplier))
        .collect()
}

pub(crate) fn single_size() -> Vec<SingleSizeRule> {
    SINGLE_SIZE
        .iter()
        .map(|(key, sku, multiplier)| SingleSizeRule {
            key: (*key).to_string(),
            line: RuleLine::new(*sku, *multiplier),
        })
        .collect()
}

pub(crate) fn multi_size() -> Vec<MultiSizeRule> {
    MULTI_SIZE
        .iter()
        .map(|(key, items)| MultiSizeRule {
            key: (*key).to_string(),
            lines: lines(items),
        })
        .collect()
}

pub(crate) fn named_bundles() -> Vec<NamedBundleRule> {
    NAMED_BUNDLES
        .iter()
        .map(|(key, match_mode, items)| NamedBundleRule {
            key: (*key).to_string(),
            match_mode: *match_mode,
            lines: lines(items),
        })
        .collect()
}
