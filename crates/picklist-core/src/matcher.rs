//! Label search over the order and SKU cells.

use std::sync::LazyLock;

use regex::Regex;

static SINGLE_SIZE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\(\d+(?:\.\d+)?" [xX] \d+(?:\.\d+)?"\) \d+pc"#).expect("single size pattern")
});

static MULTI_SIZE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+ SIZES, \d+s\)").expect("multi size pattern"));

fn find_label<'a>(pattern: &Regex, fields: [&'a str; 2]) -> Option<&'a str> {
    fields
        .into_iter()
        .filter(|field| !field.is_empty())
        .find_map(|field| pattern.find(field).map(|found| found.as_str()))
}

/// First pack-size label such as `(10" x 7") 5pc`, order cell first.
pub fn find_single_size_label<'a>(order_id: &'a str, sku: &'a str) -> Option<&'a str> {
    find_label(&SINGLE_SIZE_LABEL, [order_id, sku])
}

/// First multi-size bundle label such as `(3 SIZES, 10s)`, order cell first.
pub fn find_multi_size_label<'a>(order_id: &'a str, sku: &'a str) -> Option<&'a str> {
    find_label(&MULTI_SIZE_LABEL, [order_id, sku])
}
