pub mod error;
pub mod export;
pub mod extract;
pub mod normalize;
pub mod sequence;

pub use error::IngestError;
pub use export::{
    ORDER_ID_HEADER, PRODUCT_INFO_HEADER, PreparedExport, read_export, read_export_from,
};
pub use extract::{EntryFields, VARIATION_SKU_PRODUCT, apply_variation_sku_override, extract_fields};
pub use normalize::{clean_entry, split_entries};
pub use sequence::{
    ShelfSlot, WarehouseSequence, load_warehouse_sequence, load_warehouse_sequence_from,
};
