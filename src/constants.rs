/// Maximum number of bytes a single index entry may consume.
pub const INDEX_TRUNCATION_THRESHOLD_BYTES: usize = 1500;

/// Byte budget handed to string truncation once the one-byte string overhead
/// has been reserved.
pub const STRING_INDEX_TRUNCATION_THRESHOLD_BYTES: usize = INDEX_TRUNCATION_THRESHOLD_BYTES - 1;

/// Fixed overhead reserved for the `DatabaseId` portion of a reference entry.
/// Treated as an indivisible unit: it is charged in full even when the
/// remaining budget is smaller.
pub const DATABASE_ID_INDEX_BYTES: usize = 16;

pub const DEFAULT_DATABASE_ID: &str = "(default)";

pub(crate) const NULL_INDEX_BYTES: usize = 1;
pub(crate) const BOOLEAN_INDEX_BYTES: usize = 1;
pub(crate) const NUMBER_INDEX_BYTES: usize = 8;
pub(crate) const TIMESTAMP_INDEX_BYTES: usize = 8;
pub(crate) const GEO_POINT_INDEX_BYTES: usize = 16;

/// Per-string overhead reserved by the budgeted string comparator.
pub(crate) const STRING_OVERHEAD_BYTES: usize = 1;

/// Per-segment overhead charged when truncating a resource path.
pub(crate) const SEGMENT_OVERHEAD_BYTES: usize = 1;
