//! Firestore field-value model with a byte-budgeted index comparator.
//!
//! The model mirrors the backend's total order across heterogeneous value
//! kinds, including server-timestamp sentinels, while every comparison
//! reports the index bytes it consumed so callers can chain comparisons
//! against the fixed 1500-byte index entry budget.

pub mod constants;
pub mod error;
pub mod model;
pub mod util;
pub mod value;

#[doc(inline)]
pub use constants::{
    DATABASE_ID_INDEX_BYTES, DEFAULT_DATABASE_ID, INDEX_TRUNCATION_THRESHOLD_BYTES,
    STRING_INDEX_TRUNCATION_THRESHOLD_BYTES,
};

#[doc(inline)]
pub use error::{FirestoreError, FirestoreErrorCode, FirestoreResult};

#[doc(inline)]
pub use model::{
    DatabaseId, DocumentKey, FieldPath, GeoPoint, ResourcePath, Timestamp, TruncatedPath,
};

#[doc(inline)]
pub use util::{immediate_predecessor, immediate_successor, SortedMap};

#[doc(inline)]
pub use value::{
    truncated_string_len, BytesValue, FieldValue, FieldValueOptions, ObjectValue, ReferenceValue,
    ServerTimestampBehavior, ServerTimestampValue, SizedComparison, TypeOrder, ValueKind,
};
