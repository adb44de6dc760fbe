mod bytes_value;
mod compare;
mod field_value;
mod object_value;
mod options;
mod server_timestamp;
mod truncation;

pub use bytes_value::BytesValue;
pub use compare::SizedComparison;
pub use field_value::{FieldValue, ReferenceValue, TypeOrder, ValueKind};
pub use object_value::ObjectValue;
pub use options::{FieldValueOptions, ServerTimestampBehavior};
pub use server_timestamp::ServerTimestampValue;
pub use truncation::truncated_string_len;
