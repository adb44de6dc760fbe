use serde_json::{json, Map as JsonMap, Value as JsonValue};

use crate::model::{DatabaseId, DocumentKey, GeoPoint, Timestamp};
use crate::value::{
    BytesValue, FieldValueOptions, ObjectValue, ServerTimestampBehavior, ServerTimestampValue,
};

/// A typed datum stored in a Firestore document.
///
/// Mirrors the `FieldValue` class hierarchy in
/// `packages/firestore/src/model/field_value.ts` from the Firebase JS SDK,
/// re-expressed as a closed sum type. Values are immutable once constructed
/// and may be shared freely across threads.
#[derive(Clone, Debug)]
pub struct FieldValue {
    kind: ValueKind,
}

#[derive(Clone, Debug)]
pub enum ValueKind {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Timestamp(Timestamp),
    ServerTimestamp(ServerTimestampValue),
    String(String),
    Bytes(BytesValue),
    Reference(ReferenceValue),
    GeoPoint(GeoPoint),
    Array(Vec<FieldValue>),
    Object(ObjectValue),
}

/// The fixed cross-type sort key. Values of different kinds order by this tag
/// alone; `Integer`/`Double` share `Number`, and server-timestamp sentinels
/// share `Timestamp` with concrete timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeOrder {
    Null = 0,
    Boolean = 1,
    Number = 2,
    Timestamp = 3,
    String = 4,
    Blob = 5,
    Reference = 6,
    GeoPoint = 7,
    Array = 8,
    Object = 9,
}

impl FieldValue {
    pub const NULL: FieldValue = FieldValue {
        kind: ValueKind::Null,
    };
    pub const TRUE: FieldValue = FieldValue {
        kind: ValueKind::Boolean(true),
    };
    pub const FALSE: FieldValue = FieldValue {
        kind: ValueKind::Boolean(false),
    };
    pub const NAN: FieldValue = FieldValue {
        kind: ValueKind::Double(f64::NAN),
    };
    pub const INFINITY: FieldValue = FieldValue {
        kind: ValueKind::Double(f64::INFINITY),
    };
    pub const NEG_INFINITY: FieldValue = FieldValue {
        kind: ValueKind::Double(f64::NEG_INFINITY),
    };

    pub fn null() -> Self {
        Self::NULL
    }

    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    pub fn from_integer(value: i64) -> Self {
        Self {
            kind: ValueKind::Integer(value),
        }
    }

    pub fn from_double(value: f64) -> Self {
        Self {
            kind: ValueKind::Double(value),
        }
    }

    pub fn from_timestamp(value: Timestamp) -> Self {
        Self {
            kind: ValueKind::Timestamp(value),
        }
    }

    pub fn from_server_timestamp(value: ServerTimestampValue) -> Self {
        Self {
            kind: ValueKind::ServerTimestamp(value),
        }
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            kind: ValueKind::String(value.into()),
        }
    }

    pub fn from_bytes(value: BytesValue) -> Self {
        Self {
            kind: ValueKind::Bytes(value),
        }
    }

    pub fn from_reference(value: ReferenceValue) -> Self {
        Self {
            kind: ValueKind::Reference(value),
        }
    }

    pub fn from_geo_point(value: GeoPoint) -> Self {
        Self {
            kind: ValueKind::GeoPoint(value),
        }
    }

    pub fn from_array(values: Vec<FieldValue>) -> Self {
        Self {
            kind: ValueKind::Array(values),
        }
    }

    pub fn from_object(value: ObjectValue) -> Self {
        Self {
            kind: ValueKind::Object(value),
        }
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn type_order(&self) -> TypeOrder {
        match &self.kind {
            ValueKind::Null => TypeOrder::Null,
            ValueKind::Boolean(_) => TypeOrder::Boolean,
            ValueKind::Integer(_) | ValueKind::Double(_) => TypeOrder::Number,
            ValueKind::Timestamp(_) | ValueKind::ServerTimestamp(_) => TypeOrder::Timestamp,
            ValueKind::String(_) => TypeOrder::String,
            ValueKind::Bytes(_) => TypeOrder::Blob,
            ValueKind::Reference(_) => TypeOrder::Reference,
            ValueKind::GeoPoint(_) => TypeOrder::GeoPoint,
            ValueKind::Array(_) => TypeOrder::Array,
            ValueKind::Object(_) => TypeOrder::Object,
        }
    }

    /// Dematerializes the value for consumers.
    ///
    /// Server-timestamp sentinels resolve according to
    /// `options.server_timestamps`; timestamps render as RFC 3339 strings and
    /// bytes as base64, matching the wire conventions consumers already
    /// handle. Non-finite doubles render as the strings `"NaN"`,
    /// `"Infinity"` and `"-Infinity"` since JSON numbers cannot carry them.
    pub fn value(&self, options: &FieldValueOptions) -> JsonValue {
        match &self.kind {
            ValueKind::Null => JsonValue::Null,
            ValueKind::Boolean(value) => JsonValue::Bool(*value),
            ValueKind::Integer(value) => JsonValue::from(*value),
            ValueKind::Double(value) => match serde_json::Number::from_f64(*value) {
                Some(number) => JsonValue::Number(number),
                None => JsonValue::String(non_finite_repr(*value).to_string()),
            },
            ValueKind::Timestamp(timestamp) => JsonValue::String(timestamp.to_rfc3339()),
            ValueKind::ServerTimestamp(sentinel) => match options.server_timestamps {
                ServerTimestampBehavior::None => JsonValue::Null,
                ServerTimestampBehavior::Estimate => {
                    JsonValue::String(sentinel.local_write_time().to_rfc3339())
                }
                ServerTimestampBehavior::Previous => sentinel
                    .previous_value()
                    .map(|previous| previous.value(options))
                    .unwrap_or(JsonValue::Null),
            },
            ValueKind::String(value) => JsonValue::String(value.clone()),
            ValueKind::Bytes(bytes) => JsonValue::String(bytes.to_base64()),
            ValueKind::Reference(reference) => JsonValue::String(reference.resource_name()),
            ValueKind::GeoPoint(point) => json!({
                "latitude": point.latitude(),
                "longitude": point.longitude(),
            }),
            ValueKind::Array(values) => {
                JsonValue::Array(values.iter().map(|value| value.value(options)).collect())
            }
            ValueKind::Object(object) => {
                let mut fields = JsonMap::new();
                for (key, value) in object.iter() {
                    fields.insert(key.clone(), value.value(options));
                }
                JsonValue::Object(fields)
            }
        }
    }
}

fn non_finite_repr(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value == f64::INFINITY {
        "Infinity"
    } else {
        "-Infinity"
    }
}

/// A pointer to a document in a specific database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceValue {
    database_id: DatabaseId,
    key: DocumentKey,
}

impl ReferenceValue {
    pub fn new(database_id: DatabaseId, key: DocumentKey) -> Self {
        Self { database_id, key }
    }

    pub fn database_id(&self) -> &DatabaseId {
        &self.database_id
    }

    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// The fully qualified resource name of the referenced document.
    pub fn resource_name(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents/{}",
            self.database_id.project_id(),
            self.database_id.database(),
            self.key.path().canonical_string()
        )
    }
}
