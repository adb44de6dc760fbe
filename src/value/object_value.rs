use std::collections::btree_map;

use log::debug;

use crate::model::FieldPath;
use crate::util::assert::hard_assert;
use crate::util::SortedMap;
use crate::value::{FieldValue, ValueKind};

/// An immutable, key-ordered mapping of field names to values; the root of a
/// document's data.
///
/// `set` and `delete` return new trees and share unchanged children with the
/// receiver.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    fields: SortedMap<String, FieldValue>,
}

impl ObjectValue {
    pub fn empty() -> Self {
        Self {
            fields: SortedMap::new(),
        }
    }

    pub fn new(fields: SortedMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        Self {
            fields: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// In-order traversal over `(field name, value)` pairs.
    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }

    /// Retrieves the value at `path`, if any. Any non-object intermediate
    /// yields `None`.
    pub fn field(&self, path: &FieldPath) -> Option<&FieldValue> {
        field_at(&self.fields, path.segments())
    }

    /// Returns a new tree with `value` stored at `path`. Intermediate
    /// children that are not objects are replaced by fresh empty objects.
    pub fn set(&self, path: &FieldPath, value: FieldValue) -> ObjectValue {
        hard_assert(
            !path.segments().is_empty(),
            "Cannot set field for empty path on ObjectValue",
        );
        ObjectValue::new(set_at(&self.fields, path.segments(), value))
    }

    /// Returns a new tree without the value at `path`. When an intermediate
    /// segment does not name an object, the receiver is returned unchanged.
    pub fn delete(&self, path: &FieldPath) -> ObjectValue {
        hard_assert(
            !path.segments().is_empty(),
            "Cannot delete field for empty path on ObjectValue",
        );
        ObjectValue::new(delete_at(&self.fields, path.segments()))
    }
}

fn field_at<'a>(
    fields: &'a SortedMap<String, FieldValue>,
    segments: &[String],
) -> Option<&'a FieldValue> {
    let (first, rest) = segments.split_first()?;
    let value = fields.get(first.as_str())?;
    if rest.is_empty() {
        Some(value)
    } else if let ValueKind::Object(child) = value.kind() {
        field_at(&child.fields, rest)
    } else {
        None
    }
}

fn set_at(
    fields: &SortedMap<String, FieldValue>,
    segments: &[String],
    value: FieldValue,
) -> SortedMap<String, FieldValue> {
    let Some((first, rest)) = segments.split_first() else {
        return fields.clone();
    };
    if rest.is_empty() {
        return fields.insert(first.clone(), value);
    }
    let child = match fields.get(first.as_str()).map(FieldValue::kind) {
        Some(ValueKind::Object(object)) => object.fields.clone(),
        Some(_) => {
            debug!("replacing non-object field {first} while setting nested value");
            SortedMap::new()
        }
        None => SortedMap::new(),
    };
    let updated = set_at(&child, rest, value);
    fields.insert(
        first.clone(),
        FieldValue::from_object(ObjectValue::new(updated)),
    )
}

fn delete_at(
    fields: &SortedMap<String, FieldValue>,
    segments: &[String],
) -> SortedMap<String, FieldValue> {
    let Some((first, rest)) = segments.split_first() else {
        return fields.clone();
    };
    if rest.is_empty() {
        return fields.remove(first.as_str());
    }
    match fields.get(first.as_str()).map(FieldValue::kind) {
        Some(ValueKind::Object(object)) => {
            let updated = delete_at(&object.fields, rest);
            fields.insert(
                first.clone(),
                FieldValue::from_object(ObjectValue::new(updated)),
            )
        }
        _ => fields.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(dotted: &str) -> FieldPath {
        FieldPath::from_dot_separated(dotted).unwrap()
    }

    #[test]
    fn set_inserts_top_level_field() {
        let object = ObjectValue::empty().set(&path("a"), FieldValue::from_integer(1));
        assert_eq!(object.field(&path("a")), Some(&FieldValue::from_integer(1)));
        assert_eq!(object.len(), 1);
    }

    #[test]
    fn set_creates_intermediate_objects() {
        let object = ObjectValue::empty().set(&path("a.b.c"), FieldValue::from_bool(true));
        assert_eq!(
            object.field(&path("a.b.c")),
            Some(&FieldValue::from_bool(true))
        );
        assert!(matches!(
            object.field(&path("a")).map(FieldValue::kind),
            Some(ValueKind::Object(_))
        ));
    }

    #[test]
    fn set_replaces_non_object_intermediates() {
        let object = ObjectValue::empty()
            .set(&path("a"), FieldValue::from_string("scalar"))
            .set(&path("a.b"), FieldValue::from_integer(2));
        assert_eq!(object.field(&path("a.b")), Some(&FieldValue::from_integer(2)));
    }

    #[test]
    fn set_does_not_mutate_receiver() {
        let original = ObjectValue::empty().set(&path("a"), FieldValue::from_integer(1));
        let updated = original.set(&path("a"), FieldValue::from_integer(2));
        assert_eq!(original.field(&path("a")), Some(&FieldValue::from_integer(1)));
        assert_eq!(updated.field(&path("a")), Some(&FieldValue::from_integer(2)));
    }

    #[test]
    fn delete_removes_leaf() {
        let object = ObjectValue::empty()
            .set(&path("a.b"), FieldValue::from_integer(1))
            .set(&path("a.c"), FieldValue::from_integer(2));
        let deleted = object.delete(&path("a.b"));
        assert_eq!(deleted.field(&path("a.b")), None);
        assert_eq!(deleted.field(&path("a.c")), Some(&FieldValue::from_integer(2)));
        assert_eq!(object.field(&path("a.b")), Some(&FieldValue::from_integer(1)));
    }

    #[test]
    fn delete_through_non_object_is_identity() {
        let object = ObjectValue::empty().set(&path("a"), FieldValue::from_integer(1));
        let deleted = object.delete(&path("a.b"));
        assert_eq!(deleted, object);
    }

    #[test]
    fn field_through_non_object_is_none() {
        let object = ObjectValue::empty().set(&path("a"), FieldValue::from_integer(1));
        assert_eq!(object.field(&path("a.b")), None);
    }

    #[test]
    fn equality_is_key_and_value_parallel() {
        let left = ObjectValue::empty()
            .set(&path("a"), FieldValue::from_integer(1))
            .set(&path("b"), FieldValue::from_string("x"));
        let right = ObjectValue::empty()
            .set(&path("b"), FieldValue::from_string("x"))
            .set(&path("a"), FieldValue::from_integer(1));
        assert_eq!(left, right);

        let different = right.set(&path("b"), FieldValue::from_string("y"));
        assert_ne!(left, different);
    }
}
