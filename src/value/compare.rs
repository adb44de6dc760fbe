//! Byte-budgeted ordering for index entries.
//!
//! Index entries are capped at
//! [`INDEX_TRUNCATION_THRESHOLD_BYTES`](crate::constants::INDEX_TRUNCATION_THRESHOLD_BYTES);
//! callers chain many comparisons against one budget, so every comparison
//! reports the bytes it consumed alongside its ordering. Budget accounting is
//! signed internally: a comparison may overshoot the budget by one atomic
//! token (a fixed-width number, timestamp or database id) when that token
//! cannot be divided.

use std::cmp::Ordering;

use crate::constants::{
    BOOLEAN_INDEX_BYTES, DATABASE_ID_INDEX_BYTES, GEO_POINT_INDEX_BYTES,
    INDEX_TRUNCATION_THRESHOLD_BYTES, NULL_INDEX_BYTES, NUMBER_INDEX_BYTES,
    STRING_OVERHEAD_BYTES, TIMESTAMP_INDEX_BYTES,
};
use crate::model::DocumentKey;
use crate::util::assert::hard_assert;
use crate::value::truncation::truncated_string_len;
use crate::value::{BytesValue, FieldValue, ObjectValue, ReferenceValue, ValueKind};

/// An ordering together with the index bytes the comparison consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizedComparison {
    pub cmp: Ordering,
    pub bytes: usize,
}

impl SizedComparison {
    fn new(cmp: Ordering, bytes: usize) -> Self {
        Self { cmp, bytes }
    }
}

impl FieldValue {
    /// Total-order comparison against the full index budget.
    pub fn compare_to(&self, other: &FieldValue) -> Ordering {
        self.compare(other, INDEX_TRUNCATION_THRESHOLD_BYTES).cmp
    }

    /// Compares two values while consuming at most `bytes_remaining` index
    /// bytes, and reports the bytes actually consumed.
    ///
    /// NaN sorts below every other number and two NaNs compare equal; `-0`
    /// and `+0` compare equal. Server-timestamp sentinels sort after every
    /// concrete timestamp. Values of different kinds order by
    /// [`TypeOrder`](crate::value::TypeOrder).
    pub fn compare(&self, other: &FieldValue, bytes_remaining: usize) -> SizedComparison {
        match (self.kind(), other.kind()) {
            (ValueKind::Null, ValueKind::Null) => {
                SizedComparison::new(Ordering::Equal, NULL_INDEX_BYTES)
            }
            (ValueKind::Boolean(left), ValueKind::Boolean(right)) => {
                SizedComparison::new(left.cmp(right), BOOLEAN_INDEX_BYTES)
            }
            (ValueKind::Integer(left), ValueKind::Integer(right)) => {
                SizedComparison::new(left.cmp(right), NUMBER_INDEX_BYTES)
            }
            (ValueKind::Integer(left), ValueKind::Double(right)) => {
                SizedComparison::new(numeric_compare(*left as f64, *right), NUMBER_INDEX_BYTES)
            }
            (ValueKind::Double(left), ValueKind::Integer(right)) => {
                SizedComparison::new(numeric_compare(*left, *right as f64), NUMBER_INDEX_BYTES)
            }
            (ValueKind::Double(left), ValueKind::Double(right)) => {
                SizedComparison::new(numeric_compare(*left, *right), NUMBER_INDEX_BYTES)
            }
            (ValueKind::Timestamp(left), ValueKind::Timestamp(right)) => {
                SizedComparison::new(left.cmp(right), TIMESTAMP_INDEX_BYTES)
            }
            (ValueKind::Timestamp(_), ValueKind::ServerTimestamp(_)) => {
                SizedComparison::new(Ordering::Less, TIMESTAMP_INDEX_BYTES)
            }
            (ValueKind::ServerTimestamp(_), ValueKind::Timestamp(_)) => {
                SizedComparison::new(Ordering::Greater, TIMESTAMP_INDEX_BYTES)
            }
            (ValueKind::ServerTimestamp(left), ValueKind::ServerTimestamp(right)) => {
                SizedComparison::new(
                    left.local_write_time().cmp(right.local_write_time()),
                    TIMESTAMP_INDEX_BYTES,
                )
            }
            (ValueKind::String(left), ValueKind::String(right)) => {
                string_compare(bytes_remaining, left, right)
            }
            (ValueKind::Bytes(left), ValueKind::Bytes(right)) => {
                blob_compare(bytes_remaining, left, right)
            }
            (ValueKind::Reference(left), ValueKind::Reference(right)) => {
                reference_compare(bytes_remaining, left, right)
            }
            (ValueKind::GeoPoint(left), ValueKind::GeoPoint(right)) => {
                SizedComparison::new(left.compare(right), GEO_POINT_INDEX_BYTES)
            }
            (ValueKind::Array(left), ValueKind::Array(right)) => {
                array_compare(bytes_remaining, left, right)
            }
            (ValueKind::Object(left), ValueKind::Object(right)) => {
                object_compare(bytes_remaining, left, right)
            }
            _ => default_compare(self, other, bytes_remaining),
        }
    }

    /// Upper bound on the bytes this value would consume in an index entry
    /// given the remaining budget. May exceed the budget by one atomic token
    /// when the value's smallest undividable unit does not fit.
    pub fn truncated_size(&self, bytes_remaining: usize) -> usize {
        match self.kind() {
            ValueKind::Null => NULL_INDEX_BYTES,
            ValueKind::Boolean(_) => BOOLEAN_INDEX_BYTES,
            ValueKind::Integer(_) | ValueKind::Double(_) => NUMBER_INDEX_BYTES,
            ValueKind::Timestamp(_) | ValueKind::ServerTimestamp(_) => TIMESTAMP_INDEX_BYTES,
            ValueKind::String(value) => string_truncated_size(value, bytes_remaining),
            ValueKind::Bytes(bytes) => bytes.len().min(bytes_remaining),
            ValueKind::Reference(reference) => reference_truncated_size(reference, bytes_remaining),
            ValueKind::GeoPoint(_) => GEO_POINT_INDEX_BYTES,
            ValueKind::Array(values) => array_truncated_size(values, bytes_remaining),
            ValueKind::Object(object) => object_truncated_size(object, bytes_remaining),
        }
    }
}

/// Domain equality. Deviates from `compare` in exactly the documented ways:
/// an integer never equals a double, `NaN` equals `NaN`, and `-0` does not
/// equal `+0`. Server-timestamp sentinels never equal concrete timestamps.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self.kind(), other.kind()) {
            (ValueKind::Null, ValueKind::Null) => true,
            (ValueKind::Boolean(left), ValueKind::Boolean(right)) => left == right,
            (ValueKind::Integer(left), ValueKind::Integer(right)) => left == right,
            (ValueKind::Double(left), ValueKind::Double(right)) => numeric_equals(*left, *right),
            (ValueKind::Timestamp(left), ValueKind::Timestamp(right)) => left == right,
            (ValueKind::ServerTimestamp(left), ValueKind::ServerTimestamp(right)) => left == right,
            (ValueKind::String(left), ValueKind::String(right)) => left == right,
            (ValueKind::Bytes(left), ValueKind::Bytes(right)) => left == right,
            (ValueKind::Reference(left), ValueKind::Reference(right)) => left == right,
            (ValueKind::GeoPoint(left), ValueKind::GeoPoint(right)) => left == right,
            (ValueKind::Array(left), ValueKind::Array(right)) => left == right,
            (ValueKind::Object(left), ValueKind::Object(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

fn numeric_compare(left: f64, right: f64) -> Ordering {
    if left.is_nan() {
        if right.is_nan() {
            Ordering::Equal
        } else {
            Ordering::Less
        }
    } else if right.is_nan() {
        Ordering::Greater
    } else if left < right {
        Ordering::Less
    } else if left > right {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

fn numeric_equals(left: f64, right: f64) -> bool {
    if left.is_nan() || right.is_nan() {
        return left.is_nan() && right.is_nan();
    }
    left == right && left.is_sign_negative() == right.is_sign_negative()
}

/// Cross-kind comparison: orders by type tag and charges the lower-typed
/// side's truncated size.
fn default_compare(
    left: &FieldValue,
    right: &FieldValue,
    bytes_remaining: usize,
) -> SizedComparison {
    let left_order = left.type_order();
    let right_order = right.type_order();
    hard_assert(
        left_order != right_order,
        "default_compare requires values of distinct kinds",
    );
    if left_order < right_order {
        SizedComparison::new(Ordering::Less, left.truncated_size(bytes_remaining))
    } else {
        SizedComparison::new(Ordering::Greater, right.truncated_size(bytes_remaining))
    }
}

/// Budgeted string comparison. One byte of overhead is reserved; both sides
/// truncate to the rest of the budget before comparing. When the truncated
/// prefixes are equal and exactly one side was cut, the cut side sorts
/// higher. The reported bytes are the lower-or-equal side's truncated length
/// plus the overhead byte.
pub(crate) fn string_compare(bytes_remaining: usize, left: &str, right: &str) -> SizedComparison {
    let threshold = bytes_remaining.saturating_sub(STRING_OVERHEAD_BYTES);
    let left_len = truncated_string_len(left, threshold);
    let right_len = truncated_string_len(right, threshold);
    let left_cut = left_len < left.len();
    let right_cut = right_len < right.len();
    let cmp = match left[..left_len].cmp(&right[..right_len]) {
        Ordering::Equal => match (left_cut, right_cut) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        },
        ordering => ordering,
    };
    let loser_len = if cmp == Ordering::Greater {
        right_len
    } else {
        left_len
    };
    SizedComparison::new(cmp, loser_len + STRING_OVERHEAD_BYTES)
}

fn string_truncated_size(value: &str, bytes_remaining: usize) -> usize {
    truncated_string_len(value, bytes_remaining.saturating_sub(STRING_OVERHEAD_BYTES))
        + STRING_OVERHEAD_BYTES
}

fn blob_compare(bytes_remaining: usize, left: &BytesValue, right: &BytesValue) -> SizedComparison {
    let cmp = left.cmp(right);
    let loser = if cmp == Ordering::Greater { right } else { left };
    SizedComparison::new(cmp, loser.len().min(bytes_remaining))
}

/// References charge a fixed 16 bytes for the database id before any path
/// bytes. The overhead is indivisible: budgets of 16 bytes or less report 16
/// consumed bytes and compare no path segments.
fn reference_compare(
    bytes_remaining: usize,
    left: &ReferenceValue,
    right: &ReferenceValue,
) -> SizedComparison {
    let database_cmp = left.database_id().cmp(right.database_id());
    if bytes_remaining <= DATABASE_ID_INDEX_BYTES {
        return SizedComparison::new(database_cmp, DATABASE_ID_INDEX_BYTES);
    }
    let path_budget = bytes_remaining - DATABASE_ID_INDEX_BYTES;
    if database_cmp != Ordering::Equal {
        let loser = if database_cmp == Ordering::Less {
            left
        } else {
            right
        };
        let loser_path = loser.key().truncated_path(path_budget);
        return SizedComparison::new(
            database_cmp,
            DATABASE_ID_INDEX_BYTES + loser_path.byte_length(),
        );
    }
    let left_path = left.key().truncated_path(path_budget);
    let right_path = right.key().truncated_path(path_budget);
    let cmp = DocumentKey::truncated_comparator(&left_path, &right_path);
    let loser_bytes = if cmp == Ordering::Greater {
        right_path.byte_length()
    } else {
        left_path.byte_length()
    };
    SizedComparison::new(cmp, DATABASE_ID_INDEX_BYTES + loser_bytes)
}

fn reference_truncated_size(reference: &ReferenceValue, bytes_remaining: usize) -> usize {
    if bytes_remaining <= DATABASE_ID_INDEX_BYTES {
        return DATABASE_ID_INDEX_BYTES;
    }
    DATABASE_ID_INDEX_BYTES
        + reference
            .key()
            .truncated_path(bytes_remaining - DATABASE_ID_INDEX_BYTES)
            .byte_length()
}

/// Element-wise comparison, then by length. On a mismatch the reported bytes
/// are the losing array's truncated size against the original budget, so the
/// caller's downstream accounting matches what that entry would cost.
fn array_compare(
    bytes_remaining: usize,
    left: &[FieldValue],
    right: &[FieldValue],
) -> SizedComparison {
    let initial = bytes_remaining as i64;
    let mut remaining = initial;
    let shared = left.len().min(right.len());
    for index in 0..shared {
        if remaining <= 0 {
            break;
        }
        let child = left[index].compare(&right[index], remaining as usize);
        remaining -= child.bytes as i64;
        if child.cmp != Ordering::Equal {
            let loser = if child.cmp == Ordering::Less {
                left
            } else {
                right
            };
            return SizedComparison::new(child.cmp, array_truncated_size(loser, bytes_remaining));
        }
    }
    SizedComparison::new(left.len().cmp(&right.len()), (initial - remaining).max(0) as usize)
}

fn array_truncated_size(values: &[FieldValue], bytes_remaining: usize) -> usize {
    let mut remaining = bytes_remaining as i64;
    let mut size = 0usize;
    for value in values {
        if remaining <= 0 {
            break;
        }
        let child = value.truncated_size(remaining as usize);
        size += child;
        remaining -= child as i64;
    }
    size
}

/// Lockstep walk in key order: each pair costs its key comparison, then its
/// value comparison. When keys differ, the lower-key side's value is charged
/// at its truncated size against the original budget. When one map runs out
/// first, the side with entries left is the greater.
fn object_compare(
    bytes_remaining: usize,
    left: &ObjectValue,
    right: &ObjectValue,
) -> SizedComparison {
    let initial = bytes_remaining as i64;
    let mut remaining = initial;
    let mut left_iter = left.iter();
    let mut right_iter = right.iter();
    let mut left_entry = left_iter.next();
    let mut right_entry = right_iter.next();
    while let (Some((left_key, left_value)), Some((right_key, right_value))) =
        (left_entry, right_entry)
    {
        if remaining < 0 {
            break;
        }
        let key_cmp = string_compare(clamp_budget(remaining), left_key, right_key);
        remaining -= key_cmp.bytes as i64;
        if key_cmp.cmp != Ordering::Equal {
            // The lower-key side's value still counts toward the entry cost,
            // sized against the original budget as with array mismatches.
            let loser_value = if key_cmp.cmp == Ordering::Less {
                left_value
            } else {
                right_value
            };
            remaining -= loser_value.truncated_size(bytes_remaining) as i64;
            return SizedComparison::new(key_cmp.cmp, (initial - remaining) as usize);
        }
        let value_cmp = left_value.compare(right_value, clamp_budget(remaining));
        remaining -= value_cmp.bytes as i64;
        if value_cmp.cmp != Ordering::Equal {
            return SizedComparison::new(value_cmp.cmp, (initial - remaining) as usize);
        }
        left_entry = left_iter.next();
        right_entry = right_iter.next();
    }
    let cmp = match (left_entry.is_some(), right_entry.is_some()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    };
    SizedComparison::new(cmp, (initial - remaining).max(0) as usize)
}

fn object_truncated_size(object: &ObjectValue, bytes_remaining: usize) -> usize {
    let mut remaining = bytes_remaining as i64;
    let mut size = 0usize;
    for (key, value) in object.iter() {
        if remaining <= 0 {
            break;
        }
        let key_size = string_truncated_size(key, clamp_budget(remaining));
        size += key_size;
        remaining -= key_size as i64;
        let value_size = value.truncated_size(clamp_budget(remaining));
        size += value_size;
        remaining -= value_size as i64;
    }
    size
}

fn clamp_budget(remaining: i64) -> usize {
    remaining.max(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_compare_places_nan_first() {
        assert_eq!(numeric_compare(f64::NAN, 1.0), Ordering::Less);
        assert_eq!(numeric_compare(1.0, f64::NAN), Ordering::Greater);
        assert_eq!(numeric_compare(f64::NAN, f64::NAN), Ordering::Equal);
        assert_eq!(numeric_compare(-0.0, 0.0), Ordering::Equal);
        assert_eq!(
            numeric_compare(f64::NEG_INFINITY, f64::INFINITY),
            Ordering::Less
        );
    }

    #[test]
    fn numeric_equals_distinguishes_zero_signs() {
        assert!(numeric_equals(f64::NAN, f64::NAN));
        assert!(!numeric_equals(-0.0, 0.0));
        assert!(numeric_equals(-0.0, -0.0));
        assert!(numeric_equals(1.5, 1.5));
        assert!(!numeric_equals(f64::NAN, 1.0));
    }

    #[test]
    fn string_compare_orders_prefixes() {
        let result = string_compare(100, "apple", "banana");
        assert_eq!(result.cmp, Ordering::Less);
        assert_eq!(result.bytes, 6);

        let result = string_compare(100, "same", "same");
        assert_eq!(result.cmp, Ordering::Equal);
        assert_eq!(result.bytes, 5);
    }

    #[test]
    fn string_compare_truncated_side_sorts_higher() {
        // Budget of 4 leaves 3 bytes of string: "abc" survives whole, the
        // longer side is cut to the same prefix.
        let result = string_compare(4, "abc", "abcdef");
        assert_eq!(result.cmp, Ordering::Less);
        assert_eq!(result.bytes, 4);

        let result = string_compare(4, "abcdef", "abc");
        assert_eq!(result.cmp, Ordering::Greater);
        assert_eq!(result.bytes, 4);
    }

    #[test]
    fn string_compare_equal_when_both_truncated() {
        let result = string_compare(4, "abcdef", "abcxyz");
        assert_eq!(result.cmp, Ordering::Equal);
        assert_eq!(result.bytes, 4);
    }

    #[test]
    fn string_compare_with_exhausted_budget() {
        let result = string_compare(0, "left", "right");
        assert_eq!(result.cmp, Ordering::Equal);
        assert_eq!(result.bytes, 1);

        let result = string_compare(1, "", "right");
        assert_eq!(result.cmp, Ordering::Less);
        assert_eq!(result.bytes, 1);
    }

    #[test]
    #[should_panic(expected = "INTERNAL ASSERT FAILED")]
    fn default_compare_rejects_same_kind() {
        default_compare(
            &FieldValue::from_integer(1),
            &FieldValue::from_double(2.0),
            100,
        );
    }
}
