use std::cmp::Ordering;

use crate::error::{invalid_argument, FirestoreResult};
use crate::model::resource_path::{ResourcePath, TruncatedPath};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    path: ResourcePath,
}

impl DocumentKey {
    pub fn from_path(path: ResourcePath) -> FirestoreResult<Self> {
        if path.len() < 2 || path.len() % 2 != 0 {
            return Err(invalid_argument(
                "Document keys must point to a document (even number of segments)",
            ));
        }
        Ok(Self { path })
    }

    pub fn from_string(path: &str) -> FirestoreResult<Self> {
        let resource = ResourcePath::from_string(path)?;
        Self::from_path(resource)
    }

    pub fn collection_path(&self) -> ResourcePath {
        self.path.without_last()
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    pub fn id(&self) -> &str {
        self.path
            .last_segment()
            .expect("DocumentKey path always has id")
    }

    /// The key's path shortened to fit `budget` bytes at segment boundaries.
    pub fn truncated_path(&self, budget: usize) -> TruncatedPath {
        self.path.truncated_path(budget)
    }

    /// Compares two budget-truncated paths. Segment-wise order decides; when
    /// the retained segments are equal, a truncated path sorts after an
    /// untruncated one, matching string truncation semantics.
    pub fn truncated_comparator(left: &TruncatedPath, right: &TruncatedPath) -> Ordering {
        match left.segments().cmp(right.segments()) {
            Ordering::Equal => match (left.is_truncated(), right.is_truncated()) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => Ordering::Equal,
            },
            ordering => ordering,
        }
    }
}

impl Ord for DocumentKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.as_vec().cmp(other.path.as_vec())
    }
}

impl PartialOrd for DocumentKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_even_segments() {
        let err = DocumentKey::from_string("cities").unwrap_err();
        assert_eq!(err.code_str(), "firestore/invalid-argument");
    }

    #[test]
    fn parses_valid_path() {
        let key = DocumentKey::from_string("cities/sf").unwrap();
        assert_eq!(key.id(), "sf");
        assert_eq!(key.collection_path().canonical_string(), "cities");
    }

    #[test]
    fn truncated_comparator_orders_by_segments() {
        let a = DocumentKey::from_string("cities/la").unwrap();
        let b = DocumentKey::from_string("cities/sf").unwrap();
        let cmp = DocumentKey::truncated_comparator(
            &a.truncated_path(100),
            &b.truncated_path(100),
        );
        assert_eq!(cmp, Ordering::Less);
    }

    #[test]
    fn truncated_side_sorts_higher_on_equal_prefix() {
        let short = DocumentKey::from_string("cities/sf").unwrap();
        let long = DocumentKey::from_string("cities/sf/neighborhoods/soma").unwrap();

        // Budget keeps only the shared prefix of the longer path.
        let left = short.truncated_path(10);
        let right = long.truncated_path(10);
        assert_eq!(left.segments(), right.segments());
        assert_eq!(
            DocumentKey::truncated_comparator(&left, &right),
            Ordering::Less
        );
        assert_eq!(
            DocumentKey::truncated_comparator(&right, &left),
            Ordering::Greater
        );
    }
}
