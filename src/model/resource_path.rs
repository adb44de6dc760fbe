use std::fmt::{Display, Formatter};
use std::ops::Deref;

use crate::constants::SEGMENT_OVERHEAD_BYTES;
use crate::error::{invalid_argument, FirestoreResult};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments.into_iter().map(Into::into).collect();
        Self::new(segments)
    }

    pub fn from_string(path: &str) -> FirestoreResult<Self> {
        if path.trim().is_empty() {
            return Ok(Self::root());
        }

        if path.contains("//") {
            return Err(invalid_argument("Found empty segment in resource path"));
        }

        Ok(Self::from_segments(
            path.split('/')
                .filter(|segment| !segment.is_empty())
                .map(|segment| segment.to_string()),
        ))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(|s| s.as_str())
    }

    pub fn child<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut new_segments = self.segments.clone();
        new_segments.extend(segments.into_iter().map(Into::into));
        Self::new(new_segments)
    }

    pub fn without_last(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self::new(segments)
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    pub fn as_vec(&self) -> &Vec<String> {
        &self.segments
    }

    pub fn canonical_string(&self) -> String {
        self.segments.join("/")
    }

    /// Shortens the path to fit `budget` bytes, cutting at segment boundaries
    /// only. Each retained segment costs its UTF-8 length plus one byte of
    /// separator overhead.
    pub fn truncated_path(&self, budget: usize) -> TruncatedPath {
        let mut byte_length = 0;
        let mut taken = 0;
        for segment in &self.segments {
            let cost = segment.len() + SEGMENT_OVERHEAD_BYTES;
            if byte_length + cost > budget {
                break;
            }
            byte_length += cost;
            taken += 1;
        }
        TruncatedPath {
            segments: self.segments[..taken].to_vec(),
            byte_length,
            truncated: taken < self.segments.len(),
        }
    }
}

impl Display for ResourcePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}

impl Deref for ResourcePath {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.segments
    }
}

/// A resource path shortened to fit a byte budget at segment boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruncatedPath {
    segments: Vec<String>,
    byte_length: usize,
    truncated: bool,
}

impl TruncatedPath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Bytes the retained segments consume in an index entry.
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// True when segments were dropped to satisfy the budget.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_render_path() {
        let path = ResourcePath::from_string("cities/sf/neighborhoods/downtown").unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.segment(0), Some("cities"));
        assert_eq!(path.last_segment(), Some("downtown"));
        assert_eq!(path.canonical_string(), "cities/sf/neighborhoods/downtown");
    }

    #[test]
    fn creates_child_paths() {
        let base = ResourcePath::from_string("cities").unwrap();
        let child = base.child(["sf"]);
        assert_eq!(child.canonical_string(), "cities/sf");
        assert_eq!(base.canonical_string(), "cities");
        assert_eq!(child.without_last(), base);
    }

    #[test]
    fn handles_root_path() {
        let path = ResourcePath::from_string("").unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn rejects_empty_segments() {
        let err = ResourcePath::from_string("cities//sf").unwrap_err();
        assert_eq!(err.code_str(), "firestore/invalid-argument");
    }

    #[test]
    fn truncates_at_segment_boundaries() {
        let path = ResourcePath::from_string("ab/cd/ef").unwrap();

        let whole = path.truncated_path(100);
        assert_eq!(whole.segments().len(), 3);
        assert_eq!(whole.byte_length(), 9);
        assert!(!whole.is_truncated());

        let partial = path.truncated_path(7);
        assert_eq!(partial.segments(), &["ab".to_string(), "cd".to_string()]);
        assert_eq!(partial.byte_length(), 6);
        assert!(partial.is_truncated());

        let empty = path.truncated_path(2);
        assert!(empty.segments().is_empty());
        assert_eq!(empty.byte_length(), 0);
        assert!(empty.is_truncated());
    }
}
