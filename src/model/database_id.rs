use std::cmp::Ordering;

use crate::constants::DEFAULT_DATABASE_ID;

/// Identifies a Firestore database: `(project_id, database)`.
///
/// Orders by project then database name, matching the backend's index layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatabaseId {
    project_id: String,
    database: String,
}

impl DatabaseId {
    pub fn new(project_id: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: database.into(),
        }
    }

    pub fn default_database(project_id: impl Into<String>) -> Self {
        Self::new(project_id, DEFAULT_DATABASE_ID)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Ord for DatabaseId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.project_id
            .cmp(&other.project_id)
            .then_with(|| self.database.cmp(&other.database))
    }
}

impl PartialOrd for DatabaseId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_database_name() {
        let id = DatabaseId::default_database("project");
        assert_eq!(id.project_id(), "project");
        assert_eq!(id.database(), DEFAULT_DATABASE_ID);
    }

    #[test]
    fn orders_project_before_database() {
        let a = DatabaseId::new("alpha", "z");
        let b = DatabaseId::new("beta", "a");
        assert!(a < b);

        let c = DatabaseId::new("alpha", "a");
        assert!(c < a);
        assert_eq!(c.cmp(&c), Ordering::Equal);
    }
}
