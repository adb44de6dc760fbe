use crate::util::assert::assertion_error;

/// How server-timestamp sentinels resolve during dematerialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ServerTimestampBehavior {
    /// Pending server timestamps read as null.
    #[default]
    None,
    /// Pending server timestamps read as the local write time.
    Estimate,
    /// Pending server timestamps read as the previous committed value.
    Previous,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldValueOptions {
    pub server_timestamps: ServerTimestampBehavior,
}

impl FieldValueOptions {
    pub fn new(server_timestamps: ServerTimestampBehavior) -> Self {
        Self { server_timestamps }
    }

    /// Resolves the `serverTimestamps` snapshot option string. The strings
    /// are fixed by the snapshot API, so an unrecognized one is a programmer
    /// error and raises an assertion.
    pub fn from_snapshot_options(server_timestamps: &str) -> Self {
        let behavior = match server_timestamps {
            "none" => ServerTimestampBehavior::None,
            "estimate" => ServerTimestampBehavior::Estimate,
            "previous" => ServerTimestampBehavior::Previous,
            other => panic!(
                "{}",
                assertion_error(format!("Invalid serverTimestamps option: {other}"))
            ),
        };
        Self::new(behavior)
    }
}
