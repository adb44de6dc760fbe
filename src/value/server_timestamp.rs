use crate::model::Timestamp;
use crate::value::FieldValue;

/// Local-view sentinel standing in for a field until the backend commits the
/// real write time.
///
/// Sorts after every concrete timestamp and among other sentinels by local
/// write time. Equality also considers only the local write time; the
/// previous value is carried solely for dematerialization.
#[derive(Clone, Debug)]
pub struct ServerTimestampValue {
    local_write_time: Timestamp,
    previous_value: Option<Box<FieldValue>>,
}

impl ServerTimestampValue {
    pub fn new(local_write_time: Timestamp, previous_value: Option<FieldValue>) -> Self {
        Self {
            local_write_time,
            previous_value: previous_value.map(Box::new),
        }
    }

    pub fn local_write_time(&self) -> &Timestamp {
        &self.local_write_time
    }

    pub fn previous_value(&self) -> Option<&FieldValue> {
        self.previous_value.as_deref()
    }
}

impl PartialEq for ServerTimestampValue {
    fn eq(&self, other: &Self) -> bool {
        self.local_write_time == other.local_write_time
    }
}

impl Eq for ServerTimestampValue {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_previous_value() {
        let time = Timestamp::new(10, 0);
        let bare = ServerTimestampValue::new(time, None);
        let with_previous =
            ServerTimestampValue::new(time, Some(FieldValue::from_integer(7)));
        assert_eq!(bare, with_previous);
    }

    #[test]
    fn exposes_previous_value() {
        let sentinel =
            ServerTimestampValue::new(Timestamp::new(1, 0), Some(FieldValue::from_bool(true)));
        assert_eq!(sentinel.previous_value(), Some(&FieldValue::from_bool(true)));
    }
}
