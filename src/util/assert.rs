/// Panic with an internal assertion message when the condition is false.
///
/// Reserved for programmer errors: conditions that callers can never trigger
/// through valid API use.
pub fn hard_assert(condition: bool, message: impl AsRef<str>) {
    if !condition {
        panic!("{}", assertion_error(message));
    }
}

/// Build the string used when raising internal assertion errors.
pub fn assertion_error(message: impl AsRef<str>) -> String {
    format!("Firestore INTERNAL ASSERT FAILED: {}", message.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "INTERNAL ASSERT FAILED")]
    fn hard_assert_panics_on_false() {
        hard_assert(false, "should panic");
    }

    #[test]
    fn assertion_error_formats_message() {
        let err = assertion_error("boom");
        assert!(err.contains("Firestore"));
        assert!(err.contains("boom"));
    }
}
