//! Error types for list operations.

/// Result type alias for list operations.
pub type Result<T> = std::result::Result<T, ListError>;

/// Errors returned by mutating list operations.
///
/// Both variants are caller errors. They are returned before any state is
/// touched, so a failed call leaves focus, selection and anchor unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// An index outside `[0, length)`.
    #[error("[{user}] Invalid index {index} (length {length})")]
    InvalidIndex {
        user: String,
        index: usize,
        length: usize,
    },

    /// A splice whose start or delete count does not fit the list.
    #[error("[{user}] Invalid splice range: start {start}, delete count {delete_count} (length {length})")]
    InvalidRange {
        user: String,
        start: usize,
        delete_count: usize,
        length: usize,
    },
}

impl ListError {
    /// Create an invalid index error.
    pub fn invalid_index(user: impl Into<String>, index: usize, length: usize) -> Self {
        Self::InvalidIndex {
            user: user.into(),
            index,
            length,
        }
    }

    /// Create an invalid range error.
    pub fn invalid_range(
        user: impl Into<String>,
        start: usize,
        delete_count: usize,
        length: usize,
    ) -> Self {
        Self::InvalidRange {
            user: user.into(),
            start,
            delete_count,
            length,
        }
    }
}

/// Check that every index lies in `[0, length)`.
pub(crate) fn validate_indices(user: &str, indices: &[usize], length: usize) -> Result<()> {
    match indices.iter().find(|&&index| index >= length) {
        Some(&index) => Err(ListError::invalid_index(user, index, length)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_first_offender() {
        let err = validate_indices("explorer", &[0, 5, 7], 5).unwrap_err();
        assert_eq!(err, ListError::invalid_index("explorer", 5, 5));
        assert_eq!(err.to_string(), "[explorer] Invalid index 5 (length 5)");
    }

    #[test]
    fn test_validate_accepts_in_range() {
        assert!(validate_indices("explorer", &[0, 4], 5).is_ok());
        assert!(validate_indices("explorer", &[], 0).is_ok());
    }

    #[test]
    fn test_range_message() {
        let err = ListError::invalid_range("outline", 3, 4, 5);
        assert_eq!(
            err.to_string(),
            "[outline] Invalid splice range: start 3, delete count 4 (length 5)"
        );
    }
}
