use thiserror::Error;

/// Minimum length of a trimmed task text, in UTF-16 code units.
pub const MIN_TASK_CHARS: usize = 3;

/// Rejected task input. The message is meant to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task must be at least 3 characters!")]
    TooShort,
}

/// A position that does not address an element of the current sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("position {position} is out of bounds for {len} task(s)")]
pub struct IndexError {
    pub position: usize,
    pub len: usize,
}

impl IndexError {
    pub(crate) fn check(position: usize, len: usize) -> Result<(), Self> {
        if position < len {
            Ok(())
        } else {
            Err(Self { position, len })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_user_facing() {
        assert_eq!(
            ValidationError::TooShort.to_string(),
            "Task must be at least 3 characters!"
        );
    }

    #[test]
    fn index_check_accepts_only_existing_positions() {
        assert!(IndexError::check(0, 1).is_ok());
        assert_eq!(
            IndexError::check(1, 1),
            Err(IndexError {
                position: 1,
                len: 1
            })
        );
        assert!(IndexError::check(0, 0).is_err());
    }
}
