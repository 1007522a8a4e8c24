use core::fmt::{self, Display, Formatter};

/// Which bound an index was validated against.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoundKind {
    /// `0 <= index < len`, used by reads and removals.
    Access,
    /// `0 <= index <= len`, used by insertion.
    Insert,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContainerError {
    InvalidCapacity {
        value: isize,
    },
    IndexOutOfRange {
        index: isize,
        bound_kind: BoundKind,
        bound: usize,
    },
}

impl Display for ContainerError {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity { value } => {
                write!(f, "initial capacity must be a positive number: {}", value)
            },
            Self::IndexOutOfRange { index, bound_kind: BoundKind::Access, bound } => {
                write!(f, "index out of range: {}, container size: {}", index, bound)
            },
            Self::IndexOutOfRange { index, bound_kind: BoundKind::Insert, bound } => {
                write!(f, "invalid index for insertion: {}, valid range: 0 - {}", index, bound)
            },
        }
    }
}

impl core::error::Error for ContainerError {}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = ContainerError::InvalidCapacity { value: -3 };
        assert_eq!(err.to_string(), "initial capacity must be a positive number: -3");

        let err = ContainerError::IndexOutOfRange {
            index: 5, bound_kind: BoundKind::Access, bound: 2,
        };
        assert_eq!(err.to_string(), "index out of range: 5, container size: 2");

        let err = ContainerError::IndexOutOfRange {
            index: -1, bound_kind: BoundKind::Insert, bound: 0,
        };
        assert_eq!(err.to_string(), "invalid index for insertion: -1, valid range: 0 - 0");
    }
}
