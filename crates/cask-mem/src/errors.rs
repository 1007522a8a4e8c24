#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CapacityError {
    InvalidReservation {
        current: usize,
        requested: usize,
    },
    AllocFailed {
        new_capacity: usize,
    },
    CapacityOverflow,
}

impl core::fmt::Display for CapacityError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidReservation { current, requested } => {
                write!(f, "invalid reservation of {} with current capacity {}", requested, current)
            },
            Self::AllocFailed { new_capacity } => {
                write!(f, "allocation failed with new capacity {}", new_capacity)
            },
            Self::CapacityOverflow => {
                write!(f, "capacity overflow")
            },
        }
    }
}

impl core::error::Error for CapacityError {}
