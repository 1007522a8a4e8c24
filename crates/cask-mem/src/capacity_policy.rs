/// Decides the new capacity of a buffer that must hold `required` slots.
///
/// `grow` returns `None` when `required` already fits in `current` or when
/// the new capacity is not representable.
pub trait CapacityPolicy {
    fn grow(current: usize, required: usize) -> Option<usize>;
}

/// Grows by a factor of 1.5, or straight to the requirement if that is
/// larger: `max(floor(current * 1.5), required)`.
pub struct OneAndHalf {}

impl CapacityPolicy for OneAndHalf {

    #[inline]
    fn grow(current: usize, required: usize) -> Option<usize> {
        if required <= current { return None }
        let candidate = current.saturating_add(current / 2);
        Some(candidate.max(required))
    }
}

pub struct PowerOfTwo {}

impl CapacityPolicy for PowerOfTwo {

    #[inline]
    fn grow(current: usize, required: usize) -> Option<usize> {
        if required <= current { None }
        else { required.max(2).checked_next_power_of_two() }
    }
}
