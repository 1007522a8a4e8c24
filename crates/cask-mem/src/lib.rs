pub mod capacity_policy;
pub mod raw_buf;

mod macros;
mod errors;
mod allocator;
mod global_alloc;

pub use errors::CapacityError;
pub use allocator::Allocator;
pub use global_alloc::{GlobalAlloc, GLOBAL_ALLOC};
pub use capacity_policy::{CapacityPolicy, OneAndHalf, PowerOfTwo};
pub use raw_buf::RawBuf;
