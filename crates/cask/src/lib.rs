mod error;
mod value;
mod container;

pub use error::{ContainerError, BoundKind};
pub use value::Value;
pub use container::{Container, ObjectContainer, DEFAULT_CAPACITY, NOT_FOUND};

pub use cask_mem::{Allocator, GlobalAlloc, GLOBAL_ALLOC, CapacityPolicy, OneAndHalf, PowerOfTwo};

pub type Result<T> = core::result::Result<T, ContainerError>;
