use core::{
    ptr::NonNull,
    mem,
};

/// Raw memory source for [`RawBuf`](crate::RawBuf).
///
/// Implementations return `None` on failure and for zero-sized requests.
pub trait Allocator {

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>>;

    unsafe fn allocate_uninit<T>(&self, count: usize) -> Option<NonNull<T>> {
        let size = mem::size_of::<T>().checked_mul(count)?;
        let align = mem::align_of::<T>();
        unsafe { self.allocate_raw(size, align).map(|ptr| ptr.cast::<T>()) }
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize);

    /// # Safety
    /// `ptr` must come from [`allocate_uninit`](Self::allocate_uninit) on
    /// this allocator with the same `count`, so the size cannot overflow.
    unsafe fn free_uninit<T>(&self, ptr: NonNull<T>, count: usize) {
        let Some(size) = mem::size_of::<T>().checked_mul(count) else {
            return
        };
        let align = mem::align_of::<T>();
        unsafe { self.free_raw(ptr.cast::<u8>(), size, align) }
    }
}

#[cfg(test)]
mod tests {

    use core::cell::Cell;

    use super::*;
    use crate::GLOBAL_ALLOC;

    struct SizeLog {
        allocated: Cell<Option<usize>>,
        freed: Cell<Option<usize>>,
    }

    impl Allocator for SizeLog {

        unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
            self.allocated.set(Some(size));
            unsafe { GLOBAL_ALLOC.allocate_raw(size, align) }
        }

        unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize) {
            self.freed.set(Some(size));
            unsafe { GLOBAL_ALLOC.free_raw(ptr, size, align) }
        }
    }

    fn size_log() -> SizeLog {
        SizeLog { allocated: Cell::new(None), freed: Cell::new(None) }
    }

    #[test]
    fn typed_sizes_scale_with_count() {
        let alloc = size_log();
        unsafe {
            let ptr = alloc.allocate_uninit::<u32>(6).unwrap();
            assert_eq!(alloc.allocated.get(), Some(24));
            alloc.free_uninit(ptr, 6);
        }
        assert_eq!(alloc.freed.get(), Some(24));
    }

    #[test]
    fn overflowing_counts_never_reach_the_allocator() {
        let alloc = size_log();
        unsafe {
            assert!(alloc.allocate_uninit::<u64>(usize::MAX).is_none());
            alloc.free_uninit(NonNull::<u64>::dangling(), usize::MAX);
        }
        assert_eq!(alloc.allocated.get(), None);
        assert_eq!(alloc.freed.get(), None);
    }
}
