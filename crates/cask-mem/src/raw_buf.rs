use core::{
    marker::PhantomData,
    mem::size_of,
    ptr::NonNull,
};

use crate::{
    allocator::Allocator,
    errors::CapacityError,
    global_alloc::GlobalAlloc,
    const_assert,
};

use CapacityError::{InvalidReservation, AllocFailed, CapacityOverflow};

const_assert!(
    size_of::<Option<RawBuf<'static, u64, GlobalAlloc>>>() ==
    size_of::<RawBuf<'static, u64, GlobalAlloc>>()
);

/// Fixed-length run of uninitialised slots.
///
/// `RawBuf` owns the memory but never the elements: callers track which slots
/// are live and drop them before the buffer goes away. Every slot accessor is
/// `unsafe` for that reason.
pub struct RawBuf<'alloc, T, Alloc: Allocator> {
    data: NonNull<T>,
    capacity: usize,
    alloc: &'alloc Alloc,
    _marker: PhantomData<T>,
}

impl<'alloc, T, Alloc: Allocator> RawBuf<'alloc, T, Alloc> {

    const IS_ZST: bool = size_of::<T>() == 0;

    pub fn with_capacity(
        capacity: usize,
        alloc: &'alloc Alloc,
    ) -> Result<Self, CapacityError>
    {
        if capacity == 0 {
            return Err(InvalidReservation {
                current: 0, requested: 0,
            })
        }
        Self::check_size(capacity)?;
        let data =
            if Self::IS_ZST {
                NonNull::dangling()
            }
            else {
                unsafe { alloc
                    .allocate_uninit(capacity)
                    .ok_or(AllocFailed { new_capacity: capacity })?
                }
            };
        Ok(Self {
            data,
            capacity,
            alloc,
            _marker: PhantomData,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Moves the first `len` slots into a fresh allocation of `new_capacity`
    /// slots and frees the old one.
    ///
    /// # Safety
    /// Slots `[0, len)` must be initialised and `len <= self.capacity()`.
    pub unsafe fn reallocate(
        &mut self,
        new_capacity: usize,
        len: usize,
    ) -> Result<(), CapacityError>
    {
        if new_capacity <= self.capacity {
            return Err(InvalidReservation {
                current: self.capacity, requested: new_capacity,
            })
        }
        debug_assert!(len <= self.capacity);
        Self::check_size(new_capacity)?;
        if Self::IS_ZST {
            self.capacity = new_capacity;
            return Ok(())
        }
        let tmp = unsafe { self.alloc
            .allocate_uninit::<T>(new_capacity)
            .ok_or(AllocFailed { new_capacity })?
        };
        unsafe {
            self.data.copy_to_nonoverlapping(tmp, len);
            self.alloc.free_uninit(self.data, self.capacity);
        }
        self.data = tmp;
        self.capacity = new_capacity;
        Ok(())
    }

    #[inline(always)]
    fn check_size(capacity: usize) -> Result<(), CapacityError> {
        match size_of::<T>().checked_mul(capacity) {
            Some(size) if size <= isize::MAX as usize => Ok(()),
            _ => Err(CapacityOverflow),
        }
    }

    /// # Safety
    /// `index < self.capacity()` and the slot must not hold a live value.
    #[inline(always)]
    pub unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.capacity);
        unsafe { self.data.add(index).write(value) }
    }

    /// Moves the value out, leaving the slot unused.
    ///
    /// # Safety
    /// The slot at `index` must be live.
    #[inline(always)]
    pub unsafe fn read(&mut self, index: usize) -> T {
        debug_assert!(index < self.capacity);
        unsafe { self.data.add(index).read() }
    }

    /// # Safety
    /// The slot at `index` must be live.
    #[inline(always)]
    pub unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index < self.capacity);
        unsafe { self.data.add(index).as_ref() }
    }

    /// Opens a hole at `index` by moving `[index, len)` one slot up,
    /// highest slot first.
    ///
    /// # Safety
    /// Slots `[index, len)` must be live and `len < self.capacity()`.
    pub unsafe fn shift_up(&mut self, index: usize, len: usize) {
        debug_assert!(index <= len && len < self.capacity);
        unsafe {
            for i in (index + 1..=len).rev() {
                self.data.add(i).write(self.data.add(i - 1).read());
            }
        }
    }

    /// Closes the hole at `index` by moving `[index + 1, len)` one slot down,
    /// lowest slot first. Slot `len - 1` is unused afterwards.
    ///
    /// # Safety
    /// The slot at `index` must already be vacated and `[index + 1, len)` live.
    pub unsafe fn shift_down(&mut self, index: usize, len: usize) {
        debug_assert!(index < len && len <= self.capacity);
        unsafe {
            for i in index..len - 1 {
                self.data.add(i).write(self.data.add(i + 1).read());
            }
        }
    }

    /// Drops the values in `[0, len)`, leaving every slot unused.
    ///
    /// # Safety
    /// Slots `[0, len)` must be live.
    pub unsafe fn drop_in_place(&mut self, len: usize) {
        debug_assert!(len <= self.capacity);
        if core::mem::needs_drop::<T>() {
            unsafe {
                for i in 0..len {
                    self.data.add(i).drop_in_place();
                }
            }
        }
    }
}

impl<'alloc, T, Alloc: Allocator> Drop for RawBuf<'alloc, T, Alloc> {

    fn drop(&mut self) {
        if Self::IS_ZST { return }
        unsafe { self.alloc.free_uninit(self.data, self.capacity) }
    }
}

#[cfg(test)]
mod tests {

    use core::cell::Cell;

    use super::*;
    use crate::GLOBAL_ALLOC;

    struct CountingAlloc {
        live: Cell<isize>,
    }

    impl Allocator for CountingAlloc {

        unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
            let ptr = unsafe { GLOBAL_ALLOC.allocate_raw(size, align)? };
            self.live.set(self.live.get() + 1);
            Some(ptr)
        }

        unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize) {
            self.live.set(self.live.get() - 1);
            unsafe { GLOBAL_ALLOC.free_raw(ptr, size, align) }
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let res = RawBuf::<u32, _>::with_capacity(0, &GLOBAL_ALLOC);
        assert!(matches!(res, Err(InvalidReservation { current: 0, requested: 0 })));
    }

    #[test]
    fn oversized_requests_overflow() {
        let res = RawBuf::<u64, _>::with_capacity(usize::MAX / 4, &GLOBAL_ALLOC);
        assert!(matches!(res, Err(CapacityOverflow)));

        let mut buf = RawBuf::<u32, _>::with_capacity(1, &GLOBAL_ALLOC).unwrap();
        let res = unsafe { buf.reallocate(usize::MAX / 2, 0) };
        assert_eq!(res, Err(CapacityOverflow));
        assert_eq!(buf.capacity(), 1);
    }

    #[test]
    fn reallocate_keeps_prefix() {
        let mut buf = RawBuf::<u64, _>::with_capacity(3, &GLOBAL_ALLOC).unwrap();
        unsafe {
            for i in 0..3 {
                buf.write(i, i as u64 * 10);
            }
            buf.reallocate(4, 3).unwrap();
            assert_eq!(buf.capacity(), 4);
            assert_eq!(*buf.get(0), 0);
            assert_eq!(*buf.get(1), 10);
            assert_eq!(*buf.get(2), 20);
        }
    }

    #[test]
    fn reallocate_must_grow() {
        let mut buf = RawBuf::<u8, _>::with_capacity(4, &GLOBAL_ALLOC).unwrap();
        let res = unsafe { buf.reallocate(4, 0) };
        assert_eq!(res, Err(InvalidReservation { current: 4, requested: 4 }));
    }

    #[test]
    fn shifts_preserve_order() {
        let mut buf = RawBuf::<char, _>::with_capacity(4, &GLOBAL_ALLOC).unwrap();
        unsafe {
            buf.write(0, 'a');
            buf.write(1, 'b');
            buf.write(2, 'c');
            buf.shift_up(1, 3);
            buf.write(1, 'x');
            let got: Vec<char> = (0..4).map(|i| *buf.get(i)).collect();
            assert_eq!(got, ['a', 'x', 'b', 'c']);

            assert_eq!(buf.read(0), 'a');
            buf.shift_down(0, 4);
            let got: Vec<char> = (0..3).map(|i| *buf.get(i)).collect();
            assert_eq!(got, ['x', 'b', 'c']);
        }
    }

    #[test]
    fn every_allocation_is_freed() {
        let alloc = CountingAlloc { live: Cell::new(0) };
        {
            let mut buf = RawBuf::<String, _>::with_capacity(2, &alloc).unwrap();
            assert_eq!(alloc.live.get(), 1);
            unsafe {
                buf.write(0, "first".to_string());
                buf.reallocate(3, 1).unwrap();
                assert_eq!(alloc.live.get(), 1);
                assert_eq!(buf.get(0), "first");
                buf.drop_in_place(1);
            }
        }
        assert_eq!(alloc.live.get(), 0);
    }

    #[test]
    fn zero_sized_slots_skip_the_allocator() {
        let alloc = CountingAlloc { live: Cell::new(0) };
        let mut buf = RawBuf::<(), _>::with_capacity(2, &alloc).unwrap();
        unsafe { buf.reallocate(5, 0).unwrap() };
        assert_eq!(buf.capacity(), 5);
        assert_eq!(alloc.live.get(), 0);
    }
}
