use std::alloc::{Layout, alloc, dealloc};

use core::ptr::NonNull;

use crate::Allocator;

pub struct GlobalAlloc;

pub static GLOBAL_ALLOC: GlobalAlloc = GlobalAlloc;

impl Allocator for GlobalAlloc {

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let layout = Layout::from_size_align(size, align).ok()?;
        if layout.size() == 0 {
            return None
        }
        NonNull::new(unsafe { alloc(layout) })
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        let layout = match Layout::from_size_align(size, align) {
            Ok(l) => l,
            Err(_) => return,
        };
        if layout.size() == 0 {
            return
        }
        unsafe { dealloc(ptr.as_ptr(), layout) }
    }
}
