use core::{
    fmt::{self, Debug, Display, Formatter},
    marker::PhantomData,
    ops::Index,
};

use cask_mem::{
    Allocator,
    CapacityError,
    CapacityPolicy,
    GlobalAlloc,
    GLOBAL_ALLOC,
    OneAndHalf,
    RawBuf,
};

use cask_log::{debug, trace};

use crate::{
    error::{BoundKind, ContainerError},
    value::Value,
    Result,
};

pub const DEFAULT_CAPACITY: usize = 10;

/// Returned by [`Container::find_index`] when no element matches.
pub const NOT_FOUND: isize = -1;

/// Growable, order preserving sequence backed by one exclusively owned
/// buffer.
///
/// Slots `[0, len)` hold the live elements, slots `[len, capacity)` are
/// unused. Capacity never shrinks. When an append or insert does not fit,
/// `CapacityPol` picks the new capacity (`OneAndHalf` by default:
/// `max(floor(capacity * 1.5), required)`) and the live elements are moved
/// over in order.
///
/// Indices and capacities are taken as `isize` so that negative arguments are
/// reported through [`ContainerError`] like any other out of range value.
/// Every failing call returns before touching the container.
///
/// Mutation goes through `&mut self`. Sharing one container between threads
/// requires the caller to provide synchronization, e.g. a `Mutex`.
pub struct Container<'alloc, T, Alloc = GlobalAlloc, CapacityPol = OneAndHalf>
    where
        Alloc: Allocator,
        CapacityPol: CapacityPolicy,
{
    buf: RawBuf<'alloc, T, Alloc>,
    len: usize,
    _markers: PhantomData<(T, CapacityPol)>,
}

/// Container of dynamically typed [`Value`]s.
pub type ObjectContainer = Container<'static, Value>;

impl<T> Container<'static, T> {

    /// Creates a container with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        match Self::with_capacity_in(DEFAULT_CAPACITY as isize, &GLOBAL_ALLOC) {
            Ok(container) => container,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn with_capacity(initial_capacity: isize) -> Result<Self> {
        Self::with_capacity_in(initial_capacity, &GLOBAL_ALLOC)
    }
}

impl<T> Default for Container<'static, T> {

    fn default() -> Self {
        Self::new()
    }
}

impl<'alloc, T, Alloc, CapacityPol> Container<'alloc, T, Alloc, CapacityPol>
    where
        Alloc: Allocator,
        CapacityPol: CapacityPolicy,
{

    /// Fails with [`ContainerError::InvalidCapacity`] unless
    /// `initial_capacity > 0`.
    pub fn with_capacity_in(initial_capacity: isize, alloc: &'alloc Alloc) -> Result<Self> {
        if initial_capacity <= 0 {
            debug!("rejected initial capacity {}", initial_capacity);
            return Err(ContainerError::InvalidCapacity { value: initial_capacity })
        }
        let buf = match RawBuf::with_capacity(initial_capacity as usize, alloc) {
            Ok(buf) => buf,
            Err(err) => panic!("{}", err),
        };
        Ok(Self {
            buf,
            len: 0,
            _markers: PhantomData,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Appends `value` after the last element. Always returns `true`.
    pub fn append(&mut self, value: T) -> bool {
        self.ensure_capacity(self.len + 1);
        unsafe { self.buf.write(self.len, value) };
        self.len += 1;
        true
    }

    /// Inserts `value` at `index`, moving the elements at `index..` one
    /// position up. `index == len` appends.
    pub fn insert(&mut self, index: isize, value: T) -> Result<()> {
        let index = self.check_insert_index(index)?;
        self.ensure_capacity(self.len + 1);
        unsafe {
            self.buf.shift_up(index, self.len);
            self.buf.write(index, value);
        }
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, index: isize) -> Result<&T> {
        let index = self.check_index(index)?;
        Ok(unsafe { self.buf.get(index) })
    }

    /// Removes and returns the element at `index`, moving the elements after
    /// it one position down.
    pub fn remove_at(&mut self, index: isize) -> Result<T> {
        let index = self.check_index(index)?;
        let removed = unsafe { self.buf.read(index) };
        unsafe { self.buf.shift_down(index, self.len) };
        self.len -= 1;
        Ok(removed)
    }

    /// Removes the first element equal to `value`. Returns `false` and leaves
    /// the container untouched when there is none.
    pub fn remove_value<Q>(&mut self, value: &Q) -> bool
        where
            Q: ?Sized,
            T: PartialEq<Q>,
    {
        match self.position(value) {
            Some(index) => {
                unsafe {
                    self.buf.read(index);
                    self.buf.shift_down(index, self.len);
                }
                self.len -= 1;
                true
            },
            None => false,
        }
    }

    #[inline(always)]
    pub fn contains<Q>(&self, value: &Q) -> bool
        where
            Q: ?Sized,
            T: PartialEq<Q>,
    {
        self.find_index(value) != NOT_FOUND
    }

    /// Index of the first element equal to `value`, or [`NOT_FOUND`].
    pub fn find_index<Q>(&self, value: &Q) -> isize
        where
            Q: ?Sized,
            T: PartialEq<Q>,
    {
        self.position(value)
            .map_or(NOT_FOUND, |index| index as isize)
    }

    pub fn position<Q>(&self, value: &Q) -> Option<usize>
        where
            Q: ?Sized,
            T: PartialEq<Q>,
    {
        (0..self.len).find(|&i| {
            let elem = unsafe { self.buf.get(i) };
            elem == value
        })
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) {
        let len = self.len;
        // reset first, a panicking destructor must not lead to a double drop
        self.len = 0;
        unsafe { self.buf.drop_in_place(len) };
    }

    /// Copies the live elements into a new, independent `Vec`.
    pub fn to_vec(&self) -> Vec<T>
        where
            T: Clone,
    {
        let mut snapshot = Vec::with_capacity(self.len);
        for i in 0..self.len {
            snapshot.push(unsafe { self.buf.get(i) }.clone());
        }
        snapshot
    }

    /// Panics with [`CapacityError::CapacityOverflow`] when the policy cannot
    /// produce a capacity of at least `min_capacity`.
    fn ensure_capacity(&mut self, min_capacity: usize) {
        let current = self.buf.capacity();
        if min_capacity <= current {
            return
        }
        let new_capacity = match CapacityPol::grow(current, min_capacity) {
            Some(new_capacity) if new_capacity >= min_capacity => new_capacity,
            _ => panic!("{}", CapacityError::CapacityOverflow),
        };
        trace!("growing container from {} to {} slots", current, new_capacity);
        if let Err(err) = unsafe { self.buf.reallocate(new_capacity, self.len) } {
            panic!("{}", err)
        }
    }

    fn check_index(&self, index: isize) -> Result<usize> {
        if index < 0 || index as usize >= self.len {
            return Err(ContainerError::IndexOutOfRange {
                index, bound_kind: BoundKind::Access, bound: self.len,
            })
        }
        Ok(index as usize)
    }

    fn check_insert_index(&self, index: isize) -> Result<usize> {
        if index < 0 || index as usize > self.len {
            return Err(ContainerError::IndexOutOfRange {
                index, bound_kind: BoundKind::Insert, bound: self.len,
            })
        }
        Ok(index as usize)
    }
}

impl<'alloc, T, Alloc, CapacityPol> Drop for Container<'alloc, T, Alloc, CapacityPol>
    where
        Alloc: Allocator,
        CapacityPol: CapacityPolicy,
{

    fn drop(&mut self) {
        self.clear()
    }
}

impl<'alloc, T, Alloc, CapacityPol> Index<usize> for Container<'alloc, T, Alloc, CapacityPol>
    where
        Alloc: Allocator,
        CapacityPol: CapacityPolicy,
{

    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.buf.get(index) }
    }
}

impl<'alloc, T, Alloc, CapacityPol> Display for Container<'alloc, T, Alloc, CapacityPol>
    where
        T: Display,
        Alloc: Allocator,
        CapacityPol: CapacityPolicy,
{

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.len {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", unsafe { self.buf.get(i) })?;
        }
        f.write_str("]")
    }
}

impl<'alloc, T, Alloc, CapacityPol> Debug for Container<'alloc, T, Alloc, CapacityPol>
    where
        T: Debug,
        Alloc: Allocator,
        CapacityPol: CapacityPolicy,
{

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len).map(|i| unsafe { self.buf.get(i) }))
            .finish()
    }
}

unsafe impl<'alloc, T, Alloc, CapacityPol> Send for Container<'alloc, T, Alloc, CapacityPol>
    where
        T: Send,
        Alloc: Allocator + Sync,
        CapacityPol: CapacityPolicy,
{}

unsafe impl<'alloc, T, Alloc, CapacityPol> Sync for Container<'alloc, T, Alloc, CapacityPol>
    where
        T: Sync,
        Alloc: Allocator + Sync,
        CapacityPol: CapacityPolicy,
{}
