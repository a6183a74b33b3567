use crate::raw::{self, RawBuffer};
use crate::VectorError;
use std::fmt;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

/// Contiguous, growable array that owns a single heap buffer.
///
/// `len` values live at the front of a block of `capacity` slots. The block exists
/// exactly when `capacity() > 0`. Appends grow the capacity 0 -> 1 -> 2 -> 4 -> ...,
/// every other capacity change is requested explicitly.
///
/// All operations leave the container valid when a panic unwinds out of them
/// (`Default`, `Clone` or an iterator giving up half way), and constructors never
/// hand out a partially built value.
pub struct Vector<T> {
    buf: RawBuffer<T>,
    len: usize,
}

impl<T> Vector<T> {
    /// Empty vector. Does not allocate.
    pub const fn new() -> Vector<T> {
        Vector {
            buf: RawBuffer::empty(),
            len: 0,
        }
    }

    /// Empty vector with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Vector<T> {
        Vector {
            buf: RawBuffer::allocate(capacity),
            len: 0,
        }
    }

    /// `len` default values in exactly `len` slots.
    pub fn with_len(len: usize) -> Vector<T>
    where
        T: Default,
    {
        let mut vector = Vector::with_capacity(len);
        vector.resize_with(len, T::default);
        vector
    }

    /// `len` copies of `value` in exactly `len` slots. The last slot receives `value`
    /// itself.
    pub fn from_elem(len: usize, value: T) -> Vector<T>
    where
        T: Clone,
    {
        let mut vector = Vector::with_capacity(len);
        vector.resize_with_value(len, value);
        vector
    }

    /// Copies the items of an iterator of known length, in order, into exactly that
    /// many slots.
    ///
    /// An iterator that ends early leaves a shorter vector; items beyond the reported
    /// length are not consumed.
    pub fn from_exact_iter<I>(items: I) -> Vector<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let len = items.len();
        let mut vector = Vector::with_capacity(len);
        for item in items.take(len) {
            // SAFETY: at most `len` items are written into `len` slots.
            unsafe { vector.push_unchecked(item) };
        }
        vector
    }

    pub fn from_slice(items: &[T]) -> Vector<T>
    where
        T: Clone,
    {
        Vector::from_exact_iter(items.iter().cloned())
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ensures `capacity() >= new_cap` without touching the live values.
    ///
    /// Never shrinks, with one exception: `reserve(0)` drops every value and releases
    /// the buffer. Growing allocates exactly `new_cap` slots and moves the values over.
    ///
    /// # Panics
    ///
    /// Panics if the byte size overflows `isize`; aborts through
    /// `handle_alloc_error` if the allocator fails.
    pub fn reserve(&mut self, new_cap: usize) {
        if let Err(err) = self.try_reserve(new_cap) {
            raw::handle_reserve_error(err);
        }
    }

    /// `reserve` that reports allocation problems instead of diverging. The vector
    /// is unchanged on error.
    pub fn try_reserve(&mut self, new_cap: usize) -> Result<(), VectorError> {
        if new_cap == self.capacity() {
            return Ok(());
        }
        if new_cap == 0 {
            self.release();
            return Ok(());
        }
        if new_cap < self.capacity() {
            return Ok(());
        }

        let buffer = RawBuffer::try_allocate(new_cap)?;
        self.relocate(buffer);
        Ok(())
    }

    /// Reduces the capacity to exactly `len()`, releasing the buffer when empty.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() == self.len {
            return;
        }
        if self.len == 0 {
            self.buf = RawBuffer::empty();
            return;
        }
        self.relocate(RawBuffer::allocate(self.len));
    }

    /// Moves the live values into `buffer` and adopts it; the old block is freed.
    fn relocate(&mut self, mut buffer: RawBuffer<T>) {
        debug_assert!(buffer.capacity() >= self.len, "relocate: buffer fits live values");
        trace!(
            "relocate {} values from {} to {} slots",
            self.len,
            self.capacity(),
            buffer.capacity()
        );
        // SAFETY: both blocks have room for `len` values and are distinct allocations.
        // The values are moved bitwise; the old block is released below without
        // running their destructors.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), buffer.as_ptr(), self.len);
        }
        mem::swap(&mut self.buf, &mut buffer);
    }

    /// Drops every value and frees the buffer.
    fn release(&mut self) {
        if self.buf.is_allocated() {
            debug!(
                "release {} slots holding {} values",
                self.capacity(),
                self.len
            );
        }
        self.clear();
        self.buf = RawBuffer::empty();
    }

    /// Keeps the first `new_len` values and drops the rest. Capacity is untouched.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        // SAFETY: `[new_len, len)` are live values. The length is lowered first so a
        // panicking destructor cannot lead to a second drop.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(
                self.buf.as_ptr().add(new_len),
                self.len - new_len,
            );
            self.len = new_len;
            ptr::drop_in_place(tail);
        }
    }

    /// Sets the length to zero, dropping every value. The buffer is kept for reuse.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Applies the shrinking cases of a resize. Returns `true` when the vector has
    /// room for `new_len` values and `[len, new_len)` still has to be filled.
    fn prepare_resize(&mut self, new_len: usize) -> bool {
        if new_len == 0 {
            self.release();
            return false;
        }
        if new_len <= self.len {
            self.truncate(new_len);
            return false;
        }
        if new_len > self.capacity() {
            self.reserve(new_len);
        }
        true
    }

    /// Changes the length to `new_len`, filling new slots with values from `fill`.
    ///
    /// `new_len == 0` releases the buffer, a shorter length truncates in place, a
    /// longer one grows the capacity to exactly `new_len` if needed. If `fill`
    /// panics, the values produced so far stay in the vector.
    pub fn resize_with<F>(&mut self, new_len: usize, mut fill: F)
    where
        F: FnMut() -> T,
    {
        if !self.prepare_resize(new_len) {
            return;
        }
        while self.len < new_len {
            let item = fill();
            // SAFETY: `prepare_resize` reserved `new_len` slots.
            unsafe { self.push_unchecked(item) };
        }
    }

    /// `resize_with` filling new slots with `T::default()`.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// `resize_with` filling new slots with clones of `value`; the last new slot
    /// receives `value` itself.
    pub fn resize_with_value(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if !self.prepare_resize(new_len) {
            return;
        }
        while self.len + 1 < new_len {
            let item = value.clone();
            // SAFETY: `prepare_resize` reserved `new_len` slots.
            unsafe { self.push_unchecked(item) };
        }
        // SAFETY: as above, one slot remains.
        unsafe { self.push_unchecked(value) };
    }

    /// Writes `value` into the first free slot.
    ///
    /// # Safety
    ///
    /// `len() < capacity()` must hold.
    #[inline(always)]
    unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.capacity(), "push_unchecked: free slot");
        ptr::write(self.buf.as_ptr().add(self.len), value);
        self.len += 1;
    }

    #[inline]
    fn grow_for_push(&mut self) {
        if self.len == self.capacity() {
            self.reserve(raw::next_capacity(self.capacity()));
        }
    }

    /// Appends `value`, doubling the capacity when the buffer is full.
    pub fn push_back(&mut self, value: T) {
        self.grow_for_push();
        // SAFETY: `grow_for_push` left at least one free slot.
        unsafe { self.push_unchecked(value) };
    }

    /// Appends a clone of `value`.
    ///
    /// The clone is made before the buffer is touched: if it panics, the vector is
    /// exactly as before.
    pub fn push_back_clone(&mut self, value: &T)
    where
        T: Clone,
    {
        let value = value.clone();
        self.push_back(value);
    }

    /// Appends a clone of the value at `index` of this same vector.
    ///
    /// The value is captured before any reallocation, so this works when the push
    /// itself has to grow the buffer.
    pub fn push_back_from_within(&mut self, index: usize) -> Result<(), VectorError>
    where
        T: Clone,
    {
        let value = self.at(index)?.clone();
        self.push_back(value);
        Ok(())
    }

    /// `push_back` that reports allocation problems. On error `value` is dropped and
    /// the vector is unchanged.
    pub fn try_push_back(&mut self, value: T) -> Result<(), VectorError> {
        if self.len == self.capacity() {
            let new_cap = raw::try_next_capacity(self.capacity())?;
            self.try_reserve(new_cap)?;
        }
        // SAFETY: a free slot exists.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Drops the last value. Returns `false`, doing nothing, when empty. Capacity is
    /// kept.
    pub fn pop_back(&mut self) -> bool {
        self.pop().is_some()
    }

    /// Removes the last value and returns it. Capacity is kept.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` is live and no longer counted.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.len)) })
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&T, VectorError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(VectorError::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VectorError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(VectorError::OutOfRange { index, len })
    }

    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Start of the buffer, or null when there is none.
    ///
    /// Only `[0, len())` may be read, and only until the next capacity change.
    pub fn data(&self) -> *const T {
        self.buf.as_ptr_or_null()
    }

    /// Mutable start of the buffer, or null when there is none.
    pub fn data_mut(&mut self) -> *mut T {
        self.buf.as_ptr_or_null()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` are live; the pointer is non-null and aligned even
        // without a buffer.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Exchanges buffers, lengths and capacities. No value is moved or cloned.
    pub fn swap(&mut self, other: &mut Vector<T>) {
        mem::swap(self, other);
    }

    /// Takes the contents out, leaving this vector empty without a buffer.
    pub fn take(&mut self) -> Vector<T> {
        mem::take(self)
    }

    /// Splits into the buffer and the count of live values at its front, without
    /// running any destructor.
    pub(crate) fn into_raw_parts(self) -> (RawBuffer<T>, usize) {
        let mut this = ManuallyDrop::new(self);
        (this.buf.take(), this.len)
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` are live; the buffer itself is freed by `RawBuffer`.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_ptr(), self.len));
        }
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Vector<T> {
        Vector::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Deep copy of the live values into a buffer of exactly `len()` slots.
    fn clone(&self) -> Vector<T> {
        Vector::from_slice(self)
    }

    /// Replaces both contents and capacity with those of a fresh copy of `source`.
    /// The copy is finished before the old contents are dropped.
    fn clone_from(&mut self, source: &Vector<T>) {
        *self = source.clone();
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(items: &[T]) -> Vector<T> {
        Vector::from_slice(items)
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(items: [T; N]) -> Vector<T> {
        Vector::from_exact_iter(IntoIterator::into_iter(items))
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(items: Vec<T>) -> Vector<T> {
        Vector::from_exact_iter(items)
    }
}
