use crate::VectorError;
use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

/// Capacity of the first allocation made by an append into an empty container.
pub const MIN_NON_ZERO_CAP: usize = 1;

/// Factor applied to the capacity when an append finds the buffer full.
pub const GROWTH_FACTOR: usize = 2;

/// Capacity an append should reserve when `cap` slots are all in use.
#[inline]
pub fn try_next_capacity(cap: usize) -> Result<usize, VectorError> {
    if cap == 0 {
        Ok(MIN_NON_ZERO_CAP)
    } else {
        cap.checked_mul(GROWTH_FACTOR).ok_or(VectorError::CapacityOverflow)
    }
}

#[inline]
pub fn next_capacity(cap: usize) -> usize {
    match try_next_capacity(cap) {
        Ok(cap) => cap,
        Err(err) => handle_reserve_error(err),
    }
}

#[cold]
pub fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

/// Turns a failed reservation into the same failure `Vec` would produce.
#[cold]
pub fn handle_reserve_error(err: VectorError) -> ! {
    match err {
        VectorError::AllocFailed { layout } => alloc::handle_alloc_error(layout),
        VectorError::CapacityOverflow => capacity_overflow(),
        VectorError::OutOfRange { .. } => unreachable!("reservation cannot fail with {}", err),
    }
}

/// Exclusively owned block of `cap` uninitialized slots of `T`.
///
/// Only memory is managed here: dropping a `RawBuffer` frees the block but never runs
/// destructors of whatever values it holds. `Vector` and `IntoIter` track which slots
/// are live.
///
/// The block is absent exactly when the capacity is zero. Zero-sized types are never
/// sent to the allocator; their block is a dangling, well aligned pointer.
pub struct RawBuffer<T> {
    ptr: Option<NonNull<T>>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: the buffer is uniquely owned, so it can move between threads whenever the
// values it holds can.
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: shared access never mutates the allocation itself.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    pub const fn empty() -> RawBuffer<T> {
        RawBuffer {
            ptr: None,
            cap: 0,
            _marker: PhantomData,
        }
    }

    fn layout(cap: usize) -> Result<Layout, VectorError> {
        Layout::array::<T>(cap).map_err(|_| VectorError::CapacityOverflow)
    }

    /// Allocates exactly `cap` slots.
    pub fn try_allocate(cap: usize) -> Result<RawBuffer<T>, VectorError> {
        if cap == 0 {
            return Ok(RawBuffer::empty());
        }

        let layout = Self::layout(cap)?;
        if layout.size() == 0 {
            return Ok(RawBuffer {
                ptr: Some(NonNull::dangling()),
                cap,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) } as *mut T;
        match NonNull::new(ptr) {
            Some(ptr) => {
                trace!("allocate {} slots ({} bytes) at {:?}", cap, layout.size(), ptr);
                Ok(RawBuffer {
                    ptr: Some(ptr),
                    cap,
                    _marker: PhantomData,
                })
            }
            None => Err(VectorError::AllocFailed { layout }),
        }
    }

    /// Allocates exactly `cap` slots, diverging on overflow or allocator failure.
    pub fn allocate(cap: usize) -> RawBuffer<T> {
        match Self::try_allocate(cap) {
            Ok(buffer) => buffer,
            Err(err) => handle_reserve_error(err),
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Start of the block, or a dangling pointer if there is no block. Always
    /// suitable for building zero-length slices.
    #[inline(always)]
    pub fn as_ptr(&self) -> *mut T {
        match self.ptr {
            Some(ptr) => ptr.as_ptr(),
            None => NonNull::dangling().as_ptr(),
        }
    }

    /// Start of the block, or null if there is no block.
    #[inline(always)]
    pub fn as_ptr_or_null(&self) -> *mut T {
        match self.ptr {
            Some(ptr) => ptr.as_ptr(),
            None => std::ptr::null_mut(),
        }
    }

    /// Takes the block out, leaving `self` empty.
    pub fn take(&mut self) -> RawBuffer<T> {
        mem::replace(self, RawBuffer::empty())
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            if mem::size_of::<T>() == 0 {
                return;
            }
            trace!("release {} slots at {:?}", self.cap, ptr);
            // SAFETY: the same layout was accepted in `try_allocate`.
            unsafe {
                let layout = Layout::from_size_align_unchecked(
                    mem::size_of::<T>() * self.cap,
                    mem::align_of::<T>(),
                );
                alloc::dealloc(ptr.as_ptr() as *mut u8, layout);
            }
        }
    }
}
