use std::{alloc::Layout, fmt, marker::PhantomData, mem::MaybeUninit, ptr::NonNull};

use log::trace;

use crate::error::{Error, Result};

use self::allocator::CellAllocator;

pub mod allocator;
pub mod globals;

/**
 * A single value living on the C heap
 *
 * The block is requested with the layout of T itself, so there is no untyped pointer to cast
 * on the caller side, and it is given back to the heap when the cell is dropped
 *
 * A cell moves through these states:
 *
 * allocate() ---> Uninitialized ---> write() ---> Initialized ---> drop ---> released
 *
 * A failed allocation never produces a cell, so there is no way to hold a handle to memory
 * that doesn't exist
 */
pub struct HeapCell<T> {
    slot: NonNull<MaybeUninit<T>>,
    initialized: bool,
    _owns: PhantomData<T>,
}

/// The cell used by the lesson: one `i32` on the heap.
pub type IntegerCell = HeapCell<i32>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Uninitialized,
    Initialized,
}

// The cell owns its value exactly like a Box does
unsafe impl<T: Send> Send for HeapCell<T> {}
unsafe impl<T: Sync> Sync for HeapCell<T> {}

impl<T> HeapCell<T> {
    /**
     * Reserve heap storage for one T without writing anything into it.
     *
     * @warning Returns Error::AllocationFailed when the heap can't satisfy the request.
     */
    pub fn allocate() -> Result<Self> {
        let block = CellAllocator::allocate(Self::layout())?;

        Ok(Self {
            slot: block.cast::<MaybeUninit<T>>(),
            initialized: false,
            _owns: PhantomData,
        })
    }

    /// Allocate and write in one step.
    pub fn new(value: T) -> Result<Self> {
        let mut cell = Self::allocate()?;
        cell.write(value);

        Ok(cell)
    }

    /// Layout requested from the heap, taken from the pointee type.
    pub fn layout() -> Layout {
        Layout::new::<T>()
    }

    pub fn size() -> usize {
        Self::layout().size()
    }

    pub fn address(&self) -> usize {
        self.slot.as_ptr().addr()
    }

    pub fn state(&self) -> CellState {
        if self.initialized {
            CellState::Initialized
        } else {
            CellState::Uninitialized
        }
    }

    /**
     * Store a value in the cell, dropping whatever was there before.
     */
    pub fn write(&mut self, value: T) {
        let slot = unsafe { self.slot.as_mut() };

        if self.initialized {
            /*
             * Mark the slot empty before dropping, a panicking destructor must not lead
             * to a second drop when the cell itself goes away
             */
            self.initialized = false;
            unsafe { slot.assume_init_drop() };
        }

        slot.write(value);
        self.initialized = true;

        trace!("wrote {} bytes at {:#x}", Self::size(), self.address());
    }

    pub fn get(&self) -> Result<&T> {
        if !self.initialized {
            return Err(Error::Uninitialized {
                address: self.address(),
            });
        }

        trace!("read {} bytes at {:#x}", Self::size(), self.address());

        Ok(unsafe { self.slot.as_ref().assume_init_ref() })
    }
}

impl<T: Copy> HeapCell<T> {
    /// Copy the stored value out, reading never changes it.
    pub fn read(&self) -> Result<T> {
        self.get().copied()
    }
}

impl<T> Drop for HeapCell<T> {
    fn drop(&mut self) {
        if self.initialized {
            self.initialized = false;
            unsafe { self.slot.as_mut().assume_init_drop() };
        }

        CellAllocator::release(self.slot.cast::<u8>(), Self::layout());
    }
}

impl<T: fmt::Debug> fmt::Debug for HeapCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("HeapCell");
        out.field("address", &format_args!("{:#x}", self.address()));

        match self.get() {
            Ok(value) => out.field("value", value),
            Err(_) => out.field("value", &format_args!("<uninitialized>")),
        };

        out.finish()
    }
}
