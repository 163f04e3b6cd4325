use std::{
    alloc::Layout,
    os::raw::c_void,
    ptr::{self, NonNull},
};

use libc::{free, posix_memalign};
use log::{debug, warn};

use super::globals::ledger;
use crate::{
    error::{Error, Result},
    utils::allocation_alignment,
};

pub struct CellAllocator {}

impl CellAllocator {
    /**
     * Ask the C heap for a block that fits the given layout.
     *
     * @param layout Size and alignment of the value that will live in the block.
     * @return A non-null pointer to uninitialized memory.
     *
     * @note Zero-sized layouts never reach the heap, a dangling pointer with the
     * requested alignment is returned instead.
     * @warning Returns Error::AllocationFailed when the heap is exhausted.
     */
    pub fn allocate(layout: Layout) -> Result<NonNull<u8>> {
        if layout.size() == 0 {
            // Layout alignment is never zero, so the address is non-null and aligned
            return Ok(unsafe { NonNull::new_unchecked(ptr::without_provenance_mut(layout.align())) });
        }

        let align = allocation_alignment(layout.align());
        let mut raw: *mut c_void = ptr::null_mut();

        ledger().record_request(layout);

        let status = unsafe { posix_memalign(&mut raw, align, layout.size()) };

        let block = match NonNull::new(raw as *mut u8) {
            Some(block) if status == 0 => block,
            _ => {
                warn!(
                    "posix_memalign failed with status {status} for {} bytes aligned to {align}",
                    layout.size()
                );
                return Err(Error::AllocationFailed {
                    size: layout.size(),
                    align: layout.align(),
                });
            }
        };

        ledger().record_allocation(layout);
        debug!(
            "allocated {} bytes aligned to {} at {:p}",
            layout.size(),
            align,
            block
        );

        Ok(block)
    }

    /**
     * Give a block back to the C heap.
     *
     * @param block Pointer previously returned by CellAllocator::allocate.
     * @param layout The same layout that was used to allocate the block.
     */
    pub fn release(block: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        unsafe { free(block.as_ptr() as *mut c_void) };

        ledger().record_release(layout);
        debug!("released {} bytes at {:p}", layout.size(), block);
    }
}
