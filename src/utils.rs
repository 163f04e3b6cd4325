use std::{mem::size_of, os::raw::c_void};

/*
 * posix_memalign only accepts alignments that are a power of two and a multiple of
 * the pointer size, so smaller alignments (an i32 wants 4) are raised to the pointer size
 */
pub fn allocation_alignment(align: usize) -> usize {
    align.max(size_of::<*mut c_void>())
}
