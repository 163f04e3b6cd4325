use std::io::Write;

use log::debug;

pub mod cell;
pub mod error;
pub mod report;
pub mod utils;


pub use cell::{CellState, HeapCell, IntegerCell};
pub use error::{Error, Result};

/// Value the lesson stores in its heap cell.
pub const PX_VALUE: i32 = 20;

/**
 * Allocate an integer on the heap, store PX_VALUE, read it back and report it to `out`.
 *
 * @return The value read back from the cell.
 *
 * @note The cell is released before this function returns, on error paths too.
 */
pub fn run<W: Write>(out: &mut W) -> Result<i32> {
    let mut px = IntegerCell::allocate()?;
    debug!("px allocated at {:#x}", px.address());

    px.write(PX_VALUE);
    let value = px.read()?;

    report::report(out, value)?;

    Ok(value)
}
