use std::{
    alloc::Layout,
    sync::{Mutex, MutexGuard, PoisonError},
};

use lazy_static::lazy_static;

/**
 * Counters for every block the cell allocator hands out and takes back
 *
 * Zero-sized layouts never touch the C heap, so they are not recorded here
 */
#[derive(Debug, Default)]
pub struct HeapLedger {
    live: usize,
    live_bytes: usize,
    total_allocations: u64,
    total_releases: u64,
    last_request: Option<Layout>,
}

/// Point-in-time copy of the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub live: usize,
    pub live_bytes: usize,
    pub total_allocations: u64,
    pub total_releases: u64,
    pub last_request: Option<Layout>,
}

impl HeapLedger {
    pub fn record_request(&mut self, layout: Layout) {
        self.last_request = Some(layout);
    }

    pub fn record_allocation(&mut self, layout: Layout) {
        self.live += 1;
        self.live_bytes += layout.size();
        self.total_allocations += 1;
    }

    pub fn record_release(&mut self, layout: Layout) {
        debug_assert!(self.live > 0, "released a block the ledger never saw allocated");

        self.live -= 1;
        self.live_bytes -= layout.size();
        self.total_releases += 1;
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            live: self.live,
            live_bytes: self.live_bytes,
            total_allocations: self.total_allocations,
            total_releases: self.total_releases,
            last_request: self.last_request,
        }
    }
}

lazy_static! {
    pub static ref heap_ledger: Mutex<HeapLedger> = Mutex::new(HeapLedger::default());
}

/*
 * A panic while the ledger is held leaves plain counters behind, they are still usable
 */
pub fn ledger() -> MutexGuard<'static, HeapLedger> {
    heap_ledger.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn snapshot() -> LedgerSnapshot {
    ledger().snapshot()
}
