//! Allocation accounting for benchmark runs
//!
//! A counting allocator that delegates to the system allocator and tracks
//! cumulative allocated bytes and allocation calls. The driver samples a
//! snapshot immediately before and after each walker invocation and reports
//! the delta. The counters are cumulative rather than live, so deltas stay
//! meaningful without any collection or compaction pass.
//!
//! Install in a binary with:
//!
//! ```ignore
//! #[global_allocator]
//! static ALLOC: CountingAllocator = CountingAllocator;
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

static BYTES_ALLOCATED: AtomicU64 = AtomicU64::new(0);
static ALLOC_CALLS: AtomicU64 = AtomicU64::new(0);

/// Global allocator wrapper that counts allocation events and bytes.
pub struct CountingAllocator;

// SAFETY: every operation delegates to `System` unchanged; this wrapper only
// records statistics and preserves the layout and size contracts of the
// global allocator API.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            ALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
            BYTES_ALLOCATED.fetch_add(layout.size() as u64, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            ALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
            BYTES_ALLOCATED.fetch_add(layout.size() as u64, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            ALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
            BYTES_ALLOCATED.fetch_add(new_size as u64, Ordering::Relaxed);
        }
        new_ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
    }
}

/// Cumulative allocation counters at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocSnapshot {
    /// Total bytes handed out since process start
    pub bytes: u64,

    /// Total allocation calls since process start
    pub calls: u64,
}

impl AllocSnapshot {
    /// Bytes allocated since an earlier snapshot.
    pub fn bytes_since(&self, earlier: &AllocSnapshot) -> u64 {
        self.bytes.wrapping_sub(earlier.bytes)
    }
}

/// Read the current cumulative counters.
///
/// Counters stay at zero unless [`CountingAllocator`] is installed as the
/// process's global allocator.
pub fn snapshot() -> AllocSnapshot {
    AllocSnapshot {
        bytes: BYTES_ALLOCATED.load(Ordering::Relaxed),
        calls: ALLOC_CALLS.load(Ordering::Relaxed),
    }
}
