use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);
static NEXT_SLOT_KEY: AtomicU64 = AtomicU64::new(0);

/// Next generated notification id, unique within the process.
pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

pub(crate) fn next_slot_key() -> u64 {
    NEXT_SLOT_KEY.fetch_add(1, Ordering::Relaxed)
}
