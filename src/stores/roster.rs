use crate::models::registration::RegistrationRecord;
use crate::models::role::Role;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// In-memory list of registrations for the lifetime of the process.
///
/// Entries keep their insertion order through a sequence number. The same
/// email may be registered any number of times; lookups return the earliest.
/// Records are never removed, so the roster holds at most `max_records`.
pub struct Roster {
    records: DashMap<u64, Arc<RegistrationRecord>>,
    next_seq: AtomicU64,
    max_records: u64,
}

impl Roster {
    /// Unbounded roster
    pub fn new() -> Self {
        Self::with_limit(0, usize::MAX)
    }

    pub fn with_limit(capacity: usize, max_records: usize) -> Self {
        Self {
            records: DashMap::with_capacity(capacity.min(max_records)),
            next_seq: AtomicU64::new(0),
            max_records: max_records as u64,
        }
    }

    /// Append a record, returning its sequence number, or `None` when the
    /// roster is full.
    pub fn append(&self, record: RegistrationRecord) -> Option<u64> {
        // Sequence numbers double as slot reservations
        let seq = self
            .next_seq
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |seq| {
                (seq < self.max_records).then_some(seq + 1)
            })
            .ok()?;
        self.records.insert(seq, Arc::new(record));
        Some(seq)
    }

    /// Earliest record whose email and role both match exactly
    pub fn find(&self, email: &str, role: Role) -> Option<Arc<RegistrationRecord>> {
        self.records
            .iter()
            .filter(|entry| entry.value().email == email && entry.value().role() == role)
            .min_by_key(|entry| *entry.key())
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}
