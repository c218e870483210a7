//! Stale-result discard for overlapping list queries.
//!
//! Each query takes a ticket before it starts. When it completes, its result is
//! kept only if no later ticket has been issued, so a slow superseded query
//! can never overwrite the result of a newer one.
//!
//! This is a client-side building block for embedders that issue their own
//! overlapping queries, such as search-as-you-type. The HTTP API does not hold
//! a slot; it only echoes `requestSeq` so remote clients can apply the same
//! policy with their own sequencer.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

/// Monotonically increasing request sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(u64);

impl QueryTicket {
    /// Wraps a sequence number received from a remote client.
    #[must_use]
    pub fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Returns the sequence number.
    #[must_use]
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Issues query tickets and tells whether a ticket is still the latest.
#[derive(Debug, Default)]
pub struct QuerySequencer {
    latest: AtomicU64,
}

impl QuerySequencer {
    /// Creates a sequencer that has issued no tickets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket, superseding every earlier one.
    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Returns whether no ticket newer than `ticket` has been issued.
    #[must_use]
    pub fn is_latest(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

/// Holds the result of the latest completed query.
#[derive(Debug)]
pub struct LatestResultSlot<T> {
    sequencer: QuerySequencer,
    current: Mutex<Option<(QueryTicket, T)>>,
}

impl<T> Default for LatestResultSlot<T> {
    fn default() -> Self {
        Self {
            sequencer: QuerySequencer::new(),
            current: Mutex::new(None),
        }
    }
}

impl<T: Clone> LatestResultSlot<T> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new query.
    pub fn begin(&self) -> QueryTicket {
        self.sequencer.issue()
    }

    /// Stores a completed result unless a newer query has been started.
    ///
    /// Returns whether the value was applied.
    pub async fn complete(&self, ticket: QueryTicket, value: T) -> bool {
        let mut current = self.current.lock().await;

        if !self.sequencer.is_latest(ticket) {
            return false;
        }
        if current
            .as_ref()
            .is_some_and(|(stored, _)| *stored >= ticket)
        {
            return false;
        }

        *current = Some((ticket, value));
        true
    }

    /// Returns the most recently applied result.
    pub async fn current(&self) -> Option<T> {
        self.current
            .lock()
            .await
            .as_ref()
            .map(|(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{LatestResultSlot, QuerySequencer};

    #[test]
    fn tickets_increase_and_supersede() {
        let sequencer = QuerySequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();

        assert!(second > first);
        assert!(!sequencer.is_latest(first));
        assert!(sequencer.is_latest(second));
    }

    #[tokio::test]
    async fn stale_result_never_overwrites_newer_query() {
        let slot = LatestResultSlot::new();
        let typed_r = slot.begin();
        let typed_ro = slot.begin();

        assert!(slot.complete(typed_ro, "ro").await);
        assert!(!slot.complete(typed_r, "r").await);
        assert_eq!(slot.current().await, Some("ro"));
    }

    #[tokio::test]
    async fn superseded_query_is_discarded_even_if_it_finishes_first() {
        let slot = LatestResultSlot::new();
        let slow = slot.begin();
        let fast = slot.begin();

        assert!(!slot.complete(slow, 1).await);
        assert_eq!(slot.current().await, None);
        assert!(slot.complete(fast, 2).await);
        assert_eq!(slot.current().await, Some(2));
    }

    #[tokio::test]
    async fn concurrent_completions_keep_only_latest_ticket() {
        let slot = Arc::new(LatestResultSlot::new());
        let tickets: Vec<_> = (0..16).map(|_| slot.begin()).collect();
        let latest = tickets.last().copied();

        let mut handles = Vec::new();
        for ticket in tickets {
            let slot = Arc::clone(&slot);
            handles.push(tokio::spawn(async move {
                slot.complete(ticket, ticket.sequence()).await
            }));
        }

        let mut applied = 0;
        for handle in handles {
            if handle.await.unwrap_or_default() {
                applied += 1;
            }
        }

        assert_eq!(applied, 1);
        assert_eq!(slot.current().await, latest.map(|ticket| ticket.sequence()));
    }
}
