// Task id generation

use crate::models::now_ms;

/// Source of fresh task ids
///
/// The store calls `observe` for every id already in the collection before
/// asking for new ones, so a generator can skip past them. `next_id` returns
/// `None` once the id space is used up.
pub trait IdGenerator {
    fn next_id(&mut self) -> Option<i64>;

    fn observe(&mut self, _id: i64) {}
}

/// Counter starting at 1
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: i64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Option<i64> {
        self.last = self.last.checked_add(1)?;
        Some(self.last)
    }

    fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }
}

/// Millisecond timestamps, forced strictly increasing
///
/// Two adds within the same millisecond still get distinct ids.
#[derive(Debug, Clone, Default)]
pub struct ClockIds {
    last: i64,
}

impl ClockIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for ClockIds {
    fn next_id(&mut self) -> Option<i64> {
        let floor = self.last.checked_add(1)?;
        self.last = now_ms().max(floor);
        Some(self.last)
    }

    fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> Option<i64> {
        (**self).next_id()
    }

    fn observe(&mut self, id: i64) {
        (**self).observe(id)
    }
}
