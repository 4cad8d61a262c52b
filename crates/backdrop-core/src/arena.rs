/// Fixed-capacity slot arena with ring-order reuse.
///
/// Slots are allocated once up front. Inserting into a full arena evicts the
/// entry that was inserted earliest, so the per-frame redraw loop never
/// reallocates.
pub struct RingArena<T> {
    /// Each occupied slot carries the insertion stamp of its value.
    slots: Vec<Option<(u64, T)>>,
    /// Next slot to try when looking for a free one.
    cursor: usize,
    live: usize,
    next_stamp: u64,
}

impl<T> RingArena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            cursor: 0,
            live: 0,
            next_stamp: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Store `value`, returning the slot index it landed in.
    ///
    /// Prefers the first free slot at or after the cursor; when every slot is
    /// occupied the entry with the oldest insertion stamp is replaced.
    pub fn insert(&mut self, value: T) -> usize {
        let cap = self.slots.len();
        let slot = if self.live < cap {
            (0..cap)
                .map(|offset| (self.cursor + offset) % cap)
                .find(|&candidate| self.slots[candidate].is_none())
                .unwrap_or(self.cursor)
        } else {
            self.oldest_slot()
        };

        let stamp = self.next_stamp;
        self.next_stamp += 1;
        if self.slots[slot].replace((stamp, value)).is_none() {
            self.live += 1;
        }
        self.cursor = (slot + 1) % cap;
        slot
    }

    fn oldest_slot(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|(stamp, _)| (*stamp, i)))
            .min()
            .map_or(self.cursor, |(_, i)| i)
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .map(|(_, value)| value)
    }

    /// Keep only the entries for which `keep` returns true. The closure may
    /// mutate survivors in place.
    pub fn retain_mut<F: FnMut(&mut T) -> bool>(&mut self, mut keep: F) {
        for slot in self.slots.iter_mut() {
            if let Some((_, value)) = slot {
                if !keep(value) {
                    *slot = None;
                    self.live -= 1;
                }
            }
        }
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.live = 0;
        self.cursor = 0;
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| slot.as_ref().map(|(_, value)| value))
    }
}
