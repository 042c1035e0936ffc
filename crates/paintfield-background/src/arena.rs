//! Slot storage for live paint drops.

use crate::drop::PaintDrop;

#[derive(Debug, Clone)]
struct Slot {
    drop: PaintDrop,
    alive: bool,
}

/// Slab of drop slots with a free list.
///
/// Dead slots are recycled by later inserts, so the backing vector only grows
/// to the peak number of simultaneous drops. Iteration follows slot order,
/// which matches creation order until a slot is reused.
#[derive(Debug, Clone, Default)]
pub struct DropArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
}

impl DropArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Store a drop and return its slot index.
    pub fn insert(&mut self, drop: PaintDrop) -> usize {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Slot { drop, alive: true };
                index
            }
            None => {
                self.slots.push(Slot { drop, alive: true });
                self.slots.len() - 1
            }
        }
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Slots allocated, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Option<&PaintDrop> {
        self.slots
            .get(index)
            .filter(|slot| slot.alive)
            .map(|slot| &slot.drop)
    }

    /// Live drops in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &PaintDrop> {
        self.slots
            .iter()
            .filter(|slot| slot.alive)
            .map(|slot| &slot.drop)
    }

    /// Visit live drops from the highest slot down. A drop is freed when `f`
    /// returns `false`.
    pub fn update_rev<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut PaintDrop) -> bool,
    {
        for index in (0..self.slots.len()).rev() {
            let slot = &mut self.slots[index];
            if !slot.alive {
                continue;
            }
            if !f(&mut slot.drop) {
                slot.alive = false;
                self.free.push(index);
                self.live -= 1;
            }
        }
    }

    /// Free every slot, keeping the allocation.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }
}
