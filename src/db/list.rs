use crate::db::Entry;

/// Handle is a stable position inside a `RecencyList`.
/// It stays valid until the entry it points to is removed, whatever the number of moves.
pub type Handle = usize;

/// Slot is a cell of the arena. `entry` is `None` when the slot sits on the free list.
struct Slot<K, V> {
    entry: Option<Entry<K, V>>,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// RecencyList is a doubly-linked list laid over a vector of slots.
/// Head is the most recently used entry, tail the least recently used one.
/// Freed slots are chained through `next` and reused by later pushes,
/// so the vector never grows beyond the maximum number of live entries.
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    head: Option<Handle>,
    tail: Option<Handle>,
    free: Option<Handle>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.slots.get(handle)?.entry.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(handle)?.entry.as_mut()
    }

    /// push_front inserts a new entry at the head and returns its handle.
    pub fn push_front(&mut self, key: K, value: V) -> Handle {
        let slot = Slot {
            entry: Some(Entry::new(key, value)),
            prev: None,
            next: self.head,
        };
        let handle = match self.free {
            Some(handle) => {
                self.free = self.slots[handle].next;
                self.slots[handle] = slot;
                handle
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.slots[old_head].prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
        self.len += 1;
        handle
    }

    /// move_to_front splices the entry at `handle` to the head. The handle does not change.
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) || self.get(handle).is_none() {
            return;
        }
        self.unlink(handle);

        let slot = &mut self.slots[handle];
        slot.prev = None;
        slot.next = self.head;
        if let Some(old_head) = self.head {
            self.slots[old_head].prev = Some(handle);
        }
        self.head = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
    }

    /// remove detaches the entry at `handle` and returns it. The slot goes back to the free list.
    pub fn remove(&mut self, handle: Handle) -> Option<Entry<K, V>> {
        self.get(handle)?;
        self.unlink(handle);

        let slot = &mut self.slots[handle];
        let entry = slot.entry.take();
        slot.prev = None;
        slot.next = self.free;
        self.free = Some(handle);
        self.len -= 1;
        entry
    }

    /// pop_back removes the least recently used entry.
    pub fn pop_back(&mut self) -> Option<Entry<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free = None;
        self.len = 0;
    }

    /// iter walks the entries from the most to the least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // unlink fixes the neighbours of `handle` and the list ends. It leaves the slot links stale.
    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = {
            let slot = &self.slots[handle];
            (slot.prev, slot.next)
        };
        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.tail = prev,
        }
    }
}

pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<Handle>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let list = self.list;
        let slot = &list.slots[handle];
        self.cursor = slot.next;
        slot.entry.as_ref()
    }
}
