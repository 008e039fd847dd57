//! Generation-checked handle registry for engines owned across the C ABI.
//!
//! A handle packs a slot index (upper 32 bits) and that slot's generation
//! (lower 32 bits). Generations start at 1 and a slot whose generation
//! would wrap back to 0 is retired instead of reused, so no valid handle is
//! ever 0 and callers can use 0 as "no engine". Removing a value bumps the
//! generation, which turns every outstanding copy of the old handle into a
//! stale one: lookups return `None` and double-destroy is a harmless no-op.

const FIRST_GENERATION: u32 = 1;

fn pack(index: u32, generation: u32) -> u64 {
    (u64::from(index) << 32) | u64::from(generation)
}

fn unpack(handle: u64) -> (usize, u32) {
    ((handle >> 32) as usize, handle as u32)
}

enum Entry<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32 },
}

/// Maps `u64` handles to owned values.
pub(crate) struct HandleRegistry<T> {
    entries: Vec<Entry<T>>,
    vacant: Vec<u32>,
}

impl<T> HandleRegistry<T> {
    /// An empty registry; usable in `static` initializers.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Store `value` and return its handle.
    ///
    /// Returns `None` only if all 2^32 slots are in use.
    pub fn insert(&mut self, value: T) -> Option<u64> {
        if let Some(index) = self.vacant.pop() {
            let entry = &mut self.entries[index as usize];
            if let Entry::Vacant { generation } = *entry {
                *entry = Entry::Occupied { generation, value };
                return Some(pack(index, generation));
            }
        }
        let index = u32::try_from(self.entries.len()).ok()?;
        self.entries.push(Entry::Occupied {
            generation: FIRST_GENERATION,
            value,
        });
        Some(pack(index, FIRST_GENERATION))
    }

    /// The value behind `handle`, or `None` if it is stale or was never issued.
    pub fn get(&self, handle: u64) -> Option<&T> {
        let (index, wanted) = unpack(handle);
        match self.entries.get(index)? {
            Entry::Occupied { generation, value } if *generation == wanted => Some(value),
            _ => None,
        }
    }

    /// Take the value behind `handle` out of the registry.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        let (index, wanted) = unpack(handle);
        let entry = self.entries.get_mut(index)?;
        match entry {
            Entry::Occupied { generation, .. } if *generation == wanted => {}
            _ => return None,
        }
        let generation = wanted.wrapping_add(1);
        match std::mem::replace(entry, Entry::Vacant { generation }) {
            Entry::Occupied { value, .. } => {
                if generation != 0 {
                    self.vacant.push(index as u32);
                }
                Some(value)
            }
            Entry::Vacant { .. } => None,
        }
    }

    /// Number of live values.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Occupied { .. }))
            .count()
    }
}
