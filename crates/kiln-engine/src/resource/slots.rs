use std::fmt;
use std::marker::PhantomData;

/// A kind of engine-owned resource.
pub trait Resource: 'static {
    /// Short lowercase name used in logs and errors.
    const KIND: &'static str;
}

/// Copyable identity of a slot: index plus generation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SlotKey {
    index: u32,
    generation: u32,
}

impl SlotKey {
    #[cfg(test)]
    pub(crate) fn forge(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Owning reference to a resource of kind `T`.
///
/// Neither `Clone` nor `Copy`: releasing the resource consumes the handle.
pub struct Handle<T> {
    key: SlotKey,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    #[inline]
    pub fn key(&self) -> SlotKey {
        self.key
    }

    #[cfg(test)]
    pub(crate) fn forge(key: SlotKey) -> Self {
        Self { key, _kind: PhantomData }
    }
}

impl<T: Resource> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", T::KIND, self.key)
    }
}

/// Error for a handle whose slot no longer holds the resource it was issued for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StaleHandle {
    pub kind: &'static str,
    pub key: SlotKey,
}

impl fmt::Display for StaleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stale {} handle {}", self.kind, self.key)
    }
}

impl std::error::Error for StaleHandle {}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot registry for one resource kind.
pub struct Slots<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }
}

impl<T: Resource> Slots<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: T) -> Handle<T> {
        let index = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                index
            }
            None => {
                self.slots.push(Slot { generation: 0, value: Some(value) });
                (self.slots.len() - 1) as u32
            }
        };

        self.live += 1;
        let generation = self.slots[index as usize].generation;
        Handle {
            key: SlotKey { index, generation },
            _kind: PhantomData,
        }
    }

    #[inline]
    pub fn get(&self, handle: &Handle<T>) -> Option<&T> {
        self.get_key(handle.key)
    }

    #[inline]
    pub fn get_mut(&mut self, handle: &Handle<T>) -> Option<&mut T> {
        self.get_key_mut(handle.key)
    }

    pub fn get_key(&self, key: SlotKey) -> Option<&T> {
        self.slots
            .get(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_key_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        self.slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Releases the resource and returns it. The slot's generation is bumped
    /// so outstanding copies of the key go stale.
    pub fn remove(&mut self, handle: Handle<T>) -> Result<T, StaleHandle> {
        let key = handle.key;
        let stale = StaleHandle { kind: T::KIND, key };

        let slot = self.slots.get_mut(key.index as usize).ok_or(stale)?;
        if slot.generation != key.generation {
            return Err(stale);
        }
        let value = slot.value.take().ok_or(stale)?;

        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index);
        self.live -= 1;
        Ok(value)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotKey, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.value.as_mut().map(|v| {
                (SlotKey { index: index as u32, generation }, v)
            })
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
