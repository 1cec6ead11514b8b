use crate::{
    assets::decode::PreparedImage,
    foundation::core::{FrameCount, FrameIndex},
};

#[derive(Clone, Debug)]
/// Index-addressed frame slots; a slot is empty while pending or after a failed load.
pub struct FrameSet {
    slots: Vec<Option<PreparedImage>>,
}

impl FrameSet {
    /// All-empty set with one slot per frame.
    pub fn new(count: FrameCount) -> Self {
        Self {
            slots: vec![None; count.get() as usize],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when there are no slots (never, for a validated count).
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Image in slot `index`, if loaded.
    pub fn get(&self, index: FrameIndex) -> Option<&PreparedImage> {
        self.slots.get(index.as_usize()).and_then(Option::as_ref)
    }

    /// Fill slot `index`. Returns false if the index is out of range.
    pub fn insert(&mut self, index: FrameIndex, image: PreparedImage) -> bool {
        match self.slots.get_mut(index.as_usize()) {
            Some(slot) => {
                *slot = Some(image);
                true
            }
            None => false,
        }
    }

    /// Count of filled slots.
    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Indices of empty slots.
    pub fn missing(&self) -> impl Iterator<Item = FrameIndex> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| FrameIndex(i as u32))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/frame_set.rs"]
mod tests;
