// src/interceptor/slot.rs

/// At-most-one accumulator: the first claim occupies the slot, every later
/// claim is handed back so the caller can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<T> {
    value: Option<T>,
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Occupy the slot, or return the rejected candidate if already taken
    pub fn claim(&mut self, candidate: T) -> Result<(), T> {
        if self.value.is_some() {
            return Err(candidate);
        }
        self.value = Some(candidate);
        Ok(())
    }

    pub fn is_claimed(&self) -> bool {
        self.value.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_claim_wins() {
        let mut slot = Slot::new();
        assert!(!slot.is_claimed());
        assert_eq!(slot.claim("first"), Ok(()));
        assert_eq!(slot.claim("second"), Err("second"));
        assert_eq!(slot.claim("third"), Err("third"));
        assert_eq!(slot.get(), Some(&"first"));
        assert_eq!(slot.into_inner(), Some("first"));
    }

    #[test]
    fn empty_slot() {
        let slot: Slot<u32> = Slot::default();
        assert_eq!(slot.get(), None);
        assert_eq!(slot.into_inner(), None);
    }
}
