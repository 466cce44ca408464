#![forbid(unsafe_code)]

//! Binding persistence seam.
//!
//! The settings backend owns the real storage; this crate only needs to read
//! and write canonical combinations keyed by binding id. [`MemoryHotkeyStore`]
//! backs tests and hosts that sync settings through another channel.

use std::collections::BTreeMap;

use crate::hotkey::{HotkeyCombination, HotkeyError};

/// Storage for hotkey bindings keyed by binding id.
pub trait HotkeyStore {
    /// Current combination for `id`.
    fn get(&self, id: &str) -> Option<HotkeyCombination>;

    /// Replace the combination for `id`.
    ///
    /// On error the previous value must be left untouched.
    fn set(&mut self, id: &str, combination: HotkeyCombination) -> Result<(), HotkeyError>;
}

/// Reject combinations the registration backend cannot handle.
pub fn validate_binding(
    combination: &HotkeyCombination,
    require_main_key: bool,
) -> Result<(), HotkeyError> {
    if require_main_key && combination.is_modifier_only() {
        return Err(HotkeyError::ModifierOnly(combination.to_string()));
    }
    Ok(())
}

/// In-memory [`HotkeyStore`] that refuses duplicate combinations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHotkeyStore {
    bindings: BTreeMap<String, HotkeyCombination>,
}

impl MemoryHotkeyStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a binding without conflict checks.
    #[must_use]
    pub fn with_binding(mut self, id: impl Into<String>, combination: HotkeyCombination) -> Self {
        self.bindings.insert(id.into(), combination);
        self
    }

    /// Binding id that currently owns `combination`, if any.
    #[must_use]
    pub fn owner_of(&self, combination: &HotkeyCombination) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, existing)| *existing == combination)
            .map(|(id, _)| id.as_str())
    }

    /// Iterate bindings in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HotkeyCombination)> {
        self.bindings.iter().map(|(id, combo)| (id.as_str(), combo))
    }

    /// Number of stored bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl HotkeyStore for MemoryHotkeyStore {
    fn get(&self, id: &str) -> Option<HotkeyCombination> {
        self.bindings.get(id).cloned()
    }

    fn set(&mut self, id: &str, combination: HotkeyCombination) -> Result<(), HotkeyError> {
        if let Some(owner) = self.owner_of(&combination)
            && owner != id
        {
            return Err(HotkeyError::Conflict {
                combination: combination.to_string(),
                existing: owner.to_string(),
            });
        }
        self.bindings.insert(id.to_string(), combination);
        Ok(())
    }
}
