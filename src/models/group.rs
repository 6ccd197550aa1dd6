// src/models/group.rs

use std::collections::BTreeMap;

use crate::error::AppError;

/// Static mapping from group code to an ordered list of question ids.
/// Configuration data, never mutated at runtime.
#[derive(Debug, Clone)]
pub struct GroupRegistry {
    groups: BTreeMap<String, Vec<u32>>,
}

impl GroupRegistry {
    pub fn new(groups: BTreeMap<String, Vec<u32>>) -> Self {
        Self { groups }
    }

    /// Resolves a group code to its question-id sequence.
    pub fn resolve(&self, code: &str) -> Result<&[u32], AppError> {
        self.groups
            .get(code)
            .map(Vec::as_slice)
            .ok_or(AppError::InvalidGroup)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.groups.contains_key(code)
    }

    /// Registered codes in stable order, for the batch QR generator.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

impl Default for GroupRegistry {
    /// The built-in group table: one code per band section.
    fn default() -> Self {
        let mut groups = BTreeMap::new();
        groups.insert("drums".to_string(), vec![1, 2]);
        groups.insert("trumpets".to_string(), vec![3, 4, 5, 6]);
        groups.insert("drums_finals".to_string(), vec![7, 8]);
        groups.insert("trumpets_finals".to_string(), vec![9, 10]);
        groups.insert("choreography".to_string(), vec![11, 12]);
        Self::new(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_codes_in_order() {
        let registry = GroupRegistry::default();
        assert_eq!(registry.resolve("drums").unwrap(), &[1, 2]);
        assert_eq!(registry.resolve("trumpets").unwrap(), &[3, 4, 5, 6]);
    }

    #[test]
    fn unregistered_code_is_invalid_group() {
        let registry = GroupRegistry::default();
        assert!(matches!(
            registry.resolve("flutes").unwrap_err(),
            AppError::InvalidGroup
        ));
    }
}
