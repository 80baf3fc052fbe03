//! In-memory contact store used by the `contacts-console` binary.
//!
//! Single-threaded: the store is owned by the console loop and never shared.

use crate::models::legacy_contact::LegacyContact;

/// Minimal CRUD contract over an in-memory collection.
pub trait CrudRepository<T, Id> {
    /// Stores the entity, assigning it a fresh id. Returns the assigned id.
    fn create(&mut self, entity: T) -> Id;

    fn read(&self, id: Id) -> Option<&T>;

    /// Replaces the mutable fields of the stored entity with the same id.
    /// Does nothing when no such entity exists.
    fn update(&mut self, entity: T);

    /// Removes every entity with the id. Missing ids are ignored.
    fn delete(&mut self, id: Id);
}

#[derive(Debug)]
pub struct LegacyContactStore {
    contacts: Vec<LegacyContact>,
    next_id: i64,
}

impl Default for LegacyContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LegacyContactStore {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: 1,
        }
    }

    /// All contacts in insertion order.
    pub fn find_all(&self) -> &[LegacyContact] {
        &self.contacts
    }

    /// Case-insensitive substring match on the name.
    pub fn find_by_name(&self, fragment: &str) -> Vec<&LegacyContact> {
        let needle = fragment.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }
}

impl CrudRepository<LegacyContact, i64> for LegacyContactStore {
    fn create(&mut self, mut entity: LegacyContact) -> i64 {
        entity.id = self.next_id;
        self.next_id += 1;
        let id = entity.id;
        self.contacts.push(entity);
        id
    }

    fn read(&self, id: i64) -> Option<&LegacyContact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    fn update(&mut self, entity: LegacyContact) {
        if let Some(existing) = self.contacts.iter_mut().find(|c| c.id == entity.id) {
            existing.name = entity.name;
            existing.phone = entity.phone;
            existing.email = entity.email;
        }
    }

    fn delete(&mut self, id: i64) {
        self.contacts.retain(|c| c.id != id);
    }
}
