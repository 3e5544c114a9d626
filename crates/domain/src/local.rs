//! In-memory collections for records that never reach the backend.
//!
//! Campaigns, challenges drafted on the moderator board, and achievements
//! live only for the lifetime of the page that created them.

use artmart_common::{Error, Result};

use crate::entities::{Achievement, Campaign, Challenge, RecordId};

/// A record with a backend-style identifier
pub trait Identified {
    fn id(&self) -> &RecordId;
    fn set_id(&mut self, id: RecordId);
}

macro_rules! impl_identified {
    ($($record:ty),+ $(,)?) => {
        $(
            impl Identified for $record {
                fn id(&self) -> &RecordId {
                    &self.id
                }

                fn set_id(&mut self, id: RecordId) {
                    self.id = id;
                }
            }
        )+
    };
}

impl_identified!(Campaign, Challenge, Achievement);

/// Insertion-ordered collection keyed by `RecordId`
#[derive(Debug, Clone)]
pub struct LocalCollection<T> {
    items: Vec<T>,
}

impl<T> Default for LocalCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> LocalCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record under a freshly generated id and return that id
    pub fn create(&mut self, mut item: T) -> RecordId {
        let id = RecordId::new(uuid::Uuid::new_v4().to_string());
        item.set_id(id.clone());
        self.items.push(item);
        id
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Apply an edit in place
    pub fn update<F>(&mut self, id: &RecordId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut T),
    {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| Error::NotFound(format!("Local record {} not found", id)))?;
        edit(item);
        // the id is the key; edits may not change it
        item.set_id(id.clone());
        Ok(())
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
