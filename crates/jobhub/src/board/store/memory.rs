use std::sync::{Arc, Mutex, MutexGuard};

use super::{Collection, Document, Predicate, RecordId, SortOrder, StoreError};
use crate::board::query::Window;

/// Process-local collection keeping documents in insertion order.
#[derive(Clone)]
pub struct MemoryCollection<D> {
    documents: Arc<Mutex<Vec<D>>>,
}

impl<D> Default for MemoryCollection<D> {
    fn default() -> Self {
        Self {
            documents: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<D: Document> MemoryCollection<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: impl IntoIterator<Item = D>) -> Self {
        Self {
            documents: Arc::new(Mutex::new(documents.into_iter().collect())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<D>>, StoreError> {
        self.documents
            .lock()
            .map_err(|_| StoreError::Unavailable("collection mutex poisoned".to_string()))
    }
}

impl<D: Document> Collection<D> for MemoryCollection<D> {
    fn insert(&self, document: D) -> Result<D, StoreError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id() == document.id()) {
            return Err(StoreError::Conflict);
        }
        guard.push(document.clone());
        Ok(document)
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<D>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|document| document.id() == id).cloned())
    }

    fn find_one(&self, predicate: &dyn Predicate<D>) -> Result<Option<D>, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .find(|document| predicate.matches(document))
            .cloned())
    }

    fn find(
        &self,
        predicate: &dyn Predicate<D>,
        order: SortOrder<D>,
        window: Window,
    ) -> Result<Vec<D>, StoreError> {
        let mut matching: Vec<D> = {
            let guard = self.lock()?;
            guard
                .iter()
                .rev()
                .filter(|document| predicate.matches(document))
                .cloned()
                .collect()
        };
        // Stable sort over newest-first input: equal keys keep the latest insert in front.
        matching.sort_by(order);
        Ok(window.slice(matching))
    }

    fn count(&self, predicate: &dyn Predicate<D>) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .filter(|document| predicate.matches(document))
            .count() as u64)
    }

    fn replace(&self, document: D) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        match guard
            .iter_mut()
            .find(|existing| existing.id() == document.id())
        {
            Some(slot) => {
                *slot = document;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn remove(&self, id: &RecordId) -> Result<Option<D>, StoreError> {
        let mut guard = self.lock()?;
        Ok(guard
            .iter()
            .position(|document| document.id() == id)
            .map(|index| guard.remove(index)))
    }

    fn modify_one<T, F>(
        &self,
        predicate: &dyn Predicate<D>,
        apply: F,
    ) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut D) -> T,
    {
        let mut guard = self.lock()?;
        Ok(guard
            .iter_mut()
            .find(|document| predicate.matches(document))
            .map(apply))
    }

    fn scan(&self) -> Result<Vec<D>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.clone())
    }
}
