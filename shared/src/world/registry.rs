use std::collections::HashSet;

use log::trace;

use crate::types::ObjectId;

/// The live list of objects tracked for the local Scene
pub struct ObjectRegistry {
    objects: Vec<ObjectId>,
    index: HashSet<ObjectId>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Returns false if the object was already tracked
    pub fn insert(&mut self, id: ObjectId) -> bool {
        if !self.index.insert(id) {
            return false;
        }
        trace!("ObjectRegistry: tracking {:?}", id);
        self.objects.push(id);
        true
    }

    /// Returns false if the object was not tracked
    pub fn remove(&mut self, id: &ObjectId) -> bool {
        if !self.index.remove(id) {
            return false;
        }
        trace!("ObjectRegistry: untracking {:?}", id);
        if let Some(position) = self.objects.iter().position(|tracked| tracked == id) {
            self.objects.remove(position);
        }
        true
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.index.contains(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectId> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.index.clear();
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
