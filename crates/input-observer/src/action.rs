//! Per (handler, mode) storage of executable actions.

use std::collections::BTreeMap;

use crate::ActionMode;

/// Bound actions plus the binding each pair was first configured with.
#[derive(Debug, Clone)]
pub struct ActionTable<H, A> {
    /// Current bindings.
    bound: BTreeMap<(H, ActionMode), A>,
    /// First binding ever installed per pair; target of `restore`.
    defaults: BTreeMap<(H, ActionMode), A>,
}

impl<H: Ord + Copy, A: Clone> ActionTable<H, A> {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            bound: BTreeMap::new(),
            defaults: BTreeMap::new(),
        }
    }

    /// Bind `action` only if the pair is unbound. Returns false if it was bound.
    pub fn map(&mut self, handler: H, mode: ActionMode, action: A) -> bool {
        if self.bound.contains_key(&(handler, mode)) {
            return false;
        }
        self.remap(handler, mode, action);
        true
    }

    /// Bind `action`, replacing any current binding.
    pub fn remap(&mut self, handler: H, mode: ActionMode, action: A) {
        self.defaults
            .entry((handler, mode))
            .or_insert_with(|| action.clone());
        self.bound.insert((handler, mode), action);
    }

    /// Clear the binding, returning what was bound.
    pub fn unmap(&mut self, handler: H, mode: ActionMode) -> Option<A> {
        self.bound.remove(&(handler, mode))
    }

    /// Rebind the first-configured action. Returns false if the pair never had one.
    pub fn restore(&mut self, handler: H, mode: ActionMode) -> bool {
        match self.defaults.get(&(handler, mode)) {
            Some(action) => {
                self.bound.insert((handler, mode), action.clone());
                true
            }
            None => false,
        }
    }

    /// Current binding for the pair.
    pub fn get(&self, handler: H, mode: ActionMode) -> Option<&A> {
        self.bound.get(&(handler, mode))
    }

    /// True if the pair has a binding.
    pub fn is_mapped(&self, handler: H, mode: ActionMode) -> bool {
        self.bound.contains_key(&(handler, mode))
    }
}

impl<H: Ord + Copy, A: Clone> Default for ActionTable<H, A> {
    fn default() -> Self {
        Self::new()
    }
}
