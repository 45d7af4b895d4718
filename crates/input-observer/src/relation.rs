//! Cooperation and adjustment graphs over handlers.
//!
//! Both graphs store one ordered target list per (source, relation type).
//! Mapping replaces the list; the first list mapped for a pair is kept as
//! its default so `restore` can return to the initial configuration after
//! later remaps and unmaps.

use std::collections::BTreeMap;

use crate::{Affection, RelationType};

/// Directed relation graphs keyed by source handler.
#[derive(Debug, Clone)]
pub struct RelationGraph<H> {
    /// DEPEND / CAUSE / REVERT edges.
    cooperations: BTreeMap<(H, RelationType), Vec<H>>,
    /// ENABLE / DISABLE edges, per source in declaration order.
    adjustments: BTreeMap<H, BTreeMap<RelationType, Vec<H>>>,
    /// First target list mapped per pair.
    defaults: BTreeMap<(H, RelationType), Vec<H>>,
}

/// Drop repeated targets, keeping first occurrences in order.
fn dedup<H: PartialEq + Copy>(targets: &[H]) -> Vec<H> {
    let mut out: Vec<H> = Vec::with_capacity(targets.len());
    for t in targets {
        if !out.contains(t) {
            out.push(*t);
        }
    }
    out
}

impl<H: Ord + Copy> RelationGraph<H> {
    /// Empty graphs.
    pub fn new() -> Self {
        Self {
            cooperations: BTreeMap::new(),
            adjustments: BTreeMap::new(),
            defaults: BTreeMap::new(),
        }
    }

    /// Replace the target list of (handler, relation).
    pub fn map(&mut self, handler: H, relation: RelationType, targets: &[H]) {
        let list = dedup(targets);
        self.defaults
            .entry((handler, relation))
            .or_insert_with(|| list.clone());
        self.store(handler, relation, list);
    }

    /// Clear the pair, or with `targets` remove just those.
    pub fn unmap(&mut self, handler: H, relation: RelationType, targets: &[H]) {
        if targets.is_empty() {
            self.store(handler, relation, Vec::new());
            return;
        }
        let kept: Vec<H> = self
            .current(handler, relation)
            .iter()
            .copied()
            .filter(|h| !targets.contains(h))
            .collect();
        self.store(handler, relation, kept);
    }

    /// Return the pair to its default list, or with `targets` re-add just
    /// those default members.
    ///
    /// Restored members take their default positions; members added by a
    /// later remap keep their relative order after them.
    pub fn restore(&mut self, handler: H, relation: RelationType, targets: &[H]) {
        let default = self
            .defaults
            .get(&(handler, relation))
            .cloned()
            .unwrap_or_default();
        if targets.is_empty() {
            self.store(handler, relation, default);
            return;
        }
        let current = self.current(handler, relation);
        let mut list: Vec<H> = default
            .iter()
            .copied()
            .filter(|h| current.contains(h) || targets.contains(h))
            .collect();
        list.extend(current.iter().copied().filter(|h| !default.contains(h)));
        self.store(handler, relation, list);
    }

    /// Cooperators of `handler` under a DEPEND, CAUSE or REVERT relation.
    pub fn cooperations(&self, handler: H, relation: RelationType) -> &[H] {
        match relation.affection() {
            Affection::Cooperate => self.current(handler, relation),
            Affection::Enable | Affection::Disable => &[],
        }
    }

    /// Every ENABLE / DISABLE relation of `handler` in declaration order.
    pub fn adjustments(&self, handler: H) -> impl Iterator<Item = (RelationType, &[H])> + '_ {
        self.adjustments
            .get(&handler)
            .into_iter()
            .flat_map(|m| m.iter().map(|(r, t)| (*r, t.as_slice())))
    }

    /// Current list for the pair, routed by affection class.
    fn current(&self, handler: H, relation: RelationType) -> &[H] {
        let list = match relation.affection() {
            Affection::Cooperate => self.cooperations.get(&(handler, relation)),
            Affection::Enable | Affection::Disable => self
                .adjustments
                .get(&handler)
                .and_then(|m| m.get(&relation)),
        };
        list.map(Vec::as_slice).unwrap_or(&[])
    }

    /// Install `list` for the pair; an empty list removes the entry.
    fn store(&mut self, handler: H, relation: RelationType, list: Vec<H>) {
        match relation.affection() {
            Affection::Cooperate => {
                if list.is_empty() {
                    self.cooperations.remove(&(handler, relation));
                } else {
                    self.cooperations.insert((handler, relation), list);
                }
            }
            Affection::Enable | Affection::Disable => {
                let per_source = self.adjustments.entry(handler).or_default();
                if list.is_empty() {
                    per_source.remove(&relation);
                } else {
                    per_source.insert(relation, list);
                }
                if per_source.is_empty() {
                    self.adjustments.remove(&handler);
                }
            }
        }
    }
}

impl<H: Ord + Copy> Default for RelationGraph<H> {
    fn default() -> Self {
        Self::new()
    }
}
