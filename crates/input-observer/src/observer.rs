//! The dispatch engine.

use std::sync::Arc;

use input_event::{CANCEL_KEYS, CANCEL_MOUSE, EngineEvent, SourceEvent};
use tracing::{debug, error, trace, warn};

use crate::{
    ActionMode, Error, Handler, RelationType, Result,
    action::ActionTable,
    enablement::Enablement,
    key_latch::KeyLatch,
    pointer::{self, CursorShape, Surface},
    registry::Registry,
    relation::RelationGraph,
};

/// Executable bound to a (handler, mode) pair.
///
/// Actions receive the observer so they can feed events, flip enablement or
/// reshape the rule graph. They must not block.
pub type Action<H, E> = Arc<dyn Fn(&mut Observer<H, E>, &E) -> Result<()> + Send + Sync>;

/// Consumer of the events the observer produces.
type Consumer = Box<dyn FnMut(EngineEvent) + Send>;

/// Routes toolkit events through a per-handler rule graph into an engine.
///
/// Feed toolkit events to [`Observer::observe`]. For the matched handler the
/// observer runs, in this fixed order:
///
/// 1. the `Depend` action of every DEPEND cooperator,
/// 2. the handler's own `Perform` action,
/// 3. every ENABLE / DISABLE adjustment,
/// 4. the `Cause` action of every CAUSE cooperator,
/// 5. the `Revert` action of every REVERT cooperator.
///
/// Each action runs only if bound and enabled. A failing action is logged and
/// the remaining actions still run. Actions emit output through
/// [`Observer::feed`].
pub struct Observer<H, E> {
    /// Origin label passed to the key latch.
    name: String,
    /// Handler lookup by source id.
    registry: Registry<H>,
    /// Bound actions.
    actions: ActionTable<H, Action<H, E>>,
    /// Cooperation and adjustment graphs.
    relations: RelationGraph<H>,
    /// Per (handler, mode) flags.
    enablement: Enablement<H>,
    /// Key state, shareable with reader threads.
    latch: Arc<KeyLatch>,
    /// Downstream engine queue.
    consumer: Consumer,
    /// Toolkit component for the cursor helpers.
    surface: Option<Box<dyn Surface>>,
}

impl<H: Handler, E: SourceEvent + 'static> Observer<H, E> {
    /// Observer over every handler of `H`, feeding `consumer`.
    pub fn new<C>(consumer: C) -> Result<Self>
    where
        C: FnMut(EngineEvent) + Send + 'static,
    {
        Ok(Self::with_registry(Registry::from_all()?, consumer))
    }

    /// Observer over an explicit registry.
    pub fn with_registry<C>(registry: Registry<H>, consumer: C) -> Self
    where
        C: FnMut(EngineEvent) + Send + 'static,
    {
        Self {
            name: "observer".to_string(),
            registry,
            actions: ActionTable::new(),
            relations: RelationGraph::new(),
            enablement: Enablement::new(),
            latch: Arc::new(KeyLatch::new()),
            consumer: Box::new(consumer),
            surface: None,
        }
    }

    /// Label this observer in key latch traces.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach the toolkit surface used by the cursor helpers.
    pub fn with_surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Share a key latch with other observers or reader threads.
    pub fn with_latch(mut self, latch: Arc<KeyLatch>) -> Self {
        self.latch = latch;
        self
    }

    /// Observer label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The handler registry.
    pub fn registry(&self) -> &Registry<H> {
        &self.registry
    }

    /// The relation graphs.
    pub fn relations(&self) -> &RelationGraph<H> {
        &self.relations
    }

    /// Handle to the key latch for reader threads.
    pub fn latch(&self) -> Arc<KeyLatch> {
        self.latch.clone()
    }

    /// Dispatch one toolkit event.
    pub fn observe(&mut self, event: &E) {
        let source_id = event.source_id();
        let Some(handler) = self.registry.find_by_id(source_id) else {
            trace!(source_id, "observe_unhandled");
            return;
        };
        if !self.enablement.is_enabled(handler, ActionMode::Perform) {
            trace!(?handler, "observe_disabled");
            return;
        }
        trace!(?handler, source_id, "observe");

        self.run_cooperations(handler, RelationType::Depend, event);
        self.run(handler, ActionMode::Perform, event);
        self.apply_adjustments(handler);
        self.run_cooperations(handler, RelationType::Cause, event);
        self.run_cooperations(handler, RelationType::Revert, event);
    }

    /// Hand an event to the engine.
    ///
    /// Key events pass through the latch and repeats of the current key state
    /// are dropped, as are key events whose payload is not a scancode.
    /// [`CANCEL_KEYS`] also releases every latched key.
    pub fn feed(&mut self, event: EngineEvent) {
        if event == CANCEL_KEYS {
            let released = self.latch.release_all();
            trace!(released, "latch_reset");
        }
        if event.is_key() {
            let Some(sc) = event.scancode() else {
                error!(kind = ?event.kind, data1 = event.data1, "key_out_of_range");
                return;
            };
            if !self
                .latch
                .notify_key_change(&self.name, sc, event.is_key_down())
            {
                trace!(sc, "key_repeat_suppressed");
                return;
            }
        }
        (self.consumer)(event);
    }

    /// Run the cooperators of `handler` under a cooperation relation.
    fn run_cooperations(&mut self, handler: H, relation: RelationType, event: &E) {
        let mode = relation.affected_mode();
        // Snapshot: actions may remap relations mid-dispatch.
        let targets = self.relations.cooperations(handler, relation).to_vec();
        for target in targets {
            trace!(?handler, ?target, ?mode, "cooperate");
            self.run(target, mode, event);
        }
    }

    /// Apply every ENABLE / DISABLE relation of `handler`.
    fn apply_adjustments(&mut self, handler: H) {
        for (relation, targets) in self.relations.adjustments(handler) {
            let Some((mode, enabled)) = relation.adjustment() else {
                continue;
            };
            for target in targets {
                self.enablement.set(*target, mode, enabled);
                trace!(?relation, ?target, ?mode, "adjust");
            }
        }
    }

    /// Run one action if bound and enabled, logging its failure.
    fn run(&mut self, handler: H, mode: ActionMode, event: &E) {
        if !self.enablement.is_enabled(handler, mode) {
            trace!(?handler, ?mode, "action_disabled");
            return;
        }
        let Some(action) = self.actions.get(handler, mode).cloned() else {
            trace!(?handler, ?mode, "action_unmapped");
            return;
        };
        if let Err(e) = action(self, event) {
            if e.is_type_mismatch() {
                error!(?handler, ?mode, error = %e, "action_failed");
            } else {
                warn!(?handler, ?mode, error = %e, "action_failed");
            }
        }
    }

    /// True if `mode` of `handler` may run.
    pub fn is_enabled(&self, handler: H, mode: ActionMode) -> bool {
        self.enablement.is_enabled(handler, mode)
    }

    /// Allow `mode` of `handler` to run.
    pub fn enable_action(&mut self, handler: H, mode: ActionMode) {
        self.enablement.set(handler, mode, true);
        debug!(?handler, ?mode, "action_enable");
    }

    /// Stop `mode` of `handler` from running.
    pub fn disable_action(&mut self, handler: H, mode: ActionMode) {
        self.enablement.set(handler, mode, false);
        debug!(?handler, ?mode, "action_disable");
    }

    /// Bind an action to an unbound pair.
    ///
    /// Fails with [`Error::ActionAlreadyMapped`] if the pair is bound; use
    /// [`Observer::remap_action`] to replace a binding.
    pub fn map_action<F>(&mut self, handler: H, mode: ActionMode, action: F) -> Result<()>
    where
        F: Fn(&mut Self, &E) -> Result<()> + Send + Sync + 'static,
    {
        if !self.actions.map(handler, mode, Arc::new(action)) {
            return Err(Error::ActionAlreadyMapped {
                handler: format!("{handler:?}"),
                mode,
            });
        }
        debug!(?handler, ?mode, "action_map");
        Ok(())
    }

    /// Bind an action, replacing any current binding.
    pub fn remap_action<F>(&mut self, handler: H, mode: ActionMode, action: F)
    where
        F: Fn(&mut Self, &E) -> Result<()> + Send + Sync + 'static,
    {
        self.actions.remap(handler, mode, Arc::new(action));
        debug!(?handler, ?mode, "action_remap");
    }

    /// Clear the binding of a pair.
    pub fn unmap_action(&mut self, handler: H, mode: ActionMode) {
        let had = self.actions.unmap(handler, mode).is_some();
        debug!(?handler, ?mode, had, "action_unmap");
    }

    /// Rebind the action a pair was first configured with.
    pub fn restore_action(&mut self, handler: H, mode: ActionMode) {
        let restored = self.actions.restore(handler, mode);
        debug!(?handler, ?mode, restored, "action_restore");
    }

    /// True if the pair has a binding.
    pub fn is_mapped(&self, handler: H, mode: ActionMode) -> bool {
        self.actions.is_mapped(handler, mode)
    }

    /// Replace the targets of a relation.
    pub fn map_relation(&mut self, handler: H, relation: RelationType, targets: &[H]) {
        self.relations.map(handler, relation, targets);
        debug!(?handler, ?relation, ?targets, "relation_map");
    }

    /// Clear a relation, or remove just `targets` from it.
    pub fn unmap_relation(&mut self, handler: H, relation: RelationType, targets: &[H]) {
        self.relations.unmap(handler, relation, targets);
        debug!(?handler, ?relation, ?targets, "relation_unmap");
    }

    /// Return a relation to its first-configured targets, or re-add just
    /// `targets` from them.
    pub fn restore_relation(&mut self, handler: H, relation: RelationType, targets: &[H]) {
        self.relations.restore(handler, relation, targets);
        debug!(?handler, ?relation, ?targets, "relation_restore");
    }

    /// Action: make the engine drop all held keys.
    pub fn cancel_keys(&mut self, _event: &E) -> Result<()> {
        self.feed(CANCEL_KEYS);
        Ok(())
    }

    /// Action: make the engine drop mouse state.
    pub fn cancel_mouse(&mut self, _event: &E) -> Result<()> {
        self.feed(CANCEL_MOUSE);
        Ok(())
    }

    /// Action: feed a key press for the event's key and consume the event.
    pub fn send_key_down(&mut self, event: &E) -> Result<()> {
        let sc = event.scancode().ok_or(Error::MissingKeyPayload {
            source_id: event.source_id(),
        })?;
        self.feed(EngineEvent::key_down(sc));
        self.discard_input_event(event)
    }

    /// Action: feed a key release for the event's key and consume the event.
    pub fn send_key_up(&mut self, event: &E) -> Result<()> {
        let sc = event.scancode().ok_or(Error::MissingKeyPayload {
            source_id: event.source_id(),
        })?;
        self.feed(EngineEvent::key_up(sc));
        self.discard_input_event(event)
    }

    /// Action: stop the toolkit from propagating the event further.
    pub fn discard_input_event(&mut self, event: &E) -> Result<()> {
        if event.consume() {
            Ok(())
        } else {
            Err(Error::NotConsumable {
                source_id: event.source_id(),
            })
        }
    }

    /// Action: hide the cursor over the surface.
    pub fn modify_cursor(&mut self, _event: &E) -> Result<()> {
        if let Some(surface) = &self.surface {
            surface.set_cursor(CursorShape::Hidden);
        }
        Ok(())
    }

    /// Action: bring back the surface's initial cursor.
    pub fn restore_cursor(&mut self, _event: &E) -> Result<()> {
        if let Some(surface) = &self.surface {
            surface.set_cursor(CursorShape::Initial);
        }
        Ok(())
    }

    /// Action: warp the pointer to the centre of the surface and hide it.
    ///
    /// Warping needs a showing surface and the process-wide warp capability;
    /// without either only the cursor is hidden.
    pub fn centre_cursor(&mut self, event: &E) -> Result<()> {
        let mut warped = Ok(());
        if let Some(surface) = &self.surface
            && let Some((x, y)) = surface.screen_origin()
            && let Some(warp) = pointer::warp()
        {
            let (width, height) = surface.size();
            warped = warp.warp_to(x.saturating_add(width >> 1), y.saturating_add(height >> 1));
        }
        self.modify_cursor(event)?;
        warped
    }
}
