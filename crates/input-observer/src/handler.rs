//! Handler identifiers and the closed vocabularies that key the side tables.

use std::fmt::Debug;

use input_event::SourceId;

/// A closed, ordered set of handler identifiers.
///
/// Implementors are usually fieldless enums. Each value names one logical
/// input-reaction unit and the toolkit event id it reacts to; actions,
/// relations and enablement live in side tables keyed by the value.
pub trait Handler: Copy + Ord + Debug + Send + Sync + 'static {
    /// The toolkit event id this handler is registered under.
    fn source_id(&self) -> SourceId;

    /// Every handler of this type.
    fn all() -> &'static [Self];

    /// Enablement of `mode` before any enable/disable call.
    fn initially_enabled(&self, mode: ActionMode) -> bool {
        let _ = mode;
        true
    }
}

/// Role an action plays within one dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionMode {
    /// Primary action of the matched handler.
    Perform,
    /// Run on cooperators before the primary action.
    Depend,
    /// Run on cooperators after the primary action.
    Cause,
    /// Run on cooperators after the causes.
    Revert,
}

/// Class of a relation: which graph it lives in and what it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affection {
    /// Runs other handlers' actions.
    Cooperate,
    /// Switches other handlers' modes on.
    Enable,
    /// Switches other handlers' modes off.
    Disable,
}

/// Relation from a handler to an ordered list of other handlers.
///
/// The derived ordering is the declaration order used when several
/// adjustments are applied in one dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationType {
    /// Targets run their `Depend` action before the primary.
    Depend,
    /// Targets run their `Cause` action after the primary.
    Cause,
    /// Targets run their `Revert` action after the causes.
    Revert,
    /// The given mode of every target is enabled.
    Enable(ActionMode),
    /// The given mode of every target is disabled.
    Disable(ActionMode),
}

impl RelationType {
    /// The relation's class.
    pub fn affection(self) -> Affection {
        match self {
            Self::Depend | Self::Cause | Self::Revert => Affection::Cooperate,
            Self::Enable(_) => Affection::Enable,
            Self::Disable(_) => Affection::Disable,
        }
    }

    /// Mode run on (cooperation) or toggled for (adjustment) each target.
    pub fn affected_mode(self) -> ActionMode {
        match self {
            Self::Depend => ActionMode::Depend,
            Self::Cause => ActionMode::Cause,
            Self::Revert => ActionMode::Revert,
            Self::Enable(mode) | Self::Disable(mode) => mode,
        }
    }

    /// For adjustments, the mode and the flag value they set.
    pub fn adjustment(self) -> Option<(ActionMode, bool)> {
        match self {
            Self::Enable(mode) => Some((mode, true)),
            Self::Disable(mode) => Some((mode, false)),
            Self::Depend | Self::Cause | Self::Revert => None,
        }
    }
}
