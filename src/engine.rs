/// Host-facing gate — the injection point the host's native highlight hook
/// calls once per action-bar slot per frame.
///
/// The host passes its own verdict first; we only ever turn a highlight ON,
/// never suppress one the game already draws. Anything we cannot resolve
/// (unknown slot kind, no rule, no metadata) falls back to that verdict so a
/// single odd slot can never destabilise the frame.
use crate::catalog::ActionCatalog;
use crate::config::AntsConfig;
use crate::evaluator::{should_highlight, EvalContext};
use crate::telemetry::{PlayerSnapshot, RecastSource};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// What kind of thing occupies the bar slot being drawn. Only `Action` slots
/// carry cooldown rules; everything else keeps the host's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Action,
    Item,
    General,
    CraftAction,
    Mount,
}

pub struct HighlightEngine {
    config:  AntsConfig,
    catalog: ActionCatalog,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

impl HighlightEngine {
    pub fn new(config: AntsConfig, catalog: ActionCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &AntsConfig {
        &self.config
    }

    /// Replace the live config after the host's settings window saves.
    pub fn set_config(&mut self, config: AntsConfig) {
        self.config = config;
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    /// Decide the highlight for one slot this frame.
    ///
    /// `host_result` is what the game itself decided; `player` is `None`
    /// while logged out.
    pub fn check(
        &self,
        kind:        SlotKind,
        action_id:   u32,
        host_result: bool,
        source:      &dyn RecastSource,
        player:      Option<&PlayerSnapshot>,
    ) -> bool {
        let Some(player) = player else {
            return false;
        };
        if host_result || kind != SlotKind::Action {
            return host_result;
        }

        let Some(pre_ant_ms) = self.config.pre_ant_ms(action_id) else {
            return host_result;
        };
        let Some(action) = self.catalog.get(action_id) else {
            tracing::trace!("No metadata for active ability {}", action_id);
            return host_result;
        };

        let telemetry = source.action_recast(action_id);
        let options = self.config.options();
        let ctx = EvalContext { options: &options, player };
        should_highlight(action, pre_ant_ms, &telemetry, source, &ctx)
    }
}
