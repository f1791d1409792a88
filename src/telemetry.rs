/// Live timer telemetry supplied by the host each evaluation.
///
/// The host's action manager owns every timer; this crate only reads
/// snapshots of them. Nothing here is retained across calls — the gate asks
/// the `RecastSource` fresh on every frame, for every highlighted slot.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Per-action recast snapshot
// ---------------------------------------------------------------------------

/// Timer state for one action's own recast, plus its charge cap at the
/// player's current level (0 = the action does not use charges).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RecastTelemetry {
    /// Whether the action's recast timer is currently counting down.
    pub is_active:        bool,
    /// Full recast duration in seconds.
    pub recast_time_s:    f32,
    /// Seconds already elapsed on the current recast cycle.
    pub recast_elapsed_s: f32,
    pub max_charges:      u16,
}

// ---------------------------------------------------------------------------
// Shared cooldown-group timer
// ---------------------------------------------------------------------------

/// State of one shared cooldown-group slot. Several abilities may draw from
/// the same slot; charge replenishment is computed from its progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupTimer {
    pub is_active: bool,
    pub elapsed_s: f32,
    pub total_s:   f32,
}

// ---------------------------------------------------------------------------
// Host seam
// ---------------------------------------------------------------------------

/// Implemented by the host over its native action manager. All three lookups
/// are synchronous reads of live state; `None` means the host could not
/// resolve the slot, which the evaluator treats as "no charges available"
/// rather than an error.
pub trait RecastSource {
    /// Recast snapshot for a specific action at the player's current level.
    fn action_recast(&self, action_id: u32) -> RecastTelemetry;

    /// Index of the shared cooldown group driving charge replenishment for
    /// this action (the host computes it for cooldown class 1 and the
    /// action's row id).
    fn charge_group_of(&self, action_id: u32) -> Option<u8>;

    /// Live timer for a shared cooldown-group slot.
    fn group_timer(&self, group: u8) -> Option<GroupTimer>;
}

// ---------------------------------------------------------------------------
// Player state flags
// ---------------------------------------------------------------------------

/// The slice of live character state the decision logic reads. Supplied by
/// the host's game-state accessor; absent entirely while logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub level:     u8,
    pub in_combat: bool,
}

// ---------------------------------------------------------------------------
// Test stub
// ---------------------------------------------------------------------------
