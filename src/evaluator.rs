/// Decides whether one ability should show the pre-ready "ants" border.
///
/// Pure and stateless: re-evaluated from fresh inputs on every frame, keeps
/// nothing between calls, and never fails — a timer the host cannot resolve
/// simply counts as "no charges available". This runs inside the host's
/// per-frame draw path, so it is a handful of comparisons and one division.
use crate::catalog::ActionInfo;
use crate::telemetry::{PlayerSnapshot, RecastSource, RecastTelemetry};

/// Cooldown group whose charge timer lives in the additional-group slot
/// instead of the one computed from the action row. A quirk of the source
/// data model; callers rely on this branch matching the game exactly.
pub const CHARGE_ALIAS_GROUP: u8 = 58;

// ---------------------------------------------------------------------------
// Evaluation context
// ---------------------------------------------------------------------------

/// User-level switches applied before any per-ability logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Never highlight outside combat.
    pub only_in_combat:     bool,
    /// Never highlight abilities above the character's level.
    pub only_usable:        bool,
    /// For charge abilities, only telegraph the final charge.
    pub ant_on_final_stack: bool,
}

/// Read-only context passed to every evaluation.
pub struct EvalContext<'a> {
    pub options: &'a HighlightOptions,
    pub player:  &'a PlayerSnapshot,
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Should this ability show the ants border right now?
///
/// `pre_ant_ms` is the user's lead time for this ability: the highlight turns
/// on once the remaining recast drops to that many milliseconds (compared at
/// whole-second resolution, matching the game's own display granularity).
pub fn should_highlight(
    action:     &ActionInfo,
    pre_ant_ms: u32,
    telemetry:  &RecastTelemetry,
    source:     &dyn RecastSource,
    ctx:        &EvalContext,
) -> bool {
    if ctx.options.only_in_combat && !ctx.player.in_combat {
        return false;
    }
    if ctx.options.only_usable && action.class_job_level > ctx.player.level {
        return false;
    }

    // Fully available non-charge ability: nothing to telegraph.
    if telemetry.max_charges == 0 && !telemetry.is_active {
        return true;
    }

    let mut recast_time_s = telemetry.recast_time_s;
    if telemetry.max_charges > 0 && !ctx.options.ant_on_final_stack {
        if available_charges(action, telemetry.max_charges, source) > 0 {
            return true;
        }
        recast_time_s /= telemetry.max_charges as f32;
    }

    let time_left_s = recast_time_s - telemetry.recast_elapsed_s;
    time_left_s <= (pre_ant_ms / 1000) as f32
}

/// Charges currently usable, derived from the shared cooldown-group timer.
///
/// Resolution failures (unknown group, missing timer slot, degenerate total)
/// all report zero charges — the frame must never be destabilised by one
/// ability's missing data, even if that hides a data inconsistency upstream.
pub fn available_charges(
    action:      &ActionInfo,
    max_charges: u16,
    source:      &dyn RecastSource,
) -> u16 {
    if max_charges == 0 {
        return 0;
    }

    let group = if action.cooldown_group == CHARGE_ALIAS_GROUP {
        Some(action.additional_cooldown_group)
    } else {
        source.charge_group_of(action.id)
    };
    let Some(timer) = group.and_then(|g| source.group_timer(g)) else {
        return 0;
    };

    if !timer.is_active {
        return max_charges;
    }
    if timer.total_s <= 0.0 {
        return 0;
    }
    (max_charges as f32 * (timer.elapsed_s / timer.total_s)) as u16
}
