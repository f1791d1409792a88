/// Static ability metadata — embedded at compile time from `data/actions/*.toml`.
///
/// The tables are a filtered snapshot of the game's action sheet holding only
/// the fields the highlight logic reads. They are parsed once into an
/// immutable `ActionCatalog` at startup; the engine borrows it for every
/// per-frame lookup, so no lookup allocates.
///
/// Which actions qualify mirrors the in-game action bar rules:
///   - not PvP, flagged as a player action, and either in the "ability"
///     category or carrying a recast longer than 10 seconds; or
///   - explicitly whitelisted for a job (the card actions lack the
///     player-action flag in the sheet and only surface this way); or
///   - a role action with a non-zero level requirement.
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Embedded TOML data
// ---------------------------------------------------------------------------

const PALADIN:     &str = include_str!("../data/actions/paladin.toml");
const ASTROLOGIAN: &str = include_str!("../data/actions/astrologian.toml");
const MACHINIST:   &str = include_str!("../data/actions/machinist.toml");
const ROLE:        &str = include_str!("../data/actions/role.toml");

static ALL_TABLES: &[(&str, &str)] = &[
    ("paladin", PALADIN),
    ("astrologian", ASTROLOGIAN),
    ("machinist", MACHINIST),
    ("role", ROLE),
];

/// Actions that must appear in a job's listing even though they fail the
/// standard filters. Keyed by job id; ids must exist in the embedded tables.
static JOB_ACTION_WHITELIST: Lazy<HashMap<u32, Vec<u32>>> = Lazy::new(|| {
    HashMap::from([(
        33,
        vec![7444, 7445, 37018, 37023, 37024, 37025, 37026, 37027, 37028],
    )])
});

/// Present in the sheet and resolvable by id, but never listed per job.
const UNLISTED_ROW: u32 = 29581;

/// The "ability" row of the action category sheet.
const CATEGORY_ABILITY: u8 = 4;

// ---------------------------------------------------------------------------
// TOML deserialization structs (private)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TomlFile {
    job:     Option<TomlJob>,
    actions: Vec<TomlAction>,
}

#[derive(Deserialize)]
struct TomlJob {
    id:           u32,
    name:         String,
    abbreviation: String,
}

#[derive(Deserialize)]
struct TomlAction {
    id:             u32,
    name:           String,
    level:          u8,
    category:       u8,
    recast_100ms:   u16,
    cooldown_group: u8,
    #[serde(default)]
    additional_cooldown_group: u8,
    #[serde(default)]
    pvp:            bool,
    #[serde(default = "default_true")]
    player_action:  bool,
    #[serde(default)]
    role_action:    bool,
}

fn default_true() -> bool { true }

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse embedded action table '{table}': {source}")]
    Parse {
        table:  &'static str,
        source: toml::de::Error,
    },
}

/// One row of ability metadata, read-only after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInfo {
    pub id:               u32,
    pub name:             String,
    /// Owning job row; `None` for role actions.
    pub job:              Option<u32>,
    pub class_job_level:  u8,
    pub category:         u8,
    pub recast_100ms:     u16,
    pub cooldown_group:   u8,
    /// Secondary cooldown-group slot; group 58 aliases its charge timer here.
    pub additional_cooldown_group: u8,
    pub is_pvp:           bool,
    pub is_player_action: bool,
    pub is_role_action:   bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInfo {
    pub id:           u32,
    pub name:         String,
    pub abbreviation: String,
}

/// Immutable id-keyed lookup plus the sorted listings the host's
/// configuration surface iterates.
#[derive(Debug)]
pub struct ActionCatalog {
    by_id:        HashMap<u32, ActionInfo>,
    jobs:         Vec<JobInfo>,
    job_actions:  HashMap<u32, Vec<u32>>,
    role_actions: Vec<u32>,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

fn highlightable(a: &ActionInfo) -> bool {
    !a.is_pvp
        && a.is_player_action
        && (a.category == CATEGORY_ABILITY || a.recast_100ms > 100)
}

fn whitelisted(job: Option<u32>, action_id: u32) -> bool {
    job.and_then(|j| JOB_ACTION_WHITELIST.get(&j))
        .is_some_and(|ids| ids.contains(&action_id))
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

impl ActionCatalog {
    /// Parse every embedded table and build the catalog. Called once at
    /// startup; the result never changes afterwards.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_tables(ALL_TABLES)
    }

    fn from_tables(tables: &[(&'static str, &str)]) -> Result<Self, CatalogError> {
        let mut by_id: HashMap<u32, ActionInfo> = HashMap::new();
        let mut jobs: Vec<JobInfo> = Vec::new();
        let mut job_actions: HashMap<u32, Vec<u32>> = HashMap::new();
        let mut role_actions: Vec<u32> = Vec::new();

        for &(table, raw) in tables {
            let file: TomlFile = toml::from_str(raw)
                .map_err(|source| CatalogError::Parse { table, source })?;

            let job_id = file.job.as_ref().map(|j| j.id);
            if let Some(j) = file.job {
                jobs.push(JobInfo { id: j.id, name: j.name, abbreviation: j.abbreviation });
            }

            for row in file.actions {
                let info = ActionInfo {
                    id:               row.id,
                    name:             row.name,
                    job:              job_id,
                    class_job_level:  row.level,
                    category:         row.category,
                    recast_100ms:     row.recast_100ms,
                    cooldown_group:   row.cooldown_group,
                    additional_cooldown_group: row.additional_cooldown_group,
                    is_pvp:           row.pvp,
                    is_player_action: row.player_action,
                    is_role_action:   row.role_action,
                };

                let keep = highlightable(&info)
                    || whitelisted(job_id, info.id)
                    || (info.is_role_action && info.class_job_level != 0);
                if !keep {
                    continue;
                }

                if info.is_role_action {
                    role_actions.push(info.id);
                } else if let Some(j) = job_id {
                    if info.id != UNLISTED_ROW {
                        job_actions.entry(j).or_default().push(info.id);
                    }
                }
                by_id.insert(info.id, info);
            }
        }

        jobs.sort_by(|a, b| a.name.cmp(&b.name));
        let name_of = |id: &u32| by_id[id].name.as_str();
        for ids in job_actions.values_mut() {
            ids.sort_by(|a, b| name_of(a).cmp(name_of(b)));
        }
        role_actions.sort_by(|a, b| name_of(a).cmp(name_of(b)));

        tracing::info!(
            "Action catalog loaded: {} actions, {} jobs, {} role actions",
            by_id.len(),
            jobs.len(),
            role_actions.len()
        );

        Ok(Self { by_id, jobs, job_actions, role_actions })
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

impl ActionCatalog {
    pub fn get(&self, action_id: u32) -> Option<&ActionInfo> {
        self.by_id.get(&action_id)
    }

    /// Jobs with embedded tables, sorted by name.
    pub fn jobs(&self) -> &[JobInfo] {
        &self.jobs
    }

    /// Listing for one job, sorted by action name. Empty for unknown jobs.
    pub fn job_actions(&self, job_id: u32) -> &[u32] {
        self.job_actions.get(&job_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Role actions shared across jobs, sorted by name.
    pub fn role_actions(&self) -> &[u32] {
        &self.role_actions
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
