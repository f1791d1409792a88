/// User configuration — persisted as TOML in a host-supplied directory.
///
/// The host hands us its per-plugin config directory; we own only the
/// `config.toml` inside it. The decision logic treats this as a read-only
/// rule store; all mutation happens through the host's configuration surface
/// calling the helpers below, followed by `save`.
use crate::evaluator::HighlightOptions;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// AntsConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntsConfig {
    /// Only show custom ants while in combat.
    #[serde(default)]
    pub show_only_in_combat: bool,

    /// Only show custom ants for actions the character can already use.
    #[serde(default)]
    pub show_only_usable_actions: bool,

    /// Charged abilities only get ants for the final charge.
    #[serde(default)]
    pub ant_on_final_stack: bool,

    /// Lead time applied when an ability is newly activated, in ms.
    #[serde(default = "default_pre_ant_time_ms")]
    pub pre_ant_time_ms: u32,

    /// Ability id → pre-ant lead time in ms. Presence of a key is what opts
    /// the ability into highlighting.
    #[serde(default, with = "id_keys")]
    pub active_actions: HashMap<u32, u32>,
}

/// TOML only allows string table keys, so the id map is persisted with its
/// keys rendered as decimal strings (sorted, for stable files).
mod id_keys {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::{BTreeMap, HashMap};

    pub fn serialize<S: Serializer>(map: &HashMap<u32, u32>, ser: S) -> Result<S::Ok, S::Error> {
        let by_key: BTreeMap<String, u32> =
            map.iter().map(|(id, ms)| (id.to_string(), *ms)).collect();
        by_key.serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<HashMap<u32, u32>, D::Error> {
        let by_key = BTreeMap::<String, u32>::deserialize(de)?;
        by_key
            .into_iter()
            .map(|(id, ms)| {
                id.parse::<u32>()
                    .map(|id| (id, ms))
                    .map_err(|_| serde::de::Error::custom(format!("invalid ability id '{}'", id)))
            })
            .collect()
    }
}

fn default_pre_ant_time_ms() -> u32 { 5_000 }

impl Default for AntsConfig {
    fn default() -> Self {
        Self {
            show_only_in_combat:      false,
            show_only_usable_actions: false,
            ant_on_final_stack:       false,
            pre_ant_time_ms:          default_pre_ant_time_ms(),
            active_actions:           HashMap::new(),
        }
    }
}

impl AntsConfig {
    /// The switches the evaluator reads, detached from the persisted form.
    pub fn options(&self) -> HighlightOptions {
        HighlightOptions {
            only_in_combat:     self.show_only_in_combat,
            only_usable:        self.show_only_usable_actions,
            ant_on_final_stack: self.ant_on_final_stack,
        }
    }

    /// Lead time for one ability, if the user opted it in.
    pub fn pre_ant_ms(&self, action_id: u32) -> Option<u32> {
        self.active_actions.get(&action_id).copied()
    }

    /// Opt an ability in at the default lead time. Keeps an existing
    /// per-ability value if the ability was already active.
    pub fn activate(&mut self, action_id: u32) {
        self.active_actions
            .entry(action_id)
            .or_insert(self.pre_ant_time_ms);
    }

    pub fn deactivate(&mut self, action_id: u32) {
        self.active_actions.remove(&action_id);
    }

    pub fn set_pre_ant_ms(&mut self, action_id: u32, ms: u32) {
        self.active_actions.insert(action_id, ms);
    }

    /// Overwrite every saved lead time with one value (the bulk edit in the
    /// configuration window).
    pub fn set_all_pre_ant_ms(&mut self, ms: u32) {
        for value in self.active_actions.values_mut() {
            *value = ms;
        }
    }
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

pub fn load_or_default(config_dir: &Path) -> Result<AntsConfig> {
    let path = config_dir.join("config.toml");
    if path.exists() {
        let raw = std::fs::read_to_string(&path)?;
        let cfg: AntsConfig =
            toml::from_str(&raw).map_err(|e| anyhow::anyhow!("Config parse error: {}", e))?;
        tracing::debug!("Config loaded: {} active abilities", cfg.active_actions.len());
        Ok(cfg)
    } else {
        tracing::info!("No config at {:?} — starting from defaults", path);
        Ok(AntsConfig::default())
    }
}

pub fn save(config: &AntsConfig, config_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(config_dir)?;
    let raw = toml::to_string_pretty(config)
        .map_err(|e| anyhow::anyhow!("Config serialize error: {}", e))?;
    std::fs::write(config_dir.join("config.toml"), raw)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_config() {
        let dir = tempdir().unwrap();
        let mut cfg = AntsConfig::default();
        cfg.show_only_in_combat = true;
        cfg.pre_ant_time_ms = 3_000;
        cfg.set_pre_ant_ms(7383, 6_000);
        cfg.set_pre_ant_ms(16461, 2_500);

        save(&cfg, dir.path()).unwrap();

        let loaded = load_or_default(dir.path()).unwrap();
        assert!(loaded.show_only_in_combat);
        assert_eq!(loaded.pre_ant_time_ms, 3_000);
        assert_eq!(loaded.pre_ant_ms(7383), Some(6_000));
        assert_eq!(loaded.pre_ant_ms(16461), Some(2_500));
        assert_eq!(loaded.pre_ant_ms(20), None);
    }

    #[test]
    fn returns_default_when_missing() {
        let dir = tempdir().unwrap();
        let cfg = load_or_default(dir.path()).unwrap();
        assert_eq!(cfg.pre_ant_time_ms, 5_000);
        assert!(cfg.active_actions.is_empty());
        assert!(!cfg.show_only_in_combat);
    }

    #[test]
    fn activate_uses_default_and_keeps_existing() {
        let mut cfg = AntsConfig::default();
        cfg.activate(20);
        assert_eq!(cfg.pre_ant_ms(20), Some(5_000));

        cfg.set_pre_ant_ms(20, 1_000);
        cfg.activate(20); // re-activating must not clobber the tuned value
        assert_eq!(cfg.pre_ant_ms(20), Some(1_000));

        cfg.deactivate(20);
        assert_eq!(cfg.pre_ant_ms(20), None);
    }

    #[test]
    fn bulk_edit_overwrites_every_entry() {
        let mut cfg = AntsConfig::default();
        cfg.set_pre_ant_ms(20, 1_000);
        cfg.set_pre_ant_ms(30, 9_000);
        cfg.set_all_pre_ant_ms(4_000);
        assert_eq!(cfg.pre_ant_ms(20), Some(4_000));
        assert_eq!(cfg.pre_ant_ms(30), Some(4_000));
    }

    #[test]
    fn options_mirror_switches() {
        let mut cfg = AntsConfig::default();
        cfg.show_only_in_combat = true;
        cfg.ant_on_final_stack = true;
        let opts = cfg.options();
        assert!(opts.only_in_combat);
        assert!(!opts.only_usable);
        assert!(opts.ant_on_final_stack);
    }
}
