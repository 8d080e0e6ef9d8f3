use serde::Deserialize;
use std::collections::BTreeMap;

/// One hero line in the bot config file. `spell_order` is the comma-joined,
/// one-based list the game community writes by hand ("1,3,2").
#[derive(Debug, Clone, Deserialize)]
pub struct HeroEntry {
    pub rank: u32,
    pub spell_order: String,
    pub priority: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfigFile {
    #[serde(default)]
    pub auto_restart: bool,
    #[serde(default)]
    pub early_stop: bool,
    #[serde(default)]
    pub screenshot_reward: bool,
    #[serde(default)]
    pub is_screenshot: bool,
    #[serde(default)]
    pub auto_tasks: bool,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    pub longest_waiting_secs: u64,
    pub boss_id: usize,
    pub team_id: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Keyed by card id; a BTreeMap keeps hero iteration order stable.
    pub hero: BTreeMap<String, HeroEntry>,
}

fn default_confidence() -> f32 {
    0.8
}

fn default_delay_ms() -> u64 {
    500
}

fn default_seed() -> u64 {
    0xC0FFEE
}
