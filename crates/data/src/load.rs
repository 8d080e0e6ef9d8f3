use crate::schema::BotConfigFile;
use anyhow::{bail, Context};
use lushi_core::{
    BotOptions, HeroProfile, Roster, UiAnchors, TREASURE_SLOTS, VISITOR_SLOTS,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Supported client language variants. Each carries its own window title and
/// anchor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Chs,
    Eng,
}

impl Language {
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        let lowered = value.trim().to_ascii_lowercase();
        if lowered == "chs" || lowered.starts_with("zh") {
            return Ok(Self::Chs);
        }
        if lowered == "eng" || lowered.starts_with("en") {
            return Ok(Self::Eng);
        }
        bail!("language {value} is not supported yet");
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Chs => "chs",
            Self::Eng => "eng",
        }
    }

    pub fn window_title(self) -> &'static str {
        match self {
            Self::Chs => "炉石传说",
            Self::Eng => "hearthstone",
        }
    }

    pub fn anchors_file(self) -> &'static str {
        match self {
            Self::Chs => "locs_chs.json",
            Self::Eng => "locs_eng.json",
        }
    }
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

pub fn load_bot_config(path: &Path) -> anyhow::Result<(BotOptions, Roster)> {
    let file: BotConfigFile = load_json(path)?;
    bot_config_from_file(file).with_context(|| format!("validate {}", path.display()))
}

pub fn bot_config_from_file(file: BotConfigFile) -> anyhow::Result<(BotOptions, Roster)> {
    if !(0.0..=1.0).contains(&file.confidence) {
        bail!("confidence {} outside 0..1", file.confidence);
    }
    if file.longest_waiting_secs == 0 {
        bail!("longest_waiting_secs must be positive");
    }

    let mut heroes = Vec::with_capacity(file.hero.len());
    for (card_id, entry) in &file.hero {
        let spell_order = parse_spell_order(&entry.spell_order)
            .with_context(|| format!("hero {card_id} spell_order"))?;
        heroes.push(HeroProfile {
            card_id: card_id.clone(),
            rank: entry.rank,
            spell_order,
            priority: entry.priority,
        });
    }

    let options = BotOptions {
        auto_restart: file.auto_restart,
        early_stop: file.early_stop,
        screenshot_reward: file.screenshot_reward,
        is_screenshot: file.is_screenshot,
        auto_tasks: file.auto_tasks,
        confidence: file.confidence,
        delay_ms: file.delay_ms,
        longest_waiting_secs: file.longest_waiting_secs,
        boss_id: file.boss_id,
        team_id: file.team_id,
        seed: file.seed,
    };
    Ok((options, Roster { heroes }))
}

/// "1,3,2" (one-based, as written in config files) -> zero-based slots.
fn parse_spell_order(raw: &str) -> anyhow::Result<Vec<usize>> {
    let mut order = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        let slot: usize = token
            .parse()
            .with_context(|| format!("bad ability slot {token:?}"))?;
        if slot == 0 {
            bail!("ability slots are one-based, got 0");
        }
        order.push(slot - 1);
    }
    if order.is_empty() {
        bail!("empty spell order");
    }
    Ok(order)
}

pub fn load_anchors(dir: &Path, lang: Language) -> anyhow::Result<UiAnchors> {
    let path = dir.join(lang.anchors_file());
    let anchors: UiAnchors = load_json(&path)?;
    validate_anchors(&anchors).with_context(|| format!("validate {}", path.display()))?;
    Ok(anchors)
}

fn validate_anchors(anchors: &UiAnchors) -> anyhow::Result<()> {
    if anchors.boss.xs.len() != 3 || anchors.boss.ys.is_empty() {
        bail!("boss grid needs 3 columns and at least one row");
    }
    if anchors.teams.xs.len() != 3 || anchors.teams.ys.is_empty() {
        bail!("team grid needs 3 columns and at least one row");
    }
    if anchors.treasures.xs.len() != TREASURE_SLOTS {
        bail!("expected {TREASURE_SLOTS} treasure slots");
    }
    if anchors.treasure_regions.len() != TREASURE_SLOTS {
        bail!("expected {TREASURE_SLOTS} treasure regions");
    }
    if anchors.visitors.xs.len() != VISITOR_SLOTS {
        bail!("expected {VISITOR_SLOTS} visitor slots");
    }
    if anchors.skills.xs.is_empty() {
        bail!("skill row is empty");
    }
    if anchors.rewards.is_empty() {
        bail!("reward click list is empty");
    }
    if anchors.members_distance <= 0 {
        bail!("members_distance must be positive");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_prefixes() {
        assert_eq!(Language::parse("ZH-1600x900").expect("lang"), Language::Chs);
        assert_eq!(Language::parse("EN-1024x768").expect("lang"), Language::Eng);
        assert_eq!(Language::parse("chs").expect("lang"), Language::Chs);
        assert!(Language::parse("fr").is_err());
    }

    #[test]
    fn spell_order_is_one_based_in_files() {
        assert_eq!(parse_spell_order("1,3,2").expect("order"), vec![0, 2, 1]);
        assert!(parse_spell_order("0,1").is_err());
        assert!(parse_spell_order("").is_err());
    }

    #[test]
    fn bot_config_round_trips_heroes() {
        let raw = r#"{
            "auto_restart": true,
            "longest_waiting_secs": 300,
            "boss_id": 2,
            "team_id": 0,
            "hero": {
                "LETL_001": { "rank": 1, "spell_order": "1,2", "priority": 1 },
                "LETL_002": { "rank": 2, "spell_order": "2", "priority": 3 }
            }
        }"#;
        let file: BotConfigFile = serde_json::from_str(raw).expect("parse");
        let (options, roster) = bot_config_from_file(file).expect("convert");
        assert!(options.auto_restart);
        assert_eq!(options.boss_id, 2);
        assert_eq!(roster.heroes.len(), 2);
        let first = roster.profile("LETL_001").expect("profile");
        assert_eq!(first.spell_order, vec![0, 1]);
    }

    #[test]
    fn zero_watchdog_threshold_is_rejected() {
        let raw = r#"{
            "longest_waiting_secs": 0,
            "boss_id": 0,
            "team_id": 0,
            "hero": {}
        }"#;
        let file: BotConfigFile = serde_json::from_str(raw).expect("parse");
        assert!(bot_config_from_file(file).is_err());
    }
}
