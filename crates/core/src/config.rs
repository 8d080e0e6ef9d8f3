use crate::{CoreError, Point, Rect};
use serde::{Deserialize, Serialize};

/// Metadata for one configured mercenary card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeroProfile {
    pub card_id: String,
    pub rank: u32,
    /// Ability slots in click-priority order, zero-based.
    pub spell_order: Vec<usize>,
    /// Lower goes into the team first.
    pub priority: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub heroes: Vec<HeroProfile>,
}

impl Roster {
    pub fn profile(&self, card_id: &str) -> Option<&HeroProfile> {
        self.heroes.iter().find(|h| h.card_id == card_id)
    }

    /// Card ids ordered by dispatch priority ascending.
    pub fn priority_order(&self) -> Vec<&str> {
        let mut sorted: Vec<&HeroProfile> = self.heroes.iter().collect();
        sorted.sort_by_key(|h| h.priority);
        sorted.iter().map(|h| h.card_id.as_str()).collect()
    }
}

/// Three-column grid of screen cells (boss and team pickers).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grid {
    pub xs: Vec<i32>,
    pub ys: Vec<i32>,
}

impl Grid {
    pub fn cell(&self, index: usize) -> Result<Point, CoreError> {
        let cols = self.xs.len();
        if cols == 0 || self.ys.is_empty() {
            return Err(CoreError::Config("empty grid anchor".into()));
        }
        let x = self.xs[index % cols];
        let y = *self
            .ys
            .get(index / cols)
            .ok_or_else(|| CoreError::Config(format!("grid cell {index} out of range")))?;
        Ok(Point::new(x, y))
    }
}

/// Horizontal row of units described by its first/mid/last x and a fixed y.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowAnchor {
    pub first_x: i32,
    pub mid_x: i32,
    pub last_x: i32,
    pub y: i32,
}

/// Fixed slots on one row (treasure and visitor options).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotRow {
    pub xs: Vec<i32>,
    pub y: i32,
}

impl SlotRow {
    pub fn slot(&self, index: usize) -> Result<Point, CoreError> {
        let x = self
            .xs
            .get(index)
            .ok_or_else(|| CoreError::Config(format!("slot {index} out of range")))?;
        Ok(Point::new(*x, self.y))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchAnchor {
    pub first_x: i32,
    pub last_x: i32,
    pub y: i32,
}

/// Per-language table of window-local coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiAnchors {
    pub empty: Point,
    pub travel: Point,
    pub start_game: Point,
    pub start_battle: Point,
    pub options: Point,
    pub surrender: Point,
    pub view_team: Point,
    pub give_up: Point,
    pub give_up_cfm: Point,
    pub scroll: Point,
    pub start_point: Point,
    pub next_page: Point,
    pub final_confirm: Point,
    pub dragto: Point,
    pub team_select: Point,
    pub team_lock: Point,
    pub boss: Grid,
    pub teams: Grid,
    pub focus: RowAnchor,
    pub heroes: RowAnchor,
    pub enemies: RowAnchor,
    pub members: BenchAnchor,
    pub members_distance: i32,
    pub skills: SlotRow,
    pub treasures: SlotRow,
    pub treasures_collect: Point,
    pub treasure_regions: Vec<Rect>,
    pub visitors: SlotRow,
    pub visitors_confirm: Point,
    pub rewards: Vec<Point>,
    pub rewards_confirm: Point,
    /// Scripted campfire task hand-in sequence; empty when the language
    /// variant has none.
    #[serde(default)]
    pub tasks: Vec<Point>,
}

/// Behavioral toggles, independent of language variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotOptions {
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
    pub confidence: f32,
    pub delay_ms: u64,
    pub longest_waiting_secs: u64,
    pub boss_id: usize,
    pub team_id: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    0xC0FFEE
}

impl Default for BotOptions {
    fn default() -> Self {
        Self {
            auto_restart: false,
            early_stop: false,
            screenshot_reward: false,
            is_screenshot: false,
            auto_tasks: false,
            confidence: 0.8,
            delay_ms: 500,
            longest_waiting_secs: 300,
            boss_id: 0,
            team_id: 0,
            seed: default_seed(),
        }
    }
}
