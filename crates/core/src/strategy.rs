use crate::Point;
use serde::{Deserialize, Serialize};

/// One unit on the battlefield as reported by the match snapshot. Screen
/// position is assigned from layout geometry, never recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroUnit {
    pub card_id: String,
    #[serde(default)]
    pub pos: Option<Point>,
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub cooldowns: Vec<u32>,
    #[serde(default)]
    pub manual_override: bool,
}

impl HeroUnit {
    pub fn new(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            pos: None,
            health: 0,
            cooldowns: Vec::new(),
            manual_override: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub my_heroes: Vec<HeroUnit>,
    pub bench_heroes: Vec<HeroUnit>,
    pub enemy_heroes: Vec<HeroUnit>,
}

/// Target assignment policy. Implementations must return one enemy index per
/// friendly unit, each in range, deterministically for a given input.
pub trait BattleStrategist {
    fn assign(&self, my: &[HeroUnit], enemy: &[HeroUnit]) -> Vec<usize>;
}

/// Default policy: everyone focuses the lowest-health enemy, ties broken by
/// the lower index.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusWeakest;

impl BattleStrategist for FocusWeakest {
    fn assign(&self, my: &[HeroUnit], enemy: &[HeroUnit]) -> Vec<usize> {
        if enemy.is_empty() {
            return Vec::new();
        }
        let target = enemy
            .iter()
            .enumerate()
            .min_by_key(|(index, unit)| (unit.health, *index))
            .map(|(index, _)| index)
            .unwrap_or(0);
        vec![target; my.len()]
    }
}
