use crate::{BenchAnchor, CoreError, Point, Roster};
use std::collections::HashMap;

pub const TEAM_SIZE: usize = 3;

/// Click x for the card at `index` on a bench currently holding `size` cards.
/// The hand is centered, so the formula depends on the live size.
pub fn bench_slot(
    anchor: &BenchAnchor,
    spacing: i32,
    size: usize,
    index: usize,
) -> Result<Point, CoreError> {
    let mid_x = (anchor.first_x + anchor.last_x) / 2;
    let x = match size {
        0 => {
            return Err(CoreError::Logic(
                "bench slot requested from an empty bench".into(),
            ))
        }
        1 => mid_x,
        2 => match index {
            0 => mid_x - spacing / 2,
            1 => mid_x + spacing / 2,
            _ => {
                return Err(CoreError::Logic(format!(
                    "bench index {index} out of range for size 2"
                )))
            }
        },
        3 => mid_x + spacing * (index as i32 - 1),
        n => {
            let step = (anchor.last_x - anchor.first_x) / (n as i32 - 1);
            anchor.first_x + step * index as i32
        }
    };
    Ok(Point::new(x, anchor.y))
}

/// Card id -> live bench index, compacted as cards are removed.
#[derive(Debug, Clone, Default)]
pub struct BenchState {
    slots: HashMap<String, usize>,
}

impl BenchState {
    pub fn from_order<I, S>(cards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slots = cards
            .into_iter()
            .enumerate()
            .map(|(i, card)| (card.into(), i))
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn index_of(&self, card_id: &str) -> Option<usize> {
        self.slots.get(card_id).copied()
    }

    /// Remove a card and shift every index past it down by one.
    pub fn remove(&mut self, card_id: &str) -> Option<usize> {
        let removed = self.slots.remove(card_id)?;
        for index in self.slots.values_mut() {
            if *index > removed {
                *index -= 1;
            }
        }
        Some(removed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberPick {
    pub card_id: String,
    pub at: Point,
}

/// Fill the team up to [`TEAM_SIZE`] from the bench, highest priority first.
/// Each pick is placed using the bench size at the moment of the pick.
pub fn plan_fill(
    roster: &Roster,
    bench: &mut BenchState,
    in_battle: usize,
    anchor: &BenchAnchor,
    spacing: i32,
) -> Result<Vec<MemberPick>, CoreError> {
    let mut queue: Vec<String> = roster
        .priority_order()
        .into_iter()
        .filter(|card| bench.index_of(card).is_some())
        .map(str::to_string)
        .collect();

    let open = TEAM_SIZE.saturating_sub(in_battle);
    let mut picks = Vec::new();
    for _ in 0..open {
        if queue.is_empty() {
            break;
        }
        let card_id = queue.remove(0);
        let size = bench.len();
        let index = bench
            .index_of(&card_id)
            .ok_or_else(|| CoreError::Logic(format!("card {card_id} left the bench")))?;
        let at = bench_slot(anchor, spacing, size, index)?;
        bench.remove(&card_id);
        picks.push(MemberPick { card_id, at });
    }
    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeroProfile;

    fn anchor() -> BenchAnchor {
        BenchAnchor {
            first_x: 0,
            last_x: 300,
            y: 40,
        }
    }

    #[test]
    fn four_cards_interpolate_linearly() {
        let a = anchor();
        assert_eq!(bench_slot(&a, 60, 4, 0).expect("slot").x, 0);
        assert_eq!(bench_slot(&a, 60, 4, 3).expect("slot").x, 300);
    }

    #[test]
    fn three_cards_use_spacing_offsets() {
        let a = anchor();
        assert_eq!(bench_slot(&a, 60, 3, 0).expect("slot").x, 150 - 60);
        assert_eq!(bench_slot(&a, 60, 3, 1).expect("slot").x, 150);
        assert_eq!(bench_slot(&a, 60, 3, 2).expect("slot").x, 150 + 60);
    }

    #[test]
    fn two_cards_split_around_mid() {
        let a = anchor();
        assert_eq!(bench_slot(&a, 60, 2, 0).expect("slot").x, 150 - 30);
        assert_eq!(bench_slot(&a, 60, 2, 1).expect("slot").x, 150 + 30);
        assert!(bench_slot(&a, 60, 2, 2).is_err());
    }

    #[test]
    fn empty_bench_is_a_logic_error() {
        assert!(bench_slot(&anchor(), 60, 0, 0).is_err());
    }

    #[test]
    fn removal_compacts_higher_indices_only() {
        let mut bench = BenchState::from_order(["a", "b", "c"]);
        assert_eq!(bench.remove("b"), Some(1));
        assert_eq!(bench.index_of("a"), Some(0));
        assert_eq!(bench.index_of("c"), Some(1));
    }

    #[test]
    fn fill_pops_by_priority_and_recomputes_size() {
        let roster = Roster {
            heroes: vec![
                HeroProfile {
                    card_id: "slow".into(),
                    rank: 1,
                    spell_order: vec![0],
                    priority: 9,
                },
                HeroProfile {
                    card_id: "fast".into(),
                    rank: 1,
                    spell_order: vec![0],
                    priority: 1,
                },
            ],
        };
        let mut bench = BenchState::from_order(["slow", "fast"]);
        let picks =
            plan_fill(&roster, &mut bench, 1, &anchor(), 60).expect("fill");
        assert_eq!(picks.len(), 2);
        // "fast" picked first from a 2-card bench at index 1.
        assert_eq!(picks[0].card_id, "fast");
        assert_eq!(picks[0].at.x, 150 + 30);
        // "slow" then alone on the bench.
        assert_eq!(picks[1].card_id, "slow");
        assert_eq!(picks[1].at.x, 150);
    }

    #[test]
    fn fill_stops_when_bench_runs_dry() {
        let roster = Roster {
            heroes: vec![HeroProfile {
                card_id: "only".into(),
                rank: 1,
                spell_order: vec![0],
                priority: 1,
            }],
        };
        let mut bench = BenchState::from_order(["only"]);
        let picks =
            plan_fill(&roster, &mut bench, 0, &anchor(), 60).expect("fill");
        assert_eq!(picks.len(), 1);
        assert!(bench.is_empty());
    }
}
