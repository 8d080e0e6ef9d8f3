use crate::{HeroProfile, Point, RowAnchor};

/// Window-local positions for a centered row of `count` units. The step is
/// the first-to-mid distance; even counts sit half a step off center.
pub fn row_positions(row: &RowAnchor, count: usize) -> Vec<Point> {
    let step = (row.mid_x - row.first_x) as f64;
    (0..count)
        .map(|i| {
            let slots = if count % 2 == 0 {
                -0.5 - (count / 2) as f64 + i as f64 + 1.0
            } else {
                i as f64 - (count / 2) as f64
            };
            let x = row.mid_x as f64 + step * slots;
            Point::new(x.round() as i32, row.y)
        })
        .collect()
}

/// First ability in the profile's priority sequence that is off cooldown.
/// Cards without a profile, or with everything on cooldown, use the default
/// slot.
pub fn pick_ability(
    profile: Option<&HeroProfile>,
    cooldowns: &[u32],
    default_slot: usize,
) -> usize {
    let Some(profile) = profile else {
        return default_slot;
    };
    profile
        .spell_order
        .iter()
        .copied()
        .find(|&slot| cooldowns.get(slot).copied().unwrap_or(0) == 0)
        .unwrap_or(default_slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RowAnchor {
        RowAnchor {
            first_x: 300,
            mid_x: 500,
            last_x: 700,
            y: 420,
        }
    }

    #[test]
    fn odd_row_is_centered() {
        let xs: Vec<i32> = row_positions(&row(), 3).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![300, 500, 700]);
    }

    #[test]
    fn even_row_straddles_the_mid() {
        let xs: Vec<i32> = row_positions(&row(), 2).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![400, 600]);
    }

    #[test]
    fn ability_respects_cooldowns() {
        let profile = HeroProfile {
            card_id: "c".into(),
            rank: 1,
            spell_order: vec![2, 0, 1],
            priority: 1,
        };
        assert_eq!(pick_ability(Some(&profile), &[0, 0, 3], 0), 0);
        assert_eq!(pick_ability(Some(&profile), &[0, 0, 0], 0), 2);
        assert_eq!(pick_ability(None, &[0, 0, 0], 0), 0);
    }
}
