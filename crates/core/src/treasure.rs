use crate::RngState;

pub const TREASURE_SLOTS: usize = 3;

/// The final draw is deliberately restricted to the first two slots even when
/// slot 3 is eligible; kept as observed behavior.
pub const TREASURE_DRAW_SLOTS: [usize; 2] = [1, 2];

/// Slots worth taking, ascending, given the blacklisted slots (1-based).
/// More than two blacklisted options collapse to slot 1 unconditionally.
pub fn advise(blacklisted: &[usize]) -> Vec<usize> {
    let hits: Vec<usize> = (1..=TREASURE_SLOTS)
        .filter(|slot| blacklisted.contains(slot))
        .collect();
    if hits.len() > 2 {
        return vec![1];
    }
    (1..=TREASURE_SLOTS)
        .filter(|slot| !hits.contains(slot))
        .collect()
}

/// Uniform draw over the advised slots that fall inside
/// [`TREASURE_DRAW_SLOTS`]. When the intersection is empty (only slot 3
/// advised) the first advised slot is taken.
pub fn choose(advice: &[usize], rng: &mut RngState) -> usize {
    let pool: Vec<usize> = TREASURE_DRAW_SLOTS
        .iter()
        .copied()
        .filter(|slot| advice.contains(slot))
        .collect();
    if pool.is_empty() {
        return advice.first().copied().unwrap_or(1);
    }
    pool[rng.pick(pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_blacklisted_falls_back_to_first() {
        assert_eq!(advise(&[1, 2, 3]), vec![1]);
    }

    #[test]
    fn middle_blacklisted_leaves_outer_slots() {
        assert_eq!(advise(&[2]), vec![1, 3]);
    }

    #[test]
    fn clean_board_advises_everything() {
        assert_eq!(advise(&[]), vec![1, 2, 3]);
    }

    #[test]
    fn draw_stays_inside_named_range() {
        let mut rng = RngState::from_seed(7);
        for _ in 0..50 {
            let picked = choose(&[1, 2, 3], &mut rng);
            assert!(TREASURE_DRAW_SLOTS.contains(&picked));
        }
    }

    #[test]
    fn lone_third_slot_is_taken_directly() {
        let mut rng = RngState::from_seed(7);
        assert_eq!(choose(&[3], &mut rng), 3);
    }
}
