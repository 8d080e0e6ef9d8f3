use crate::{Point, RngState};

pub const VISITOR_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitorChoice {
    /// Click this slot (zero-based), then confirm.
    Slot(usize),
    /// Blacklist match: no slot click, confirm only.
    Avoid(Point),
}

/// Resolve the visitor pick. A whitelist hit still draws uniformly over all
/// three slots rather than the matched one; kept as observed behavior.
pub fn decide(
    whitelist_hit: bool,
    blacklist_hit: Option<Point>,
    rng: &mut RngState,
) -> VisitorChoice {
    if whitelist_hit {
        return VisitorChoice::Slot(rng.pick(VISITOR_SLOTS));
    }
    if let Some(at) = blacklist_hit {
        return VisitorChoice::Avoid(at);
    }
    VisitorChoice::Slot(rng.pick(VISITOR_SLOTS))
}
