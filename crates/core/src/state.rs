use crate::Rect;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UiState {
    Box,
    Mercenaries,
    TeamLock,
    Travel,
    BossList,
    TeamList,
    MapNotReady,
    Goto,
    Show,
    Teleport,
    StartGame,
    MemberNotReady,
    NotReadyDots,
    BattleReady,
    TreasureList,
    TreasureReplace,
    Destroy,
    BluePortal,
    Boom,
    VisitorList,
    FinalReward,
    FinalReward2,
    FinalConfirm,
    Close,
    Ok,
}

/// Per-tick recognition priority. The first visible state wins the tick.
pub const SCAN_ORDER: [UiState; 25] = [
    UiState::Box,
    UiState::Mercenaries,
    UiState::TeamLock,
    UiState::Travel,
    UiState::BossList,
    UiState::TeamList,
    UiState::MapNotReady,
    UiState::Goto,
    UiState::Show,
    UiState::Teleport,
    UiState::StartGame,
    UiState::MemberNotReady,
    UiState::NotReadyDots,
    UiState::BattleReady,
    UiState::TreasureList,
    UiState::TreasureReplace,
    UiState::Destroy,
    UiState::BluePortal,
    UiState::Boom,
    UiState::VisitorList,
    UiState::FinalReward,
    UiState::FinalReward2,
    UiState::FinalConfirm,
    UiState::Close,
    UiState::Ok,
];

impl UiState {
    /// Stable key, also the template name handed to the recognizer.
    pub fn key(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Mercenaries => "mercenaries",
            Self::TeamLock => "team_lock",
            Self::Travel => "travel",
            Self::BossList => "boss_list",
            Self::TeamList => "team_list",
            Self::MapNotReady => "map_not_ready",
            Self::Goto => "goto",
            Self::Show => "show",
            Self::Teleport => "teleport",
            Self::StartGame => "start_game",
            Self::MemberNotReady => "member_not_ready",
            Self::NotReadyDots => "not_ready_dots",
            Self::BattleReady => "battle_ready",
            Self::TreasureList => "treasure_list",
            Self::TreasureReplace => "treasure_replace",
            Self::Destroy => "destroy",
            Self::BluePortal => "blue_portal",
            Self::Boom => "boom",
            Self::VisitorList => "visitor_list",
            Self::FinalReward => "final_reward",
            Self::FinalReward2 => "final_reward2",
            Self::FinalConfirm => "final_confirm",
            Self::Close => "close",
            Self::Ok => "ok",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    #[default]
    Unset,
}

impl Side {
    pub fn key(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Unset => "unset",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub state: Option<UiState>,
    pub entered_at: Instant,
    pub side: Side,
    pub surprise_in_mid: bool,
    pub rect: Rect,
}

impl SessionContext {
    pub fn new(now: Instant) -> Self {
        Self {
            state: None,
            entered_at: now,
            side: Side::Unset,
            surprise_in_mid: false,
            rect: Rect::default(),
        }
    }

    /// Track a newly recognized state. The entry timestamp resets iff the
    /// state differs from the tracked one. Returns whether it changed.
    pub fn observe(&mut self, state: UiState, now: Instant) -> bool {
        let changed = self.state != Some(state);
        if changed {
            self.state = Some(state);
            self.entered_at = now;
        }
        changed
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.entered_at)
    }

    pub fn reset_timer(&mut self, now: Instant) {
        self.entered_at = now;
    }
}
