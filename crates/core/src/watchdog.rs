use crate::{SessionContext, UiState};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recovery {
    Surrender,
    AbandonMap,
    RestartApp,
}

impl Recovery {
    pub fn key(self) -> &'static str {
        match self {
            Self::Surrender => "surrender",
            Self::AbandonMap => "abandon_map",
            Self::RestartApp => "restart_app",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WatchdogTimer {
    threshold: Duration,
}

impl WatchdogTimer {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn recovery_for(state: Option<UiState>) -> Recovery {
        match state {
            Some(UiState::MemberNotReady) | Some(UiState::NotReadyDots) => Recovery::Surrender,
            Some(UiState::MapNotReady) => Recovery::AbandonMap,
            _ => Recovery::RestartApp,
        }
    }

    /// Fires at most once per overrun: a trip resets the entry timestamp.
    pub fn trip(&self, ctx: &mut SessionContext, now: Instant) -> Option<Recovery> {
        if ctx.elapsed(now) <= self.threshold {
            return None;
        }
        let recovery = Self::recovery_for(ctx.state);
        ctx.reset_timer(now);
        Some(recovery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UiState;

    fn ctx_at(now: Instant) -> SessionContext {
        SessionContext::new(now)
    }

    #[test]
    fn trip_fires_once_then_resets() {
        let start = Instant::now();
        let mut ctx = ctx_at(start);
        ctx.observe(UiState::Goto, start);
        let dog = WatchdogTimer::new(Duration::from_secs(30));

        let later = start + Duration::from_secs(31);
        assert_eq!(dog.trip(&mut ctx, later), Some(Recovery::RestartApp));
        assert_eq!(dog.trip(&mut ctx, later), None);
    }

    #[test]
    fn below_threshold_never_fires() {
        let start = Instant::now();
        let mut ctx = ctx_at(start);
        ctx.observe(UiState::Goto, start);
        let dog = WatchdogTimer::new(Duration::from_secs(30));
        assert_eq!(dog.trip(&mut ctx, start + Duration::from_secs(29)), None);
    }

    #[test]
    fn recovery_is_state_specific() {
        assert_eq!(
            WatchdogTimer::recovery_for(Some(UiState::NotReadyDots)),
            Recovery::Surrender
        );
        assert_eq!(
            WatchdogTimer::recovery_for(Some(UiState::MemberNotReady)),
            Recovery::Surrender
        );
        assert_eq!(
            WatchdogTimer::recovery_for(Some(UiState::MapNotReady)),
            Recovery::AbandonMap
        );
        assert_eq!(
            WatchdogTimer::recovery_for(Some(UiState::TeamList)),
            Recovery::RestartApp
        );
        assert_eq!(WatchdogTimer::recovery_for(None), Recovery::RestartApp);
    }
}
