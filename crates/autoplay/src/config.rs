#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Pause after locking a team so the map finishes loading before the
    /// task and surprise steps run.
    pub settle_after_lock_ms: u64,
    pub surprise_budget_ms: u64,
    pub scroll_attempts: u32,
    pub scroll_step: i32,
    /// Half-width of the band around the focus midpoint that counts as
    /// "surprise in the middle".
    pub mid_band_px: i32,
    pub dismiss_clicks: u32,
    pub default_ability_slot: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            settle_after_lock_ms: 7_000,
            surprise_budget_ms: 10_000,
            scroll_attempts: 10,
            scroll_step: 60,
            mid_band_px: 100,
            dismiss_clicks: 4,
            default_ability_slot: 0,
        }
    }
}
