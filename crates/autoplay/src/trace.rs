use crate::{AutoplayError, PointerAction};
use lushi_core::{Recovery, Side, UiState};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Aborted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickRecord {
    pub tick: u32,
    pub state: Option<UiState>,
    pub changed: bool,
    /// How long the session had been sitting in this state when the tick ran.
    pub waited_ms: u64,
    pub recovery: Option<Recovery>,
    pub side: Side,
    pub surprise_in_mid: bool,
    pub actions: Vec<PointerAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u32,
    pub state_changes: u32,
    pub recoveries: u32,
    pub actions: u64,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub seed: u64,
    pub ticks: Vec<TickRecord>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(status: RunStatus, seed: u64, ticks: Vec<TickRecord>, wall_time_ms: u64) -> Self {
        let summary = RunSummary {
            ticks: ticks.len() as u32,
            state_changes: ticks.iter().filter(|t| t.changed).count() as u32,
            recoveries: ticks.iter().filter(|t| t.recovery.is_some()).count() as u32,
            actions: ticks.iter().map(|t| t.actions.len() as u64).sum(),
            wall_time_ms,
        };
        Self {
            status,
            seed,
            ticks,
            summary,
        }
    }

    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("status/状态: {}", run_status_label(&self.status)),
            format!("seed/种子: {}", self.seed),
            format!(
                "summary/汇总: ticks/节拍={} changes/状态切换={} recoveries/恢复={} actions/动作={} wall_ms/耗时毫秒={}",
                self.summary.ticks,
                self.summary.state_changes,
                self.summary.recoveries,
                self.summary.actions,
                self.summary.wall_time_ms
            ),
            String::new(),
            "ticks/节拍:".to_string(),
        ];
        for record in &self.ticks {
            let state = record
                .state
                .map(state_name)
                .unwrap_or("(none/无)");
            let marker = if record.changed { " *" } else { "" };
            lines.push(format!(
                "  tick/节拍 {:>4} | {state}{marker} waited_ms/等待毫秒={}",
                record.tick, record.waited_ms
            ));
            if record.side != Side::Unset {
                lines.push(format!(
                    "    side/方位: {} in_mid/居中: {}",
                    record.side.key(),
                    record.surprise_in_mid
                ));
            }
            if let Some(recovery) = record.recovery {
                lines.push(format!("    recovery/恢复: {}", recovery_name(recovery)));
            }
            for action in &record.actions {
                lines.push(format!("    action/动作: {}", action.short_label()));
            }
        }
        lines.join("\n")
    }
}

fn state_name(state: UiState) -> &'static str {
    match state {
        UiState::Box => "box/宝箱",
        UiState::Mercenaries => "mercenaries/佣兵",
        UiState::TeamLock => "team_lock/锁定队伍",
        UiState::Travel => "travel/旅行",
        UiState::BossList => "boss_list/首领列表",
        UiState::TeamList => "team_list/队伍列表",
        UiState::MapNotReady => "map_not_ready/地图未就绪",
        UiState::Goto => "goto/前往",
        UiState::Show => "show/展示",
        UiState::Teleport => "teleport/传送",
        UiState::StartGame => "start_game/开始游戏",
        UiState::MemberNotReady => "member_not_ready/成员未就绪",
        UiState::NotReadyDots => "not_ready_dots/等待就绪",
        UiState::BattleReady => "battle_ready/战斗就绪",
        UiState::TreasureList => "treasure_list/宝藏列表",
        UiState::TreasureReplace => "treasure_replace/替换宝藏",
        UiState::Destroy => "destroy/摧毁",
        UiState::BluePortal => "blue_portal/蓝色传送门",
        UiState::Boom => "boom/爆炸",
        UiState::VisitorList => "visitor_list/访客列表",
        UiState::FinalReward => "final_reward/最终奖励",
        UiState::FinalReward2 => "final_reward2/最终奖励2",
        UiState::FinalConfirm => "final_confirm/最终确认",
        UiState::Close => "close/关闭",
        UiState::Ok => "ok/确定",
    }
}

fn recovery_name(recovery: Recovery) -> &'static str {
    match recovery {
        Recovery::Surrender => "Surrender/投降",
        Recovery::AbandonMap => "AbandonMap/放弃地图",
        Recovery::RestartApp => "RestartApp/重启游戏",
    }
}

fn run_status_label(status: &RunStatus) -> &'static str {
    match status {
        RunStatus::Completed => "Completed/完成",
        RunStatus::Aborted => "Aborted/中止",
    }
}

pub fn write_json(path: &Path, report: &RunReport) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(report)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, report: &RunReport) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, report.to_text_report())?;
    Ok(())
}
