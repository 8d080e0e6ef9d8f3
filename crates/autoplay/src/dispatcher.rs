use crate::{
    scan_surprise, AgentConfig, AutoplayError, Backend, PointerAction, TemplateGroup,
};
use lushi_core::{
    pick_ability, plan_fill, row_positions, treasure, visitor, BattleStrategist, BenchState,
    BotOptions, FocusWeakest, Point, Recovery, Rect, RngState, Roster, SessionContext, Side,
    UiAnchors, UiState, VisitorChoice, WatchdogTimer, SCAN_ORDER, TEAM_SIZE,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What one tick of the loop did, for the run report and the tests.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: Option<UiState>,
    pub changed: bool,
    pub recovery: Option<Recovery>,
    pub actions: Vec<PointerAction>,
}

/// The recognition loop. Each [`tick`](Dispatcher::tick) recognizes at most
/// one UI state, handles it, and returns the pointer plan it executed.
pub struct Dispatcher<B: Backend> {
    backend: B,
    anchors: UiAnchors,
    roster: Roster,
    options: BotOptions,
    cfg: AgentConfig,
    strategist: Box<dyn BattleStrategist>,
    rng: RngState,
    ctx: SessionContext,
    watchdog: WatchdogTimer,
    plan: Vec<PointerAction>,
}

impl<B: Backend> Dispatcher<B> {
    pub fn new(
        backend: B,
        anchors: UiAnchors,
        roster: Roster,
        options: BotOptions,
        cfg: AgentConfig,
    ) -> Self {
        let rng = RngState::from_seed(options.seed);
        let watchdog = WatchdogTimer::new(Duration::from_secs(options.longest_waiting_secs));
        Self {
            backend,
            anchors,
            roster,
            options,
            cfg,
            strategist: Box::new(FocusWeakest),
            rng,
            ctx: SessionContext::new(Instant::now()),
            watchdog,
            plan: Vec::new(),
        }
    }

    pub fn with_strategist(mut self, strategist: Box<dyn BattleStrategist>) -> Self {
        self.strategist = strategist;
        self
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Drop accumulated session state after the app was restarted; side and
    /// surprise flags from the previous map no longer apply.
    pub fn reset_session(&mut self, now: Instant) {
        self.ctx = SessionContext::new(now);
    }

    /// One pass over the screen: leading dismiss click, watchdog check, then
    /// the first visible state in scan order gets handled.
    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome, AutoplayError> {
        self.plan.clear();
        let rect = self.backend.window()?;
        self.ctx.rect = rect;

        self.click(rect.to_screen(self.anchors.empty));

        if let Some(recovery) = self.watchdog.trip(&mut self.ctx, now) {
            warn!(
                state = self.ctx.state.map(UiState::key).unwrap_or("none"),
                recovery = recovery.key(),
                "watchdog tripped"
            );
            if self.options.is_screenshot {
                self.backend.capture("watchdog");
            }
            self.run_recovery(recovery, rect)?;
            if recovery == Recovery::RestartApp {
                self.reset_session(now);
            }
            return Ok(TickOutcome {
                state: self.ctx.state,
                changed: false,
                recovery: Some(recovery),
                actions: self.plan.clone(),
            });
        }

        let mut seen = None;
        for state in SCAN_ORDER {
            if let Some(hit) = self.backend.locate(TemplateGroup::Icons, state.key()) {
                seen = Some((state, hit.at));
                break;
            }
        }

        let Some((state, hit_at)) = seen else {
            debug!(
                state = self.ctx.state.map(UiState::key).unwrap_or("none"),
                waited_ms = self.ctx.elapsed(now).as_millis() as u64,
                side = self.ctx.side.key(),
                in_mid = self.ctx.surprise_in_mid,
                "nothing recognized"
            );
            return Ok(TickOutcome {
                state: self.ctx.state,
                changed: false,
                recovery: None,
                actions: self.plan.clone(),
            });
        };

        let changed = self.ctx.observe(state, now);
        if changed {
            info!(state = state.key(), "state changed");
        }
        self.handle(state, hit_at, rect)?;
        self.click(rect.to_screen(self.anchors.empty));
        debug!(
            plan = %self
                .plan
                .iter()
                .map(|a| a.stable_key())
                .collect::<Vec<_>>()
                .join(" "),
            "plan executed"
        );

        Ok(TickOutcome {
            state: Some(state),
            changed,
            recovery: None,
            actions: self.plan.clone(),
        })
    }

    fn handle(&mut self, state: UiState, hit_at: Point, rect: Rect) -> Result<(), AutoplayError> {
        match state {
            UiState::Box
            | UiState::Mercenaries
            | UiState::TeamLock
            | UiState::Close
            | UiState::Ok => {
                self.click(rect.to_screen(hit_at));
                info!(state = state.key(), "clicked");
            }
            UiState::Travel => {
                self.click(rect.to_screen(hit_at));
                self.click_local(rect, self.anchors.travel);
            }
            UiState::BossList => self.pick_boss(rect)?,
            UiState::TeamList => self.pick_team(rect)?,
            UiState::MapNotReady => self.sweep_map(rect),
            UiState::Goto | UiState::Show | UiState::Teleport | UiState::StartGame => {
                self.click_local(rect, self.anchors.start_game);
            }
            UiState::MemberNotReady => self.fill_members(rect)?,
            UiState::NotReadyDots => self.run_battle(rect)?,
            UiState::BattleReady => self.click_local(rect, self.anchors.start_battle),
            UiState::TreasureList | UiState::TreasureReplace => self.take_treasure(rect)?,
            UiState::Destroy | UiState::BluePortal | UiState::Boom => {
                if self.options.early_stop {
                    self.give_up(rect);
                } else {
                    self.click_local(rect, self.anchors.start_game);
                }
            }
            UiState::VisitorList => self.greet_visitors(rect)?,
            UiState::FinalReward | UiState::FinalReward2 => self.sweep_rewards(rect),
            UiState::FinalConfirm => self.click_local(rect, self.anchors.final_confirm),
        }
        Ok(())
    }

    fn pick_boss(&mut self, rect: Rect) -> Result<(), AutoplayError> {
        let boss_id = self.options.boss_id;
        if boss_id > 5 {
            // Bosses past the first page sit on a two-column layout once the
            // list is paged forward.
            let cell = self.anchors.boss.cell((boss_id - 6) * 2)?;
            self.click_local(rect, self.anchors.next_page);
            self.click(rect.to_screen(cell));
        } else {
            let cell = self.anchors.boss.cell(boss_id)?;
            self.click(rect.to_screen(cell));
        }
        self.click_local(rect, self.anchors.start_game);
        Ok(())
    }

    fn pick_team(&mut self, rect: Rect) -> Result<(), AutoplayError> {
        let cell = self.anchors.teams.cell(self.options.team_id)?;
        self.click(rect.to_screen(cell));
        self.click_local(rect, self.anchors.team_select);
        self.click_local(rect, self.anchors.team_lock);
        // The map loads slowly; entering the campfire or scanning too early
        // hits a blank screen.
        self.backend
            .settle(Duration::from_millis(self.cfg.settle_after_lock_ms));
        self.submit_tasks(rect);

        let scroll_anchor = self.anchors.scroll;
        let surprise = scan_surprise(
            &mut self.backend,
            &mut self.plan,
            rect,
            scroll_anchor,
            &self.cfg,
        );
        if let Some(at) = surprise {
            self.ctx.side = if at.x < self.anchors.start_point.x {
                Side::Left
            } else {
                Side::Right
            };
            self.ctx.surprise_in_mid =
                (at.x - self.anchors.focus.mid_x).abs() < self.cfg.mid_band_px;
            info!(
                side = self.ctx.side.key(),
                in_mid = self.ctx.surprise_in_mid,
                "surprise classified"
            );
        }
        Ok(())
    }

    fn submit_tasks(&mut self, rect: Rect) {
        if !self.options.auto_tasks || self.anchors.tasks.is_empty() {
            return;
        }
        info!("handing in campfire tasks");
        let steps = self.anchors.tasks.clone();
        for at in steps {
            self.click(rect.to_screen(at));
        }
    }

    /// Walk the map toward the surprise side. Three presses per tick, ordered
    /// from the far end inward when the surprise is not centered.
    fn sweep_map(&mut self, rect: Rect) {
        if self.ctx.side == Side::Unset {
            self.ctx.side = Side::Left;
        }
        let focus = self.anchors.focus.clone();
        let (first, mid, last) = (focus.first_x, focus.mid_x, focus.last_x);
        let xs = if self.ctx.side == Side::Right {
            if self.ctx.surprise_in_mid {
                [last, (last + mid) / 2, mid]
            } else {
                [mid, (last + mid) / 2, last]
            }
        } else if self.ctx.surprise_in_mid {
            [first, (first + mid) / 2, mid]
        } else {
            [mid, (first + mid) / 2, first]
        };
        for x in xs {
            self.tap(rect.to_screen(Point::new(x, focus.y)));
        }
    }

    fn fill_members(&mut self, rect: Rect) -> Result<(), AutoplayError> {
        let snapshot = self.backend.battle_snapshot()?;
        let in_battle = snapshot
            .my_heroes
            .iter()
            .filter(|h| self.roster.profile(&h.card_id).is_some())
            .count();
        if in_battle >= TEAM_SIZE {
            return Ok(());
        }
        let mut bench =
            BenchState::from_order(snapshot.bench_heroes.iter().map(|h| h.card_id.clone()));
        let picks = plan_fill(
            &self.roster,
            &mut bench,
            in_battle,
            &self.anchors.members,
            self.anchors.members_distance,
        )?;
        let dragto = self.anchors.dragto;
        for pick in picks {
            debug!(card = pick.card_id.as_str(), "drafting bench card");
            self.click(rect.to_screen(pick.at));
            self.move_to(rect.to_screen(dragto));
            self.click(rect.to_screen(dragto));
        }
        Ok(())
    }

    fn run_battle(&mut self, rect: Rect) -> Result<(), AutoplayError> {
        info!("scanning battlefield");
        let snapshot = self.backend.battle_snapshot()?;
        let mut my = snapshot.my_heroes;
        let mut enemy = snapshot.enemy_heroes;
        let my_positions = row_positions(&self.anchors.heroes, my.len());
        for (unit, at) in my.iter_mut().zip(my_positions) {
            unit.pos = Some(at);
        }
        let enemy_positions = row_positions(&self.anchors.enemies, enemy.len());
        for (unit, at) in enemy.iter_mut().zip(enemy_positions) {
            unit.pos = Some(at);
        }
        if enemy.is_empty() {
            debug!("no enemies parsed, skipping orders");
            return Ok(());
        }

        let assignment = self.strategist.assign(&my, &enemy);
        if assignment.len() != my.len() {
            return Err(AutoplayError::Logic(format!(
                "strategist returned {} targets for {} heroes",
                assignment.len(),
                my.len()
            )));
        }

        self.click_local(rect, self.anchors.empty);
        for (unit, &target) in my.iter().zip(&assignment) {
            if unit.manual_override {
                continue;
            }
            let Some(at) = unit.pos else { continue };
            let foe = enemy.get(target).ok_or_else(|| {
                AutoplayError::Logic(format!("target {target} out of range"))
            })?;
            let Some(foe_at) = foe.pos else { continue };
            let slot = pick_ability(
                self.roster.profile(&unit.card_id),
                &unit.cooldowns,
                self.cfg.default_ability_slot,
            );
            let skill = self.anchors.skills.slot(slot)?;
            self.click(rect.to_screen(at));
            self.click(rect.to_screen(skill));
            self.click(rect.to_screen(foe_at));
            self.click_local(rect, self.anchors.empty);
        }
        Ok(())
    }

    fn take_treasure(&mut self, rect: Rect) -> Result<(), AutoplayError> {
        let regions = self.anchors.treasure_regions.clone();
        let names = self.backend.group_names(TemplateGroup::TreasureBlacklist);
        let mut blacklisted = Vec::new();
        for (i, region) in regions.iter().enumerate() {
            let hit = names.iter().any(|name| {
                self.backend
                    .locate_in(*region, TemplateGroup::TreasureBlacklist, name)
                    .is_some()
            });
            if hit {
                blacklisted.push(i + 1);
            }
        }
        let advice = treasure::advise(&blacklisted);
        let slot = treasure::choose(&advice, &mut self.rng);
        debug!(?advice, slot, "treasure chosen");
        let at = self.anchors.treasures.slot(slot - 1)?;
        self.click(rect.to_screen(at));
        if self.options.screenshot_reward || self.options.is_screenshot {
            self.backend.capture("treasure");
        }
        self.click_local(rect, self.anchors.treasures_collect);
        Ok(())
    }

    fn greet_visitors(&mut self, rect: Rect) -> Result<(), AutoplayError> {
        let whitelist = self.backend.group_names(TemplateGroup::HeroWhitelist);
        let whitelist_hit = whitelist.iter().any(|name| {
            self.backend
                .locate(TemplateGroup::HeroWhitelist, name)
                .is_some()
        });
        let blacklist_hit = if whitelist_hit {
            None
        } else {
            let names = self.backend.group_names(TemplateGroup::HeroBlacklist);
            names
                .iter()
                .find_map(|name| self.backend.locate(TemplateGroup::HeroBlacklist, name))
                .map(|hit| hit.at)
        };
        match visitor::decide(whitelist_hit, blacklist_hit, &mut self.rng) {
            VisitorChoice::Slot(slot) => {
                let at = self.anchors.visitors.slot(slot)?;
                self.click(rect.to_screen(at));
            }
            VisitorChoice::Avoid(at) => {
                debug!(x = at.x, y = at.y, "blacklisted visitor, confirm only");
            }
        }
        if self.options.is_screenshot {
            self.backend.capture("visitor");
        }
        self.click_local(rect, self.anchors.visitors_confirm);
        for _ in 0..self.cfg.dismiss_clicks {
            self.click_local(rect, self.anchors.empty);
        }
        info!("visitors selected");
        if self.options.early_stop {
            info!("early stopping");
            self.give_up(rect);
        }
        Ok(())
    }

    fn sweep_rewards(&mut self, rect: Rect) {
        let spots = self.anchors.rewards.clone();
        for at in spots {
            let screen = rect.to_screen(at);
            self.move_to(screen);
            self.click(screen);
        }
        if self.options.screenshot_reward {
            self.backend.capture("reward");
        }
        let confirm = rect.to_screen(self.anchors.rewards_confirm);
        self.move_to(confirm);
        self.click(confirm);
    }

    fn give_up(&mut self, rect: Rect) {
        self.click_local(rect, self.anchors.view_team);
        self.click_local(rect, self.anchors.give_up);
        self.click_local(rect, self.anchors.give_up_cfm);
    }

    fn run_recovery(&mut self, recovery: Recovery, rect: Rect) -> Result<(), AutoplayError> {
        match recovery {
            Recovery::Surrender => {
                self.click_local(rect, self.anchors.options);
                self.click_local(rect, self.anchors.surrender);
            }
            Recovery::AbandonMap => self.give_up(rect),
            Recovery::RestartApp => self.backend.restart()?,
        }
        Ok(())
    }

    fn click(&mut self, at: Point) {
        self.backend.click(at);
        self.plan.push(PointerAction::Click { at });
    }

    fn click_local(&mut self, rect: Rect, local: Point) {
        self.click(rect.to_screen(local));
    }

    fn move_to(&mut self, at: Point) {
        self.backend.move_to(at);
        self.plan.push(PointerAction::MoveTo { at });
    }

    fn tap(&mut self, at: Point) {
        self.move_to(at);
        self.backend.mouse_down();
        self.plan.push(PointerAction::MouseDown);
        self.backend.mouse_up();
        self.plan.push(PointerAction::MouseUp);
    }
}
