use lushi_autoplay::{
    AgentConfig, Dispatcher, Frame, PointerAction, Scenario, ScriptedScreen, ScrollSurprise,
};
use lushi_core::{
    BattleSnapshot, BenchAnchor, BotOptions, Grid, HeroProfile, HeroUnit, Point, Recovery, Rect,
    Roster, RowAnchor, Side, SlotRow, UiAnchors, UiState,
};
use std::time::{Duration, Instant};

const WINDOW: Rect = Rect {
    x: 100,
    y: 50,
    width: 1600,
    height: 900,
};

fn anchors() -> UiAnchors {
    UiAnchors {
        empty: Point::new(10, 10),
        travel: Point::new(20, 30),
        start_game: Point::new(700, 600),
        start_battle: Point::new(1100, 700),
        options: Point::new(40, 860),
        surrender: Point::new(800, 500),
        view_team: Point::new(1500, 100),
        give_up: Point::new(760, 450),
        give_up_cfm: Point::new(760, 550),
        scroll: Point::new(960, 450),
        start_point: Point::new(500, 450),
        next_page: Point::new(1091, 479),
        final_confirm: Point::new(800, 800),
        dragto: Point::new(960, 300),
        team_select: Point::new(1200, 760),
        team_lock: Point::new(1200, 830),
        boss: Grid {
            xs: vec![400, 800, 1200],
            ys: vec![300, 600],
        },
        teams: Grid {
            xs: vec![400, 800, 1200],
            ys: vec![300, 600],
        },
        focus: RowAnchor {
            first_x: 300,
            mid_x: 500,
            last_x: 700,
            y: 420,
        },
        heroes: RowAnchor {
            first_x: 600,
            mid_x: 800,
            last_x: 1000,
            y: 650,
        },
        enemies: RowAnchor {
            first_x: 600,
            mid_x: 800,
            last_x: 1000,
            y: 350,
        },
        members: BenchAnchor {
            first_x: 0,
            last_x: 300,
            y: 840,
        },
        members_distance: 60,
        skills: SlotRow {
            xs: vec![700, 860, 1020],
            y: 600,
        },
        treasures: SlotRow {
            xs: vec![400, 800, 1200],
            y: 500,
        },
        treasures_collect: Point::new(820, 760),
        treasure_regions: vec![
            Rect::new(250, 350, 300, 300),
            Rect::new(650, 350, 300, 300),
            Rect::new(1050, 350, 300, 300),
        ],
        visitors: SlotRow {
            xs: vec![400, 800, 1200],
            y: 520,
        },
        visitors_confirm: Point::new(800, 770),
        rewards: vec![
            Point::new(600, 400),
            Point::new(800, 400),
            Point::new(1000, 400),
        ],
        rewards_confirm: Point::new(800, 700),
        tasks: Vec::new(),
    }
}

fn roster() -> Roster {
    Roster {
        heroes: vec![
            HeroProfile {
                card_id: "fast".into(),
                rank: 1,
                spell_order: vec![0],
                priority: 1,
            },
            HeroProfile {
                card_id: "slow".into(),
                rank: 1,
                spell_order: vec![1, 0],
                priority: 9,
            },
        ],
    }
}

fn icon_frame(name: &str, at: Point) -> Frame {
    let mut frame = Frame::default();
    frame.icons.insert(name.to_string(), at);
    frame
}

fn dispatcher_for(
    frames: Vec<Frame>,
    options: BotOptions,
) -> Dispatcher<ScriptedScreen> {
    let screen = ScriptedScreen::new(Scenario {
        window: WINDOW,
        frames,
    });
    let cfg = AgentConfig {
        surprise_budget_ms: 0,
        ..AgentConfig::default()
    };
    Dispatcher::new(screen, anchors(), roster(), options, cfg)
}

fn click(x: i32, y: i32) -> PointerAction {
    PointerAction::Click {
        at: Point::new(x, y),
    }
}

#[test]
fn travel_clicks_the_hit_then_the_anchor() {
    let frames = vec![icon_frame("travel", Point::new(333, 222))];
    let mut bot = dispatcher_for(frames, BotOptions::default());
    let outcome = bot.tick(Instant::now()).expect("tick");

    assert_eq!(outcome.state, Some(UiState::Travel));
    assert!(outcome.changed);
    assert_eq!(
        outcome.actions,
        vec![
            click(110, 60),
            click(433, 272),
            click(120, 80),
            click(110, 60),
        ]
    );
}

#[test]
fn team_lock_settles_scans_and_classifies_the_surprise() {
    let mut frame = icon_frame("team_list", Point::new(640, 360));
    frame.scroll_surprise = Some(ScrollSurprise {
        after: 2,
        at: Point::new(380, 430),
    });
    let options = BotOptions {
        team_id: 4,
        ..BotOptions::default()
    };
    let mut bot = dispatcher_for(vec![frame], options);
    let outcome = bot.tick(Instant::now()).expect("tick");

    // Team cell 4 is column 1, row 1 of the grid.
    assert!(outcome.actions.contains(&click(900, 650)));
    assert!(outcome.actions.contains(&click(1300, 810)));
    assert!(outcome.actions.contains(&click(1300, 880)));

    // Two scrolls forward to reveal the icon, two back to restore the view.
    let scrolls: Vec<i32> = outcome
        .actions
        .iter()
        .filter_map(|a| match a {
            PointerAction::Scroll { amount } => Some(*amount),
            _ => None,
        })
        .collect();
    assert_eq!(scrolls, vec![60, 60, -60, -60]);

    assert_eq!(bot.context().side, Side::Left);
    assert!(!bot.context().surprise_in_mid);
    assert_eq!(
        bot.backend_mut().settles,
        vec![Duration::from_millis(7_000)]
    );
}

#[test]
fn bench_draft_pulls_the_configured_card() {
    let mut frame = icon_frame("member_not_ready", Point::new(640, 360));
    frame.snapshot = Some(BattleSnapshot {
        my_heroes: vec![HeroUnit::new("fast")],
        bench_heroes: vec![HeroUnit::new("slow"), HeroUnit::new("extra")],
        enemy_heroes: Vec::new(),
    });
    let mut bot = dispatcher_for(vec![frame], BotOptions::default());
    let outcome = bot.tick(Instant::now()).expect("tick");

    // "slow" sits at index 0 of a two-card bench: mid 150 minus half spacing.
    assert!(outcome.actions.contains(&click(220, 890)));
    assert!(outcome.actions.contains(&PointerAction::MoveTo {
        at: Point::new(1060, 350)
    }));
    assert!(outcome.actions.contains(&click(1060, 350)));
    // "extra" has no profile and must not be drafted.
    assert!(!outcome.actions.contains(&click(280, 890)));
}

#[test]
fn battle_orders_respect_overrides_and_focus_the_weakest() {
    let mut tank = HeroUnit::new("fast");
    tank.cooldowns = vec![0, 0];
    let mut manual = HeroUnit::new("slow");
    manual.manual_override = true;
    let mut strong = HeroUnit::new("strong_enemy");
    strong.health = 30;
    let mut weak = HeroUnit::new("weak_enemy");
    weak.health = 5;

    let mut frame = icon_frame("not_ready_dots", Point::new(640, 360));
    frame.snapshot = Some(BattleSnapshot {
        my_heroes: vec![tank, manual],
        bench_heroes: Vec::new(),
        enemy_heroes: vec![strong, weak],
    });
    let mut bot = dispatcher_for(vec![frame], BotOptions::default());
    let outcome = bot.tick(Instant::now()).expect("tick");

    // Two friendly units on an even row: x = 800 +/- 100.
    let hero_click = click(800, 700);
    let skill_click = click(800, 650);
    let target_click = click(1000, 400);
    let pos = |needle: &PointerAction| outcome.actions.iter().position(|a| a == needle);
    let hero_at = pos(&hero_click).expect("hero clicked");
    let skill_at = pos(&skill_click).expect("skill clicked");
    let target_at = pos(&target_click).expect("weakest enemy clicked");
    assert!(hero_at < skill_at && skill_at < target_at);

    // The second unit keeps its manually selected ability.
    assert!(!outcome.actions.contains(&click(1000, 700)));
}

#[test]
fn first_visible_state_in_scan_order_wins_the_tick() {
    let mut frame = icon_frame("travel", Point::new(333, 222));
    frame.icons.insert("ok".to_string(), Point::new(640, 360));
    let mut bot = dispatcher_for(vec![frame], BotOptions::default());
    let outcome = bot.tick(Instant::now()).expect("tick");

    assert_eq!(outcome.state, Some(UiState::Travel));
    // Only the travel plan ran; the lower-priority ok button stays untouched.
    assert!(!outcome.actions.contains(&click(740, 410)));
}

#[test]
fn unchanged_state_keeps_side_and_mid_flags() {
    let mut frame = icon_frame("team_list", Point::new(640, 360));
    frame.scroll_surprise = Some(ScrollSurprise {
        after: 1,
        at: Point::new(520, 430),
    });
    let map_frame = icon_frame("map_not_ready", Point::new(640, 360));
    let frames = vec![frame, map_frame.clone(), map_frame];
    let start = Instant::now();
    let mut bot = dispatcher_for(frames, BotOptions::default());

    bot.tick(start).expect("tick");
    assert_eq!(bot.context().side, Side::Right);
    assert!(bot.context().surprise_in_mid);

    let first = bot.tick(start + Duration::from_secs(1)).expect("tick");
    assert!(first.changed);
    let second = bot.tick(start + Duration::from_secs(2)).expect("tick");
    assert!(!second.changed);
    assert_eq!(second.recovery, None);
    assert_eq!(bot.context().side, Side::Right);
    assert!(bot.context().surprise_in_mid);
    assert_eq!(first.actions, second.actions);
}

#[test]
fn watchdog_restarts_once_after_the_wait_limit() {
    let frames = vec![Frame::default(), Frame::default(), Frame::default()];
    let start = Instant::now();
    let mut bot = dispatcher_for(frames, BotOptions::default());

    let quiet = bot.tick(start + Duration::from_secs(1)).expect("tick");
    assert_eq!(quiet.recovery, None);

    let tripped = bot.tick(start + Duration::from_secs(301)).expect("tick");
    assert_eq!(tripped.recovery, Some(Recovery::RestartApp));
    assert_eq!(bot.backend_mut().restarts, 1);

    let after = bot.tick(start + Duration::from_secs(302)).expect("tick");
    assert_eq!(after.recovery, None);
    assert_eq!(bot.backend_mut().restarts, 1);
}

#[test]
fn fully_blacklisted_treasures_fall_back_to_slot_one() {
    let mut frame = icon_frame("treasure_list", Point::new(640, 360));
    frame
        .treasure_blacklist
        .insert("t1".into(), Point::new(300, 400));
    frame
        .treasure_blacklist
        .insert("t2".into(), Point::new(700, 400));
    frame
        .treasure_blacklist
        .insert("t3".into(), Point::new(1100, 400));
    let mut bot = dispatcher_for(vec![frame], BotOptions::default());
    let outcome = bot.tick(Instant::now()).expect("tick");

    assert!(outcome.actions.contains(&click(500, 550)));
    assert!(outcome.actions.contains(&click(920, 810)));
}

#[test]
fn blacklisted_visitor_gets_confirm_only() {
    let mut frame = icon_frame("visitor_list", Point::new(640, 360));
    frame
        .hero_blacklist
        .insert("bad_guy".into(), Point::new(700, 400));
    let mut bot = dispatcher_for(vec![frame], BotOptions::default());
    let outcome = bot.tick(Instant::now()).expect("tick");

    for x in [500, 900, 1300] {
        assert!(!outcome.actions.contains(&click(x, 570)));
    }
    assert!(outcome.actions.contains(&click(900, 820)));
    // Leading dismiss, four post-confirm dismisses, trailing dismiss.
    let empties = outcome
        .actions
        .iter()
        .filter(|a| **a == click(110, 60))
        .count();
    assert_eq!(empties, 6);
}

#[test]
fn early_stop_abandons_the_map_at_a_portal() {
    let frame = icon_frame("destroy", Point::new(640, 360));
    let options = BotOptions {
        early_stop: true,
        ..BotOptions::default()
    };
    let mut bot = dispatcher_for(vec![frame], options);
    let outcome = bot.tick(Instant::now()).expect("tick");

    assert!(outcome.actions.contains(&click(1600, 150)));
    assert!(outcome.actions.contains(&click(860, 500)));
    assert!(outcome.actions.contains(&click(860, 600)));
    assert!(!outcome.actions.contains(&click(800, 650)));
}

#[test]
fn paged_boss_selection_turns_the_page_first() {
    let frame = icon_frame("boss_list", Point::new(640, 360));
    let options = BotOptions {
        boss_id: 7,
        ..BotOptions::default()
    };
    let mut bot = dispatcher_for(vec![frame], options);
    let outcome = bot.tick(Instant::now()).expect("tick");

    // Boss 7 maps to cell 2 of the paged grid: column 2, row 0.
    let page_click = click(1191, 529);
    let cell_click = click(1300, 350);
    let pos = |needle: &PointerAction| outcome.actions.iter().position(|a| a == needle);
    let page_at = pos(&page_click).expect("page turned");
    let cell_at = pos(&cell_click).expect("boss cell clicked");
    assert!(page_at < cell_at);
    assert!(outcome.actions.contains(&click(800, 650)));
}
