use anyhow::Context;
use lushi_autoplay::{
    load_scenario, write_json, write_text, AgentConfig, AppControl, Dispatcher, RunReport,
    RunStatus, ScriptedScreen, ShotSink, TickRecord,
};
use lushi_core::{Grid, Point, RowAnchor, SlotRow};
use lushi_data::{load_anchors, load_bot_config, Language};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Func {
    Run,
    Coor,
}

#[derive(Debug, Clone)]
struct CliOptions {
    func: Func,
    lang: Option<String>,
    config: PathBuf,
    anchors_dir: PathBuf,
    script: Option<PathBuf>,
    report: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut func = Func::Run;
    let mut lang = std::env::var("LUSHI_LANG").ok();
    let mut config = PathBuf::from("config/default.json");
    let mut anchors_dir = PathBuf::from("config");
    let mut script = None;
    let mut report = None;
    let mut seed = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--func" => {
                if let Some(value) = args.get(idx + 1) {
                    func = if value == "coor" { Func::Coor } else { Func::Run };
                    idx += 1;
                }
            }
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    lang = Some(value.clone());
                    idx += 1;
                }
            }
            "--config" => {
                if let Some(value) = args.get(idx + 1) {
                    config = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--anchors" => {
                if let Some(value) = args.get(idx + 1) {
                    anchors_dir = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--script" => {
                if let Some(value) = args.get(idx + 1) {
                    script = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--report" => {
                if let Some(value) = args.get(idx + 1) {
                    report = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions {
        func,
        lang,
        config,
        anchors_dir,
        script,
        report,
        seed,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let result = match options.func {
        Func::Run => run_replay(&options),
        Func::Coor => print_anchors(&options),
    };
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run_replay(options: &CliOptions) -> anyhow::Result<()> {
    let lang = Language::parse(options.lang.as_deref().unwrap_or("chs"))?;
    info!(lang = lang.code(), title = lang.window_title(), "starting replay");

    let (mut bot, roster) = load_bot_config(&options.config)?;
    if let Some(seed) = options.seed {
        bot.seed = seed;
    }
    let anchors = load_anchors(&options.anchors_dir, lang)?;
    let script = options
        .script
        .as_deref()
        .context("--script is required for --func run")?;
    let scenario = load_scenario(script)?;

    let screen = ScriptedScreen::new(scenario);
    let frames = screen.frame_count();
    let delay = Duration::from_millis(bot.delay_ms);
    let auto_restart = bot.auto_restart;
    let fault_screenshot = bot.is_screenshot;
    let seed = bot.seed;

    // Scripted frames never reveal more by waiting, so the in-place surprise
    // poll gets a zero budget and goes straight to scrolling.
    let cfg = AgentConfig {
        surprise_budget_ms: 0,
        ..AgentConfig::default()
    };
    let mut dispatcher = Dispatcher::new(screen, anchors, roster, bot, cfg);

    let started = Instant::now();
    let mut records = Vec::with_capacity(frames);
    let mut status = RunStatus::Completed;
    for tick in 0..frames {
        let now = Instant::now();
        match dispatcher.tick(now) {
            Ok(outcome) => {
                let ctx = dispatcher.context();
                records.push(TickRecord {
                    tick: tick as u32,
                    state: outcome.state,
                    changed: outcome.changed,
                    waited_ms: ctx.elapsed(now).as_millis() as u64,
                    recovery: outcome.recovery,
                    side: ctx.side,
                    surprise_in_mid: ctx.surprise_in_mid,
                    actions: outcome.actions,
                });
            }
            Err(err) => {
                if auto_restart {
                    error!(%err, "tick failed, restarting");
                    if fault_screenshot {
                        dispatcher.backend_mut().capture("fault");
                    }
                    dispatcher.backend_mut().restart()?;
                    dispatcher.reset_session(Instant::now());
                    continue;
                }
                error!(%err, "tick failed");
                status = RunStatus::Aborted;
                break;
            }
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
    let wall = started.elapsed().as_millis() as u64;
    let report = RunReport::new(status, seed, records, wall);

    if let Some(path) = options.report.as_deref() {
        write_json(&path.with_extension("json"), &report)?;
        write_text(&path.with_extension("txt"), &report)?;
        info!(path = %path.display(), "report written");
    } else {
        println!("{}", report.to_text_report());
    }
    Ok(())
}

/// Dump the anchor table for a language so coordinates can be checked against
/// a live window.
fn print_anchors(options: &CliOptions) -> anyhow::Result<()> {
    let lang = Language::parse(options.lang.as_deref().unwrap_or("chs"))?;
    let anchors = load_anchors(&options.anchors_dir, lang)?;
    println!("language: {} window: {}", lang.code(), lang.window_title());
    print_point("empty", anchors.empty);
    print_point("travel", anchors.travel);
    print_point("start_game", anchors.start_game);
    print_point("start_battle", anchors.start_battle);
    print_point("options", anchors.options);
    print_point("surrender", anchors.surrender);
    print_point("view_team", anchors.view_team);
    print_point("give_up", anchors.give_up);
    print_point("give_up_cfm", anchors.give_up_cfm);
    print_point("scroll", anchors.scroll);
    print_point("start_point", anchors.start_point);
    print_point("next_page", anchors.next_page);
    print_point("final_confirm", anchors.final_confirm);
    print_point("dragto", anchors.dragto);
    print_point("team_select", anchors.team_select);
    print_point("team_lock", anchors.team_lock);
    print_point("treasures_collect", anchors.treasures_collect);
    print_point("visitors_confirm", anchors.visitors_confirm);
    print_point("rewards_confirm", anchors.rewards_confirm);
    print_grid("boss", &anchors.boss);
    print_grid("teams", &anchors.teams);
    print_row("focus", &anchors.focus);
    print_row("heroes", &anchors.heroes);
    print_row("enemies", &anchors.enemies);
    println!(
        "members: first_x={} last_x={} y={} distance={}",
        anchors.members.first_x, anchors.members.last_x, anchors.members.y, anchors.members_distance
    );
    print_slots("skills", &anchors.skills);
    print_slots("treasures", &anchors.treasures);
    print_slots("visitors", &anchors.visitors);
    println!("rewards: {} click points", anchors.rewards.len());
    println!("tasks: {} scripted clicks", anchors.tasks.len());
    Ok(())
}

fn print_point(name: &str, at: Point) {
    println!("{name}: ({}, {})", at.x, at.y);
}

fn print_grid(name: &str, grid: &Grid) {
    println!("{name}: xs={:?} ys={:?}", grid.xs, grid.ys);
}

fn print_row(name: &str, row: &RowAnchor) {
    println!(
        "{name}: first_x={} mid_x={} last_x={} y={}",
        row.first_x, row.mid_x, row.last_x, row.y
    );
}

fn print_slots(name: &str, row: &SlotRow) {
    println!("{name}: xs={:?} y={}", row.xs, row.y);
}
