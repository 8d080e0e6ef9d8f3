use crate::{AgentConfig, Backend, PointerAction, TemplateGroup};
use lushi_core::{Point, Rect};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Bounded search for the overworld surprise icon. Polls in place under a
/// time budget (aborting early if the start point is already visible), then
/// falls back to at most `scroll_attempts` forward scrolls; a hit mid-scroll
/// is undone by exactly as many backward scrolls so the view is restored.
pub fn scan_surprise<B: Backend>(
    backend: &mut B,
    plan: &mut Vec<PointerAction>,
    rect: Rect,
    scroll_anchor: Point,
    cfg: &AgentConfig,
) -> Option<Point> {
    info!("scanning surprise");
    let at = rect.to_screen(scroll_anchor);
    backend.move_to(at);
    plan.push(PointerAction::MoveTo { at });

    let deadline = Instant::now() + Duration::from_millis(cfg.surprise_budget_ms);
    loop {
        if let Some(hit) = backend.locate(TemplateGroup::Icons, "surprise") {
            info!(x = hit.at.x, y = hit.at.y, "found surprise at start");
            return Some(hit.at);
        }
        if backend.locate(TemplateGroup::Icons, "start_point").is_some() {
            debug!("start point visible, no surprise on this map");
            return None;
        }
        if Instant::now() >= deadline {
            break;
        }
    }

    for attempt in 1..=cfg.scroll_attempts {
        backend.scroll(cfg.scroll_step);
        plan.push(PointerAction::Scroll {
            amount: cfg.scroll_step,
        });
        if let Some(hit) = backend.locate(TemplateGroup::Icons, "surprise") {
            for _ in 0..attempt {
                backend.scroll(-cfg.scroll_step);
                plan.push(PointerAction::Scroll {
                    amount: -cfg.scroll_step,
                });
            }
            info!(x = hit.at.x, y = hit.at.y, attempt, "found surprise during scrolling");
            return Some(hit.at);
        }
    }

    info!("did not find any surprise");
    None
}
