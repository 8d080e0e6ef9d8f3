use crate::{
    AppControl, AutoplayError, Hit, PointerAction, PointerDriver, Recognizer, ShotSink,
    SnapshotSource, TemplateGroup,
};
use lushi_core::{BattleSnapshot, Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// A surprise icon that only becomes visible once the map has been scrolled
/// forward `after` steps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrollSurprise {
    pub after: u32,
    pub at: Point,
}

/// One recorded screen. Template names map to their window-local hit points.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub icons: BTreeMap<String, Point>,
    #[serde(default)]
    pub treasure_blacklist: BTreeMap<String, Point>,
    #[serde(default)]
    pub hero_whitelist: BTreeMap<String, Point>,
    #[serde(default)]
    pub hero_blacklist: BTreeMap<String, Point>,
    #[serde(default)]
    pub snapshot: Option<BattleSnapshot>,
    #[serde(default)]
    pub scroll_surprise: Option<ScrollSurprise>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub window: Rect,
    pub frames: Vec<Frame>,
}

pub fn load_scenario(path: &Path) -> Result<Scenario, AutoplayError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Frame-replay backend. Serves one frame per `window` call; every lookup and
/// pointer event in between runs against the current frame. Pointer events,
/// settles and captures are recorded instead of executed.
#[derive(Debug, Clone)]
pub struct ScriptedScreen {
    scenario: Scenario,
    cursor: usize,
    ticked: bool,
    confidence: f32,
    forward_scrolls: u32,
    pub actions: Vec<PointerAction>,
    pub settles: Vec<Duration>,
    pub captures: Vec<String>,
    pub restarts: u32,
}

impl ScriptedScreen {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            cursor: 0,
            ticked: false,
            confidence: 0.95,
            forward_scrolls: 0,
            actions: Vec::new(),
            settles: Vec::new(),
            captures: Vec::new(),
            restarts: 0,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.scenario.frames.len()
    }

    fn frame(&self) -> Option<&Frame> {
        self.scenario.frames.get(self.cursor)
    }

    fn table(frame: &Frame, group: TemplateGroup) -> &BTreeMap<String, Point> {
        match group {
            TemplateGroup::Icons => &frame.icons,
            TemplateGroup::TreasureBlacklist => &frame.treasure_blacklist,
            TemplateGroup::HeroWhitelist => &frame.hero_whitelist,
            TemplateGroup::HeroBlacklist => &frame.hero_blacklist,
        }
    }

    fn hit(&self, at: Point) -> Hit {
        Hit {
            at,
            confidence: self.confidence,
        }
    }
}

impl Recognizer for ScriptedScreen {
    fn window(&mut self) -> Result<Rect, AutoplayError> {
        if self.ticked {
            self.cursor += 1;
            self.forward_scrolls = 0;
        } else {
            self.ticked = true;
        }
        Ok(self.scenario.window)
    }

    fn locate(&mut self, group: TemplateGroup, name: &str) -> Option<Hit> {
        let frame = self.frame()?;
        if group == TemplateGroup::Icons && name == "surprise" {
            if let Some(gated) = frame.scroll_surprise {
                if self.forward_scrolls >= gated.after {
                    return Some(self.hit(gated.at));
                }
            }
        }
        let at = *Self::table(frame, group).get(name)?;
        Some(self.hit(at))
    }

    fn locate_in(&mut self, region: Rect, group: TemplateGroup, name: &str) -> Option<Hit> {
        let hit = self.locate(group, name)?;
        region.contains(hit.at).then_some(hit)
    }

    fn group_names(&self, group: TemplateGroup) -> Vec<String> {
        let Some(frame) = self.frame() else {
            return Vec::new();
        };
        Self::table(frame, group).keys().cloned().collect()
    }
}

impl PointerDriver for ScriptedScreen {
    fn move_to(&mut self, at: Point) {
        self.actions.push(PointerAction::MoveTo { at });
    }

    fn click(&mut self, at: Point) {
        self.actions.push(PointerAction::Click { at });
    }

    fn mouse_down(&mut self) {
        self.actions.push(PointerAction::MouseDown);
    }

    fn mouse_up(&mut self) {
        self.actions.push(PointerAction::MouseUp);
    }

    fn scroll(&mut self, amount: i32) {
        if amount > 0 {
            self.forward_scrolls += 1;
        } else if self.forward_scrolls > 0 {
            self.forward_scrolls -= 1;
        }
        self.actions.push(PointerAction::Scroll { amount });
    }
}

impl AppControl for ScriptedScreen {
    fn restart(&mut self) -> Result<(), AutoplayError> {
        self.restarts += 1;
        Ok(())
    }

    fn settle(&mut self, duration: Duration) {
        self.settles.push(duration);
    }
}

impl SnapshotSource for ScriptedScreen {
    fn battle_snapshot(&mut self) -> Result<BattleSnapshot, AutoplayError> {
        self.frame()
            .and_then(|frame| frame.snapshot.clone())
            .ok_or_else(|| AutoplayError::Snapshot("no snapshot scripted for this frame".into()))
    }
}

impl ShotSink for ScriptedScreen {
    fn capture(&mut self, tag: &str) {
        self.captures.push(tag.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_with(frame: Frame) -> ScriptedScreen {
        ScriptedScreen::new(Scenario {
            window: Rect::new(100, 50, 1600, 900),
            frames: vec![frame],
        })
    }

    #[test]
    fn gated_surprise_needs_enough_scrolls() {
        let mut screen = screen_with(Frame {
            scroll_surprise: Some(ScrollSurprise {
                after: 2,
                at: Point::new(40, 40),
            }),
            ..Frame::default()
        });
        screen.window().expect("window");
        assert!(screen.locate(TemplateGroup::Icons, "surprise").is_none());
        screen.scroll(60);
        screen.scroll(60);
        let hit = screen
            .locate(TemplateGroup::Icons, "surprise")
            .expect("hit after scrolling");
        assert_eq!(hit.at, Point::new(40, 40));
        screen.scroll(-60);
        assert!(screen.locate(TemplateGroup::Icons, "surprise").is_none());
    }

    #[test]
    fn locate_in_filters_by_region() {
        let mut frame = Frame::default();
        frame
            .treasure_blacklist
            .insert("bad".into(), Point::new(10, 10));
        let mut screen = screen_with(frame);
        screen.window().expect("window");
        let inside = Rect::new(0, 0, 20, 20);
        let outside = Rect::new(50, 50, 20, 20);
        assert!(screen
            .locate_in(inside, TemplateGroup::TreasureBlacklist, "bad")
            .is_some());
        assert!(screen
            .locate_in(outside, TemplateGroup::TreasureBlacklist, "bad")
            .is_none());
    }

    #[test]
    fn each_window_call_advances_one_frame() {
        let mut first = Frame::default();
        first.icons.insert("travel".into(), Point::new(1, 1));
        let second = Frame::default();
        let mut screen = ScriptedScreen::new(Scenario {
            window: Rect::default(),
            frames: vec![first, second],
        });
        screen.window().expect("window");
        assert!(screen.locate(TemplateGroup::Icons, "travel").is_some());
        screen.window().expect("window");
        assert!(screen.locate(TemplateGroup::Icons, "travel").is_none());
    }
}
