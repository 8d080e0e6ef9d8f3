use crate::AutoplayError;
use lushi_core::{BattleSnapshot, Point, Rect};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which template set a lookup goes against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TemplateGroup {
    Icons,
    TreasureBlacklist,
    HeroWhitelist,
    HeroBlacklist,
}

/// A template found on screen, in window-local coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hit {
    pub at: Point,
    pub confidence: f32,
}

/// Template matching over the observed window. A miss is `None`, never an
/// error; only losing the window itself fails.
pub trait Recognizer {
    fn window(&mut self) -> Result<Rect, AutoplayError>;
    fn locate(&mut self, group: TemplateGroup, name: &str) -> Option<Hit>;
    /// Lookup restricted to a window-local region (treasure option boxes).
    fn locate_in(&mut self, region: Rect, group: TemplateGroup, name: &str) -> Option<Hit>;
    /// Template names configured for a group, for exhaustive scans.
    fn group_names(&self, group: TemplateGroup) -> Vec<String>;
}

/// OS pointer primitives. Implementations do not fail; a dropped event is
/// indistinguishable from a miss and the watchdog covers it.
pub trait PointerDriver {
    fn move_to(&mut self, at: Point);
    fn click(&mut self, at: Point);
    fn mouse_down(&mut self);
    fn mouse_up(&mut self);
    fn scroll(&mut self, amount: i32);
}

/// Lifecycle of the automated application.
pub trait AppControl {
    fn restart(&mut self) -> Result<(), AutoplayError>;
    /// Blocking settle pause; scripted backends record it instead of
    /// sleeping.
    fn settle(&mut self, duration: Duration);
}

/// Produces the parsed battle snapshot for the current tick.
pub trait SnapshotSource {
    fn battle_snapshot(&mut self) -> Result<BattleSnapshot, AutoplayError>;
}

/// Diagnostic screenshot requests; best effort, failures are swallowed by
/// the implementation.
pub trait ShotSink {
    fn capture(&mut self, tag: &str);
}

/// The full platform surface the dispatcher drives. One adapter object
/// implements all of it; anything implementing the five traits qualifies.
pub trait Backend:
    Recognizer + PointerDriver + AppControl + SnapshotSource + ShotSink
{
}

impl<T> Backend for T where
    T: Recognizer + PointerDriver + AppControl + SnapshotSource + ShotSink
{
}
