use lushi_core::Point;
use serde::{Deserialize, Serialize};

/// Logical pointer intents issued by the dispatcher, in screen space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PointerAction {
    MoveTo { at: Point },
    Click { at: Point },
    MouseDown,
    MouseUp,
    Scroll { amount: i32 },
}

impl PointerAction {
    pub fn stable_key(&self) -> String {
        match self {
            Self::MoveTo { at } => format!("move_to:{}:{}", at.x, at.y),
            Self::Click { at } => format!("click:{}:{}", at.x, at.y),
            Self::MouseDown => "mouse_down".to_string(),
            Self::MouseUp => "mouse_up".to_string(),
            Self::Scroll { amount } => format!("scroll:{amount}"),
        }
    }

    pub fn short_label(&self) -> String {
        match self {
            Self::MoveTo { at } => format!("move_to ({}, {})", at.x, at.y),
            Self::Click { at } => format!("click ({}, {})", at.x, at.y),
            Self::MouseDown => "mouse_down".to_string(),
            Self::MouseUp => "mouse_up".to_string(),
            Self::Scroll { amount } => format!("scroll {amount}"),
        }
    }
}
