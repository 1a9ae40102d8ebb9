//! The action vocabulary.
//!
//! A fixed, closed, ordered set of input gestures. The order and the numeric
//! codes are part of the storage format and must not change between runs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// One input gesture the crawler can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Action {
    /// Tap the center of the screen.
    ClickCenter = 0,
    /// Tap near the bottom edge.
    ClickBottom = 1,
    SwipeUp = 2,
    SwipeDown = 3,
    SwipeLeft = 4,
    SwipeRight = 5,
}

impl Action {
    /// The canonical vocabulary, in canonical order.
    pub const ALL: [Action; 6] = [
        Action::ClickCenter,
        Action::ClickBottom,
        Action::SwipeUp,
        Action::SwipeDown,
        Action::SwipeLeft,
        Action::SwipeRight,
    ];

    /// Convert to u8 for storage.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse from a storage code.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::ClickCenter),
            1 => Some(Self::ClickBottom),
            2 => Some(Self::SwipeUp),
            3 => Some(Self::SwipeDown),
            4 => Some(Self::SwipeLeft),
            5 => Some(Self::SwipeRight),
            _ => None,
        }
    }

    /// Stable wire name, as drivers and exported graphs spell it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClickCenter => "click_center",
            Self::ClickBottom => "click_bottom",
            Self::SwipeUp => "swipe_up",
            Self::SwipeDown => "swipe_down",
            Self::SwipeLeft => "swipe_left",
            Self::SwipeRight => "swipe_right",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| CoreError::UnknownActionName(s.to_string()))
    }
}

impl TryFrom<u8> for Action {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(CoreError::UnknownActionCode(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vocabulary_order_matches_codes() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.to_u8() as usize, i);
        }
        let mut sorted = Action::ALL;
        sorted.sort();
        assert_eq!(sorted, Action::ALL);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(Action::ClickCenter.to_string(), "click_center");
        assert_eq!("swipe_left".parse::<Action>().unwrap(), Action::SwipeLeft);
        assert_eq!(
            "double_tap".parse::<Action>(),
            Err(CoreError::UnknownActionName("double_tap".into()))
        );
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Action::SwipeRight).unwrap();
        assert_eq!(json, "\"swipe_right\"");
        for action in Action::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    proptest! {
        #[test]
        fn test_unknown_codes_rejected(code in 6u8..) {
            prop_assert_eq!(Action::try_from(code), Err(CoreError::UnknownActionCode(code)));
        }
    }
}
