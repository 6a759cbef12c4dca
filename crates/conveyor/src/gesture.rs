use crate::model::TrayId;
use crate::tray::{Tray, TrayKind};

/// Notification sent once per completed click on a tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraySelected(pub TrayId);

/// Press/release tracking for one pointer over a row of trays.
///
/// The release always goes to the tray that received the press, wherever the
/// pointer is by then.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickGesture {
    #[default]
    Idle,
    Pressed {
        slot: usize,
    },
}

impl ClickGesture {
    pub fn press<K: TrayKind>(&mut self, trays: &mut [Tray<K>], slot: usize) -> bool {
        if *self != Self::Idle {
            return false;
        }
        if let Some(tray) = trays.get_mut(slot)
            && tray.press()
        {
            *self = Self::Pressed { slot };
            return true;
        }
        false
    }

    pub fn release<K: TrayKind>(&mut self, trays: &mut [Tray<K>]) -> Option<TraySelected> {
        let Self::Pressed { slot } = std::mem::take(self) else {
            return None;
        };
        trays.get_mut(slot).and_then(|t| t.release()).map(TraySelected)
    }

    pub fn pressed_slot(&self) -> Option<usize> {
        match self {
            Self::Pressed { slot } => Some(*slot),
            Self::Idle => None,
        }
    }
}
