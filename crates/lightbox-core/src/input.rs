#![forbid(unsafe_code)]

//! Input normalization: DOM key names and overlay control markers.
//!
//! The web host hands over raw `KeyboardEvent.key` strings and the
//! `data-gallery-action` / `data-gallery-index` attributes of clicked
//! controls; this module turns them into [`OverlayAction`] values.

use bitflags::bitflags;

use crate::session::Direction;

/// Attribute naming the action of an overlay control.
pub const ACTION_ATTR: &str = "data-gallery-action";
/// Attribute carrying a thumbnail's index within the group.
pub const INDEX_ATTR: &str = "data-gallery-index";

pub const ACTION_CLOSE: &str = "close";
pub const ACTION_PREVIOUS: &str = "prev";
pub const ACTION_NEXT: &str = "next";
pub const ACTION_SELECT: &str = "select";

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const META  = 0b1000;
    }
}

impl KeyModifiers {
    #[must_use]
    pub fn from_flags(shift: bool, alt: bool, ctrl: bool, meta: bool) -> Self {
        let mut mods = Self::empty();
        mods.set(Self::SHIFT, shift);
        mods.set(Self::ALT, alt);
        mods.set(Self::CTRL, ctrl);
        mods.set(Self::META, meta);
        mods
    }

    /// Whether a browser or OS shortcut is probably intended.
    #[must_use]
    pub fn is_shortcut(self) -> bool {
        self.intersects(Self::ALT | Self::CTRL | Self::META)
    }
}

/// Keys the gallery reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryKey {
    Escape,
    Left,
    Right,
    Other,
}

impl GalleryKey {
    /// Normalize a DOM `KeyboardEvent.key` value, including legacy names.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn action(self) -> Option<OverlayAction> {
        match self {
            Self::Escape => Some(OverlayAction::Close),
            Self::Left => Some(OverlayAction::Navigate(Direction::Previous)),
            Self::Right => Some(OverlayAction::Navigate(Direction::Next)),
            Self::Other => None,
        }
    }
}

/// Something the user asked the open overlay to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayAction {
    Close,
    Navigate(Direction),
    Select(usize),
}

impl OverlayAction {
    /// Decode a control's action marker and optional index attribute.
    #[must_use]
    pub fn from_dom(action: &str, index: Option<&str>) -> Option<Self> {
        match action {
            ACTION_CLOSE => Some(Self::Close),
            ACTION_PREVIOUS => Some(Self::Navigate(Direction::Previous)),
            ACTION_NEXT => Some(Self::Navigate(Direction::Next)),
            ACTION_SELECT => index?.trim().parse().ok().map(Self::Select),
            _ => None,
        }
    }

    /// Marker value to put in [`ACTION_ATTR`] for this action.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Close => ACTION_CLOSE,
            Self::Navigate(Direction::Previous) => ACTION_PREVIOUS,
            Self::Navigate(Direction::Next) => ACTION_NEXT,
            Self::Select(_) => ACTION_SELECT,
        }
    }
}
