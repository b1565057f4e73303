#![forbid(unsafe_code)]

//! Gallery controller: owns the session and drives an [`OverlayHost`].
//!
//! The controller is a two-state machine:
//!
//! ```text
//!            open (resolved)            navigate / select / open
//!  Closed ───────────────────▶ Open ◀──────────────────────────┐
//!    ▲                          │ └────────────────────────────┘
//!    └──────────── close ───────┘
//! ```
//!
//! Closing while closed, and navigating while closed, are no-ops. Every
//! operation runs to completion synchronously; the host decides how the
//! overlay is realized.

use crate::config::{GalleryConfig, MountStrategy};
use crate::group::{CollectionItem, GroupSelection, resolve_group};
use crate::input::{GalleryKey, KeyModifiers, OverlayAction};
use crate::payload::GalleryEntry;
use crate::session::{Direction, GallerySession};
use crate::view::OverlayView;

/// Realizes the overlay for a [`GalleryController`].
///
/// The browser implementation builds a DOM subtree; tests use
/// [`HeadlessOverlay`](crate::headless::HeadlessOverlay).
pub trait OverlayHost {
    type Error;

    /// Whether the overlay subtree exists.
    fn is_built(&self) -> bool;

    /// Create the overlay subtree and wire its controls. Called at most once
    /// per subtree, before the first present.
    fn build(&mut self, config: &GalleryConfig) -> Result<(), Self::Error>;

    /// Reflect `view` into the overlay.
    fn present(&mut self, view: &OverlayView) -> Result<(), Self::Error>;

    /// Make the overlay visible.
    fn mount(&mut self, strategy: MountStrategy) -> Result<(), Self::Error>;

    /// Take the overlay out of view.
    fn unmount(&mut self, strategy: MountStrategy) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryState {
    Closed,
    Open,
}

/// One gallery instance: options, overlay host, and the current session.
#[derive(Debug)]
pub struct GalleryController<O> {
    config: GalleryConfig,
    host: O,
    session: Option<GallerySession>,
}

impl<O: OverlayHost> GalleryController<O> {
    #[must_use]
    pub fn new(config: GalleryConfig, host: O) -> Self {
        Self {
            config,
            host,
            session: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GalleryConfig {
        &self.config
    }

    #[must_use]
    pub const fn host(&self) -> &O {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut O {
        &mut self.host
    }

    #[must_use]
    pub const fn state(&self) -> GalleryState {
        if self.session.is_some() {
            GalleryState::Open
        } else {
            GalleryState::Closed
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub const fn session(&self) -> Option<&GallerySession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.session.as_ref().map(GallerySession::current)
    }

    /// Resolve the group of a clicked item and open it.
    ///
    /// Returns `Ok(false)` when the item is not interactive.
    pub fn open_item<H: PartialEq>(
        &mut self,
        items: &[CollectionItem<H>],
        clicked: &H,
    ) -> Result<bool, O::Error> {
        match resolve_group(items, clicked, &self.config) {
            Some(selection) => self.open(selection),
            None => Ok(false),
        }
    }

    /// Open a resolved group.
    pub fn open(&mut self, selection: GroupSelection) -> Result<bool, O::Error> {
        crate::debug!(group = %selection.group, len = selection.entries.len(), "resolved group");
        self.open_entries(selection.entries, selection.start)
    }

    /// Open arbitrary entries at `start`.
    ///
    /// An empty group or an out-of-range start opens nothing and leaves the
    /// current state untouched.
    pub fn open_entries(
        &mut self,
        entries: Vec<GalleryEntry>,
        start: usize,
    ) -> Result<bool, O::Error> {
        let Some(session) = GallerySession::new(entries, start) else {
            crate::debug!(start, "ignoring open with empty group or bad start");
            return Ok(false);
        };

        self.ensure_built()?;
        self.host
            .present(&OverlayView::from_session(&session, &self.config))?;
        self.host.mount(self.config.mount)?;
        crate::info!(
            index = session.current(),
            len = session.len(),
            "gallery opened"
        );
        self.session = Some(session);
        Ok(true)
    }

    /// Close the overlay. Returns `Ok(false)` if it was already closed.
    pub fn close(&mut self) -> Result<bool, O::Error> {
        if self.session.is_none() {
            return Ok(false);
        }
        self.ensure_built()?;
        self.host.unmount(self.config.mount)?;
        self.session = None;
        crate::info!("gallery closed");
        Ok(true)
    }

    /// Step to the previous or next image with wraparound.
    ///
    /// Returns the new index, or `None` while closed.
    pub fn navigate(&mut self, direction: Direction) -> Result<Option<usize>, O::Error> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let index = session.navigate(direction);
        crate::debug!(?direction, index, "navigate");
        self.render()?;
        Ok(Some(index))
    }

    /// Jump to the image behind thumbnail `index`.
    pub fn select_thumbnail(&mut self, index: usize) -> Result<bool, O::Error> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        if !session.select(index) {
            return Ok(false);
        }
        crate::debug!(index, "select thumbnail");
        self.render()?;
        Ok(true)
    }

    /// Apply a user action. Returns whether anything happened.
    pub fn dispatch(&mut self, action: OverlayAction) -> Result<bool, O::Error> {
        match action {
            OverlayAction::Close => self.close(),
            OverlayAction::Navigate(direction) => {
                self.navigate(direction).map(|index| index.is_some())
            }
            OverlayAction::Select(index) => self.select_thumbnail(index),
        }
    }

    /// Handle a key press. Returns whether the key was consumed.
    ///
    /// Keys are ignored while closed, when keyboard handling is disabled,
    /// and when a shortcut modifier is held.
    pub fn handle_key(&mut self, key: GalleryKey, mods: KeyModifiers) -> Result<bool, O::Error> {
        if !self.config.keyboard || !self.is_open() || mods.is_shortcut() {
            return Ok(false);
        }
        match key.action() {
            Some(action) => self.dispatch(action),
            None => Ok(false),
        }
    }

    /// Present the current state again.
    pub fn render(&mut self) -> Result<(), O::Error> {
        if self.session.is_none() {
            return Ok(());
        }
        self.ensure_built()?;
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        self.host
            .present(&OverlayView::from_session(session, &self.config))
    }

    /// Take the host back, e.g. to tear it down.
    pub fn into_host(self) -> O {
        self.host
    }

    fn ensure_built(&mut self) -> Result<(), O::Error> {
        if !self.host.is_built() {
            self.host.build(&self.config)?;
            crate::info!("gallery overlay created");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::config::PositionIndicator;
    use crate::headless::HeadlessOverlay;

    fn entries(prefix: &str, n: usize) -> Vec<GalleryEntry> {
        (0..n)
            .map(|i| GalleryEntry::from_src(format!("{prefix}{i}.jpg")))
            .collect()
    }

    fn controller() -> GalleryController<HeadlessOverlay> {
        GalleryController::new(GalleryConfig::default(), HeadlessOverlay::new())
    }

    #[test]
    fn starts_closed_and_builds_lazily() {
        let ctl = controller();
        assert_eq!(ctl.state(), GalleryState::Closed);
        assert!(!ctl.host().is_built());
        assert_eq!(ctl.current_index(), None);
    }

    #[test]
    fn open_builds_once_presents_and_mounts() {
        let mut ctl = controller();
        assert!(ctl.open_entries(entries("a", 3), 1).unwrap());
        assert_eq!(ctl.state(), GalleryState::Open);
        assert_eq!(ctl.host().build_count(), 1);
        assert!(ctl.host().is_mounted());
        assert_eq!(ctl.host().current_src(), Some("a1.jpg"));

        ctl.close().unwrap();
        ctl.open_entries(entries("b", 2), 0).unwrap();
        assert_eq!(ctl.host().build_count(), 1);
        assert_eq!(ctl.host().current_src(), Some("b0.jpg"));
    }

    #[test]
    fn empty_or_bad_open_is_noop() {
        let mut ctl = controller();
        assert!(!ctl.open_entries(Vec::new(), 0).unwrap());
        assert!(!ctl.open_entries(entries("a", 2), 5).unwrap());
        assert_eq!(ctl.state(), GalleryState::Closed);
        assert!(!ctl.host().is_built());

        ctl.open_entries(entries("a", 2), 1).unwrap();
        assert!(!ctl.open_entries(Vec::new(), 0).unwrap());
        assert_eq!(ctl.current_index(), Some(1));
    }

    #[test]
    fn close_is_idempotent() {
        let mut ctl = controller();
        assert!(!ctl.close().unwrap());
        ctl.open_entries(entries("a", 1), 0).unwrap();
        assert!(ctl.close().unwrap());
        assert!(!ctl.host().is_mounted());
        assert!(!ctl.close().unwrap());
        assert_eq!(ctl.state(), GalleryState::Closed);
    }

    #[test]
    fn navigation_while_closed_is_noop() {
        let mut ctl = controller();
        assert_eq!(ctl.navigate(Direction::Next).unwrap(), None);
        assert!(!ctl.select_thumbnail(0).unwrap());
        assert!(
            !ctl
                .handle_key(GalleryKey::Right, KeyModifiers::empty())
                .unwrap()
        );
        assert_eq!(ctl.host().present_count(), 0);
    }

    #[test]
    fn select_thumbnail_rerenders() {
        let config = GalleryConfig {
            position: PositionIndicator::Thumbnails,
            ..GalleryConfig::default()
        };
        let mut ctl = GalleryController::new(config, HeadlessOverlay::new());
        ctl.open_entries(entries("a", 4), 0).unwrap();
        assert!(ctl.select_thumbnail(3).unwrap());
        assert!(!ctl.select_thumbnail(4).unwrap());
        let view = ctl.host().last_view().unwrap();
        assert_eq!(view.image.src, "a3.jpg");
        assert_eq!(view.thumbnails.as_ref().unwrap().active(), Some(3));
    }

    #[test]
    fn keys_respect_config_and_modifiers() {
        let mut ctl = controller();
        ctl.open_entries(entries("a", 3), 0).unwrap();
        assert!(!ctl.handle_key(GalleryKey::Right, KeyModifiers::CTRL).unwrap());
        assert_eq!(ctl.current_index(), Some(0));
        assert!(!ctl.handle_key(GalleryKey::Other, KeyModifiers::empty()).unwrap());
        assert!(ctl.handle_key(GalleryKey::Right, KeyModifiers::SHIFT).unwrap());
        assert_eq!(ctl.current_index(), Some(1));

        let config = GalleryConfig {
            keyboard: false,
            ..GalleryConfig::default()
        };
        let mut ctl = GalleryController::new(config, HeadlessOverlay::new());
        ctl.open_entries(entries("a", 3), 0).unwrap();
        assert!(!ctl.handle_key(GalleryKey::Escape, KeyModifiers::empty()).unwrap());
        assert!(ctl.is_open());
    }

    #[test]
    fn render_repeats_current_view_only_while_open() {
        let mut ctl = controller();
        ctl.render().unwrap();
        assert_eq!(ctl.host().present_count(), 0);
        assert!(!ctl.host().is_built());

        ctl.open_entries(entries("a", 3), 2).unwrap();
        ctl.render().unwrap();
        assert_eq!(ctl.host().present_count(), 2);
        assert_eq!(ctl.host().views()[0], ctl.host().views()[1]);
        assert_eq!(ctl.host().current_src(), Some("a2.jpg"));
    }

    #[test]
    fn hide_strategy_keeps_overlay_attached() {
        let config = GalleryConfig {
            mount: MountStrategy::Hide,
            ..GalleryConfig::default()
        };
        let mut ctl = GalleryController::new(config, HeadlessOverlay::new());
        ctl.open_entries(entries("a", 2), 0).unwrap();
        ctl.close().unwrap();
        assert!(ctl.host().is_attached());
        assert!(!ctl.host().is_mounted());
    }

    #[test]
    fn host_failure_leaves_state_closed() {
        let mut ctl = controller();
        ctl.host_mut().fail_next_mount();
        assert!(ctl.open_entries(entries("a", 2), 0).is_err());
        assert_eq!(ctl.state(), GalleryState::Closed);

        assert!(ctl.open_entries(entries("a", 2), 0).unwrap());
        assert_eq!(ctl.state(), GalleryState::Open);
    }
}
