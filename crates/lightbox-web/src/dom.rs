#![forbid(unsafe_code)]

//! DOM realization of the overlay.
//!
//! The subtree is built on first open. Controls carry `data-gallery-action`
//! markers and a single delegated click listener on the overlay root turns
//! clicks into [`OverlayAction`] values for the controller.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use lightbox_core::config::{GalleryConfig, MountStrategy, OverlayParts};
use lightbox_core::input::{ACTION_ATTR, INDEX_ATTR};
use lightbox_core::session::Direction;
use lightbox_core::view::{OverlayView, ThumbnailStrip};
use lightbox_core::{GalleryController, OverlayAction, OverlayHost, style};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, MouseEvent};

use crate::error::WebError;

pub(crate) type SharedGallery = Rc<RefCell<GalleryController<DomOverlay>>>;
type WeakGallery = Weak<RefCell<GalleryController<DomOverlay>>>;

struct OverlayNodes {
    root: HtmlElement,
    image: HtmlImageElement,
    meta: Option<Element>,
    thumbs: Option<Element>,
    on_click: Closure<dyn FnMut(MouseEvent)>,
}

/// [`OverlayHost`] backed by real DOM nodes.
pub(crate) struct DomOverlay {
    document: Document,
    gallery: WeakGallery,
    prefix: String,
    nodes: Option<OverlayNodes>,
    strip: Option<ThumbnailStrip>,
}

impl DomOverlay {
    pub(crate) fn new(document: Document, gallery: WeakGallery) -> Self {
        Self {
            document,
            gallery,
            prefix: String::new(),
            nodes: None,
            strip: None,
        }
    }

    /// Remove the subtree and its listener for good.
    pub(crate) fn teardown(&mut self) {
        if let Some(nodes) = self.nodes.take() {
            let _ = nodes.root.remove_event_listener_with_callback(
                "click",
                nodes.on_click.as_ref().unchecked_ref(),
            );
            nodes.root.remove();
        }
        self.strip = None;
    }

    fn class(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.prefix)
    }

    fn create(&self, tag: &str, suffix: &str) -> Result<Element, WebError> {
        let element = self.document.create_element(tag)?;
        element.set_class_name(&self.class(suffix));
        Ok(element)
    }

    fn create_control(
        &self,
        suffixes: &[&str],
        action: OverlayAction,
        text: &str,
        aria: &str,
    ) -> Result<Element, WebError> {
        let button = self.document.create_element("button")?;
        let classes: Vec<String> = suffixes.iter().map(|s| self.class(s)).collect();
        button.set_class_name(&classes.join(" "));
        button.set_attribute("type", "button")?;
        button.set_attribute(ACTION_ATTR, action.marker())?;
        button.set_attribute("aria-label", aria)?;
        button.set_text_content(Some(text));
        Ok(button)
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn delegate_clicks(&self) -> Closure<dyn FnMut(MouseEvent)> {
        let gallery = self.gallery.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(action) = clicked_action(&event) else {
                return;
            };
            event.prevent_default();
            let Some(gallery) = gallery.upgrade() else {
                return;
            };
            let Ok(mut ctl) = gallery.try_borrow_mut() else {
                return;
            };
            if let Err(err) = ctl.dispatch(action) {
                lightbox_core::warn!(error = %err, "overlay action failed");
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    }

    fn present_strip(&mut self, strip: &ThumbnailStrip) -> Result<(), WebError> {
        let Some(container) = self.nodes.as_ref().and_then(|n| n.thumbs.clone()) else {
            return Ok(());
        };

        let rebuild = self
            .strip
            .as_ref()
            .is_none_or(|rendered| !rendered.same_images(strip));
        if rebuild {
            container.set_text_content(None);
            for (index, thumb) in strip.thumbnails.iter().enumerate() {
                let img = self.create("img", style::THUMB)?;
                img.set_attribute(ACTION_ATTR, OverlayAction::Select(index).marker())?;
                img.set_attribute(INDEX_ATTR, &index.to_string())?;
                img.set_attribute("alt", &thumb.alt)?;
                if strip.lazy {
                    img.set_attribute("loading", "lazy")?;
                }
                img.set_attribute("src", &thumb.src)?;
                container.append_child(&img)?;
            }
        }

        let active_class = self.class(style::THUMB_ACTIVE);
        let children = container.children();
        for (index, thumb) in strip.thumbnails.iter().enumerate() {
            let Some(child) = children.item(index as u32) else {
                continue;
            };
            child
                .class_list()
                .toggle_with_force(&active_class, thumb.active)?;
            if thumb.active {
                child.set_attribute("aria-current", "true")?;
            } else {
                child.remove_attribute("aria-current")?;
            }
        }
        self.strip = Some(strip.clone());
        Ok(())
    }
}

impl OverlayHost for DomOverlay {
    type Error = WebError;

    fn is_built(&self) -> bool {
        self.nodes.is_some()
    }

    fn build(&mut self, config: &GalleryConfig) -> Result<(), WebError> {
        self.prefix = config.class_prefix.clone();
        let parts = config.parts();
        let labels = &config.labels;

        let root: HtmlElement = self
            .create("div", style::MODAL)?
            .dyn_into()
            .map_err(|_| WebError::WrongType("overlay root"))?;
        root.set_attribute("role", "dialog")?;
        root.set_attribute("aria-modal", "true")?;
        root.set_attribute("aria-label", &labels.dialog_aria)?;

        let backdrop = self.create("div", style::BACKDROP)?;
        if parts.contains(OverlayParts::BACKDROP_CLOSE) {
            backdrop.set_attribute(ACTION_ATTR, OverlayAction::Close.marker())?;
        }
        root.append_child(&backdrop)?;

        let content = self.create("div", style::CONTENT)?;
        root.append_child(&content)?;

        if parts.contains(OverlayParts::CLOSE) {
            let close = self.create_control(
                &[style::CLOSE],
                OverlayAction::Close,
                &labels.close,
                &labels.close_aria,
            )?;
            content.append_child(&close)?;
        }

        let image: HtmlImageElement = self
            .create("img", style::IMAGE)?
            .dyn_into()
            .map_err(|_| WebError::WrongType("overlay image"))?;
        image.set_alt("");
        content.append_child(&image)?;

        let meta = if parts.contains(OverlayParts::COUNTER) {
            let meta = self.create("div", style::META)?;
            meta.set_attribute("aria-live", "polite")?;
            content.append_child(&meta)?;
            Some(meta)
        } else {
            None
        };

        let thumbs = if parts.contains(OverlayParts::THUMBNAILS) {
            let thumbs = self.create("div", style::THUMBS)?;
            content.append_child(&thumbs)?;
            Some(thumbs)
        } else {
            None
        };

        if parts.contains(OverlayParts::NAVIGATION) {
            let prev = self.create_control(
                &[style::NAV, style::PREV],
                OverlayAction::Navigate(Direction::Previous),
                &labels.previous,
                &labels.previous_aria,
            )?;
            let next = self.create_control(
                &[style::NAV, style::NEXT],
                OverlayAction::Navigate(Direction::Next),
                &labels.next,
                &labels.next_aria,
            )?;
            content.append_child(&prev)?;
            content.append_child(&next)?;
        }

        let on_click = self.delegate_clicks();
        root.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        self.nodes = Some(OverlayNodes {
            root,
            image,
            meta,
            thumbs,
            on_click,
        });
        self.strip = None;
        Ok(())
    }

    fn present(&mut self, view: &OverlayView) -> Result<(), WebError> {
        let nodes = self.nodes.as_ref().ok_or(WebError::Missing("overlay"))?;

        let image = &nodes.image;
        image.set_src(&view.image.src);
        set_or_remove(image, "srcset", view.image.srcset.as_deref())?;
        set_or_remove(image, "sizes", view.image.sizes.as_deref())?;
        set_or_remove(
            image,
            "width",
            view.image.width.map(|w| w.to_string()).as_deref(),
        )?;
        set_or_remove(
            image,
            "height",
            view.image.height.map(|h| h.to_string()).as_deref(),
        )?;
        image.set_alt(&view.image.alt);

        if let Some(meta) = &nodes.meta {
            meta.set_text_content(view.counter.as_deref());
        }

        if let Some(strip) = &view.thumbnails {
            self.present_strip(strip)?;
        }
        Ok(())
    }

    fn mount(&mut self, _strategy: MountStrategy) -> Result<(), WebError> {
        let nodes = self.nodes.as_ref().ok_or(WebError::Missing("overlay"))?;
        nodes.root.class_list().remove_1(&self.class(style::HIDDEN))?;
        if nodes.root.parent_node().is_none() {
            let body = self.document.body().ok_or(WebError::Missing("document body"))?;
            body.append_child(&nodes.root)?;
        }
        Ok(())
    }

    fn unmount(&mut self, strategy: MountStrategy) -> Result<(), WebError> {
        let nodes = self.nodes.as_ref().ok_or(WebError::Missing("overlay"))?;
        match strategy {
            MountStrategy::Detach => {
                nodes.root.remove();
                // Release the decoded image while detached.
                nodes.image.remove_attribute("src")?;
                nodes.image.remove_attribute("srcset")?;
            }
            MountStrategy::Hide => {
                nodes.root.class_list().add_1(&self.class(style::HIDDEN))?;
            }
        }
        Ok(())
    }
}

/// Action marker of the nearest marked ancestor of the click target.
fn clicked_action(event: &MouseEvent) -> Option<OverlayAction> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let control = target.closest(&format!("[{ACTION_ATTR}]")).ok()??;
    let action = control.get_attribute(ACTION_ATTR)?;
    let index = control.get_attribute(INDEX_ATTR);
    OverlayAction::from_dom(&action, index.as_deref())
}

fn set_or_remove(element: &Element, name: &str, value: Option<&str>) -> Result<(), WebError> {
    match value {
        Some(value) => element.set_attribute(name, value)?,
        None => element.remove_attribute(name)?,
    }
    Ok(())
}
