#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Promise;
use lightbox_core::session::Direction;
use lightbox_core::{
    CollectionItem, GalleryConfig, GalleryController, GalleryKey, KeyModifiers, style,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlElement, HtmlImageElement, KeyboardEvent,
    MouseEvent,
};

use crate::dom::{DomOverlay, SharedGallery};
use crate::error::WebError;

struct DocumentListeners {
    click: Closure<dyn FnMut(MouseEvent)>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

/// Gallery lightbox bound to the current document.
///
/// ```js
/// const gallery = new LightboxWeb({ position: "both" });
/// await gallery.init();
/// ```
#[wasm_bindgen]
pub struct LightboxWeb {
    document: Document,
    gallery: SharedGallery,
    listeners: Option<DocumentListeners>,
    stylesheet: Option<Element>,
}

#[wasm_bindgen]
impl LightboxWeb {
    /// Create a gallery from optional JSON-compatible options.
    ///
    /// Invalid options are rejected here; nothing touches the document yet.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<JsValue>) -> Result<LightboxWeb, JsValue> {
        let config = parse_options(options)?;
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(WebError::Missing("document"))?;
        let gallery = Rc::new_cyclic(|weak| {
            RefCell::new(GalleryController::new(
                config,
                DomOverlay::new(document.clone(), weak.clone()),
            ))
        });
        Ok(Self {
            document,
            gallery,
            listeners: None,
            stylesheet: None,
        })
    }

    /// Wait for the document to be ready, inject styles, and bind listeners.
    ///
    /// Exported as an async JS function returning a Promise. Calling it again
    /// only refreshes the item images.
    pub async fn init(&mut self) -> Result<(), JsValue> {
        document_ready(&self.document).await?;
        if self.listeners.is_none() {
            self.inject_styles()?;
            self.bind()?;
            lightbox_core::info!("gallery bound to document");
        }
        self.refresh()?;
        Ok(())
    }

    /// Mark every item image as clickable. Call after rendering new items.
    pub fn refresh(&self) -> Result<u32, JsValue> {
        let config = self.gallery.borrow().config().clone();
        let mut count = 0;
        for item in query_all(&self.document, &config.item_selector)? {
            let Some(image) = item.query_selector(&config.image_selector)? else {
                continue;
            };
            if let Some(image) = image.dyn_ref::<HtmlElement>() {
                image.style().set_property("cursor", "pointer")?;
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn close(&self) -> Result<bool, JsValue> {
        Ok(self.gallery.borrow_mut().close()?)
    }

    pub fn next(&self) -> Result<Option<u32>, JsValue> {
        let index = self.gallery.borrow_mut().navigate(Direction::Next)?;
        Ok(index.map(|i| i as u32))
    }

    pub fn prev(&self) -> Result<Option<u32>, JsValue> {
        let index = self.gallery.borrow_mut().navigate(Direction::Previous)?;
        Ok(index.map(|i| i as u32))
    }

    /// Show the image at `index` of the open group.
    pub fn select(&self, index: u32) -> Result<bool, JsValue> {
        Ok(self.gallery.borrow_mut().select_thumbnail(index as usize)?)
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.gallery.borrow().is_open()
    }

    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> Option<u32> {
        self.gallery.borrow().current_index().map(|i| i as u32)
    }

    #[wasm_bindgen(js_name = groupLength)]
    pub fn group_length(&self) -> u32 {
        self.gallery
            .borrow()
            .session()
            .map_or(0, |session| session.len() as u32)
    }

    /// Explicit teardown for JS callers: removes listeners, the overlay, and
    /// the injected stylesheet.
    pub fn destroy(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            let _ = self.document.remove_event_listener_with_callback(
                "click",
                listeners.click.as_ref().unchecked_ref(),
            );
            let _ = self.document.remove_event_listener_with_callback(
                "keydown",
                listeners.keydown.as_ref().unchecked_ref(),
            );
        }
        if let Ok(mut ctl) = self.gallery.try_borrow_mut() {
            let _ = ctl.close();
            ctl.host_mut().teardown();
        }
        if let Some(stylesheet) = self.stylesheet.take() {
            stylesheet.remove();
        }
    }
}

impl LightboxWeb {
    fn inject_styles(&mut self) -> Result<(), WebError> {
        let config = self.gallery.borrow().config().clone();
        if !config.inject_styles {
            return Ok(());
        }
        let id = config.class(style::STYLES);
        if self.document.get_element_by_id(&id).is_some() {
            return Ok(());
        }
        let head = self.document.head().ok_or(WebError::Missing("document head"))?;
        let element = self.document.create_element("style")?;
        element.set_id(&id);
        element.set_text_content(Some(&style::stylesheet(&config.class_prefix)));
        head.append_child(&element)?;
        self.stylesheet = Some(element);
        Ok(())
    }

    fn bind(&mut self) -> Result<(), WebError> {
        let click = {
            let gallery = Rc::downgrade(&self.gallery);
            let document = self.document.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                on_document_click(&document, &gallery, &event);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let keydown = {
            let gallery = Rc::downgrade(&self.gallery);
            Closure::wrap(Box::new(move |event: KeyboardEvent| {
                on_keydown(&gallery, &event);
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };

        self.document
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        self.document
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        self.listeners = Some(DocumentListeners { click, keydown });
        Ok(())
    }
}

/// Open the gallery when an item image is clicked.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn on_document_click(
    document: &Document,
    gallery: &Weak<RefCell<GalleryController<DomOverlay>>>,
    event: &MouseEvent,
) {
    let Some(gallery) = gallery.upgrade() else {
        return;
    };
    let Ok(mut ctl) = gallery.try_borrow_mut() else {
        return;
    };
    let config = ctl.config();
    let Some(item) = clicked_item(event, config) else {
        return;
    };
    event.prevent_default();

    let items = match collect_items(document, config) {
        Ok(items) => items,
        Err(err) => {
            lightbox_core::warn!(error = %err, "failed to scan gallery items");
            return;
        }
    };
    match ctl.open_item(&items, &item) {
        Ok(true) => {}
        Ok(false) => {
            lightbox_core::debug!("clicked item is not interactive");
        }
        Err(err) => {
            lightbox_core::warn!(error = %err, "failed to open gallery");
        }
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn on_keydown(gallery: &Weak<RefCell<GalleryController<DomOverlay>>>, event: &KeyboardEvent) {
    let Some(gallery) = gallery.upgrade() else {
        return;
    };
    let Ok(mut ctl) = gallery.try_borrow_mut() else {
        return;
    };
    if !ctl.is_open() {
        return;
    }
    let key = GalleryKey::from_dom_key(&event.key());
    let mods = KeyModifiers::from_flags(
        event.shift_key(),
        event.alt_key(),
        event.ctrl_key(),
        event.meta_key(),
    );
    match ctl.handle_key(key, mods) {
        Ok(true) => event.prevent_default(),
        Ok(false) => {}
        Err(err) => {
            lightbox_core::warn!(error = %err, "key handling failed");
        }
    }
}

/// The collection item whose image was clicked, if any.
fn clicked_item(event: &MouseEvent, config: &GalleryConfig) -> Option<Element> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let image = target.closest(&config.image_selector).ok()??;
    image.closest(&config.item_selector).ok()?
}

/// Every collection item in document order, with payload text and alt.
fn collect_items(
    document: &Document,
    config: &GalleryConfig,
) -> Result<Vec<CollectionItem<Element>>, WebError> {
    let mut items = Vec::new();
    for element in query_all(document, &config.item_selector)? {
        let payload = element
            .query_selector(&config.payload_selector)?
            .and_then(|node| node.text_content());
        let alt = element
            .query_selector(&config.image_selector)?
            .and_then(|node| node.dyn_into::<HtmlImageElement>().ok())
            .map(|image| image.alt())
            .filter(|alt| !alt.is_empty());
        items.push(CollectionItem {
            handle: element,
            payload,
            alt,
        });
    }
    Ok(items)
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, WebError> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn parse_options(options: Option<JsValue>) -> Result<GalleryConfig, JsValue> {
    let config = match options {
        Some(value) if !value.is_undefined() && !value.is_null() => {
            let text = js_sys::JSON::stringify(&value)?
                .as_string()
                .ok_or_else(|| JsValue::from_str("gallery options must be an object"))?;
            GalleryConfig::from_json_str(&text)
        }
        _ => {
            let config = GalleryConfig::default();
            config.validate().map(|()| config)
        }
    };
    config.map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Resolve once `DOMContentLoaded` has fired, immediately if it already has.
async fn document_ready(document: &Document) -> Result<(), WebError> {
    if document.ready_state() != "loading" {
        return Ok(());
    }
    let mut listen_error = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(err) = document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            &resolve,
            &options,
        ) {
            listen_error = Some(err);
        }
    });
    if let Some(err) = listen_error {
        return Err(WebError::Dom(err));
    }
    JsFuture::from(promise).await?;
    Ok(())
}
