#![forbid(unsafe_code)]

//! WASM frontend for the gallery lightbox.
//!
//! Binds [`lightbox_core`] to the browser DOM:
//! - one delegated document click listener opens the overlay when an image
//!   inside a collection item is clicked,
//! - one document keydown listener forwards Escape / ArrowLeft / ArrowRight
//!   while the overlay is open,
//! - the overlay subtree is built on first open and detached on close.
//!
//! JS usage:
//!
//! ```js
//! import init, { LightboxWeb } from "./lightbox_web.js";
//! await init();
//! const gallery = new LightboxWeb({ itemSelector: ".collection-item" });
//! await gallery.init();
//! ```

pub use lightbox_core;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod error;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use error::WebError;
#[cfg(target_arch = "wasm32")]
pub use wasm::LightboxWeb;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct LightboxWeb;

#[cfg(not(target_arch = "wasm32"))]
impl LightboxWeb {
    pub fn new() -> Self {
        Self
    }
}
