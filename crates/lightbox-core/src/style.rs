#![forbid(unsafe_code)]

//! Overlay stylesheet.
//!
//! Class names are `<prefix>-<suffix>` with the suffixes below, so several
//! galleries with different prefixes can coexist on one page.

use core::fmt::Write as _;

pub const MODAL: &str = "modal";
pub const HIDDEN: &str = "modal--hidden";
pub const BACKDROP: &str = "overlay";
pub const CONTENT: &str = "content";
pub const CLOSE: &str = "close";
pub const IMAGE: &str = "image";
pub const META: &str = "meta";
pub const NAV: &str = "nav";
pub const PREV: &str = "prev";
pub const NEXT: &str = "next";
pub const THUMBS: &str = "thumbs";
pub const THUMB: &str = "thumb";
pub const THUMB_ACTIVE: &str = "thumb--active";
pub const STYLES: &str = "styles";

/// CSS for the overlay, scoped by `prefix`.
#[must_use]
pub fn stylesheet(prefix: &str) -> String {
    let p = prefix;
    let mut css = String::with_capacity(2048);
    // `write!` into a String cannot fail.
    let _ = write!(
        css,
        "\
.{p}-{MODAL} {{
  position: fixed; z-index: 9999; left: 0; top: 0;
  width: 100vw; height: 100vh;
  background: rgba(0,0,0,0.8);
  display: flex; align-items: center; justify-content: center;
}}
.{p}-{HIDDEN} {{ display: none; }}
.{p}-{BACKDROP} {{ position: absolute; width: 100%; height: 100%; top: 0; left: 0; }}
.{p}-{CONTENT} {{
  position: relative; z-index: 2;
  background: #222; padding: 20px; border-radius: 8px;
  text-align: center; max-width: 90vw; max-height: 90vh;
}}
.{p}-{IMAGE} {{ display: block; margin: 0 auto; max-width: 80vw; max-height: 70vh; object-fit: contain; }}
.{p}-{CLOSE} {{
  position: absolute; top: 10px; right: 20px;
  width: 40px; height: 40px; line-height: 40px; padding: 0;
  color: #fff; font-size: 2em; cursor: pointer;
  background: none; border: none;
}}
.{p}-{NAV} {{
  background: none; border: none; color: #fff;
  font-size: 2em; cursor: pointer;
  margin: 0 20px; padding: 10px; border-radius: 50%;
  transition: background-color 0.3s;
}}
.{p}-{NAV}:hover {{ background-color: rgba(255,255,255,0.1); }}
.{p}-{META} {{ color: #fff; margin-top: 10px; font-size: 14px; }}
.{p}-{THUMBS} {{
  display: flex; gap: 8px; justify-content: center;
  margin-top: 12px; max-width: 80vw; overflow-x: auto;
}}
.{p}-{THUMB} {{
  width: 64px; height: 48px; object-fit: cover; cursor: pointer;
  opacity: 0.6; border: 2px solid transparent; border-radius: 4px;
}}
.{p}-{THUMB_ACTIVE} {{ opacity: 1; border-color: #fff; }}
"
    );
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_is_scoped_by_prefix() {
        let css = stylesheet("lb");
        assert!(css.contains(".lb-modal {"));
        assert!(css.contains(".lb-modal--hidden { display: none; }"));
        assert!(css.contains(".lb-nav:hover"));
        assert!(css.contains(".lb-thumb--active"));
        assert!(!css.contains(".gallery-"));
    }

    #[test]
    fn braces_balance() {
        let css = stylesheet("gallery");
        assert_eq!(css.matches('{').count(), css.matches('}').count());
    }
}
