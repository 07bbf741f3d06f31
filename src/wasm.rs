//! WASM bindings for previewing tour layouts in the browser.
//!
//! Exposes the geometry and a headless render of a single step to JavaScript
//! via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::config::ConfigOverride;
use crate::geometry::{self, PanelPosition, Rect, Size};
use crate::step::Step;
use crate::surface::Document;
use crate::tour::Tour;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Highlight box around a target as `[top, left, width, height]`.
#[wasm_bindgen]
pub fn overlay_box(top: f64, left: f64, width: f64, height: f64, padding: f64) -> Vec<f64> {
    let rect = geometry::overlay_box(Rect::new(top, left, width, height), padding);
    vec![rect.top, rect.left, rect.width, rect.height]
}

/// Panel box for an overlay, as `[top, left, width, height]`.
///
/// `position` is one of `top`, `bottom`, `left`, `right`.
#[wasm_bindgen]
pub fn panel_box(overlay: &[f64], panel_width: f64, panel_height: f64, position: &str) -> Result<Vec<f64>, JsValue> {
    let [top, left, width, height] = overlay else {
        return Err(JsValue::from_str("overlay must have four components"));
    };
    let position = parse_position(position)?;

    let rect = geometry::panel_box(
        Rect::new(*top, *left, *width, *height),
        Size::new(panel_width, panel_height),
        position,
    );
    Ok(vec![rect.top, rect.left, rect.width, rect.height])
}

/// Render one step into `html` and return the resulting markup.
#[wasm_bindgen]
pub fn preview_step(
    html: &str,
    selector: &str,
    panel_html: &str,
    position: &str,
    padding: f64,
) -> Result<String, JsValue> {
    let options = ConfigOverride::new()
        .with_padding(padding)
        .with_panel_position(parse_position(position)?)
        .with_animate(false);

    let mut tour = Tour::new(options, Document::parse(html));
    tour.focus_single(&Step::new(selector).with_panel(panel_html))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(tour.surface().to_html())
}

fn parse_position(position: &str) -> Result<PanelPosition, JsValue> {
    PanelPosition::parse(position)
        .ok_or_else(|| JsValue::from_str(&format!("unknown panel position: {position}")))
}
