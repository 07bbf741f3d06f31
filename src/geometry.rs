//! Overlay and panel placement.
//!
//! All functions here are pure. Inputs are viewport-relative boxes as returned
//! by [`RenderSurface::measure_bounding_box`](crate::surface::RenderSurface);
//! [`Placement::absolute`] turns a computed box into document coordinates for
//! absolutely positioned regions.

use std::fmt;

/// An axis-aligned box in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Horizontal center line.
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical center line.
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

/// Rendered size of a region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Current document scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub vertical: f64,
    pub horizontal: f64,
}

impl ScrollOffset {
    pub const fn new(vertical: f64, horizontal: f64) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Combine two scroll sources per axis, preferring `self` unless it is zero.
    ///
    /// Browsers report the page scroll on either the root element or the body
    /// depending on the rendering mode; the root wins whenever it is set.
    pub fn or_fallback(self, fallback: ScrollOffset) -> ScrollOffset {
        ScrollOffset {
            vertical: if is_set(self.vertical) {
                self.vertical
            } else {
                fallback.vertical
            },
            horizontal: if is_set(self.horizontal) {
                self.horizontal
            } else {
                fallback.horizontal
            },
        }
    }
}

/// Side of the highlighted area on which the panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl PanelPosition {
    pub const ALL: [PanelPosition; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Lowercase name used in class names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parse a position name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

impl fmt::Display for PanelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expand the target box by `padding` on every side.
///
/// The result is not clamped to the viewport, so a target near an edge yields
/// a box that extends past it.
pub fn overlay_box(target: Rect, padding: f64) -> Rect {
    Rect {
        top: target.top - padding,
        left: target.left - padding,
        width: target.width + 2.0 * padding,
        height: target.height + 2.0 * padding,
    }
}

/// Place a panel of `panel` size next to `overlay`.
///
/// Top/bottom panels are centered horizontally on the overlay, left/right
/// panels vertically. The returned box carries the panel size as its
/// width/height.
pub fn panel_box(overlay: Rect, panel: Size, position: PanelPosition) -> Rect {
    let centered_left = overlay.left + overlay.width / 2.0 - panel.width / 2.0;
    let centered_top = overlay.top - (panel.height - overlay.height) / 2.0;

    let (top, left) = match position {
        PanelPosition::Top => (overlay.top - panel.height, centered_left),
        PanelPosition::Bottom => (overlay.top + overlay.height, centered_left),
        PanelPosition::Left => (centered_top, overlay.left - panel.width),
        PanelPosition::Right => (centered_top, overlay.left + overlay.width),
    };

    Rect {
        top,
        left,
        width: panel.width,
        height: panel.height,
    }
}

/// Zero and NaN mean "not provided".
fn is_set(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Position values to write onto a region.
///
/// A `None` component is left untouched on the region. A raw value of `0`
/// is treated as unset, so a region can never be pinned to the origin through
/// a placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Placement {
    /// Convert a viewport-relative box into document coordinates.
    ///
    /// `top`/`left` gain the scroll offset; `width`/`height` are copied. The
    /// zero check happens on the raw value, before scrolling.
    pub fn absolute(rect: Rect, scroll: ScrollOffset) -> Self {
        Self {
            top: is_set(rect.top).then_some(rect.top + scroll.vertical),
            left: is_set(rect.left).then_some(rect.left + scroll.horizontal),
            width: is_set(rect.width).then_some(rect.width),
            height: is_set(rect.height).then_some(rect.height),
        }
    }

    /// Like [`Placement::absolute`] but only the top-left corner.
    pub fn corner(rect: Rect, scroll: ScrollOffset) -> Self {
        Self {
            width: None,
            height: None,
            ..Self::absolute(rect, scroll)
        }
    }

    /// Iterate `(property, value)` pairs in write order, skipping unset ones.
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("top", self.top),
            ("left", self.left),
            ("width", self.width),
            ("height", self.height),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}
