//! The capability interface a tour renders through.
//!
//! A [`RenderSurface`] owns the page: it measures elements, creates the three
//! tour regions and records click listeners. The tour never touches the page
//! directly. [`Document`] is the headless implementation shipped with the
//! crate.

mod document;

pub use document::{Document, RegionSnapshot};

use std::fmt;

use crate::error::Result;
use crate::geometry::{Placement, Rect, ScrollOffset, Size};
use crate::style::InlineStyle;

/// The three regions a tour draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Dimming overlay with the cut-out around the target.
    Mask,
    /// Information panel next to the cut-out.
    Panel,
    /// Transparent click catcher used for dismissal.
    Layer,
}

impl RegionKind {
    pub const ALL: [RegionKind; 3] = [Self::Mask, Self::Panel, Self::Layer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mask => "mask",
            Self::Panel => "panel",
            Self::Layer => "layer",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to a region created by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionHandle {
    kind: RegionKind,
    raw: u32,
}

impl RegionHandle {
    /// Surfaces build handles from their own node identifiers.
    pub fn new(kind: RegionKind, raw: u32) -> Self {
        Self { kind, raw }
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    pub fn raw(&self) -> u32 {
        self.raw
    }
}

/// Identifier of a click listener registered by a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Where a click listener is attached or a click is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// First element matching a CSS selector.
    Selector(String),
    /// A live tour region.
    Region(RegionHandle),
}

impl ClickTarget {
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(selector.into())
    }
}

impl fmt::Display for ClickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(selector) => f.write_str(selector),
            Self::Region(handle) => write!(f, "<{} region>", handle.kind()),
        }
    }
}

/// Page operations required by a tour.
pub trait RenderSurface {
    /// Saved state of a region, see [`RenderSurface::snapshot_region`].
    type Snapshot;

    /// Viewport-relative box of the first element matching `selector`.
    ///
    /// Fails with [`Error::TargetNotFound`](crate::Error::TargetNotFound) when
    /// nothing matches.
    fn measure_bounding_box(&self, selector: &str) -> Result<Rect>;

    /// Return the live region of `kind`, creating it with `class` and `style`
    /// if there is none yet. An existing region is returned unchanged.
    fn create_or_reuse_region(
        &mut self,
        kind: RegionKind,
        class: &str,
        style: &InlineStyle,
    ) -> Result<RegionHandle>;

    /// Replace the class attribute of a region.
    fn set_class(&mut self, handle: RegionHandle, class: &str) -> Result<()>;

    /// Enable or disable the position transition of a region.
    fn set_animated(&mut self, handle: RegionHandle, animate: bool) -> Result<()>;

    /// Write every `Some` component of `placement` as a pixel style.
    fn set_position(&mut self, handle: RegionHandle, placement: &Placement) -> Result<()>;

    /// Replace the markup inside a region.
    fn set_content(&mut self, handle: RegionHandle, html: &str) -> Result<()>;

    /// Rendered size of a region.
    ///
    /// Fails with [`Error::PanelNotMeasurable`](crate::Error::PanelNotMeasurable)
    /// when the region is not in the document or has no content.
    fn measure_region(&self, handle: RegionHandle) -> Result<Size>;

    /// Attach a click listener.
    fn bind_click(&mut self, target: &ClickTarget, listener: ListenerId) -> Result<()>;

    /// Detach a listener; unknown ids are ignored.
    fn unbind_click(&mut self, listener: ListenerId);

    /// Listeners a click on `target` reaches, target first, then ancestors.
    fn listeners_at(&self, target: &ClickTarget) -> Result<Vec<ListenerId>>;

    /// Capture the class, inline style and content of a live region so a
    /// failed render can put it back.
    fn snapshot_region(&self, handle: RegionHandle) -> Result<Self::Snapshot>;

    /// Return a region to the state captured by
    /// [`RenderSurface::snapshot_region`]. The original content nodes come
    /// back, so listeners bound inside them keep working.
    fn restore_region(&mut self, handle: RegionHandle, snapshot: Self::Snapshot) -> Result<()>;

    /// Remove a region from the page; stale handles are ignored.
    fn destroy_region(&mut self, handle: RegionHandle);

    /// Current document scroll position.
    fn scroll_offset(&self) -> ScrollOffset;
}
