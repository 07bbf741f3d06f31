//! Headless render surface over a parsed HTML document.
//!
//! There is no layout engine: an element's box is whatever its inline style
//! declares (`top`, `left`, `width`, `height` in px), offset by the declared
//! `top`/`left` of every ancestor. That is enough to describe absolutely
//! positioned pages and to run tours against them deterministically.

use std::collections::HashMap;

use crate::dom::{self, Dom, NodeId, Query};
use crate::error::{Error, Result};
use crate::geometry::{Placement, Rect, ScrollOffset, Size};
use crate::style::{self, InlineStyle};

use super::{ClickTarget, ListenerId, RegionHandle, RegionKind, RenderSurface};

/// Class, style and child nodes of a region at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSnapshot {
    class: Option<String>,
    style: Option<String>,
    children: Vec<NodeId>,
}

/// An in-memory page a tour can render into.
///
/// Replaced region content is detached, not freed: the arena grows with every
/// panel rewrite for the lifetime of the document. Snapshots taken for a
/// failed render rely on the detached nodes staying intact.
///
/// # Example
///
/// ```
/// use smartour::{Document, Step, Tour, ConfigOverride};
///
/// let page = Document::parse(
///     r#"<body><button id="save" style="top: 40px; left: 20px; width: 80px; height: 24px">Save</button></body>"#,
/// );
/// let mut tour = Tour::new(ConfigOverride::new(), page);
/// tour.focus_single(&Step::new("#save")).unwrap();
///
/// let mask = tour.surface().query_selector(".smartour-mask").unwrap().unwrap();
/// let style = tour.surface().style_of(mask);
/// assert_eq!(style.get("top"), Some("35px"));
/// assert_eq!(style.get("width"), Some("90px"));
/// ```
pub struct Document {
    dom: Dom,
    regions: HashMap<RegionKind, NodeId>,
    listeners: HashMap<ListenerId, NodeId>,
    root_scroll: ScrollOffset,
    body_scroll: ScrollOffset,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self::from_dom(dom::parse_html(html))
    }

    /// Parse raw bytes, detecting the character encoding.
    pub fn parse_bytes(html: &[u8]) -> Self {
        Self::from_dom(dom::parse_html_bytes(html))
    }

    pub fn from_dom(dom: Dom) -> Self {
        Self {
            dom,
            regions: HashMap::new(),
            listeners: HashMap::new(),
            root_scroll: ScrollOffset::default(),
            body_scroll: ScrollOffset::default(),
        }
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Scroll position reported by the root element.
    pub fn set_root_scroll(&mut self, scroll: ScrollOffset) {
        self.root_scroll = scroll;
    }

    /// Scroll position reported by `<body>`, used per axis when the root's is zero.
    pub fn set_body_scroll(&mut self, scroll: ScrollOffset) {
        self.body_scroll = scroll;
    }

    /// First element matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(Query::parse(selector)?.first(&self.dom))
    }

    /// Every element matching `selector`.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        Ok(Query::parse(selector)?.all(&self.dom))
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.dom.get_attr(id, name)
    }

    /// Parsed inline style of a node.
    pub fn style_of(&self, id: NodeId) -> InlineStyle {
        InlineStyle::parse(self.dom.get_attr(id, "style").unwrap_or_default())
    }

    /// The live region of `kind`, if any.
    pub fn region(&self, kind: RegionKind) -> Option<NodeId> {
        self.regions
            .get(&kind)
            .copied()
            .filter(|&id| self.dom.is_attached(id))
    }

    /// Number of listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn to_html(&self) -> String {
        self.dom.to_html()
    }

    /// Box of a node in document coordinates.
    pub fn document_box(&self, id: NodeId) -> Rect {
        let own = self.style_of(id);
        let (top, left) = self
            .dom
            .ancestors(id)
            .map(|ancestor| self.style_of(ancestor))
            .fold(
                (own.px("top").unwrap_or(0.0), own.px("left").unwrap_or(0.0)),
                |(top, left), style| {
                    (
                        top + style.px("top").unwrap_or(0.0),
                        left + style.px("left").unwrap_or(0.0),
                    )
                },
            );

        Rect::new(
            top,
            left,
            own.px("width").unwrap_or(0.0),
            own.px("height").unwrap_or(0.0),
        )
    }

    fn write_style(&mut self, id: NodeId, style: &InlineStyle) {
        if style.is_empty() {
            self.dom.remove_attr(id, "style");
        } else {
            self.dom.set_attr(id, "style", &style.to_string());
        }
    }

    fn region_node(&self, handle: RegionHandle) -> Result<NodeId> {
        let id = NodeId(handle.raw());
        match self.region(handle.kind()) {
            Some(live) if live == id => Ok(id),
            _ => Err(Error::StaleRegion),
        }
    }

    fn resolve(&self, target: &ClickTarget) -> Result<NodeId> {
        match target {
            ClickTarget::Selector(selector) => self
                .query_selector(selector)?
                .ok_or_else(|| Error::TargetNotFound(selector.clone())),
            ClickTarget::Region(handle) => self.region_node(*handle),
        }
    }

    /// Extent of the declared boxes under `region`, relative to it.
    fn content_extent(&self, region: NodeId) -> Size {
        self.dom
            .descendant_elements(region)
            .into_iter()
            .fold(Size::default(), |extent, id| {
                let style = self.style_of(id);
                let (top, left) = self
                    .dom
                    .ancestors(id)
                    .take_while(|&a| a != region)
                    .map(|a| self.style_of(a))
                    .fold(
                        (style.px("top").unwrap_or(0.0), style.px("left").unwrap_or(0.0)),
                        |(top, left), s| {
                            (
                                top + s.px("top").unwrap_or(0.0),
                                left + s.px("left").unwrap_or(0.0),
                            )
                        },
                    );
                Size::new(
                    extent.width.max(left + style.px("width").unwrap_or(0.0)),
                    extent.height.max(top + style.px("height").unwrap_or(0.0)),
                )
            })
    }
}

impl RenderSurface for Document {
    type Snapshot = RegionSnapshot;

    fn measure_bounding_box(&self, selector: &str) -> Result<Rect> {
        let id = self
            .query_selector(selector)?
            .ok_or_else(|| Error::TargetNotFound(selector.to_string()))?;

        let rect = self.document_box(id);
        let scroll = self.scroll_offset();
        Ok(Rect {
            top: rect.top - scroll.vertical,
            left: rect.left - scroll.horizontal,
            ..rect
        })
    }

    fn create_or_reuse_region(
        &mut self,
        kind: RegionKind,
        class: &str,
        style: &InlineStyle,
    ) -> Result<RegionHandle> {
        if let Some(existing) = self.region(kind) {
            return Ok(RegionHandle::new(kind, existing.0));
        }

        let style = style.to_string();
        let id = self
            .dom
            .create_html_element("div", &[("class", class), ("style", style.as_str())]);
        let parent = self.dom.body().unwrap_or_else(|| self.dom.document());
        self.dom.append(parent, id);
        self.regions.insert(kind, id);

        tracing::trace!(%kind, node = id.0, "created region");
        Ok(RegionHandle::new(kind, id.0))
    }

    fn set_class(&mut self, handle: RegionHandle, class: &str) -> Result<()> {
        let id = self.region_node(handle)?;
        self.dom.set_attr(id, "class", class);
        Ok(())
    }

    fn set_animated(&mut self, handle: RegionHandle, animate: bool) -> Result<()> {
        let id = self.region_node(handle)?;
        let mut style = self.style_of(id);
        style::set_transition(&mut style, animate);
        self.write_style(id, &style);
        Ok(())
    }

    fn set_position(&mut self, handle: RegionHandle, placement: &Placement) -> Result<()> {
        let id = self.region_node(handle)?;
        let mut style = self.style_of(id);
        for (property, value) in placement.properties() {
            style.set_px(property, value);
        }
        self.write_style(id, &style);
        Ok(())
    }

    fn set_content(&mut self, handle: RegionHandle, html: &str) -> Result<()> {
        let id = self.region_node(handle)?;
        self.dom.clear_children(id);
        if html.is_empty() {
            return Ok(());
        }

        let (fragment, body) = dom::parse_fragment(html);
        for child in fragment.children(body) {
            self.dom.import(&fragment, child, id);
        }
        Ok(())
    }

    fn measure_region(&self, handle: RegionHandle) -> Result<Size> {
        let id = self
            .region_node(handle)
            .map_err(|_| Error::PanelNotMeasurable)?;
        if self.dom.children(id).next().is_none() {
            return Err(Error::PanelNotMeasurable);
        }

        let style = self.style_of(id);
        let content = self.content_extent(id);
        Ok(Size::new(
            style.px("width").unwrap_or(content.width),
            style.px("height").unwrap_or(content.height),
        ))
    }

    fn bind_click(&mut self, target: &ClickTarget, listener: ListenerId) -> Result<()> {
        let id = self.resolve(target)?;
        self.listeners.insert(listener, id);
        Ok(())
    }

    fn unbind_click(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }

    fn listeners_at(&self, target: &ClickTarget) -> Result<Vec<ListenerId>> {
        let id = self.resolve(target)?;
        let path: Vec<NodeId> = std::iter::once(id).chain(self.dom.ancestors(id)).collect();

        let mut hits = Vec::new();
        for node in path {
            let mut here: Vec<ListenerId> = self
                .listeners
                .iter()
                .filter(|(_, bound)| **bound == node)
                .map(|(listener, _)| *listener)
                .collect();
            here.sort();
            hits.extend(here);
        }
        Ok(hits)
    }

    fn snapshot_region(&self, handle: RegionHandle) -> Result<RegionSnapshot> {
        let id = self.region_node(handle)?;
        Ok(RegionSnapshot {
            class: self.dom.get_attr(id, "class").map(str::to_string),
            style: self.dom.get_attr(id, "style").map(str::to_string),
            children: self.dom.children(id).collect(),
        })
    }

    fn restore_region(&mut self, handle: RegionHandle, snapshot: RegionSnapshot) -> Result<()> {
        let id = self.region_node(handle)?;
        for (name, value) in [("class", snapshot.class), ("style", snapshot.style)] {
            match value {
                Some(value) => self.dom.set_attr(id, name, &value),
                None => self.dom.remove_attr(id, name),
            }
        }
        self.dom.clear_children(id);
        for child in snapshot.children {
            self.dom.append(id, child);
        }

        tracing::trace!(kind = %handle.kind(), node = id.0, "restored region");
        Ok(())
    }

    fn destroy_region(&mut self, handle: RegionHandle) {
        let Ok(id) = self.region_node(handle) else {
            return;
        };
        self.dom.detach(id);
        self.regions.remove(&handle.kind());

        let dom = &self.dom;
        self.listeners.retain(|_, bound| dom.is_attached(*bound));
        tracing::trace!(kind = %handle.kind(), node = id.0, "destroyed region");
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.root_scroll.or_fallback(self.body_scroll)
    }
}
