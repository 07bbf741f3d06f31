//! # smartour
//!
//! Guided on-page tours: highlight an element, dim the rest of the page and
//! show an information panel next to it, one step at a time.
//!
//! ## Features
//!
//! - Pure geometry for the highlight cut-out and the four panel positions
//! - A step sequencer with forward/back navigation and clean teardown
//! - Layered options (defaults, per tour, per step)
//! - A [`RenderSurface`] trait for the page, with a headless HTML
//!   [`Document`] implementation
//!
//! ## Quick Start
//!
//! ```
//! use smartour::{ConfigOverride, Document, PanelPosition, Step, Tour};
//!
//! let page = Document::parse(
//!     r#"<body><div id="search" style="top: 100px; left: 50px; width: 200px; height: 40px"></div></body>"#,
//! );
//!
//! let mut tour = Tour::new(ConfigOverride::new().with_padding(5.0), page);
//! tour.enqueue(vec![
//!     Step::new("#search")
//!         .with_panel(r#"<p style="width: 120px; height: 30px">Search here</p>"#)
//!         .with_config(ConfigOverride::new().with_panel_position(PanelPosition::Bottom)),
//! ]);
//! tour.advance().unwrap();
//!
//! let panel = tour.surface().query_selector(".smartour-slot").unwrap().unwrap();
//! assert_eq!(tour.surface().style_of(panel).get("top"), Some("145px"));
//! ```
//!
//! ## Custom surfaces
//!
//! Implement [`RenderSurface`] to drive a real page (a browser DOM, a native
//! view tree). The tour only talks to the page through that trait.

pub mod config;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod handler;
pub mod step;
pub mod style;
pub mod surface;
pub mod tour;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{Config, ConfigOverride};
pub use error::{Error, Result};
pub use geometry::{PanelPosition, Placement, Rect, ScrollOffset, Size, overlay_box, panel_box};
pub use handler::{ClickHandler, TourControl};
pub use step::{KeyBinding, Step};
pub use surface::{
    ClickTarget, Document, ListenerId, RegionHandle, RegionKind, RegionSnapshot, RenderSurface,
};
pub use tour::{Phase, RenderHandles, Tour};
