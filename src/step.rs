//! Tour steps.

use crate::config::ConfigOverride;
use crate::handler::ClickHandler;

/// A click listener attached to a key element while its step is shown.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub selector: String,
    pub handler: ClickHandler,
}

impl KeyBinding {
    pub fn new(selector: impl Into<String>, handler: ClickHandler) -> Self {
        Self {
            selector: selector.into(),
            handler,
        }
    }
}

/// One tour entry.
///
/// # Example
///
/// ```
/// use smartour::{ClickHandler, ConfigOverride, PanelPosition, Step};
///
/// let step = Step::new("#search")
///     .with_panel("<p>Search anything</p>")
///     .with_key_binding(".next", ClickHandler::advance())
///     .with_config(ConfigOverride::new().with_panel_position(PanelPosition::Bottom));
///
/// assert!(step.has_panel());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Step {
    /// Selector of the element to highlight.
    pub target: String,
    /// Panel markup; empty means no panel.
    pub panel_html: String,
    pub key_bindings: Vec<KeyBinding>,
    pub config: ConfigOverride,
}

impl Step {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn with_panel(mut self, html: impl Into<String>) -> Self {
        self.panel_html = html.into();
        self
    }

    pub fn with_key_binding(mut self, selector: impl Into<String>, handler: ClickHandler) -> Self {
        self.key_bindings.push(KeyBinding::new(selector, handler));
        self
    }

    pub fn with_config(mut self, config: ConfigOverride) -> Self {
        self.config = config;
        self
    }

    pub fn has_panel(&self) -> bool {
        !self.panel_html.is_empty()
    }
}
