//! Tour options and their layered resolution.
//!
//! Effective options for a render are always computed fresh:
//! `defaults < construction options < per-step override`. Each layer replaces
//! whole fields; nothing is merged deeply and nothing accumulates between
//! steps.

use crate::geometry::PanelPosition;
use crate::handler::ClickHandler;

/// Class-name prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "smartour";

/// Padding between the target and the cut-out edge, in pixels.
pub const DEFAULT_PADDING: f64 = 5.0;

/// Dimming color painted around the cut-out.
pub const DEFAULT_MASK_COLOR: &str = "rgba(0, 0, 0, .5)";

/// Fully resolved options for one render pass.
#[derive(Debug, Clone)]
pub struct Config {
    pub prefix: String,
    pub padding: f64,
    pub mask_color: String,
    pub animate: bool,
    pub panel_position: PanelPosition,
    /// Run when the interaction layer is clicked.
    pub on_dismiss: ClickHandler,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            padding: DEFAULT_PADDING,
            mask_color: DEFAULT_MASK_COLOR.to_string(),
            animate: true,
            panel_position: PanelPosition::Top,
            on_dismiss: ClickHandler::terminate(),
        }
    }
}

impl Config {
    /// Return a copy with every field present in `layer` replaced.
    pub fn merged(&self, layer: &ConfigOverride) -> Config {
        Config {
            prefix: layer.prefix.clone().unwrap_or_else(|| self.prefix.clone()),
            padding: layer.padding.map_or(self.padding, |p| p.max(0.0)),
            mask_color: layer
                .mask_color
                .clone()
                .unwrap_or_else(|| self.mask_color.clone()),
            animate: layer.animate.unwrap_or(self.animate),
            panel_position: layer.panel_position.unwrap_or(self.panel_position),
            on_dismiss: layer
                .on_dismiss
                .clone()
                .unwrap_or_else(|| self.on_dismiss.clone()),
        }
    }

    /// Apply layers in order of increasing precedence on top of the defaults.
    pub fn resolve<'a, I>(layers: I) -> Config
    where
        I: IntoIterator<Item = &'a ConfigOverride>,
    {
        layers
            .into_iter()
            .fold(Config::default(), |config, layer| config.merged(layer))
    }

    /// Class of the mask region.
    pub fn mask_class(&self) -> String {
        format!("{}-mask", self.prefix)
    }

    /// Classes of the panel region; the second one names the position.
    pub fn panel_class(&self) -> String {
        format!(
            "{prefix}-slot {prefix}-slot_{position}",
            prefix = self.prefix,
            position = self.panel_position
        )
    }

    /// Class of the interaction layer.
    pub fn layer_class(&self) -> String {
        format!("{}-layer", self.prefix)
    }
}

/// A partial [`Config`]; `None` fields inherit from the layer below.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverride {
    pub prefix: Option<String>,
    pub padding: Option<f64>,
    pub mask_color: Option<String>,
    pub animate: Option<bool>,
    pub panel_position: Option<PanelPosition>,
    pub on_dismiss: Option<ClickHandler>,
}

impl ConfigOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Negative padding is clamped to zero when merged.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_mask_color(mut self, color: impl Into<String>) -> Self {
        self.mask_color = Some(color.into());
        self
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = Some(animate);
        self
    }

    pub fn with_panel_position(mut self, position: PanelPosition) -> Self {
        self.panel_position = Some(position);
        self
    }

    pub fn with_on_dismiss(mut self, handler: ClickHandler) -> Self {
        self.on_dismiss = Some(handler);
        self
    }

    /// Whether every field inherits.
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none()
            && self.padding.is_none()
            && self.mask_color.is_none()
            && self.animate.is_none()
            && self.panel_position.is_none()
            && self.on_dismiss.is_none()
    }
}
