//! The step sequencer.
//!
//! A [`Tour`] owns a [`RenderSurface`] and walks an ordered list of steps.
//! Every render measures the target, lays out the mask (and panel) with
//! [`geometry`](crate::geometry), writes the positions and wires listeners.
//! A render either completes or leaves the page as it was.

mod handles;

pub use handles::RenderHandles;

use tracing::{debug, warn};

use crate::config::{Config, ConfigOverride};
use crate::error::{Error, Result};
use crate::geometry::{self, Placement};
use crate::handler::{ClickHandler, TourControl};
use crate::step::Step;
use crate::style;
use crate::surface::{ClickTarget, ListenerId, RegionHandle, RegionKind, RenderSurface};

/// Where a tour is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing rendered yet.
    Idle,
    /// A step is on screen.
    Active,
    /// Terminated; regions released.
    Done,
}

/// A guided tour over a render surface.
///
/// # Example
///
/// ```
/// use smartour::{ClickHandler, ClickTarget, ConfigOverride, Document, Phase, Step, Tour};
///
/// let page = Document::parse(r#"<body>
///     <nav id="menu" style="top: 10px; left: 10px; width: 200px; height: 40px"></nav>
///     <main id="content" style="top: 80px; left: 10px; width: 600px; height: 400px"></main>
/// </body>"#);
///
/// let mut tour = Tour::new(ConfigOverride::new(), page);
/// tour.enqueue(vec![
///     Step::new("#menu").with_panel(r#"<button class="next" style="width: 60px; height: 20px">Next</button>"#)
///         .with_key_binding(".next", ClickHandler::advance()),
///     Step::new("#content"),
/// ])
/// .advance()
/// .unwrap();
/// assert_eq!(tour.current_index(), Some(0));
///
/// tour.click(&ClickTarget::selector(".next")).unwrap();
/// assert_eq!(tour.current_index(), Some(1));
///
/// tour.advance().unwrap();
/// assert_eq!(tour.phase(), Phase::Done);
/// ```
pub struct Tour<S: RenderSurface> {
    surface: S,
    construction: ConfigOverride,
    steps: Vec<Step>,
    index: Option<usize>,
    effective: Option<Config>,
    handles: RenderHandles,
    listeners: Vec<(ListenerId, ClickHandler)>,
    next_listener: u64,
    terminated: bool,
}

impl<S: RenderSurface> Tour<S> {
    /// Create a tour; `options` is merged over the defaults for every render.
    pub fn new(options: ConfigOverride, surface: S) -> Self {
        Self {
            surface,
            construction: options,
            steps: Vec::new(),
            index: None,
            effective: None,
            handles: RenderHandles::default(),
            listeners: Vec::new(),
            next_listener: 0,
            terminated: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the surface back, leaving any rendered regions in place.
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Index of the queued step on screen; `None` before the first advance.
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.index?)
    }

    pub fn phase(&self) -> Phase {
        if self.handles.mask.is_some() {
            Phase::Active
        } else if self.terminated {
            Phase::Done
        } else {
            Phase::Idle
        }
    }

    pub fn handles(&self) -> &RenderHandles {
        &self.handles
    }

    /// Options with only the construction layer applied.
    pub fn config(&self) -> Config {
        Config::resolve([&self.construction])
    }

    /// Options used by the last successful render.
    pub fn effective_config(&self) -> Option<&Config> {
        self.effective.as_ref()
    }

    /// Replace the queued steps and rewind to "not started".
    pub fn enqueue(&mut self, steps: Vec<Step>) -> &mut Self {
        debug!(steps = steps.len(), "enqueued tour");
        self.steps = steps;
        self.index = None;
        self
    }

    /// Show one step that is not part of the queue.
    pub fn focus_single(&mut self, step: &Step) -> Result<()> {
        self.render(step)
    }

    /// Show the next queued step; past the last one, terminate.
    pub fn advance(&mut self) -> Result<()> {
        let next = self.index.map_or(0, |i| i + 1);
        let Some(step) = self.steps.get(next).cloned() else {
            debug!(index = ?self.index, "no step left, terminating");
            self.terminate();
            return Ok(());
        };

        self.render(&step)?;
        self.index = Some(next);
        debug!(index = next, "advanced");
        Ok(())
    }

    /// Alias of [`Tour::advance`].
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        self.advance()
    }

    /// Show the previous queued step, or re-show the first one.
    ///
    /// Fails with [`Error::InvalidStateTransition`] before the first advance.
    pub fn retreat(&mut self) -> Result<()> {
        let Some(index) = self.index else {
            return Err(Error::InvalidStateTransition(
                "retreat before the tour has started",
            ));
        };

        let previous = index.saturating_sub(1);
        let step = self
            .steps
            .get(previous)
            .cloned()
            .ok_or(Error::InvalidStateTransition("current step is out of range"))?;

        self.render(&step)?;
        self.index = Some(previous);
        debug!(index = previous, "retreated");
        Ok(())
    }

    /// Alias of [`Tour::retreat`].
    pub fn prev(&mut self) -> Result<()> {
        self.retreat()
    }

    /// Remove all regions and listeners and rewind. Safe to call repeatedly.
    pub fn terminate(&mut self) {
        for handle in self.handles.take_all() {
            self.surface.destroy_region(handle);
        }
        for (listener, _) in self.listeners.drain(..) {
            self.surface.unbind_click(listener);
        }
        self.index = None;
        self.effective = None;
        if !self.terminated {
            debug!("tour terminated");
        }
        self.terminated = true;
    }

    /// Dispatch a click and run the handlers it reaches, in bubbling order.
    ///
    /// A listener removed by an earlier handler of the same click does not
    /// run. Returns how many handlers ran.
    pub fn click(&mut self, target: &ClickTarget) -> Result<usize> {
        let reached = self.surface.listeners_at(target)?;
        let mut ran = 0;
        for listener in reached {
            let Some(handler) = self
                .listeners
                .iter()
                .find(|(id, _)| *id == listener)
                .map(|(_, handler)| handler.clone())
            else {
                continue;
            };
            debug!(%target, handler = handler.label(), "click");
            handler.call(self)?;
            ran += 1;
        }
        Ok(ran)
    }

    /// Click one of the tour's own regions, e.g. the layer to dismiss.
    pub fn click_region(&mut self, kind: RegionKind) -> Result<usize> {
        let handle = self.handles.get(kind).ok_or(Error::StaleRegion)?;
        self.click(&ClickTarget::Region(handle))
    }

    fn render(&mut self, step: &Step) -> Result<()> {
        let config = Config::resolve([&self.construction, &step.config]);

        let mut undo = Undo::default();
        match self.render_pass(step, &config, &mut undo) {
            Ok(()) => {
                let previous = std::mem::replace(&mut self.listeners, undo.bound);
                for (listener, _) in previous {
                    self.surface.unbind_click(listener);
                }
                self.effective = Some(config);
                self.terminated = false;
                Ok(())
            }
            Err(err) => {
                warn!(target = %step.target, error = %err, "render failed");
                self.roll_back(undo);
                Err(err)
            }
        }
    }

    /// Take back everything a failed pass changed, newest first.
    fn roll_back(&mut self, undo: Undo<S::Snapshot>) {
        for (listener, _) in undo.bound {
            self.surface.unbind_click(listener);
        }
        for (handle, snapshot) in undo.saved.into_iter().rev() {
            if let Err(err) = self.surface.restore_region(handle, snapshot) {
                warn!(kind = %handle.kind(), error = %err, "could not restore region");
            }
        }
        // After the restores, so listeners inside restored content survive.
        for handle in undo.created {
            self.surface.destroy_region(handle);
        }
    }

    fn render_pass(
        &mut self,
        step: &Step,
        config: &Config,
        undo: &mut Undo<S::Snapshot>,
    ) -> Result<()> {
        let target = self.surface.measure_bounding_box(&step.target)?;
        let stale_panel = if step.has_panel() {
            None
        } else {
            self.handles.panel
        };

        let mask = self.acquire(
            RegionKind::Mask,
            &config.mask_class(),
            &style::mask_style(&config.mask_color, config.animate),
            undo,
        )?;
        let layer = self.acquire(
            RegionKind::Layer,
            &config.layer_class(),
            &style::layer_style(),
            undo,
        )?;

        let panel = if step.has_panel() {
            let panel = self.acquire(
                RegionKind::Panel,
                &config.panel_class(),
                &style::panel_style(config.animate),
                undo,
            )?;
            self.surface.set_class(panel, &config.panel_class())?;
            self.surface.set_content(panel, &step.panel_html)?;
            Some((panel, self.surface.measure_region(panel)?))
        } else {
            // Emptied now so bindings cannot land in it, removed once the
            // pass has succeeded.
            if let Some(stale) = stale_panel
                && let Ok(snapshot) = self.surface.snapshot_region(stale)
            {
                undo.saved.push((stale, snapshot));
                self.surface.set_content(stale, "")?;
            }
            None
        };

        self.surface.set_class(mask, &config.mask_class())?;
        self.surface.set_class(layer, &config.layer_class())?;
        self.surface.set_animated(mask, config.animate)?;
        if let Some((panel, _)) = panel {
            self.surface.set_animated(panel, config.animate)?;
        }

        self.bind(&ClickTarget::Region(layer), &config.on_dismiss, undo)?;
        for binding in &step.key_bindings {
            self.bind(
                &ClickTarget::Selector(binding.selector.clone()),
                &binding.handler,
                undo,
            )?;
        }

        let scroll = self.surface.scroll_offset();
        let overlay = geometry::overlay_box(target, config.padding);
        self.surface
            .set_position(mask, &Placement::absolute(overlay, scroll))?;
        if let Some((panel, size)) = panel {
            let placed = geometry::panel_box(overlay, size, config.panel_position);
            self.surface
                .set_position(panel, &Placement::corner(placed, scroll))?;
        }

        // Nothing below can fail.
        self.handles = RenderHandles {
            mask: Some(mask),
            panel: panel.map(|(handle, _)| handle),
            layer: Some(layer),
        };
        if let Some(stale) = stale_panel {
            self.surface.destroy_region(stale);
        }

        debug!(
            target = %step.target,
            top = overlay.top,
            left = overlay.left,
            width = overlay.width,
            height = overlay.height,
            panel = ?panel.map(|(_, size)| size),
            "rendered step"
        );
        Ok(())
    }

    /// Get the region of `kind`, recording how to undo it: a new region is
    /// destroyed on failure, a reused one is restored from a snapshot.
    fn acquire(
        &mut self,
        kind: RegionKind,
        class: &str,
        style: &style::InlineStyle,
        undo: &mut Undo<S::Snapshot>,
    ) -> Result<RegionHandle> {
        let handle = self.surface.create_or_reuse_region(kind, class, style)?;
        if self.handles.get(kind) == Some(handle) {
            let snapshot = self.surface.snapshot_region(handle)?;
            undo.saved.push((handle, snapshot));
        } else {
            undo.created.push(handle);
        }
        Ok(handle)
    }

    fn bind(
        &mut self,
        target: &ClickTarget,
        handler: &ClickHandler,
        undo: &mut Undo<S::Snapshot>,
    ) -> Result<()> {
        let listener = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.surface.bind_click(target, listener)?;
        undo.bound.push((listener, handler.clone()));
        Ok(())
    }
}

/// What one render pass changed on the surface.
struct Undo<T> {
    created: Vec<RegionHandle>,
    saved: Vec<(RegionHandle, T)>,
    bound: Vec<(ListenerId, ClickHandler)>,
}

impl<T> Default for Undo<T> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            saved: Vec::new(),
            bound: Vec::new(),
        }
    }
}

impl<S: RenderSurface> TourControl for Tour<S> {
    fn advance(&mut self) -> Result<()> {
        Tour::advance(self)
    }

    fn retreat(&mut self) -> Result<()> {
        Tour::retreat(self)
    }

    fn terminate(&mut self) {
        Tour::terminate(self)
    }

    fn focus_single(&mut self, step: &Step) -> Result<()> {
        Tour::focus_single(self, step)
    }
}
