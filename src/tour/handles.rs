//! The regions a tour currently owns.

use crate::surface::{RegionHandle, RegionKind};

/// At most one live region of each kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderHandles {
    pub mask: Option<RegionHandle>,
    pub panel: Option<RegionHandle>,
    pub layer: Option<RegionHandle>,
}

impl RenderHandles {
    pub fn get(&self, kind: RegionKind) -> Option<RegionHandle> {
        match kind {
            RegionKind::Mask => self.mask,
            RegionKind::Panel => self.panel,
            RegionKind::Layer => self.layer,
        }
    }

    pub fn slot_mut(&mut self, kind: RegionKind) -> &mut Option<RegionHandle> {
        match kind {
            RegionKind::Mask => &mut self.mask,
            RegionKind::Panel => &mut self.panel,
            RegionKind::Layer => &mut self.layer,
        }
    }

    /// Remove and return every present handle.
    pub fn take_all(&mut self) -> Vec<RegionHandle> {
        RegionKind::ALL
            .into_iter()
            .filter_map(|kind| self.slot_mut(kind).take())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_none() && self.panel.is_none() && self.layer.is_none()
    }
}
