//! Per-anchor lifecycle bookkeeping for image anchors.

use arplace_core::AnchorId;
use std::collections::HashMap;

/// Where an image anchor is in its one-shot lifecycle.
///
/// `Undetected -> Detected -> Consumed`, never backwards. A new physical
/// sighting arrives as a new anchor identity. An anchor the host drops while
/// still `Detected` ends in `Dropped` instead of `Consumed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAnchorPhase {
    /// Never seen.
    Undetected,
    /// Detection event issued, placement not yet performed.
    Detected,
    /// Cube placed and anchor removal issued.
    Consumed,
    /// Removed by the host before placement happened.
    Dropped,
}

impl ImageAnchorPhase {
    /// Consumed or dropped. Nothing for this identity is handled again.
    pub fn is_retired(self) -> bool {
        matches!(self, ImageAnchorPhase::Consumed | ImageAnchorPhase::Dropped)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ImageAnchorTable {
    phases: HashMap<AnchorId, ImageAnchorPhase>,
}

impl ImageAnchorTable {
    pub(crate) fn phase(&self, id: AnchorId) -> ImageAnchorPhase {
        self.phases
            .get(&id)
            .copied()
            .unwrap_or(ImageAnchorPhase::Undetected)
    }

    /// Returns false if the anchor already left `Undetected`.
    pub(crate) fn mark_detected(&mut self, id: AnchorId) -> bool {
        if self.phase(id) != ImageAnchorPhase::Undetected {
            return false;
        }
        self.phases.insert(id, ImageAnchorPhase::Detected);
        true
    }

    /// Returns false unless the anchor was `Detected`.
    pub(crate) fn mark_consumed(&mut self, id: AnchorId) -> bool {
        if self.phase(id) != ImageAnchorPhase::Detected {
            return false;
        }
        self.phases.insert(id, ImageAnchorPhase::Consumed);
        true
    }

    /// Host dropped the anchor. Returns the phase it was in before.
    ///
    /// Terminal phases are kept so stale re-deliveries of the same identity
    /// cannot fire a second time.
    pub(crate) fn forget(&mut self, id: AnchorId) -> ImageAnchorPhase {
        let phase = self.phase(id);
        if phase == ImageAnchorPhase::Detected {
            self.phases.insert(id, ImageAnchorPhase::Dropped);
        }
        phase
    }

    /// Forget every identity, including retired ones.
    pub(crate) fn clear(&mut self) {
        self.phases.clear();
    }

    pub(crate) fn pending(&self) -> usize {
        self.phases
            .values()
            .filter(|p| **p == ImageAnchorPhase::Detected)
            .count()
    }
}
