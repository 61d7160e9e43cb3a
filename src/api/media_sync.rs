use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Catalog, DatasetSelection, Frame, TimelineConfig};
use crate::error::{SyncError, SyncResult};
use crate::host::MediaElement;

/// Media resource bound to the scene layer it textures.
pub struct MediaBinding {
    pub layer_id: String,
    pub element: Box<dyn MediaElement>,
}

impl MediaBinding {
    pub fn new(layer_id: impl Into<String>, element: impl MediaElement + 'static) -> Self {
        Self {
            layer_id: layer_id.into(),
            element: Box::new(element),
        }
    }
}

/// Outcome of one `sync_all` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MediaSyncReport {
    pub applied: usize,
    /// Resources not ready or not seekable at the target time yet.
    pub skipped: usize,
}

/// How the active variable is mapped to a media slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotLookup {
    /// Layer ids are catalog variable names. Variables without a layer show
    /// no video.
    ByName,
    /// Layer ids are free-form; the variable index picks the slot.
    ByIndex,
}

/// Fixed registry of media resources scrubbed in lockstep with the clock.
///
/// The registry is built once and never resized.
pub(super) struct MediaSynchronizer {
    slots: Vec<MediaBinding>,
    lookup: SlotLookup,
}

impl MediaSynchronizer {
    /// Bindings either all name catalog variables or none do; a mix is
    /// rejected.
    pub(super) fn new(slots: Vec<MediaBinding>, catalog: &Catalog) -> SyncResult<Self> {
        let is_variable = |layer_id: &str| {
            catalog
                .datasets
                .iter()
                .flat_map(|dataset| dataset.variables.iter())
                .any(|variable| variable.name == layer_id)
        };
        let named = slots
            .iter()
            .filter(|slot| is_variable(&slot.layer_id))
            .count();
        let lookup = if named == 0 {
            SlotLookup::ByIndex
        } else if named == slots.len() {
            SlotLookup::ByName
        } else {
            let stray = slots
                .iter()
                .find(|slot| !is_variable(&slot.layer_id))
                .map(|slot| slot.layer_id.as_str())
                .unwrap_or_default();
            return Err(SyncError::InvalidConfig(format!(
                "media layer `{stray}` names no catalog variable while other layers do"
            )));
        };
        Ok(Self { slots, lookup })
    }

    pub(super) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(super) fn layer_ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.layer_id.as_str())
    }

    /// Pushes `frame / fps` into every resource, visible or not.
    pub(super) fn sync_all(&mut self, frame: Frame, timeline: TimelineConfig) -> MediaSyncReport {
        let target = timeline.frame_to_seconds(frame);
        let mut report = MediaSyncReport::default();
        for slot in &mut self.slots {
            let element = &mut slot.element;
            let seekable = element.readiness().is_ready()
                && element
                    .seekable()
                    .iter()
                    .any(|range| range.contains(target));
            if seekable {
                element.set_current_time(target);
                report.applied += 1;
            } else {
                trace!(
                    layer = slot.layer_id.as_str(),
                    target_seconds = target,
                    "media not seekable yet, skipping"
                );
                report.skipped += 1;
            }
        }
        report
    }

    /// Sends every resource back to the start after a timeline wrap.
    pub(super) fn rewind_all(&mut self) -> MediaSyncReport {
        for slot in &mut self.slots {
            slot.element.set_current_time(0.0);
        }
        MediaSyncReport {
            applied: self.slots.len(),
            skipped: 0,
        }
    }

    /// Slot of the visible layer, if the selected variable has one.
    pub(super) fn active_slot(&self, selection: &DatasetSelection) -> Option<usize> {
        match self.lookup {
            SlotLookup::ByName => {
                let name = selection.variable().name.as_str();
                self.slots.iter().position(|slot| slot.layer_id == name)
            }
            SlotLookup::ByIndex => {
                let index = selection.variable_index();
                (index < self.slots.len()).then_some(index)
            }
        }
    }

    /// Frame read back from the active resource, used to absorb drift on pause.
    pub(super) fn active_frame(
        &self,
        selection: &DatasetSelection,
        timeline: TimelineConfig,
    ) -> Option<Frame> {
        let slot = self.slots.get(self.active_slot(selection)?)?;
        slot.element
            .readiness()
            .is_ready()
            .then(|| timeline.seconds_to_frame(slot.element.current_time()))
    }
}
