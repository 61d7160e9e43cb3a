use crate::host::{ChartWidget, SceneView};

use super::{SyncEngine, SyncEngineConfig};

impl<S: SceneView, C: ChartWidget> SyncEngine<S, C> {
    #[must_use]
    pub fn config(&self) -> &SyncEngineConfig {
        &self.core.config
    }

    #[must_use]
    pub fn media_count(&self) -> usize {
        self.core.media.len()
    }

    /// Whether the onboarding tour should be offered.
    #[must_use]
    pub fn should_show_tour(&self) -> bool {
        !self.core.tour_store.tour_completed()
    }

    /// Persists the "tour completed" flag.
    pub fn complete_tour(&mut self) {
        self.core.tour_store.set_tour_completed(true);
    }
}
