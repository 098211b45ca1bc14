// Comparison Controller - Bridges drop zones and the widget with state management
//
// This module contains the ComparisonController which coordinates between:
// - Drop zone / file picker / selection events from the host UI
// - IngestionResolver (which file goes where)
// - ImageLoader (async file reads, spawned on the tokio runtime)
// - StateManager (the slot store)
//
// The host renders from `view_model()`; the controller never reaches into the widget.

use crate::metrics::Metrics;
use crate::models::{CompareSettings, Direction, LoadNotice, SlotId, Variant};
use crate::services::{ImageFile, ImageLoader, IngestionResolver, filter_images};
use crate::state::{StateChange, StateManager};
use crate::ui::binding::{EventResponse, ViewModel, WidgetConfig};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// An event delivered to one drop zone
#[derive(Debug, Clone)]
pub enum ZoneEvent {
    DragOver,
    DragEnter,
    DragLeave,
    /// Files dropped on the zone, in drop order
    Drop(Vec<ImageFile>),
    /// The zone's file picker changed; `None` when the dialog was cancelled
    Pick(Option<ImageFile>),
}

/// Loads spawned by an event
///
/// Dropping this detaches the loads; they still complete and update state.
#[derive(Debug, Default)]
#[must_use = "loads run regardless; call `wait` to observe their completion"]
pub struct PendingLoads {
    handles: Vec<JoinHandle<()>>,
}

impl PendingLoads {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every load to finish, in whatever order they complete
    pub async fn wait(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!("Image load task ended abnormally: {}", e);
            }
        }
    }
}

/// Result of handling a zone event
#[derive(Debug)]
pub struct EventOutcome {
    pub response: EventResponse,
    pub loads: PendingLoads,
}

/// Controller that wires drop zones and widget selections to application state
///
/// # Example
/// ```ignore
/// let runtime = tokio::runtime::Runtime::new()?;
/// let settings = CompareSettings::default();
/// let state = Arc::new(StateManager::from_settings(&settings));
/// let controller = ComparisonController::new(state, &settings, runtime.handle().clone())?;
///
/// let outcome = controller.handle_zone_event(SlotId::Before, ZoneEvent::Drop(files));
/// runtime.block_on(outcome.loads.wait());
/// let view = controller.view_model();
/// ```
pub struct ComparisonController {
    /// Shared slot store
    state_manager: Arc<StateManager>,

    /// Slot assignment rules for drops and picks
    resolver: IngestionResolver,

    /// File reader shared by all spawned loads
    loader: Arc<ImageLoader>,

    metrics: Arc<Metrics>,

    /// Runtime the loads are spawned on
    runtime: tokio::runtime::Handle,
}

impl ComparisonController {
    /// Create a new controller
    ///
    /// # Arguments
    /// * `state_manager` - Shared slot store
    /// * `settings` - Raw marker and decode verification are taken from here
    /// * `runtime` - Handle to the tokio runtime for spawning loads
    pub fn new(
        state_manager: Arc<StateManager>,
        settings: &CompareSettings,
        runtime: tokio::runtime::Handle,
    ) -> Result<Self> {
        let resolver = IngestionResolver::new(&settings.raw_marker)
            .with_context(|| format!("Invalid raw marker: {:?}", settings.raw_marker))?;

        tracing::info!(
            "Comparison controller initialized (raw marker: {:?}, verify decode: {})",
            settings.raw_marker,
            settings.verify_decode
        );

        Ok(Self {
            state_manager,
            resolver,
            loader: Arc::new(ImageLoader::new(settings.verify_decode)),
            metrics: Arc::new(Metrics::new()),
            runtime,
        })
    }

    pub fn state(&self) -> &Arc<StateManager> {
        &self.state_manager
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Current frame for the host UI
    pub fn view_model(&self) -> ViewModel {
        self.state_manager.read(ViewModel::from_state)
    }

    /// Current configuration for the comparison widget
    pub fn widget_config(&self) -> WidgetConfig {
        self.state_manager.read(WidgetConfig::from_state)
    }

    /// Handle a drag, drop or picker event on one zone
    ///
    /// Every drag event is consumed so the platform never opens the file itself.
    pub fn handle_zone_event(&self, zone: SlotId, event: ZoneEvent) -> EventOutcome {
        self.metrics.record_event();

        let loads = match event {
            ZoneEvent::DragOver => PendingLoads::default(),
            ZoneEvent::DragEnter => {
                self.state_manager.set_hover(zone, true);
                PendingLoads::default()
            }
            ZoneEvent::DragLeave => {
                self.state_manager.set_hover(zone, false);
                PendingLoads::default()
            }
            ZoneEvent::Drop(files) => {
                self.state_manager.set_hover(zone, false);
                self.ingest(files, Some(zone))
            }
            ZoneEvent::Pick(file) => match file {
                Some(file) => self.ingest(vec![file], Some(zone)),
                None => {
                    tracing::debug!("File picker for {} slot cancelled", zone);
                    PendingLoads::default()
                }
            },
        };

        EventOutcome {
            response: EventResponse::CONSUMED,
            loads,
        }
    }

    /// Filter, resolve and start loading a batch of files
    ///
    /// `target` is the zone the files were delivered to, if any. Batches that
    /// resolve to nothing are ignored without error.
    pub fn ingest(&self, files: Vec<ImageFile>, target: Option<SlotId>) -> PendingLoads {
        let placements = self.resolver.resolve(filter_images(files), target);

        if placements.is_empty() {
            self.metrics.record_drop_ignored();
            return PendingLoads::default();
        }

        let handles = placements
            .into_iter()
            .map(|placement| self.spawn_load(placement.slot, placement.file))
            .collect();

        PendingLoads { handles }
    }

    /// Start one fire-and-forget load into `slot`
    ///
    /// There is no cancellation: if the slot is reassigned meanwhile, whichever
    /// load completes last wins.
    fn spawn_load(&self, slot: SlotId, file: ImageFile) -> JoinHandle<()> {
        let state = Arc::clone(&self.state_manager);
        let loader = Arc::clone(&self.loader);
        let metrics = Arc::clone(&self.metrics);

        tracing::debug!("Loading {} into {} slot", file.name(), slot);
        metrics.record_load_started();

        self.runtime.spawn(async move {
            let started = Instant::now();
            match loader.load(&file).await {
                Ok(loaded) => {
                    metrics.record_load_completed(loaded.byte_len, started.elapsed());
                    state.assign(slot, loaded.into_assignment());
                }
                Err(e) => {
                    metrics.record_load_failed();
                    state.report_load_failure(LoadNotice {
                        slot,
                        filename: file.name().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        })
    }

    pub fn set_variant(&self, variant: Variant) -> Vec<StateChange> {
        self.metrics.record_event();
        self.state_manager.set_variant(variant)
    }

    pub fn set_direction(&self, direction: Direction) -> Vec<StateChange> {
        self.metrics.record_event();
        self.state_manager.set_direction(direction)
    }

    pub fn dismiss_notice(&self) -> Vec<StateChange> {
        self.state_manager.dismiss_notice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    fn controller() -> ComparisonController {
        let settings = CompareSettings {
            verify_decode: false,
            ..CompareSettings::default()
        };
        ComparisonController::new(
            Arc::new(StateManager::new()),
            &settings,
            tokio::runtime::Handle::current(),
        )
        .unwrap()
    }

    fn file(name: &str, kb: usize) -> ImageFile {
        ImageFile::from_bytes(name, "image/png", vec![7u8; kb * 1024])
    }

    #[tokio::test]
    async fn test_drag_events_are_consumed() {
        let controller = controller();

        for event in [ZoneEvent::DragOver, ZoneEvent::DragEnter, ZoneEvent::DragLeave] {
            let outcome = controller.handle_zone_event(SlotId::Before, event);
            assert_eq!(outcome.response, EventResponse::CONSUMED);
            assert!(outcome.loads.is_empty());
        }
    }

    #[tokio::test]
    async fn test_enter_leave_toggles_one_zone() {
        let controller = controller();

        let _ = controller.handle_zone_event(SlotId::After, ZoneEvent::DragEnter);
        assert!(controller.view_model().hover_after);
        assert!(!controller.view_model().hover_before);

        let _ = controller.handle_zone_event(SlotId::After, ZoneEvent::DragLeave);
        assert!(!controller.view_model().hover_after);
    }

    #[tokio::test]
    async fn test_drop_clears_hover_and_loads() {
        let controller = controller();

        let _ = controller.handle_zone_event(SlotId::Before, ZoneEvent::DragEnter);
        let outcome =
            controller.handle_zone_event(SlotId::Before, ZoneEvent::Drop(vec![file("a.png", 3)]));

        assert!(!controller.view_model().hover_before);
        assert_eq!(outcome.loads.len(), 1);
        outcome.loads.wait().await;

        let state = controller.state().snapshot();
        assert_eq!(state.before.filename(), "a.png");
        assert_eq!(state.before.size_kb(), 3.0);
    }

    #[tokio::test]
    async fn test_cancelled_pick_is_ignored() {
        let controller = controller();
        let outcome = controller.handle_zone_event(SlotId::After, ZoneEvent::Pick(None));
        assert!(outcome.loads.is_empty());
        assert_eq!(controller.state().snapshot().after.filename(), "compressed.jpg");
    }

    #[tokio::test]
    async fn test_ignored_drop_is_counted() {
        let controller = controller();
        let loads = controller.ingest(vec![file("a.png", 1)], None);
        assert!(loads.is_empty());
        assert_eq!(controller.metrics().drops_ignored.load(Ordering::Relaxed), 1);
    }
}
