// State management module
//
// This module provides the StateManager which wraps ComparisonState with thread-safe
// access using Arc<RwLock<T>> and emits change events for the presentation layer.

use crate::models::{
    CompareSettings, ComparisonState, Direction, LoadNotice, SlotAssignment, SlotId, Variant,
};
use crate::services::metric::CompressionMetric;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when state is modified
///
/// These events let the presentation layer re-render without polling the state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// A slot received new content
    SlotAssigned {
        slot: SlotId,
        filename: String,
        size_kb: f64,
    },

    /// A drop zone's hover flag flipped
    HoverChanged { slot: SlotId, hovering: bool },

    /// The widget variant selection changed
    VariantChanged { variant: Variant },

    /// The reading direction selection changed
    DirectionChanged { direction: Direction },

    /// The derived compression metric changed (or became defined)
    MetricChanged { metric: Option<CompressionMetric> },

    /// A load failed; the slot kept its previous content
    LoadFailed(LoadNotice),

    /// The pending load notice was cleared
    NoticeDismissed,
}

/// Thread-safe state manager with event emission
///
/// This is the Image Slot Store:
/// - Provides thread-safe access to [`ComparisonState`] via `Arc<RwLock<T>>`
/// - Exposes the only mutation entry points: [`assign`](Self::assign) and
///   [`set_hover`](Self::set_hover) for slots, plus the widget selections
/// - Detects state changes and emits [`StateChange`] events on a broadcast channel
///
/// # Related Types
///
/// - [`crate::models::ComparisonState`]: The underlying state structure
/// - [`crate::ui::ComparisonController`]: Primary writer, from event handlers and loads
pub struct StateManager {
    /// The comparison state protected by RwLock for thread-safe access
    state: Arc<RwLock<ComparisonState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with the built-in placeholders
    pub fn new() -> Self {
        Self::with_state(ComparisonState::default())
    }

    /// Create a StateManager whose initial state follows the user's settings
    pub fn from_settings(settings: &CompareSettings) -> Self {
        Self::with_state(ComparisonState::from_settings(settings))
    }

    fn with_state(state: ComparisonState) -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(state)),
            state_tx,
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn snapshot(&self) -> ComparisonState {
        self.read(|state| state.clone())
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let size = state_manager.read(|state| state.before.size_kb());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ComparisonState) -> R,
    {
        // A panic mid-update cannot leave a torn slot: slot writes are single assignments.
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// Apply a mutation, detect what changed and broadcast it
    fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut ComparisonState),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let old_state = state.clone();

        update_fn(&mut state);

        let changes = Self::detect_changes(&old_state, &state);
        drop(state);

        for change in &changes {
            self.emit(change.clone());
        }

        changes
    }

    fn emit(&self, change: StateChange) {
        // Ignore send errors - it's OK if no one is listening
        let _ = self.state_tx.send(change);
    }

    /// Detect what changed between two states and generate events
    fn detect_changes(old: &ComparisonState, new: &ComparisonState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        for id in SlotId::ALL {
            let (before, after) = (old.slot(id), new.slot(id));

            if before.image() != after.image()
                || before.size_kb() != after.size_kb()
                || before.filename() != after.filename()
            {
                changes.push(StateChange::SlotAssigned {
                    slot: id,
                    filename: after.filename().to_string(),
                    size_kb: after.size_kb(),
                });
            }

            if before.hovering() != after.hovering() {
                changes.push(StateChange::HoverChanged {
                    slot: id,
                    hovering: after.hovering(),
                });
            }
        }

        let (old_metric, new_metric) = (old.compression_metric(), new.compression_metric());
        if old_metric != new_metric {
            changes.push(StateChange::MetricChanged { metric: new_metric });
        }

        if old.config.variant != new.config.variant {
            changes.push(StateChange::VariantChanged {
                variant: new.config.variant,
            });
        }

        if old.config.direction != new.config.direction {
            changes.push(StateChange::DirectionChanged {
                direction: new.config.direction,
            });
        }

        if old.notice.is_some() && new.notice.is_none() {
            changes.push(StateChange::NoticeDismissed);
        }

        changes
    }

    /// Replace a slot's image, size and filename in one step
    ///
    /// A pending notice about the same slot is cleared, since the user has
    /// successfully retried.
    pub fn assign(&self, slot: SlotId, assignment: SlotAssignment) -> Vec<StateChange> {
        tracing::info!(
            "Assigning {} ({:.2} KB) to {} slot",
            assignment.filename,
            assignment.size_kb,
            slot
        );

        self.update(|state| {
            state.slot_mut(slot).replace(assignment);
            if state.notice.as_ref().is_some_and(|n| n.slot == slot) {
                state.notice = None;
            }
        })
    }

    /// Set the hover flag of one drop zone
    pub fn set_hover(&self, slot: SlotId, active: bool) -> Vec<StateChange> {
        self.update(|state| state.slot_mut(slot).set_hovering(active))
    }

    pub fn set_variant(&self, variant: Variant) -> Vec<StateChange> {
        self.update(|state| state.config.variant = variant)
    }

    pub fn set_direction(&self, direction: Direction) -> Vec<StateChange> {
        self.update(|state| state.config.direction = direction)
    }

    /// Record a failed load without touching slot content
    pub fn report_load_failure(&self, notice: LoadNotice) -> Vec<StateChange> {
        tracing::warn!("{}", notice.summary());

        self.update(|state| state.notice = Some(notice.clone()));

        let event = StateChange::LoadFailed(notice);
        self.emit(event.clone());
        vec![event]
    }

    /// Clear the pending load notice, if any
    pub fn dismiss_notice(&self) -> Vec<StateChange> {
        self.update(|state| state.notice = None)
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Cloning shares the same state and channel
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}
