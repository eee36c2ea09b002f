use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;
use crate::input::{PointerEvent, PointerKind};
use crate::math;
use crate::model::{BouquetScene, Uuid};
use crate::view::View;

/// Events emitted by the Canvas logic to the host application.
#[derive(Clone, Debug, PartialEq)]
pub enum LogicEvent {
    /// The selected flower changed (or was cleared).
    SelectionChanged(Option<Uuid>),
    /// A flower was dragged to a new (already clamped) center.
    FlowerMoved { id: Uuid, center: Vec2 },
    /// The scene or selection changed visually, requiring a repaint.
    RepaintNeeded,
}

/// The current state of user interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Nothing selected.
    #[default]
    Idle,
    /// A flower is selected but not being dragged.
    Selected { id: Uuid },
    /// A flower is following the pointer.
    Dragging {
        id: Uuid,
        /// Pointer minus flower center at the moment the drag started (Canvas Space).
        offset: Vec2,
    },
}

impl InteractionMode {
    /// The flower the mode refers to, if any.
    pub fn selection(&self) -> Option<Uuid> {
        match self {
            InteractionMode::Idle => None,
            InteractionMode::Selected { id } | InteractionMode::Dragging { id, .. } => Some(*id),
        }
    }
}

/// Returns the topmost flower under `point` (Canvas Space).
///
/// Flowers are tested in reverse scene order, i.e. front to back as painted.
/// A flower is hit when the distance to its center is strictly less than
/// `scale * hit_radius`.
pub fn hit_test(scene: &BouquetScene, point: Vec2, config: &CanvasConfig) -> Option<Uuid> {
    scene
        .flowers()
        .iter()
        .rev()
        .find(|flower| flower.center.distance(point) < flower.scale * config.hit_radius)
        .map(|flower| flower.id)
}

/// Handles a pointer event and updates the scene/mode.
///
/// This function acts as the central state machine for the Canvas. It processes
/// the event based on the current `InteractionMode` and transitions between states.
///
/// # Arguments
/// * `mode` - The current interaction mode (will be mutated on state transitions).
/// * `view` - Maps the event position from display to canvas pixels.
/// * `config` - Hit radius, canvas size and boundary margin.
/// * `event` - The pointer event to process.
/// * `scene` - The bouquet, mutated while dragging.
/// * `events` - A buffer to push `LogicEvent`s into.
pub fn handle_pointer(
    mode: &mut InteractionMode,
    view: &View,
    config: &CanvasConfig,
    event: &PointerEvent,
    scene: &mut BouquetScene,
    events: &mut Vec<LogicEvent>,
) {
    // A selection that no longer exists is the same as no selection.
    if let Some(id) = mode.selection()
        && !scene.contains(id)
    {
        *mode = InteractionMode::Idle;
    }

    let pointer = view.display_to_canvas(event.position);

    let next_mode = match (*mode, event.kind) {
        (InteractionMode::Idle | InteractionMode::Selected { .. }, PointerKind::Down) => {
            handle_press(mode.selection(), pointer, config, scene, events)
        }
        (InteractionMode::Dragging { id, offset }, PointerKind::Move) => {
            handle_drag(id, offset, pointer, config, scene, events);
            None
        }
        (InteractionMode::Dragging { id, .. }, PointerKind::Up | PointerKind::Leave) => {
            tracing::debug!(flower = %id, "Drag finished");
            Some(InteractionMode::Selected { id })
        }
        // Dragging + Down cannot happen with a single pointer; keep dragging.
        _ => None,
    };

    if let Some(new_mode) = next_mode {
        *mode = new_mode;
    }
}

/// Handles a press in `Idle`/`Selected`.
///
/// Transitions to `Dragging` on a hit, or to `Idle` on a miss.
fn handle_press(
    previous: Option<Uuid>,
    pointer: Vec2,
    config: &CanvasConfig,
    scene: &BouquetScene,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    let hit = hit_test(scene, pointer, config);

    if hit != previous {
        events.push(LogicEvent::SelectionChanged(hit));
        events.push(LogicEvent::RepaintNeeded);
    }

    match hit.and_then(|id| scene.get(id)) {
        Some(flower) => {
            tracing::debug!(flower = %flower.id, species = %flower.species, "Drag started");
            Some(InteractionMode::Dragging {
                id: flower.id,
                offset: pointer - flower.center,
            })
        }
        None => Some(InteractionMode::Idle),
    }
}

/// Moves the dragged flower so it keeps its grab offset, clamped inside the margin.
fn handle_drag(
    id: Uuid,
    offset: Vec2,
    pointer: Vec2,
    config: &CanvasConfig,
    scene: &mut BouquetScene,
    events: &mut Vec<LogicEvent>,
) {
    let center = math::clamp_to_bounds(pointer - offset, config.size(), config.boundary_margin);
    if scene.get(id).is_some_and(|flower| flower.center == center) {
        return;
    }
    if scene.move_flower(id, center).is_ok() {
        events.push(LogicEvent::FlowerMoved { id, center });
        events.push(LogicEvent::RepaintNeeded);
    }
}
