use crate::core::{
    palette::{Color, ColorPicker, RandomPicker},
    province::{display_name, ProvinceId},
};
use crate::input::events::{Intent, PointerEvent};
use crate::persist::gateway::ToggleAction;
use crate::state::visited::VisitedStore;

/// Behavior switches for the dispatcher (like Leaflet's Map options)
#[derive(Debug, Clone)]
pub struct DispatcherOptions {
    /// Raise hover-preview intents for visited provinces
    pub hover_preview: bool,
    /// Open the detail surface when a visited province with detail
    /// content is clicked, instead of toggling it off
    pub open_detail: bool,
}

impl Default for DispatcherOptions {
    fn default() -> Self {
        Self {
            hover_preview: true,
            open_detail: true,
        }
    }
}

/// Translates raw pointer/touch events into toggle, hover and detail
/// intents with correct precedence.
///
/// The dispatcher is pure decision logic: it holds only hover
/// bookkeeping and never mutates the store or the overlays itself.
pub struct InteractionDispatcher {
    pub enabled: bool,
    options: DispatcherOptions,
    picker: Box<dyn ColorPicker>,
    /// Province currently hovered, for idempotence against repeated
    /// enter events without an intervening leave.
    hovered: Option<ProvinceId>,
    /// The pointer is on the preview surface itself; suppresses the
    /// usual leave-hides-preview behavior.
    preview_hovered: bool,
}

impl InteractionDispatcher {
    pub fn new() -> Self {
        Self::with_options(DispatcherOptions::default())
    }

    pub fn with_options(options: DispatcherOptions) -> Self {
        Self {
            enabled: true,
            options,
            picker: Box::new(RandomPicker),
            hovered: None,
            preview_hovered: false,
        }
    }

    /// Swaps the color policy (tests inject a deterministic picker).
    pub fn with_picker(mut self, picker: Box<dyn ColorPicker>) -> Self {
        self.picker = picker;
        self
    }

    /// Samples a color from the current policy.
    pub fn pick_color(&mut self) -> Color {
        self.picker.pick()
    }

    /// Handles one raw event and produces the intents to execute.
    pub fn handle_event(&mut self, event: PointerEvent, store: &VisitedStore) -> Vec<Intent> {
        if !self.enabled {
            return vec![];
        }

        let mut intents = vec![];

        match event {
            PointerEvent::Click { province, .. } => {
                if store.is_visited(&province) {
                    // Deliberate asymmetry: a visited province with detail
                    // content opens its detail surface; only detail-less
                    // visited provinces toggle off on click.
                    if self.options.open_detail && store.has_detail(&province) {
                        intents.push(Intent::OpenDetail { province });
                    } else {
                        intents.push(Intent::Toggle {
                            province,
                            action: ToggleAction::Remove,
                            color: None,
                        });
                    }
                } else {
                    intents.push(Intent::Toggle {
                        province,
                        action: ToggleAction::Add,
                        color: Some(self.picker.pick()),
                    });
                }
            }
            PointerEvent::Enter { province, position } => {
                if self.hovered.as_ref() == Some(&province) {
                    // Repeated enter without a leave: nothing new.
                    return intents;
                }
                self.hovered = Some(province.clone());
                intents.push(Intent::ShowTooltip {
                    text: display_name(&province),
                    position,
                    dwell: false,
                });
                intents.push(Intent::Emphasize {
                    province: province.clone(),
                });
                if self.options.hover_preview && store.is_visited(&province) {
                    intents.push(Intent::ShowPreview { province });
                }
            }
            PointerEvent::Move { province, position } => {
                if self.hovered.as_ref() == Some(&province) {
                    intents.push(Intent::MoveTooltip { position });
                }
            }
            PointerEvent::Leave { province } => {
                if self.hovered.as_ref() != Some(&province) {
                    return intents;
                }
                self.hovered = None;
                intents.push(Intent::HideTooltip);
                intents.push(Intent::ClearEmphasis {
                    province: province.clone(),
                });
                // The preview outlives the shape hover while the pointer
                // is on the preview surface itself.
                if !self.preview_hovered {
                    intents.push(Intent::HidePreview);
                }
            }
            PointerEvent::TouchStart { province, position } => {
                self.hovered = Some(province.clone());
                intents.push(Intent::ShowTooltip {
                    text: display_name(&province),
                    position,
                    dwell: true,
                });
                intents.push(Intent::Emphasize {
                    province: province.clone(),
                });
                if self.options.hover_preview && store.is_visited(&province) {
                    intents.push(Intent::ShowPreview { province });
                }
            }
            PointerEvent::PreviewEnter => {
                self.preview_hovered = true;
            }
            PointerEvent::PreviewLeave => {
                self.preview_hovered = false;
                if self.hovered.is_none() {
                    intents.push(Intent::HidePreview);
                }
            }
            PointerEvent::Scroll { .. } | PointerEvent::Resize => {
                intents.push(Intent::Reposition);
            }
        }

        intents
    }

    /// Ends the current hover gesture. Touch has no leave event, so the
    /// page calls this when the tooltip's dwell timer fires; otherwise a
    /// later enter on the same province would hit the repeated-enter
    /// guard and show nothing. Returns the province that was hovered.
    pub fn clear_hover(&mut self) -> Option<ProvinceId> {
        self.hovered.take()
    }

    pub fn hovered(&self) -> Option<&ProvinceId> {
        self.hovered.as_ref()
    }

    pub fn preview_hovered(&self) -> bool {
        self.preview_hovered
    }
}

impl Default for InteractionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
