//! Page-level orchestration: hydration, intent execution, optimistic
//! toggles and their reconciliation, transient hover/detail UI state.

use crate::core::{
    geometry::Point,
    province::ProvinceId,
    registry::{compute_anchor, LayoutProbe},
};
use crate::input::{
    dispatcher::InteractionDispatcher,
    events::{Intent, PointerEvent},
};
use crate::overlay::{pins::PinOverlay, tooltip::TooltipController};
use crate::persist::gateway::{ToggleAction, ToggleResult, VisitGateway};
use crate::prelude::{Arc, HashSet, Instant};
use crate::state::visited::{PendingToggle, Reconciliation, VisitStats, VisitedStore};
use crate::Result;

/// Composes the store, overlays and dispatcher over a layout probe and a
/// persistence gateway.
///
/// Everything the user can see mutates synchronously inside
/// [`handle_event`](Self::handle_event); the returned pending toggles are
/// then pushed through the gateway by the caller and fed back into
/// [`reconcile`](Self::reconcile). A second click before the first result
/// returns simply flips the optimistic state again; stale completions are
/// recognized by province id + action and discarded.
pub struct MapPageController<P: LayoutProbe> {
    probe: P,
    gateway: Arc<dyn VisitGateway>,
    user: String,
    store: VisitedStore,
    pins: PinOverlay,
    tooltip: TooltipController,
    dispatcher: InteractionDispatcher,
    /// Shapes currently carrying the visited visual state. Tracked apart
    /// from the store so the tri-state invariant is checkable.
    shape_visited: HashSet<ProvinceId>,
    /// Shapes under hover emphasis
    emphasized: HashSet<ProvinceId>,
    hover_preview: Option<ProvinceId>,
    open_detail: Option<ProvinceId>,
}

impl<P: LayoutProbe> MapPageController<P> {
    pub fn new(probe: P, gateway: Arc<dyn VisitGateway>, user: impl Into<String>, total: usize) -> Self {
        Self {
            probe,
            gateway,
            user: user.into(),
            store: VisitedStore::new(total),
            pins: PinOverlay::new(),
            tooltip: TooltipController::new(),
            dispatcher: InteractionDispatcher::new(),
            shape_visited: HashSet::default(),
            emphasized: HashSet::default(),
            hover_preview: None,
            open_detail: None,
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: InteractionDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_tooltip(mut self, tooltip: TooltipController) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn with_pins(mut self, pins: PinOverlay) -> Self {
        self.pins = pins;
        self
    }

    /// Seeds the store and the pin overlay from the gateway's current
    /// snapshot. Called once at map mount.
    pub async fn hydrate(&mut self, now: Instant) -> Result<()> {
        let records = self.gateway.fetch_visited(&self.user).await?;
        log::info!("hydrating {} visit records", records.len());
        self.store.hydrate(&records);
        for province in records.iter().map(|r| r.province.clone()) {
            let anchor = self.anchor_or_fallback(&province);
            let color = self.dispatcher.pick_color();
            self.pins.add(province.clone(), color, anchor, now);
            self.shape_visited.insert(province);
        }
        Ok(())
    }

    /// Dispatches one raw event, applies every resulting intent
    /// synchronously, and returns the toggles that still need to reach
    /// the gateway.
    pub fn handle_event(&mut self, event: PointerEvent, now: Instant) -> Vec<PendingToggle> {
        let intents = self.dispatcher.handle_event(event, &self.store);
        let mut pending = vec![];
        for intent in intents {
            self.apply_intent(intent, now, &mut pending);
        }
        pending
    }

    fn apply_intent(&mut self, intent: Intent, now: Instant, pending: &mut Vec<PendingToggle>) {
        match intent {
            Intent::Toggle {
                province,
                action: ToggleAction::Add,
                color,
            } => {
                self.store.visit(province.clone());
                self.shape_visited.insert(province.clone());
                let anchor = self.anchor_or_fallback(&province);
                let color = color.unwrap_or_else(|| self.dispatcher.pick_color());
                self.pins.add(province.clone(), color, anchor, now);
                pending.push(PendingToggle {
                    province,
                    action: ToggleAction::Add,
                });
            }
            Intent::Toggle {
                province,
                action: ToggleAction::Remove,
                ..
            } => {
                self.store.unvisit(&province);
                self.shape_visited.remove(&province);
                self.pins.remove(&province, now);
                pending.push(PendingToggle {
                    province,
                    action: ToggleAction::Remove,
                });
            }
            Intent::ShowTooltip {
                text,
                position,
                dwell,
            } => {
                if dwell {
                    self.tooltip.show_touch(text, position, now);
                } else {
                    self.tooltip.show(text, position);
                }
            }
            Intent::MoveTooltip { position } => self.tooltip.move_to(position, now),
            Intent::HideTooltip => self.tooltip.hide(),
            Intent::Emphasize { province } => {
                self.emphasized.insert(province);
            }
            Intent::ClearEmphasis { province } => {
                self.emphasized.remove(&province);
            }
            Intent::ShowPreview { province } => {
                // Preview and detail modal are mutually exclusive.
                if self.open_detail.is_none() {
                    self.hover_preview = Some(province);
                }
            }
            Intent::HidePreview => self.hover_preview = None,
            Intent::OpenDetail { province } => {
                self.hover_preview = None;
                self.open_detail = Some(province);
            }
            Intent::Reposition => self.pins.reposition(),
        }
    }

    /// Pushes a pending toggle through the gateway. The caller feeds the
    /// result into [`reconcile`](Self::reconcile) whenever it arrives.
    pub async fn submit(&self, pending: &PendingToggle) -> ToggleResult {
        self.gateway
            .toggle(&self.user, &pending.province, pending.action)
            .await
    }

    /// Applies an asynchronous toggle result: confirms, discards a stale
    /// completion, or rolls the optimistic flip back visually.
    pub fn reconcile(&mut self, result: &ToggleResult, now: Instant) {
        match self.store.reconcile(result) {
            Reconciliation::Confirmed | Reconciliation::Stale => {}
            Reconciliation::Reverted { province, action } => match action {
                ToggleAction::Add => {
                    // Failed add: the province is unvisited again.
                    self.shape_visited.remove(&province);
                    self.pins.remove(&province, now);
                }
                ToggleAction::Remove => {
                    // Failed remove: restore the pre-click state. The pin
                    // is still tracked mid-exit, so its prior color is
                    // available for the revert.
                    self.shape_visited.insert(province.clone());
                    let anchor = self.anchor_or_fallback(&province);
                    let prior = self.pins.get(&province).map(|pin| pin.color());
                    let color = prior.unwrap_or_else(|| self.dispatcher.pick_color());
                    self.pins.add(province, color, anchor, now);
                }
            },
        }
        self.pins.retain_visited(self.store.visited_set(), now);
    }

    /// Advances one animation frame: tooltip dwell, pin transitions,
    /// debounced repositioning.
    pub fn frame(&mut self, now: Instant) {
        let was_shown = self.tooltip.is_shown();
        self.tooltip.frame(now);
        if was_shown && !self.tooltip.is_shown() {
            // Dwell timeout ended a touch gesture; without a leave event
            // the hover bookkeeping has to be cleared here.
            if let Some(province) = self.dispatcher.clear_hover() {
                self.emphasized.remove(&province);
            }
        }
        self.pins.frame(now, &self.probe);
    }

    fn anchor_or_fallback(&self, province: &ProvinceId) -> Point {
        if let Some(anchor) = compute_anchor(&self.probe, province) {
            return anchor;
        }
        // Detached geometry: reuse the pin's last anchor if one exists.
        if let Some(pin) = self.pins.get(province) {
            log::debug!("stale anchor reused for {}", province);
            return pin.anchor();
        }
        log::debug!("no geometry for {}, anchoring at origin", province);
        Point::default()
    }

    /// Tri-state invariant: store membership, active pins and visited
    /// shape styling must agree.
    pub fn invariant_holds(&self) -> bool {
        self.store.iter().all(|p| {
            self.pins.is_active(p) && self.shape_visited.contains(p)
        }) && self.pins.iter().all(|pin| {
            pin.is_leaving() || self.store.is_visited(pin.province())
        }) && self
            .shape_visited
            .iter()
            .all(|p| self.store.is_visited(p))
    }

    pub fn stats(&self) -> VisitStats {
        self.store.stats()
    }

    pub fn store(&self) -> &VisitedStore {
        &self.store
    }

    pub fn pins(&self) -> &PinOverlay {
        &self.pins
    }

    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }

    pub fn dispatcher_mut(&mut self) -> &mut InteractionDispatcher {
        &mut self.dispatcher
    }

    pub fn is_emphasized(&self, province: &ProvinceId) -> bool {
        self.emphasized.contains(province)
    }

    pub fn hover_preview(&self) -> Option<&ProvinceId> {
        self.hover_preview.as_ref()
    }

    pub fn open_detail(&self) -> Option<&ProvinceId> {
        self.open_detail.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.open_detail = None;
    }
}
