//! Pointer routing: surface coordinates -> hotspot / panel button.
//!
//! Priority is fixed: the active panel button first, then hotspots in
//! registry order. First match wins. Every rectangle is recomputed from the
//! live viewport on each event so a resize takes effect immediately.

use super::panels::{HoveredHotspot, PanelButton, PanelPhase, Transition};
use super::{Host, RoomState};
use crate::config::BackAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Pointer,
    Default,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Pointer => "pointer",
            Cursor::Default => "default",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Hotspot(String),
    Button(PanelButton),
    Nothing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteResult {
    pub target: HitTarget,
    pub cursor: Cursor,
}

impl RouteResult {
    fn nothing() -> Self {
        Self { target: HitTarget::Nothing, cursor: Cursor::Default }
    }
}

enum Hit {
    Button(PanelButton),
    Hotspot(usize),
}

impl RoomState {
    fn hit_test(&self, px: f64, py: f64) -> Option<Hit> {
        let (w, h) = (self.viewport.surface_width, self.viewport.surface_height);
        if let Some(button) = self.ui.interactable_button() {
            if self.config.layout.button_rect(button, w, h).contains(px, py) {
                return Some(Hit::Button(button));
            }
        }
        if !self.ui.hotspots_live(self.config.gating) {
            return None;
        }
        self.config
            .hotspots
            .iter()
            .position(|hs| self.viewport.hotspot_rect(hs).contains(px, py))
            .map(Hit::Hotspot)
    }

    fn clear_hover(&mut self) {
        self.ui.hovered = None;
        if !self.ui.dialogue_pinned() {
            self.ui.current_message = self.config.explore_prompt.clone();
        }
    }

    /// Pointer moved to `(px, py)` in surface coordinates.
    pub fn handle_move(&mut self, px: f64, py: f64) -> RouteResult {
        match self.hit_test(px, py) {
            Some(Hit::Button(button)) => {
                self.ui.hovered = None;
                RouteResult { target: HitTarget::Button(button), cursor: Cursor::Pointer }
            }
            Some(Hit::Hotspot(index)) => {
                let Some(hotspot) = self.config.hotspots.get(index) else {
                    return RouteResult::nothing();
                };
                let rect = self.viewport.hotspot_rect(hotspot);
                if !self.ui.dialogue_pinned() {
                    self.ui.current_message = hotspot.message.clone();
                }
                let name = hotspot.name.clone();
                self.ui.hovered = Some(HoveredHotspot::new(index, hotspot, rect));
                RouteResult { target: HitTarget::Hotspot(name), cursor: Cursor::Pointer }
            }
            None => {
                self.clear_hover();
                RouteResult::nothing()
            }
        }
    }

    /// Pointer clicked at `(px, py)`; `now` is the same clock `tick` uses.
    pub fn handle_click(&mut self, px: f64, py: f64, now: f64, host: &mut dyn Host) -> RouteResult {
        match self.hit_test(px, py) {
            Some(Hit::Button(button)) => {
                self.press_button(button, host);
                RouteResult { target: HitTarget::Button(button), cursor: Cursor::Pointer }
            }
            Some(Hit::Hotspot(index)) => {
                let Some(hotspot) = self.config.hotspots.get(index) else {
                    return RouteResult::nothing();
                };
                self.ui.current_message = hotspot.message.clone();
                let name = hotspot.name.clone();
                if let Some(link) = hotspot.link.clone() {
                    let due = now + self.config.link_delay_ms;
                    log::info!("hotspot '{name}' opens {link} at {due:.0}ms");
                    self.defer_open(link, due);
                }
                RouteResult { target: HitTarget::Hotspot(name), cursor: Cursor::Pointer }
            }
            None => {
                self.clear_hover();
                RouteResult::nothing()
            }
        }
    }

    fn press_button(&mut self, button: PanelButton, host: &mut dyn Host) {
        match self.ui.phase.press(button) {
            Transition::Enter(next) => {
                log::info!("panel stack: {:?} -> {:?}", self.ui.phase, next);
                self.ui.phase = next;
                self.ui.hovered = None;
                if next == PanelPhase::Exploring {
                    self.ui.current_message = self.config.explore_prompt.clone();
                }
            }
            Transition::Terminal => match &self.config.back_action {
                BackAction::Reload => {
                    log::info!("back: reloading room");
                    host.reload();
                }
                BackAction::Navigate(url) => {
                    log::info!("back: navigating to {url}");
                    host.navigate(url);
                }
            },
            Transition::Ignored => {
                log::debug!("{button:?} ignored in {:?}", self.ui.phase);
            }
        }
    }
}
