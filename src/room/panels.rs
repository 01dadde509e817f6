//! UI panel stack.
//!
//! The stack only ever moves forward: `Welcome -> Recruiter -> Exploring`, and
//! the back control in `Exploring` leaves the page (reload or navigate). Each
//! phase owns exactly one forward-navigation button, so an invalid combination
//! of visible controls cannot be represented.

use super::hotspots::Hotspot;
use super::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelPhase {
    /// Speech bubble with the welcome text plus a "next" control.
    Welcome,
    /// Contact / recruiter panel with its own advance control.
    Recruiter,
    /// Panels dismissed, hotspots live, "back" control visible.
    Exploring,
}

/// Buttons drawn on the canvas by the panel stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelButton {
    WelcomeNext,
    RecruiterNext,
    Back,
}

impl PanelButton {
    pub fn label(self) -> &'static str {
        match self {
            PanelButton::WelcomeNext | PanelButton::RecruiterNext => "NEXT",
            PanelButton::Back => "BACK",
        }
    }
}

/// Outcome of pressing a panel button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Button does not belong to the current phase.
    Ignored,
    Enter(PanelPhase),
    /// Leave the page: the whole system restarts from scratch.
    Terminal,
}

impl PanelPhase {
    pub fn active_button(self) -> PanelButton {
        match self {
            PanelPhase::Welcome => PanelButton::WelcomeNext,
            PanelPhase::Recruiter => PanelButton::RecruiterNext,
            PanelPhase::Exploring => PanelButton::Back,
        }
    }

    pub fn press(self, button: PanelButton) -> Transition {
        match (self, button) {
            (PanelPhase::Welcome, PanelButton::WelcomeNext) => Transition::Enter(PanelPhase::Recruiter),
            (PanelPhase::Recruiter, PanelButton::RecruiterNext) => Transition::Enter(PanelPhase::Exploring),
            (PanelPhase::Exploring, PanelButton::Back) => Transition::Terminal,
            _ => Transition::Ignored,
        }
    }

    /// Dialogue phases hold the speech bubble text until dismissed.
    pub fn pins_dialogue(self) -> bool {
        !matches!(self, PanelPhase::Exploring)
    }
}

/// Which phase gates hotspot interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HotspotGating {
    /// Hotspots are live only once the intro revealed the panels and the stack
    /// reached `Exploring`.
    #[default]
    Exploring,
    /// Hotspots are live from the first frame, whatever the panel phase.
    Always,
}

/// Hotspot under the pointer, with its geometry from the current viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct HoveredHotspot {
    pub index: usize,
    pub name: String,
    pub rect: Rect,
}

impl HoveredHotspot {
    pub fn new(index: usize, hotspot: &Hotspot, rect: Rect) -> Self {
        Self { index, name: hotspot.name.clone(), rect }
    }
}

/// Mutable UI visibility state shared by the router and the scene planner.
#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    /// Master gate, flipped once by the intro when the glitch ends.
    pub show_boxes: bool,
    pub phase: PanelPhase,
    pub current_message: String,
    pub hovered: Option<HoveredHotspot>,
    pub debug: bool,
}

impl UiState {
    pub fn new(welcome_message: &str) -> Self {
        Self {
            show_boxes: false,
            phase: PanelPhase::Welcome,
            current_message: welcome_message.to_string(),
            hovered: None,
            debug: false,
        }
    }

    /// The one button the user may press right now, if panels are shown.
    pub fn interactable_button(&self) -> Option<PanelButton> {
        self.show_boxes.then(|| self.phase.active_button())
    }

    pub fn hotspots_live(&self, gating: HotspotGating) -> bool {
        match gating {
            HotspotGating::Always => true,
            HotspotGating::Exploring => self.show_boxes && self.phase == PanelPhase::Exploring,
        }
    }

    /// True while a forward-navigation phase owns the speech bubble text.
    pub fn dialogue_pinned(&self) -> bool {
        self.phase.pins_dialogue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_advance_in_order() {
        let mut phase = PanelPhase::Welcome;
        let mut seen = vec![phase];
        loop {
            match phase.press(phase.active_button()) {
                Transition::Enter(next) => {
                    phase = next;
                    seen.push(next);
                }
                Transition::Terminal => break,
                Transition::Ignored => panic!("active button ignored in {:?}", phase),
            }
        }
        assert_eq!(seen, vec![PanelPhase::Welcome, PanelPhase::Recruiter, PanelPhase::Exploring]);
    }

    #[test]
    fn test_no_skip_ahead() {
        assert_eq!(PanelPhase::Welcome.press(PanelButton::RecruiterNext), Transition::Ignored);
        assert_eq!(PanelPhase::Welcome.press(PanelButton::Back), Transition::Ignored);
        assert_eq!(PanelPhase::Recruiter.press(PanelButton::WelcomeNext), Transition::Ignored);
        assert_eq!(PanelPhase::Exploring.press(PanelButton::RecruiterNext), Transition::Ignored);
    }

    #[test]
    fn test_buttons_hidden_until_boxes_shown() {
        let mut ui = UiState::new("hi");
        assert_eq!(ui.interactable_button(), None);
        ui.show_boxes = true;
        assert_eq!(ui.interactable_button(), Some(PanelButton::WelcomeNext));
    }

    #[test]
    fn test_gating_policy() {
        let mut ui = UiState::new("hi");
        assert!(ui.hotspots_live(HotspotGating::Always));
        assert!(!ui.hotspots_live(HotspotGating::Exploring));
        ui.phase = PanelPhase::Exploring;
        // still hidden behind the intro
        assert!(!ui.hotspots_live(HotspotGating::Exploring));
        ui.show_boxes = true;
        assert!(ui.hotspots_live(HotspotGating::Exploring));
    }
}
