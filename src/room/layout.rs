//! UI layout table. All entries are fractions of the SURFACE (not the room
//! image) so panels track the window while the room stays pixel-scaled.

use super::geometry::Rect;
use super::panels::PanelButton;

/// Recruiter panel sits this far (fraction of surface height) below the bubble.
const RECRUITER_GAP: f64 = 0.02;
const RECRUITER_HEIGHT_FACTOR: f64 = 1.1;
const RECRUITER_BUTTON_FACTOR: f64 = 1.1;
/// Pixels between the recruiter button and the panel's bottom edge.
const RECRUITER_BUTTON_INSET: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CharacterLayout {
    pub rel_width: f64,
    pub rel_height: f64,
    pub rel_x: f64,
    pub rel_bottom_margin: f64,
}

impl CharacterLayout {
    pub fn width(&self, surface_w: f64) -> f64 {
        surface_w * self.rel_width
    }

    pub fn height(&self, surface_h: f64) -> f64 {
        surface_h * self.rel_height
    }

    /// Resting X once the slide-in completes.
    pub fn target_x(&self, surface_w: f64) -> f64 {
        surface_w * self.rel_x
    }

    pub fn y(&self, surface_h: f64) -> f64 {
        surface_h - self.height(surface_h) - surface_h * self.rel_bottom_margin
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PanelLayout {
    pub rel_width: f64,
    pub rel_height: f64,
    pub rel_x: f64,
    pub rel_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ButtonLayout {
    pub rel_width: f64,
    pub rel_height: f64,
    pub rel_margin_top: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct UiLayout {
    pub character_static: CharacterLayout,
    pub character_animated: CharacterLayout,
    pub speech_bubble: PanelLayout,
    pub next_button: ButtonLayout,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            character_static: CharacterLayout {
                rel_width: 0.32,
                rel_height: 0.56,
                rel_x: 0.025,
                rel_bottom_margin: 0.07,
            },
            character_animated: CharacterLayout {
                rel_width: 0.373_333_333_333_333,
                rel_height: 0.56,
                rel_x: 0.030,
                rel_bottom_margin: 0.061,
            },
            speech_bubble: PanelLayout { rel_width: 0.25, rel_height: 0.20, rel_x: 0.03, rel_y: 0.15 },
            next_button: ButtonLayout { rel_width: 0.06, rel_height: 0.05, rel_margin_top: 0.02 },
        }
    }
}

impl UiLayout {
    pub fn character(&self, animated: bool) -> &CharacterLayout {
        if animated { &self.character_animated } else { &self.character_static }
    }

    pub fn bubble_rect(&self, w: f64, h: f64) -> Rect {
        let b = &self.speech_bubble;
        Rect::new(w * b.rel_x, h * b.rel_y, w * b.rel_width, h * b.rel_height)
    }

    /// Button under the speech bubble, right-aligned to it. Shared by the
    /// welcome "next" control and the exploring "back" control.
    pub fn bubble_button_rect(&self, w: f64, h: f64) -> Rect {
        let bubble = self.bubble_rect(w, h);
        let bw = w * self.next_button.rel_width;
        let bh = h * self.next_button.rel_height;
        Rect::new(bubble.right() - bw, bubble.bottom() + h * self.next_button.rel_margin_top, bw, bh)
    }

    /// Where a panel button is drawn and hit-tested.
    pub fn button_rect(&self, button: PanelButton, w: f64, h: f64) -> Rect {
        match button {
            PanelButton::WelcomeNext | PanelButton::Back => self.bubble_button_rect(w, h),
            PanelButton::RecruiterNext => self.recruiter_button_rect(w, h),
        }
    }

    pub fn recruiter_rect(&self, w: f64, h: f64) -> Rect {
        let bubble = self.bubble_rect(w, h);
        Rect::new(
            bubble.x,
            bubble.bottom() + h * RECRUITER_GAP,
            bubble.width,
            bubble.height * RECRUITER_HEIGHT_FACTOR,
        )
    }

    pub fn recruiter_button_rect(&self, w: f64, h: f64) -> Rect {
        let panel = self.recruiter_rect(w, h);
        let bw = w * self.next_button.rel_width * RECRUITER_BUTTON_FACTOR;
        let bh = h * self.next_button.rel_height * RECRUITER_BUTTON_FACTOR;
        Rect::new(
            panel.x + (panel.width - bw) / 2.0,
            panel.bottom() - bh - RECRUITER_BUTTON_INSET,
            bw,
            bh,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_sits_above_bottom_margin() {
        let layout = UiLayout::default();
        let c = layout.character(false);
        let y = c.y(1000.0);
        assert!((y - (1000.0 - 560.0 - 70.0)).abs() < 1e-9);
        assert!((c.target_x(2000.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_recruiter_button_inside_panel() {
        let layout = UiLayout::default();
        let panel = layout.recruiter_rect(1280.0, 720.0);
        let button = layout.recruiter_button_rect(1280.0, 720.0);
        assert!(panel.contains(button.x, button.y));
        assert!(panel.contains(button.right(), button.bottom()));
        // recruiter panel starts below the bubble
        assert!(panel.y > layout.bubble_rect(1280.0, 720.0).bottom());
    }

    #[test]
    fn test_bubble_button_below_bubble() {
        let layout = UiLayout::default();
        let bubble = layout.bubble_rect(1000.0, 1000.0);
        let button = layout.bubble_button_rect(1000.0, 1000.0);
        assert!((button.right() - bubble.right()).abs() < 1e-9);
        assert!((button.y - (bubble.bottom() + 20.0)).abs() < 1e-9);
    }
}
