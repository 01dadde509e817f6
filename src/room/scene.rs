//! Per-frame layout and visibility decisions.
//!
//! `plan_frame` turns the room state into a `FramePlan`; `render` only draws
//! what the plan says. Keeping the decisions here lets them run natively.

use super::geometry::Rect;
use super::intro::{GlitchFilter, IntroFrame};
use super::panels::{PanelButton, PanelPhase};
use super::RoomState;

/// Text inset from the panel's left edge.
pub const TEXT_INSET_X: f64 = 15.0;
/// Offset from the panel's top edge to the first baseline.
pub const TEXT_BASELINE_Y: f64 = 28.0;

#[derive(Clone, Debug, PartialEq)]
pub struct DebugRegion {
    pub name: String,
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CharacterPlacement {
    /// Includes the glitch jitter.
    pub rect: Rect,
    pub animated: bool,
    pub filter: Option<GlitchFilter>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextPanel {
    pub rect: Rect,
    pub text: String,
}

impl TextPanel {
    pub fn text_max_width(&self) -> f64 {
        self.rect.width - TEXT_INSET_X * 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonPlan {
    pub button: PanelButton,
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub surface: (f64, f64),
    pub background: Rect,
    /// Filled only in debug mode.
    pub debug_regions: Vec<DebugRegion>,
    pub hover_highlight: Option<Rect>,
    pub character: CharacterPlacement,
    pub speech_bubble: Option<TextPanel>,
    pub recruiter_panel: Option<TextPanel>,
    pub button: Option<ButtonPlan>,
    pub debug_hint: Option<String>,
    pub font_px: f64,
    pub button_font_px: f64,
}

impl FramePlan {
    pub fn line_height(&self) -> f64 {
        self.font_px + 5.0
    }
}

pub fn plan_frame(state: &RoomState, intro: &IntroFrame) -> FramePlan {
    let vp = &state.viewport;
    let (w, h) = (vp.surface_width, vp.surface_height);
    let cfg = &state.config;
    let ui = &state.ui;

    let debug_regions = if ui.debug {
        cfg.hotspots
            .iter()
            .map(|hs| DebugRegion { name: hs.name.clone(), rect: vp.hotspot_rect(hs) })
            .collect()
    } else {
        Vec::new()
    };

    // Debug boxes replace the hover highlight.
    let hover_highlight = if ui.debug || !ui.hotspots_live(cfg.gating) {
        None
    } else {
        ui.hovered
            .as_ref()
            .and_then(|hov| cfg.hotspots.get(hov.index))
            .map(|hs| vp.hotspot_rect(hs))
    };

    let layout = cfg.layout.character(intro.animated);
    let cw = layout.width(w);
    let x = state.intro.character_x(intro.elapsed_ms, cw, layout.target_x(w));
    let character = CharacterPlacement {
        rect: Rect::new(x, layout.y(h), cw, layout.height(h)).offset(intro.jitter.0, intro.jitter.1),
        animated: intro.animated,
        filter: intro.filter,
    };

    let (mut speech_bubble, mut recruiter_panel, mut button) = (None, None, None);
    if ui.show_boxes {
        let bubble = TextPanel { rect: cfg.layout.bubble_rect(w, h), text: ui.current_message.clone() };
        match ui.phase {
            PanelPhase::Welcome | PanelPhase::Exploring => speech_bubble = Some(bubble),
            PanelPhase::Recruiter => {
                if cfg.recruiter_keeps_bubble {
                    speech_bubble = Some(bubble);
                }
                recruiter_panel =
                    Some(TextPanel { rect: cfg.layout.recruiter_rect(w, h), text: cfg.recruiter_message.clone() });
            }
        }
        let active = ui.phase.active_button();
        button = Some(ButtonPlan { button: active, rect: cfg.layout.button_rect(active, w, h) });
    }

    FramePlan {
        surface: (w, h),
        background: vp.background_rect(),
        debug_regions,
        hover_highlight,
        character,
        speech_bubble,
        recruiter_panel,
        button,
        debug_hint: ui.debug.then(|| format!("Press {} to toggle debug", cfg.debug_key.to_uppercase())),
        font_px: (w / 90.0).clamp(12.0, 16.0),
        button_font_px: (w / 100.0).clamp(12.0, 14.0),
    }
}

/// Greedy word wrap. A word joins the current line unless the line would
/// exceed `max_width`; the first word always stays on the first line.
pub fn wrap_lines(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for (n, word) in text.split(' ').enumerate() {
        let candidate = format!("{line}{word} ");
        if measure(&candidate) > max_width && n > 0 {
            lines.push(line.trim_end().to_string());
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    lines.push(line.trim_end().to_string());
    lines
}
