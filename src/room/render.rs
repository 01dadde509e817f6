//! Canvas drawing of a FramePlan plus styling of the animated character overlay.
//! No decisions here: visibility and geometry all come from scene::plan_frame.

use web_sys::{CanvasRenderingContext2d, HtmlElement, HtmlImageElement};

use super::geometry::Rect;
use super::scene::{CharacterPlacement, FramePlan, TEXT_BASELINE_Y, TEXT_INSET_X, TextPanel, wrap_lines};

const FONT_FAMILY: &str = "'Press Start 2P'";

/// Bitmaps drawn straight onto the canvas.
pub struct Sprites {
    pub background: HtmlImageElement,
    pub character_static: HtmlImageElement,
}

pub fn draw_frame(ctx: &CanvasRenderingContext2d, sprites: &Sprites, plan: &FramePlan) {
    let (w, h) = plan.surface;
    ctx.clear_rect(0.0, 0.0, w, h);

    let bg = plan.background;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(&sprites.background, bg.x, bg.y, bg.width, bg.height)
        .ok();

    if !plan.debug_regions.is_empty() {
        for region in &plan.debug_regions {
            let r = region.rect;
            ctx.set_stroke_style_str("#FF0000");
            ctx.set_line_width(2.0);
            ctx.stroke_rect(r.x, r.y, r.width, r.height);
            // name tag above the box
            ctx.set_fill_style_str("white");
            ctx.fill_rect(r.x, r.y - 20.0, region.name.chars().count() as f64 * 8.0, 20.0);
            ctx.set_fill_style_str("black");
            ctx.set_font(&format!("12px {FONT_FAMILY}"));
            ctx.fill_text(&region.name, r.x + 5.0, r.y - 5.0).ok();
        }
    } else if let Some(r) = plan.hover_highlight {
        ctx.set_stroke_style_str("#FF9900");
        ctx.set_line_width(3.0);
        ctx.stroke_rect(r.x, r.y, r.width, r.height);
    }

    if !plan.character.animated {
        let c = plan.character.rect;
        ctx.draw_image_with_html_image_element_and_dw_and_dh(&sprites.character_static, c.x, c.y, c.width, c.height)
            .ok();
    }

    if let Some(panel) = &plan.speech_bubble {
        draw_text_panel(ctx, panel, plan.font_px, plan.line_height());
    }
    if let Some(panel) = &plan.recruiter_panel {
        draw_text_panel(ctx, panel, plan.font_px, plan.line_height());
    }
    if let Some(button) = &plan.button {
        draw_button(ctx, button.rect, button.button.label(), plan.button_font_px);
    }

    if let Some(hint) = &plan.debug_hint {
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
        ctx.fill_rect(w - 220.0, 10.0, 210.0, 30.0);
        ctx.set_fill_style_str("white");
        ctx.set_font(&format!("14px {FONT_FAMILY}"));
        ctx.fill_text(hint, w - 210.0, 30.0).ok();
    }
}

fn draw_text_panel(ctx: &CanvasRenderingContext2d, panel: &TextPanel, font_px: f64, line_height: f64) {
    let r = panel.rect;
    ctx.set_fill_style_str("white");
    ctx.fill_rect(r.x, r.y, r.width, r.height);
    ctx.set_stroke_style_str("black");
    ctx.set_line_width(3.0);
    ctx.stroke_rect(r.x, r.y, r.width, r.height);

    ctx.set_fill_style_str("black");
    ctx.set_font(&format!("{font_px}px {FONT_FAMILY}"));
    let lines = wrap_lines(&panel.text, panel.text_max_width(), |s| {
        ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0)
    });
    let mut y = r.y + TEXT_BASELINE_Y;
    for line in &lines {
        ctx.fill_text(line, r.x + TEXT_INSET_X, y).ok();
        y += line_height;
    }
}

fn draw_button(ctx: &CanvasRenderingContext2d, r: Rect, label: &str, font_px: f64) {
    ctx.set_fill_style_str("#ff9900");
    ctx.fill_rect(r.x, r.y, r.width, r.height);
    ctx.set_stroke_style_str("#e68a00");
    ctx.set_line_width(3.0);
    ctx.stroke_rect(r.x, r.y, r.width, r.height);

    ctx.set_fill_style_str("white");
    ctx.set_font(&format!("bold {font_px}px {FONT_FAMILY}"));
    let text_w = ctx.measure_text(label).map(|m| m.width()).unwrap_or(0.0);
    ctx.fill_text(label, r.x + (r.width - text_w) / 2.0, r.y + r.height / 2.0 + 6.0).ok();
}

/// Move / show / filter the DOM element carrying the animated sprite.
pub fn style_character_overlay(el: &HtmlElement, placement: &CharacterPlacement) {
    let style = el.style();
    let r = placement.rect;
    style.set_property("width", &format!("{}px", r.width)).ok();
    style.set_property("height", &format!("{}px", r.height)).ok();
    style.set_property("left", &format!("{}px", r.x)).ok();
    style.set_property("top", &format!("{}px", r.y)).ok();
    style.set_property("display", if placement.animated { "block" } else { "none" }).ok();
    let filter = placement.filter.map(|f| f.css()).unwrap_or_default();
    style.set_property("filter", &filter).ok();
}
