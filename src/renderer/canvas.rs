//! Canvas 2D scene drawing
//!
//! Draws one `Snapshot` per frame: sky, tower, ledges, climber, obstacles,
//! debris, then the HUD and any phase overlay in screen space. Only reads
//! simulation state.

use std::cell::Cell;
use std::f64::consts::{PI, TAU};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::palette::{self, to_css, to_css_alpha};
use crate::settings::Settings;
use crate::sim::{GamePhase, Obstacle, ObstacleKind, Platform, Player, Snapshot};
use crate::tuning::Tuning;
use crate::ui;

/// Tower wall drawn below ground level so no sky shows under it
const TOWER_FOOTING: f64 = 100.0;
/// Head sprite edge length
const HEAD_SIZE: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadImage {
    Loading,
    Ready,
    Failed,
}

/// Canvas 2D renderer state
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    head: HtmlImageElement,
    head_state: Rc<Cell<HeadImage>>,
}

impl CanvasRenderer {
    /// Grab the 2D context and start loading the head sprite from `head_src`
    pub fn new(canvas: &HtmlCanvasElement, head_src: &str) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let head = HtmlImageElement::new()?;
        let head_state = Rc::new(Cell::new(HeadImage::Loading));

        {
            let state = head_state.clone();
            let onload = Closure::<dyn FnMut()>::new(move || {
                log::info!("Head image loaded");
                state.set(HeadImage::Ready);
            });
            head.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
        }
        {
            let state = head_state.clone();
            let onerror = Closure::<dyn FnMut()>::new(move || {
                log::warn!("Head image failed to load - using drawn face");
                state.set(HeadImage::Failed);
            });
            head.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        }
        head.set_src(head_src);

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            head,
            head_state,
        })
    }

    /// Draw a full frame; `time` is the animation clock in milliseconds
    pub fn render(&self, snap: &Snapshot<'_>, tuning: &Tuning, settings: &Settings, autopilot: bool, time: f64) {
        let ctx = &self.ctx;
        ctx.set_global_alpha(1.0);
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        let (shake_x, shake_y) = if settings.effective_screen_shake() && snap.shake > 0.0 {
            let s = snap.shake as f64;
            ((js_sys::Math::random() - 0.5) * s, (js_sys::Math::random() - 0.5) * s)
        } else {
            (0.0, 0.0)
        };

        ctx.save();
        ctx.translate(shake_x, shake_y).ok();
        self.draw_sky(snap);

        // World space
        ctx.translate(0.0, snap.camera_offset as f64).ok();
        self.draw_tower(tuning);
        for platform in snap.platforms {
            self.draw_platform(platform);
        }
        self.draw_player(snap.player, settings, time);
        for obstacle in snap.obstacles {
            self.draw_obstacle(obstacle);
        }
        if settings.effective_particles() {
            for particle in snap.particles {
                ctx.set_fill_style_str(&to_css(particle.color));
                ctx.begin_path();
                ctx.arc(particle.pos.x as f64, particle.pos.y as f64, 3.0, 0.0, TAU).ok();
                ctx.fill();
            }
        }
        ctx.restore();

        self.draw_hud(snap, settings, autopilot);
        if let Some(overlay) = ui::overlay_for(snap.phase, snap.floor, snap.time_elapsed, snap.score) {
            self.draw_overlay(snap.phase, &overlay);
        }
    }

    /// Gradient that darkens toward night as the climb progresses
    fn draw_sky(&self, snap: &Snapshot<'_>) {
        let progress = if snap.total_floors > 0 {
            snap.floor as f32 / snap.total_floors as f32
        } else {
            0.0
        };
        let horizon = palette::mix(palette::SKY, palette::NIGHT_SKY, progress * 0.5);

        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height);
        gradient.add_color_stop(0.0, &to_css(palette::NIGHT_SKY)).ok();
        gradient.add_color_stop(1.0, &to_css(horizon)).ok();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        // Oversized so shake never exposes the edge
        self.ctx.fill_rect(-50.0, -50.0, self.width + 100.0, self.height + 100.0);
    }

    fn draw_tower(&self, tuning: &Tuning) {
        let ctx = &self.ctx;
        let x = tuning.tower_left() as f64;
        let width = tuning.tower_width as f64;
        let height = tuning.tower_height() as f64;
        let floor_height = tuning.floor_height as f64;

        ctx.set_fill_style_str(&to_css(palette::WHITE));
        ctx.fill_rect(x, -height, width, height + TOWER_FOOTING);
        ctx.set_stroke_style_str(&to_css(palette::TOWER_EDGE));
        ctx.set_line_width(4.0);
        ctx.stroke_rect(x, -height, width, height + TOWER_FOOTING);

        // Three windows per floor
        ctx.set_fill_style_str(&to_css(palette::SKY));
        for i in 0..tuning.total_floors {
            let wy = -(i as f64 * floor_height) - 60.0;
            ctx.fill_rect(x + 50.0, wy, 40.0, 60.0);
            ctx.fill_rect(x + width - 90.0, wy, 40.0, 60.0);
            ctx.fill_rect(x + width / 2.0 - 20.0, wy, 40.0, 60.0);
        }
    }

    fn draw_platform(&self, platform: &Platform) {
        let ctx = &self.ctx;
        let r = &platform.rect;
        let (x, y, w, h) = (r.x as f64, r.y as f64, r.width as f64, r.height as f64);

        if platform.is_ground() {
            ctx.set_fill_style_str(&to_css(palette::GRASS));
            ctx.fill_rect(x, y, w, h * 2.0);
            ctx.set_fill_style_str(&to_css(palette::WHITE));
            ctx.fill_rect(x, y, w, 15.0);
            return;
        }

        ctx.set_fill_style_str(&to_css(palette::GREY));
        ctx.fill_rect(x, y, w, h);
        // Snow and one icicle
        ctx.set_fill_style_str(&to_css(palette::WHITE));
        ctx.fill_rect(x, y, w, 6.0);
        if w > 20.0 {
            ctx.begin_path();
            ctx.move_to(x + 10.0, y + h);
            ctx.line_to(x + 15.0, y + h + 10.0);
            ctx.line_to(x + 20.0, y + h);
            ctx.fill();
        }
    }

    fn draw_player(&self, player: &Player, settings: &Settings, time: f64) {
        let ctx = &self.ctx;
        ctx.save();
        let cx = (player.pos.x + player.width / 2.0).floor() as f64;
        let cy = (player.pos.y + player.height / 2.0).floor() as f64;
        ctx.translate(cx, cy).ok();

        let stunned = player.is_stunned();
        if stunned {
            ctx.rotate((time / 50.0).sin() * 0.5).ok();
        }
        if !player.facing_right {
            ctx.scale(-1.0, 1.0).ok();
        }
        // Blink while invincible
        if player.is_invincible() && (time / 100.0) as i64 % 2 == 0 {
            ctx.set_global_alpha(0.5);
        }

        self.draw_wreath();
        self.draw_body(player, time);

        if settings.head_image && self.head_state.get() == HeadImage::Ready {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &self.head,
                -HEAD_SIZE / 2.0,
                -35.0 - HEAD_SIZE / 2.0,
                HEAD_SIZE,
                HEAD_SIZE,
            )
            .ok();
        } else {
            self.draw_face();
        }

        if stunned {
            ctx.set_fill_style_str(&to_css(palette::STAR));
            for i in 0..3 {
                let angle = time / 200.0 + i as f64 * (TAU / 3.0);
                ctx.begin_path();
                ctx.arc(angle.cos() * 35.0, angle.sin() * 10.0 - 45.0, 4.0, 0.0, TAU).ok();
                ctx.fill();
            }
        }

        ctx.set_global_alpha(1.0);
        ctx.restore();
    }

    fn draw_wreath(&self) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.arc(-8.0, -10.0, 22.0, 0.0, TAU).ok();
        ctx.set_fill_style_str(&to_css(palette::WREATH));
        ctx.fill();
        ctx.set_stroke_style_str(&to_css(palette::WREATH_EDGE));
        ctx.set_line_width(4.0);
        ctx.stroke();

        ctx.set_fill_style_str(&to_css(palette::BERRY));
        for (bx, by) in [(-15.0, -15.0), (-5.0, -25.0), (5.0, -5.0)] {
            ctx.begin_path();
            ctx.arc(bx, by, 3.0, 0.0, TAU).ok();
            ctx.fill();
        }
    }

    /// Suit, tie, legs and arms posed by movement
    fn draw_body(&self, player: &Player, time: f64) {
        let ctx = &self.ctx;

        ctx.set_fill_style_str(&to_css(palette::TECH_BLUE));
        ctx.begin_path();
        ctx.move_to(-14.0, -10.0);
        ctx.line_to(14.0, -10.0);
        ctx.line_to(10.0, 25.0);
        ctx.line_to(-10.0, 25.0);
        ctx.fill();

        ctx.set_fill_style_str(&to_css(palette::TECH_RED));
        ctx.begin_path();
        ctx.move_to(0.0, -10.0);
        ctx.line_to(4.0, 5.0);
        ctx.line_to(0.0, 20.0);
        ctx.line_to(-4.0, 5.0);
        ctx.fill();

        let cycle = (time / 60.0).sin();
        ctx.set_fill_style_str(&to_css(palette::PANTS));
        if player.jumping {
            ctx.fill_rect(-12.0, 20.0, 8.0, 15.0);
            ctx.fill_rect(4.0, 15.0, 8.0, 15.0);
        } else if player.vel.x.abs() > 0.1 {
            ctx.fill_rect(-12.0, 20.0 + cycle * 5.0, 8.0, 15.0);
            ctx.fill_rect(4.0, 20.0 - cycle * 5.0, 8.0, 15.0);
        } else {
            ctx.fill_rect(-12.0, 20.0, 8.0, 15.0);
            ctx.fill_rect(4.0, 20.0, 8.0, 15.0);
        }

        // Arms up mid-jump, swinging otherwise
        let (left_hand, right_hand) = if player.jumping {
            ((-20.0, -25.0), (20.0, -25.0))
        } else {
            let sway = cycle * 10.0;
            ((-20.0, 10.0 + sway), (20.0, 10.0 - sway))
        };
        ctx.set_stroke_style_str(&to_css(palette::TECH_BLUE));
        ctx.set_line_width(6.0);
        ctx.begin_path();
        ctx.move_to(-12.0, -5.0);
        ctx.line_to(left_hand.0, left_hand.1);
        ctx.move_to(12.0, -5.0);
        ctx.line_to(right_hand.0, right_hand.1);
        ctx.stroke();

        ctx.set_fill_style_str(&to_css(palette::SKIN));
        for (hx, hy) in [left_hand, right_hand] {
            ctx.begin_path();
            ctx.arc(hx, hy, 5.0, 0.0, TAU).ok();
            ctx.fill();
        }
    }

    /// Caricature used until (or instead of) the head image
    fn draw_face(&self) {
        let ctx = &self.ctx;

        ctx.set_fill_style_str(&to_css(palette::SKIN));
        ctx.begin_path();
        ctx.arc(0.0, -28.0, 26.0, 0.0, TAU).ok();
        ctx.fill();

        ctx.set_fill_style_str(&to_css(palette::HAIR));
        ctx.begin_path();
        ctx.ellipse(0.0, -49.0, 20.0, 5.0, 0.0, 0.0, TAU).ok();
        ctx.fill();

        ctx.set_stroke_style_str(&to_css(palette::BLACK));
        ctx.set_line_width(2.5);
        ctx.set_fill_style_str(&to_css_alpha(palette::WHITE, 0.3));
        for lens_x in [-8.0, 8.0] {
            ctx.begin_path();
            ctx.arc(lens_x, -28.0, 8.0, 0.0, TAU).ok();
            ctx.stroke();
            ctx.fill();
        }
        ctx.begin_path();
        ctx.move_to(-1.0, -28.0);
        ctx.line_to(1.0, -28.0);
        ctx.stroke();

        ctx.set_stroke_style_str(&to_css(palette::SMILE));
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.arc(0.0, -18.0, 10.0, 0.2, PI - 0.2).ok();
        ctx.stroke();
    }

    fn draw_obstacle(&self, obstacle: &Obstacle) {
        let ctx = &self.ctx;
        let center = obstacle.rect.center();
        ctx.save();
        ctx.translate(center.x as f64, center.y as f64).ok();
        ctx.rotate(obstacle.rotation as f64).ok();

        match obstacle.kind {
            ObstacleKind::Book => {
                ctx.set_fill_style_str(&to_css(palette::LEATHER));
                ctx.fill_rect(-15.0, -20.0, 30.0, 40.0);
                ctx.set_fill_style_str(&to_css(palette::PAGES));
                ctx.fill_rect(-12.0, -18.0, 24.0, 36.0);
                ctx.set_fill_style_str(&to_css(palette::GOLD));
                ctx.fill_rect(-5.0, -10.0, 10.0, 5.0);
            }
            ObstacleKind::Beaker => {
                ctx.set_fill_style_str(&to_css_alpha(palette::WHITE, 0.4));
                ctx.begin_path();
                ctx.move_to(-10.0, -15.0);
                ctx.line_to(10.0, -15.0);
                ctx.line_to(15.0, 15.0);
                ctx.line_to(-15.0, 15.0);
                ctx.fill();
                ctx.set_stroke_style_str(&to_css(palette::WHITE));
                ctx.set_line_width(1.0);
                ctx.stroke();

                ctx.set_fill_style_str(&to_css(palette::LIQUID));
                ctx.begin_path();
                ctx.move_to(-12.0, 0.0);
                ctx.line_to(12.0, 0.0);
                ctx.line_to(14.0, 14.0);
                ctx.line_to(-14.0, 14.0);
                ctx.fill();

                ctx.set_fill_style_str(&to_css(palette::WHITE));
                ctx.begin_path();
                ctx.arc(0.0, -5.0, 2.0, 0.0, TAU).ok();
                ctx.fill();
            }
            ObstacleKind::Ornament => {
                ctx.set_fill_style_str(&to_css(palette::TECH_RED));
                ctx.begin_path();
                ctx.arc(0.0, 2.0, 14.0, 0.0, TAU).ok();
                ctx.fill();
                ctx.set_fill_style_str(&to_css_alpha(palette::WHITE, 0.5));
                ctx.begin_path();
                ctx.arc(-5.0, -3.0, 4.0, 0.0, TAU).ok();
                ctx.fill();
                ctx.set_fill_style_str(&to_css(palette::GOLD));
                ctx.fill_rect(-5.0, -16.0, 10.0, 6.0);
            }
        }
        ctx.restore();
    }

    fn draw_hud(&self, snap: &Snapshot<'_>, settings: &Settings, autopilot: bool) {
        let ctx = &self.ctx;
        ctx.set_font("bold 20px sans-serif");
        ctx.set_text_align("left");

        // Lives, top left
        ctx.set_fill_style_str(&to_css(palette::TECH_RED));
        ctx.fill_text("\u{2665}", 16.0, 32.0).ok();
        ctx.set_fill_style_str(&to_css(palette::WHITE));
        ctx.fill_text(&ui::lives_label(snap.lives), 40.0, 32.0).ok();

        let mut badge_y = 58.0;
        if settings.head_image && self.head_state.get() == HeadImage::Failed {
            ctx.set_font("14px sans-serif");
            ctx.set_fill_style_str(&to_css_alpha(palette::BLACK, 0.5));
            ctx.fill_rect(12.0, badge_y - 16.0, 86.0, 22.0);
            ctx.set_fill_style_str(&to_css(palette::TECH_RED));
            ctx.fill_text("Img Error", 18.0, badge_y).ok();
            badge_y += 26.0;
        }
        if autopilot {
            ctx.set_font("14px sans-serif");
            ctx.set_fill_style_str(&to_css(palette::STAR));
            ctx.fill_text("AUTOPILOT", 16.0, badge_y).ok();
        }

        // Clock and progress, top right
        let right = self.width - 16.0;
        ctx.set_text_align("right");
        ctx.set_font("bold 20px sans-serif");
        ctx.set_fill_style_str(&to_css(palette::WHITE));
        ctx.fill_text(&ui::format_time(snap.time_elapsed), right, 32.0).ok();
        ctx.set_font("14px sans-serif");
        ctx.set_fill_style_str(&to_css(palette::TOWER_EDGE));
        ctx.fill_text(&ui::floor_label(snap.floor, snap.total_floors), right, 54.0).ok();
        if settings.show_score {
            ctx.fill_text(&ui::score_label(snap.score), right, 74.0).ok();
        }
    }

    fn draw_overlay(&self, phase: GamePhase, overlay: &ui::Overlay) {
        let ctx = &self.ctx;
        let backdrop = match phase {
            GamePhase::Victory => to_css_alpha(palette::TECH_BLUE, 0.95),
            GamePhase::GameOver => to_css_alpha(palette::BLACK, 0.8),
            _ => to_css_alpha(palette::BLACK, 0.7),
        };
        ctx.set_fill_style_str(&backdrop);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        let cx = self.width / 2.0;
        let mut y = self.height / 2.0 - 80.0;
        ctx.set_text_align("center");

        ctx.set_font("bold 48px sans-serif");
        let title_color = match phase {
            GamePhase::GameOver => palette::TECH_RED,
            _ => palette::WHITE,
        };
        ctx.set_fill_style_str(&to_css(title_color));
        ctx.fill_text(overlay.title, cx, y).ok();

        y += 44.0;
        ctx.set_font("18px sans-serif");
        ctx.set_fill_style_str(&to_css(palette::WHITE));
        ctx.fill_text(&overlay.subtitle, cx, y).ok();

        if let Some(detail) = &overlay.detail {
            y += 44.0;
            ctx.set_font("bold 28px sans-serif");
            ctx.set_fill_style_str(&to_css(palette::GOLD));
            ctx.fill_text(detail, cx, y).ok();
        }

        y += 60.0;
        ctx.set_font("bold 20px sans-serif");
        ctx.set_fill_style_str(&to_css(palette::WHITE));
        ctx.fill_text(overlay.prompt, cx, y).ok();
    }
}
