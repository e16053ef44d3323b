//! Canvas2D painter
//!
//! Pixel-art drawing of a `Frame`. Everything world-space is drawn under a
//! camera translation; the HUD and overlays are drawn in screen space.

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Renderer;
use super::scene::{CoinSprite, Frame, HeroSprite, HostileSprite, Overlay, ShotSprite};
use crate::error::GameError;
use crate::sim::state::HostileKind;
use crate::sim::world::{BlockType, Tile};

fn js_err(e: JsValue) -> GameError {
    GameError::Render(format!("{e:?}"))
}

/// Renderer drawing into a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Acquire the 2D context of `canvas`
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, GameError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| GameError::SurfaceMissing(format!("{e:?}")))?
            .ok_or_else(|| GameError::SurfaceMissing("no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::SurfaceMissing("not a 2d context".to_string()))?;
        Ok(Self { ctx })
    }

    fn sky(&self, width: f64, height: f64) -> Result<(), GameError> {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
        gradient.add_color_stop(0.0, "#2c3e50").map_err(js_err)?;
        gradient.add_color_stop(1.0, "#34495e").map_err(js_err)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, width, height);
        Ok(())
    }

    /// Distant mountains, drawn in world space but shifted by the parallax offset
    fn mountains(&self, frame: &Frame) {
        let ctx = &self.ctx;
        let base = (frame.camera.y + frame.viewport.height) as f64;
        let left = frame.camera.x as f64 - frame.parallax_offset as f64;

        ctx.set_fill_style_str("#1a252f");
        for i in 0..10 {
            let x = left + i as f64 * 200.0;
            let height = 150.0 + (i as f64 * 0.7).sin() * 50.0;
            ctx.begin_path();
            ctx.move_to(x, base);
            ctx.line_to(x + 50.0, base - height);
            ctx.line_to(x + 100.0, base - height + 30.0);
            ctx.line_to(x + 150.0, base - height - 20.0);
            ctx.line_to(x + 200.0, base);
            ctx.close_path();
            ctx.fill();
        }
    }

    fn tile(&self, tile: &Tile) {
        let ctx = &self.ctx;
        let (x, y, s) = (tile.x() as f64, tile.y() as f64, tile.dimensions as f64);

        match tile.block {
            BlockType::Surface => {
                ctx.set_fill_style_str("#2ecc71");
                ctx.fill_rect(x, y, s, s);
                ctx.set_fill_style_str("#27ae60");
                ctx.fill_rect(x, y + s - 8.0, s, 8.0);
                ctx.set_fill_style_str("#229954");
                for i in 0..5 {
                    ctx.fill_rect(x + i as f64 * 7.0, y + 2.0, 2.0, 4.0);
                }
            }
            BlockType::Fill => {
                ctx.set_fill_style_str("#8b4513");
                ctx.fill_rect(x, y, s, s);
                ctx.set_fill_style_str("#654321");
                for i in 0..4 {
                    let dx = (i % 2) as f64 * 16.0 + 4.0;
                    let dy = (i / 2) as f64 * 16.0 + 4.0;
                    ctx.fill_rect(x + dx, y + dy, 6.0, 6.0);
                }
            }
            BlockType::Platform => {
                ctx.set_fill_style_str("#d2691e");
                ctx.fill_rect(x, y, s, 8.0);
                ctx.set_fill_style_str("#8b4513");
                ctx.fill_rect(x, y + 4.0, s, 2.0);
                for i in 0..3 {
                    ctx.fill_rect(x + i as f64 * 12.0, y, 2.0, 8.0);
                }
            }
        }

        ctx.set_stroke_style_str("rgba(0, 0, 0, 0.2)");
        ctx.set_line_width(1.0);
        ctx.stroke_rect(x, y, s, s);
    }

    fn disc(&self, x: f64, y: f64, r: f64) -> Result<(), GameError> {
        self.ctx.begin_path();
        self.ctx.arc(x, y, r, 0.0, PI * 2.0).map_err(js_err)?;
        self.ctx.fill();
        Ok(())
    }

    fn coin(&self, coin: &CoinSprite) -> Result<(), GameError> {
        let (x, y) = (coin.center.x as f64, coin.center.y as f64);
        let r = coin.radius as f64;
        let pulse = coin.pulse as f64;

        let glow = self
            .ctx
            .create_radial_gradient(x, y, 0.0, x, y, r * 2.0)
            .map_err(js_err)?;
        glow.add_color_stop(0.0, "rgba(255, 215, 0, 0.8)").map_err(js_err)?;
        glow.add_color_stop(1.0, "rgba(255, 215, 0, 0)").map_err(js_err)?;
        self.ctx.set_fill_style_canvas_gradient(&glow);
        self.disc(x, y, r * 2.0 * pulse)?;

        self.ctx.set_fill_style_str("#ffd700");
        self.disc(x, y, r * pulse)?;
        self.ctx.set_fill_style_str("#ff8c00");
        self.disc(x, y, r * 0.6 * pulse)
    }

    fn shot(&self, shot: &ShotSprite) -> Result<(), GameError> {
        let (fill, rim) = if shot.from_enemy {
            ("#ff6b6b", "#ff3838")
        } else {
            ("#4ecdc4", "#2ebf91")
        };
        self.ctx.set_fill_style_str(fill);
        self.disc(shot.center.x as f64, shot.center.y as f64, shot.radius as f64)?;
        self.ctx.set_stroke_style_str(rim);
        self.ctx.set_line_width(2.0);
        self.ctx.stroke();
        Ok(())
    }

    fn hostile(&self, h: &HostileSprite) {
        let ctx = &self.ctx;
        let (x, y) = (h.pos.x as f64, h.pos.y as f64);
        let (w, hh) = (h.size.x as f64, h.size.y as f64);
        let cycle = h.anim_cycle as f64;

        match h.kind {
            HostileKind::Tank => {
                ctx.set_fill_style_str("#7f8c8d");
                ctx.fill_rect(x + 2.0, y + 2.0, w - 4.0, hh - 4.0);
                ctx.set_fill_style_str("#95a5a6");
                ctx.fill_rect(x + 6.0, y + 6.0, w - 12.0, hh - 12.0);
                ctx.set_fill_style_str("#5d6d7e");
                for i in 0..3 {
                    ctx.fill_rect(x + 8.0 + i as f64 * 8.0, y + 8.0, 6.0, 6.0);
                }
                ctx.set_fill_style_str("#e74c3c");
                ctx.fill_rect(x + 10.0, y + hh / 2.0, 4.0, 4.0);
                ctx.fill_rect(x + w - 14.0, y + hh / 2.0, 4.0, 4.0);
            }
            HostileKind::Flyer => {
                ctx.set_fill_style_str("#9b59b6");
                ctx.fill_rect(x + 6.0, y + 6.0, w - 12.0, hh - 12.0);
                let flap = (cycle * 2.0).sin() * 4.0;
                ctx.set_fill_style_str("#8e44ad");
                ctx.fill_rect(x, y + hh / 2.0 + flap, 6.0, 8.0);
                ctx.fill_rect(x + w - 6.0, y + hh / 2.0 - flap, 6.0, 8.0);
                ctx.set_fill_style_str("#fff");
                ctx.fill_rect(x + 10.0, y + 12.0, 4.0, 4.0);
                ctx.fill_rect(x + w - 14.0, y + 12.0, 4.0, 4.0);
            }
            HostileKind::Ranged => {
                ctx.set_fill_style_str("#e67e22");
                ctx.fill_rect(x + 4.0, y + 4.0, w - 8.0, hh - 8.0);
                ctx.set_fill_style_str("#d35400");
                ctx.fill_rect(x + w - 6.0, y + hh / 2.0 - 2.0, 8.0, 4.0);
                ctx.set_fill_style_str("#000");
                ctx.fill_rect(x + 8.0, y + 10.0, 5.0, 5.0);
                ctx.fill_rect(x + w - 13.0, y + 10.0, 5.0, 5.0);
            }
            HostileKind::Ground | HostileKind::Hopper => {
                ctx.set_fill_style_str("#e74c3c");
                ctx.fill_rect(x + 4.0, y + 4.0, w - 8.0, hh - 8.0);
                let bob = cycle.sin() * 2.0;
                ctx.set_fill_style_str("#fff");
                ctx.fill_rect(x + 8.0, y + 10.0 + bob, 6.0, 6.0);
                ctx.fill_rect(x + w - 14.0, y + 10.0 + bob, 6.0, 6.0);
                ctx.set_fill_style_str("#000");
                ctx.fill_rect(x + 10.0, y + 12.0 + bob, 3.0, 3.0);
                ctx.fill_rect(x + w - 12.0, y + 12.0 + bob, 3.0, 3.0);
                ctx.set_fill_style_str("#c0392b");
                for i in 0..3 {
                    ctx.fill_rect(x + 6.0 + i as f64 * 8.0, y, 4.0, 4.0);
                }
            }
        }

        if let Some(fraction) = h.health_fraction {
            let fraction = fraction as f64;
            ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
            ctx.fill_rect(x, y - 8.0, w, 4.0);
            ctx.set_fill_style_str(if fraction > 0.5 {
                "#2ecc71"
            } else if fraction > 0.25 {
                "#f39c12"
            } else {
                "#e74c3c"
            });
            ctx.fill_rect(x, y - 8.0, w * fraction, 4.0);
        }
    }

    fn hero(&self, hero: &HeroSprite) -> Result<(), GameError> {
        let ctx = &self.ctx;
        let (x, y) = (hero.pos.x as f64, hero.pos.y as f64);
        let (w, h) = (hero.size.x as f64, hero.size.y as f64);

        ctx.set_global_alpha(hero.alpha as f64);

        ctx.set_fill_style_str("#3498db");
        ctx.fill_rect(x + 4.0, y + 8.0, w - 8.0, h - 12.0);
        ctx.set_fill_style_str("#f39c12");
        ctx.fill_rect(x + 6.0, y + 2.0, w - 12.0, 10.0);

        if hero.eyes_open {
            let look = if hero.facing_right { 2.0 } else { -2.0 };
            ctx.set_fill_style_str("#000");
            ctx.fill_rect(x + 10.0 + look, y + 6.0, 2.0, 2.0);
            ctx.fill_rect(x + w - 12.0 + look, y + 6.0, 2.0, 2.0);
        }

        let stride = ((hero.walk_phase as f64).sin() * 3.0).abs();
        ctx.set_fill_style_str("#2c3e50");
        ctx.fill_rect(x + 8.0, y + h - 6.0, 4.0, 6.0 + stride);
        ctx.fill_rect(x + w - 12.0, y + h - 6.0, 4.0, 6.0 - stride);

        if let Some(progress) = hero.swing {
            let blade = 20.0;
            let pivot_x = if hero.facing_right { x + w } else { x };
            ctx.save();
            ctx.translate(pivot_x, y + h / 2.0).map_err(js_err)?;
            if !hero.facing_right {
                ctx.scale(-1.0, 1.0).map_err(js_err)?;
            }
            ctx.rotate(-PI / 4.0 + progress as f64 * PI / 2.0)
                .map_err(js_err)?;

            ctx.set_fill_style_str("#ecf0f1");
            ctx.fill_rect(0.0, -2.0, blade, 4.0);
            ctx.set_fill_style_str("#bdc3c7");
            ctx.begin_path();
            ctx.move_to(blade, 0.0);
            ctx.line_to(blade + 4.0, -2.0);
            ctx.line_to(blade + 4.0, 2.0);
            ctx.close_path();
            ctx.fill();
            ctx.set_fill_style_str("rgba(236, 240, 241, 0.4)");
            self.disc(blade / 2.0, 0.0, 10.0)?;
            ctx.restore();
        }

        ctx.set_global_alpha(1.0);

        if hero.dash_trail {
            let back = if hero.facing_right { 1.0 } else { -1.0 };
            ctx.set_fill_style_str("rgba(52, 152, 219, 0.3)");
            for i in 0..3 {
                ctx.fill_rect(x - back * i as f64 * 8.0, y, w, h);
            }
        }
        Ok(())
    }

    fn hud(&self, frame: &Frame) -> Result<(), GameError> {
        let ctx = &self.ctx;
        let (width, height) = (frame.viewport.width as f64, frame.viewport.height as f64);

        ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
        ctx.fill_rect(10.0, height - 40.0, 150.0, 20.0);
        ctx.set_fill_style_str(if frame.hud.dash_ready { "#3498db" } else { "#95a5a6" });
        ctx.fill_rect(12.0, height - 38.0, frame.hud.dash_fraction as f64 * 146.0, 16.0);
        ctx.set_fill_style_str("#fff");
        ctx.set_font("12px monospace");
        ctx.fill_text("DASH", 170.0, height - 25.0).map_err(js_err)?;

        let Some(overlay) = frame.overlay else {
            return Ok(());
        };
        let (title, hint, color) = match overlay {
            Overlay::Start => ("PIXEL REALM", "Press Enter to Start", "#f1c40f"),
            Overlay::GameOver => ("GAME OVER", "Press R to Restart", "#e74c3c"),
        };

        ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
        ctx.fill_rect(0.0, height / 2.0 - 50.0, width, 100.0);
        ctx.set_text_align("center");
        ctx.set_fill_style_str(color);
        ctx.set_font("bold 36px monospace");
        ctx.fill_text(title, width / 2.0, height / 2.0).map_err(js_err)?;
        ctx.set_font("18px monospace");
        ctx.set_fill_style_str("#fff");
        ctx.fill_text(hint, width / 2.0, height / 2.0 + 30.0)
            .map_err(js_err)?;
        ctx.set_text_align("left");
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &Frame) -> Result<(), GameError> {
        let (width, height) = (frame.viewport.width as f64, frame.viewport.height as f64);
        self.sky(width, height)?;

        self.ctx.save();
        self.ctx
            .translate(-frame.camera.x as f64, -frame.camera.y as f64)
            .map_err(js_err)?;

        self.mountains(frame);
        for tile in &frame.tiles {
            self.tile(tile);
        }
        for coin in &frame.collectibles {
            self.coin(coin)?;
        }
        for shot in &frame.projectiles {
            self.shot(shot)?;
        }
        for hostile in &frame.hostiles {
            self.hostile(hostile);
        }
        self.hero(&frame.hero)?;
        for spark in &frame.particles {
            self.ctx.set_global_alpha(spark.alpha as f64);
            self.ctx.set_fill_style_str("#f1c40f");
            let half = spark.size as f64 / 2.0;
            self.ctx.fill_rect(
                spark.pos.x as f64 - half,
                spark.pos.y as f64 - half,
                spark.size as f64,
                spark.size as f64,
            );
        }
        self.ctx.set_global_alpha(1.0);

        self.ctx.restore();

        self.hud(frame)
    }
}
