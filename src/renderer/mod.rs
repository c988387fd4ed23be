//! Canvas 2D rendering
//!
//! One draw function per toy. Drawing reads simulation state and never
//! mutates it.

pub mod hero;
pub mod shooter;
pub mod snake;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{ArcadeError, Result};

/// Neon palette shared by the toys
pub mod palette {
    pub const BACKGROUND: &str = "#000000";
    pub const CYAN: &str = "#00FFFF";
    pub const MAGENTA: &str = "#FF0066";
    pub const GREEN: &str = "#00FF00";
    pub const PURPLE: &str = "#A855F7";
    pub const WHITE: &str = "#FFFFFF";
    pub const PACMAN: &str = "#FFFF00";
    pub const PELLET: &str = "#FFB8AE";
    pub const GRID: &str = "rgba(34, 211, 238, 0.12)";
    pub const GHOSTS: [&str; 4] = ["#FF0000", "#FFB8FF", "#00FFFF", "#FFB852"];
}

/// A canvas and its 2D context
#[derive(Clone)]
pub struct Canvas2d {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| ArcadeError::Js("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ArcadeError::Js("not a 2d context".into()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    pub fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    pub fn fill(&self, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, self.width(), self.height());
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    pub fn rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    pub fn circle(&self, x: f64, y: f64, r: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
    }

    /// Glow for subsequent fills; `glow(_, 0.0)` turns it off
    pub fn glow(&self, color: &str, blur: f64) {
        self.ctx.set_shadow_color(color);
        self.ctx.set_shadow_blur(blur);
    }

    pub fn text(&self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(font);
        let _ = self.ctx.fill_text(text, x, y);
    }
}
