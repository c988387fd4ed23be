//! Hero background drawing: pellets, ghosts and the chomping tracked point

use std::f64::consts::PI;

use super::{Canvas2d, palette};
use crate::consts::{GHOST_SIZE, PELLET_SIZE};
use crate::sim::PursuitState;

fn ghost(canvas: &Canvas2d, x: f64, y: f64, color: &str) {
    let r = GHOST_SIZE as f64 / 2.0;
    let ctx = &canvas.ctx;

    // Dome head with a wavy skirt
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(x, y, r, PI, 0.0);
    ctx.line_to(x + r, y + r);
    let scallop = r * 2.0 / 3.0;
    for i in 0..3 {
        let sx = x + r - scallop * (i as f64 + 0.5);
        ctx.line_to(sx, y + r * 0.7);
        ctx.line_to(sx - scallop / 2.0, y + r);
    }
    ctx.line_to(x - r, y);
    ctx.close_path();
    ctx.fill();

    canvas.circle(x - r * 0.35, y - r * 0.1, r * 0.25, palette::WHITE);
    canvas.circle(x + r * 0.35, y - r * 0.1, r * 0.25, palette::WHITE);
}

fn chomper(canvas: &Canvas2d, x: f64, y: f64, facing: f64, time_ms: f64) {
    let r = GHOST_SIZE as f64 / 2.0;
    // Mouth opens and closes ~3 times a second
    let mouth = (time_ms / 160.0).sin().abs() * 0.35 * PI;
    let ctx = &canvas.ctx;
    ctx.set_fill_style_str(palette::PACMAN);
    ctx.begin_path();
    ctx.move_to(x, y);
    let _ = ctx.arc(x, y, r, facing + mouth, facing + 2.0 * PI - mouth);
    ctx.close_path();
    ctx.fill();
}

pub fn draw(canvas: &Canvas2d, state: &PursuitState, time_ms: f64) {
    canvas.clear();

    let pellet_r = PELLET_SIZE as f64 / 2.0;
    canvas.glow(palette::PELLET, 6.0);
    for pellet in &state.pellets {
        let c = pellet.center();
        canvas.circle(c.x as f64, c.y as f64, pellet_r, palette::PELLET);
    }

    canvas.glow(palette::PURPLE, 12.0);
    for g in &state.ghosts {
        let color = palette::GHOSTS[g.id % palette::GHOSTS.len()];
        ghost(canvas, g.pos.x as f64, g.pos.y as f64, color);
    }

    canvas.glow(palette::PACMAN, 12.0);
    chomper(
        canvas,
        state.target.x as f64,
        state.target.y as f64,
        state.facing as f64,
        time_ms,
    );
    canvas.glow(palette::PACMAN, 0.0);
}
