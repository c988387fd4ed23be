//! Shooter playfield drawing

use super::{Canvas2d, palette};
use crate::sim::ShooterState;

/// Scrolling starfield: fixed columns drifting down with time
fn stars(canvas: &Canvas2d, time_ms: f64) {
    let w = canvas.width().max(1.0);
    let h = canvas.height().max(1.0);
    canvas.ctx.set_fill_style_str(palette::WHITE);
    for i in 0..50 {
        let i = i as f64;
        let x = (i * 137.5) % w;
        let y = (i * 234.7 + time_ms * 0.05) % h;
        canvas.ctx.fill_rect(x, y, 2.0, 2.0);
    }
}

pub fn draw(canvas: &Canvas2d, state: &ShooterState, time_ms: f64) {
    canvas.fill(palette::BACKGROUND);
    stars(canvas, time_ms);

    // Ship: arrowhead
    let ship = &state.ship;
    let (x, y, s) = (ship.pos.x as f64, ship.pos.y as f64, ship.size as f64);
    let ctx = &canvas.ctx;
    canvas.glow(palette::CYAN, 15.0);
    ctx.set_fill_style_str(palette::CYAN);
    ctx.begin_path();
    ctx.move_to(x + s / 2.0, y);
    ctx.line_to(x, y + s);
    ctx.line_to(x + s / 2.0, y + s * 0.7);
    ctx.line_to(x + s, y + s);
    ctx.close_path();
    ctx.fill();

    // Enemies: invader body with two eyes
    canvas.glow(palette::MAGENTA, 10.0);
    for enemy in state.live_enemies() {
        let (ex, ey, es) = (enemy.pos.x as f64, enemy.pos.y as f64, enemy.size as f64);
        canvas.rect(ex, ey, es, es * 0.7, palette::MAGENTA);
        canvas.rect(ex + 5.0, ey + es * 0.3, 5.0, 5.0, palette::BACKGROUND);
        canvas.rect(ex + es - 10.0, ey + es * 0.3, 5.0, 5.0, palette::BACKGROUND);
    }

    canvas.glow(palette::GREEN, 8.0);
    for bullet in &state.bullets {
        canvas.rect(
            bullet.pos.x as f64 - 2.0,
            bullet.pos.y as f64,
            4.0,
            15.0,
            palette::GREEN,
        );
    }
    canvas.glow(palette::GREEN, 0.0);

    canvas.text(
        &format!("SCORE: {}", state.score),
        20.0,
        40.0,
        "bold 24px monospace",
        palette::WHITE,
    );
    canvas.text(
        &format!("ENEMIES: {}", state.live_enemies().count()),
        20.0,
        70.0,
        "16px monospace",
        palette::WHITE,
    );
}
