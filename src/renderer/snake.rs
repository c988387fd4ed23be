//! Snake board drawing

use super::{Canvas2d, palette};
use crate::sim::{SnakePhase, SnakeState};

pub fn draw(canvas: &Canvas2d, state: &SnakeState) {
    let cols = state.board.width as f64;
    let rows = state.board.height as f64;
    let cell = (canvas.width() / cols).min(canvas.height() / rows);
    // Centre the board in the canvas
    let ox = (canvas.width() - cell * cols) / 2.0;
    let oy = (canvas.height() - cell * rows) / 2.0;

    canvas.clear();

    // Grid lines
    canvas.ctx.set_stroke_style_str(palette::GRID);
    canvas.ctx.set_line_width(1.0);
    canvas.ctx.begin_path();
    for i in 0..=state.board.width {
        let x = ox + i as f64 * cell;
        canvas.ctx.move_to(x, oy);
        canvas.ctx.line_to(x, oy + rows * cell);
    }
    for j in 0..=state.board.height {
        let y = oy + j as f64 * cell;
        canvas.ctx.move_to(ox, y);
        canvas.ctx.line_to(ox + cols * cell, y);
    }
    canvas.ctx.stroke();

    let inset = (cell * 0.1).max(1.0);
    let size = cell - inset * 2.0;

    canvas.glow(palette::MAGENTA, 10.0);
    for f in &state.food {
        canvas.circle(
            ox + (f.x as f64 + 0.5) * cell,
            oy + (f.y as f64 + 0.5) * cell,
            size / 2.0,
            palette::MAGENTA,
        );
    }

    canvas.glow(palette::CYAN, 12.0);
    for (i, c) in state.body.iter().enumerate() {
        let color = if i == 0 { palette::WHITE } else { palette::CYAN };
        canvas.rect(
            ox + c.x as f64 * cell + inset,
            oy + c.y as f64 * cell + inset,
            size,
            size,
            color,
        );
    }
    canvas.glow(palette::CYAN, 0.0);

    if state.phase == SnakePhase::Paused {
        canvas.ctx.set_text_align("center");
        canvas.text(
            "PRESS AN ARROW KEY",
            canvas.width() / 2.0,
            canvas.height() / 2.0 - cell * 2.0,
            "bold 16px monospace",
            palette::WHITE,
        );
        canvas.ctx.set_text_align("start");
    }
}
