//! Demo drivers: simple AIs that play the games unattended
//!
//! Used by the native headless demo and the tests. They only produce
//! inputs; the simulations stay the single source of rules.

use glam::IVec2;

use super::grid::Direction;
use super::shooter::{ShooterInput, ShooterState};
use super::snake::SnakeState;

/// Greedy snake driver: head for the nearest food, never steer into a wall,
/// the body, or straight back. Falls back to any safe heading, then to
/// carrying on.
pub fn snake_direction(state: &SnakeState) -> Direction {
    let head = state.head();
    let target = state
        .food
        .iter()
        .min_by_key(|f| manhattan(**f, head))
        .copied();

    let safe = |dir: Direction| {
        if dir == state.heading.opposite() {
            return false;
        }
        let next = head + dir.delta();
        if !state.board.contains(next) {
            return false;
        }
        // Tail cell frees up this tick
        let solid = state.body.len() - 1;
        !state.body.iter().take(solid).any(|&c| c == next)
    };

    let mut candidates: Vec<Direction> = Direction::ALL.into_iter().filter(|&d| safe(d)).collect();
    if let Some(food) = target {
        candidates.sort_by_key(|d| manhattan(head + d.delta(), food));
    }

    candidates.first().copied().unwrap_or(state.heading)
}

fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().element_sum()
}

/// Shooter driver: line up under the lowest live enemy and fire whenever a
/// shot would connect. `fired_last` keeps the fire edge honest (one shot per
/// press), the way a human has to release the key between shots.
pub fn shooter_input(state: &ShooterState, fired_last: bool) -> ShooterInput {
    let nose = state.ship.nose();
    let Some(enemy) = state
        .live_enemies()
        .filter(|e| e.pos.y < nose.y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    else {
        return ShooterInput::default();
    };

    let enemy_mid = enemy.pos.x + enemy.size / 2.0;
    let dx = enemy_mid - nose.x;
    let lined_up = (enemy.pos.x..enemy.pos.x + enemy.size).contains(&nose.x);

    ShooterInput {
        left: dx < -enemy.size / 4.0,
        right: dx > enemy.size / 4.0,
        fire: lined_up && !fired_last,
        exit: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shooter::{Enemy, FrameOutcome};
    use crate::sim::snake::TickOutcome;
    use glam::Vec2;

    #[test]
    fn test_snake_heads_for_food() {
        let mut state = SnakeState::with_board(20, 20, 1);
        state.set_food(vec![IVec2::new(10, 4)]);
        assert_eq!(snake_direction(&state), Direction::Up);
        state.set_food(vec![IVec2::new(15, 10)]);
        assert_eq!(snake_direction(&state), Direction::Right);
    }

    #[test]
    fn test_snake_avoids_wall() {
        let mut state = SnakeState::with_board(20, 20, 1);
        state.set_food(vec![IVec2::new(19, 19)]);
        state.steer(Direction::Right);
        for _ in 0..9 {
            state.tick();
        }
        assert_eq!(state.head(), IVec2::new(19, 10));
        assert_ne!(snake_direction(&state), Direction::Right);
    }

    #[test]
    fn test_snake_autopilot_scores() {
        let mut state = SnakeState::with_board(20, 20, 77);
        let mut best = 0;
        for _ in 0..2000 {
            state.steer(snake_direction(&state));
            if let TickOutcome::Ate = state.tick() {
                best = best.max(state.score);
            }
        }
        assert!(best >= 30);
    }

    #[test]
    fn test_shooter_lines_up_and_fires() {
        let mut state = ShooterState::new(400.0, 600.0, 3, 0.0);
        state.enemies.push(Enemy::new(Vec2::new(20.0, 100.0)));
        let input = shooter_input(&state, false);
        assert!(input.left && !input.right && !input.fire);

        state.ship.pos.x = 20.0;
        let input = shooter_input(&state, false);
        assert!(input.fire);
        assert!(!shooter_input(&state, true).fire);
    }

    #[test]
    fn test_shooter_autopilot_kills() {
        let mut state = ShooterState::new(400.0, 600.0, 3, 0.0);
        let mut fired = false;
        let mut t = 0.0;
        for _ in 0..3000 {
            t += 1000.0 / 60.0;
            let input = shooter_input(&state, fired);
            fired = input.fire;
            if state.frame(&input, t) != FrameOutcome::Continue {
                break;
            }
        }
        assert!(state.kills > 0);
    }
}
