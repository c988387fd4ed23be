//! Hero background: ghosts chasing the tracked point across a pellet field
//!
//! The tracked point is the pointer on hover-capable devices, or a wanderer
//! that drifts between random goals on touch devices. Pellets within
//! `PELLET_EAT_RADIUS` of the tracked point are eaten. Nothing ever ends the
//! animation; a resize rebuilds the whole point set.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{clamp_point, step_toward};
use crate::consts::*;

/// Repeating maze tile: 2 = path (carries a pellet), 1 = wall
const MAZE_TILE: [[u8; 13]; 10] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1],
    [1, 2, 1, 1, 1, 1, 2, 1, 2, 2, 2, 2, 1],
    [1, 2, 2, 2, 2, 2, 2, 1, 2, 1, 1, 2, 1],
    [1, 1, 1, 1, 1, 1, 2, 1, 2, 2, 2, 2, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1],
    [1, 2, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const PATH: u8 = 2;

/// Ghost spawn points as fractions of the grid
const GHOST_SPAWNS: [(f32, f32); 4] = [(0.2, 0.2), (0.8, 0.2), (0.2, 0.8), (0.8, 0.8)];

/// How the tracked point moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetMode {
    /// Follows pointer move events
    Pointer,
    /// Drifts toward a random goal, re-picked periodically
    Wander { goal: Vec2 },
}

impl TargetMode {
    pub fn is_wander(&self) -> bool {
        matches!(self, TargetMode::Wander { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pellet {
    pub cell: IVec2,
}

impl Pellet {
    /// Pixel centre of the pellet's cell
    pub fn center(&self) -> Vec2 {
        cell_center(self.cell)
    }
}

#[derive(Debug, Clone)]
pub struct Ghost {
    pub id: usize,
    pub pos: Vec2,
    /// Own goal in wander mode
    pub goal: Option<Vec2>,
}

/// Complete hero animation state
#[derive(Debug, Clone)]
pub struct PursuitState {
    /// Region size in px
    pub size: Vec2,
    pub pellets: Vec<Pellet>,
    pub ghosts: Vec<Ghost>,
    /// Tracked point (pointer or wanderer)
    pub target: Vec2,
    /// Facing of the tracked point in radians, for drawing
    pub facing: f32,
    pub mode: TargetMode,
    /// Pellets eaten since the last rebuild
    pub eaten: u32,
    ghost_count: usize,
    rng: Pcg32,
}

/// Pixel centre of a grid cell
#[inline]
pub fn cell_center(cell: IVec2) -> Vec2 {
    Vec2::new(
        cell.x as f32 * HERO_CELL_SIZE + HERO_CELL_SIZE / 2.0,
        cell.y as f32 * HERO_CELL_SIZE + HERO_CELL_SIZE / 2.0,
    )
}

fn grid_dims(size: Vec2) -> IVec2 {
    IVec2::new(
        (size.x / HERO_CELL_SIZE).ceil().max(0.0) as i32,
        (size.y / HERO_CELL_SIZE).ceil().max(0.0) as i32,
    )
}

/// First grid row allowed to carry pellets
fn first_pellet_row() -> i32 {
    (NAVBAR_OFFSET_PX / HERO_CELL_SIZE).ceil() as i32
}

/// Pellets for every path cell of the tiled maze below the navbar rows
pub fn generate_pellets(size: Vec2) -> Vec<Pellet> {
    let dims = grid_dims(size);
    let tile_rows = MAZE_TILE.len() as i32;
    let tile_cols = MAZE_TILE[0].len() as i32;

    (first_pellet_row()..dims.y)
        .flat_map(|row| (0..dims.x).map(move |col| IVec2::new(col, row)))
        .filter(|c| MAZE_TILE[(c.y % tile_rows) as usize][(c.x % tile_cols) as usize] == PATH)
        .map(|cell| Pellet { cell })
        .collect()
}

impl PursuitState {
    pub fn new(width: f32, height: f32, wander: bool, ghost_count: usize, seed: u64) -> Self {
        let size = Vec2::new(width, height);
        let mut state = Self {
            size,
            pellets: Vec::new(),
            ghosts: Vec::new(),
            target: size / 2.0,
            facing: 0.0,
            mode: TargetMode::Pointer,
            eaten: 0,
            ghost_count,
            rng: Pcg32::seed_from_u64(seed),
        };
        if wander {
            let goal = state.random_point();
            state.mode = TargetMode::Wander { goal };
        }
        state.rebuild();
        state
    }

    /// Viewport changed: new region, fresh pellets and ghosts, counter reset
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.target = clamp_point(self.target, self.target_min(), self.size);
        self.rebuild();
    }

    /// Switch between pointer and wander tracking (device capability change)
    pub fn set_wander(&mut self, wander: bool) {
        if wander == self.mode.is_wander() {
            return;
        }
        self.mode = if wander {
            TargetMode::Wander {
                goal: self.random_point(),
            }
        } else {
            TargetMode::Pointer
        };
        for ghost in &mut self.ghosts {
            ghost.goal = None;
        }
    }

    fn rebuild(&mut self) {
        self.pellets = generate_pellets(self.size);

        let dims = grid_dims(self.size).as_vec2();
        let min_row = (first_pellet_row() + 2) as f32;
        self.ghosts = (0..self.ghost_count)
            .map(|id| {
                let (fx, fy) = GHOST_SPAWNS[id % GHOST_SPAWNS.len()];
                let mut row = dims.y * fy;
                // Top spawns stay clear of the navbar rows
                if fy < 0.5 {
                    row = row.max(min_row);
                }
                let cell = IVec2::new((dims.x * fx).floor() as i32, row.floor() as i32);
                Ghost {
                    id,
                    pos: cell_center(cell),
                    goal: None,
                }
            })
            .collect();

        self.eaten = 0;
        log::debug!(
            "Hero rebuilt at {}x{}: {} pellets, {} ghosts",
            self.size.x,
            self.size.y,
            self.pellets.len(),
            self.ghosts.len()
        );
    }

    fn target_min(&self) -> Vec2 {
        Vec2::new(0.0, NAVBAR_OFFSET_PX)
    }

    /// Uniform point in the region below the navbar band
    fn random_point(&mut self) -> Vec2 {
        let x = self.rng.random::<f32>() * self.size.x;
        let y = self.rng.random::<f32>() * (self.size.y - NAVBAR_OFFSET_PX).max(0.0)
            + NAVBAR_OFFSET_PX;
        Vec2::new(x, y)
    }

    fn in_ghost_bounds(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.size.x && p.y >= NAVBAR_OFFSET_PX && p.y <= self.size.y
    }

    /// Turn the facing toward a movement delta (ignores sub-pixel jitter)
    fn face(&mut self, delta: Vec2) {
        if delta.x.abs() > 1.0 || delta.y.abs() > 1.0 {
            self.facing = delta.y.atan2(delta.x);
        }
    }

    /// Eat every pellet within range of the tracked point
    fn eat_pellets(&mut self) -> u32 {
        let target = self.target;
        let before = self.pellets.len();
        self.pellets
            .retain(|p| p.center().distance(target) > PELLET_EAT_RADIUS);
        let eaten = (before - self.pellets.len()) as u32;
        self.eaten += eaten;
        eaten
    }

    /// Pointer moved to `pos` (region-relative). Ignored outside the region
    /// or in wander mode. Returns pellets eaten.
    pub fn pointer_moved(&mut self, pos: Vec2) -> u32 {
        if self.mode.is_wander() {
            return 0;
        }
        if pos.x < 0.0 || pos.x > self.size.x || pos.y < 0.0 || pos.y > self.size.y {
            return 0;
        }
        self.face(pos - self.target);
        self.target = pos;
        self.eat_pellets()
    }

    /// Wander mode: pick a new goal for the tracked point
    pub fn retarget_wanderer(&mut self) {
        if self.mode.is_wander() {
            let goal = self.random_point();
            self.mode = TargetMode::Wander { goal };
        }
    }

    /// Wander mode: step the tracked point toward its goal. Returns pellets eaten.
    pub fn wander_step(&mut self) -> u32 {
        let TargetMode::Wander { goal } = self.mode else {
            return 0;
        };
        let delta = goal - self.target;
        if delta.length() <= WANDER_ARRIVED {
            return 0;
        }
        let next = self.target + delta.normalize() * WANDER_STEP;
        self.target = clamp_point(next, self.target_min(), self.size);
        self.facing = delta.y.atan2(delta.x);
        self.eat_pellets()
    }

    /// Move every ghost one frame toward its target
    pub fn frame(&mut self) {
        let half = GHOST_SIZE / 2.0;
        let min = Vec2::new(half, NAVBAR_OFFSET_PX);
        let max = Vec2::new(self.size.x - half, self.size.y - half);
        let wander = self.mode.is_wander();
        let chase = self.target;

        for i in 0..self.ghosts.len() {
            let target = if wander {
                let pos = self.ghosts[i].pos;
                let current = self.ghosts[i].goal;
                let goal = match current {
                    Some(g)
                        if self.in_ghost_bounds(g) && g.distance(pos) >= GHOST_WANDER_REACHED =>
                    {
                        g
                    }
                    _ => self.random_point(),
                };
                self.ghosts[i].goal = Some(goal);
                goal
            } else {
                chase
            };

            let ghost = &mut self.ghosts[i];
            let next = step_toward(ghost.pos, target, GHOST_SPEED);
            ghost.pos = clamp_point(next, min, max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> PursuitState {
        PursuitState::new(1300.0, 800.0, false, GHOST_COUNT, 9)
    }

    #[test]
    fn test_pellets_skip_navbar_rows() {
        let state = desktop();
        assert!(!state.pellets.is_empty());
        let first = first_pellet_row();
        assert_eq!(first, 4);
        for p in &state.pellets {
            assert!(p.cell.y >= first);
            assert!(p.center().y > NAVBAR_OFFSET_PX);
        }
    }

    #[test]
    fn test_pellets_follow_tile() {
        let pellets = generate_pellets(Vec2::new(390.0, 300.0));
        // 13 x 10 grid, rows 4..10 of the tile
        let expected: usize = MAZE_TILE[4..]
            .iter()
            .map(|row| row.iter().filter(|&&c| c == PATH).count())
            .sum();
        assert_eq!(pellets.len(), expected);
        // Tile row 4 col 0 is a wall, col 1 a path
        assert!(!pellets.iter().any(|p| p.cell == IVec2::new(0, 4)));
        assert!(pellets.iter().any(|p| p.cell == IVec2::new(1, 4)));
    }

    #[test]
    fn test_ghost_spawns() {
        let state = desktop();
        assert_eq!(state.ghosts.len(), 4);
        // 1300/30 -> 44 cols, 800/30 -> 27 rows
        assert_eq!(state.ghosts[0].pos, cell_center(IVec2::new(8, 6)));
        assert_eq!(state.ghosts[1].pos, cell_center(IVec2::new(35, 6)));
        assert_eq!(state.ghosts[3].pos, cell_center(IVec2::new(35, 21)));
    }

    #[test]
    fn test_pointer_eats_nearby_pellets() {
        let mut state = desktop();
        let before = state.pellets.len();
        let target = state.pellets[0].center();
        let eaten = state.pointer_moved(target);
        assert!(eaten >= 1);
        assert_eq!(state.eaten, eaten);
        assert_eq!(state.pellets.len(), before - eaten as usize);
        assert!(state
            .pellets
            .iter()
            .all(|p| p.center().distance(target) > PELLET_EAT_RADIUS));

        // Outside the region: ignored
        assert_eq!(state.pointer_moved(Vec2::new(-10.0, 300.0)), 0);
        assert_eq!(state.target, target);
    }

    #[test]
    fn test_ghosts_chase_at_constant_speed() {
        let mut state = desktop();
        state.pointer_moved(Vec2::new(650.0, 400.0));
        let start = state.ghosts[0].pos;
        state.frame();
        let moved = state.ghosts[0].pos.distance(start);
        assert!((moved - GHOST_SPEED).abs() < 1e-3);

        for _ in 0..1000 {
            state.frame();
        }
        for ghost in &state.ghosts {
            assert_eq!(ghost.pos, Vec2::new(650.0, 400.0));
        }
    }

    #[test]
    fn test_ghosts_stay_below_navbar() {
        let mut state = desktop();
        state.pointer_moved(Vec2::new(5.0, 5.0));
        for _ in 0..1000 {
            state.frame();
        }
        for ghost in &state.ghosts {
            assert_eq!(ghost.pos, Vec2::new(GHOST_SIZE / 2.0, NAVBAR_OFFSET_PX));
        }
    }

    #[test]
    fn test_resize_regenerates() {
        let mut state = desktop();
        let target = state.pellets[0].center();
        state.pointer_moved(target);
        assert!(state.eaten > 0);

        state.resize(600.0, 900.0);
        assert_eq!(state.eaten, 0);
        assert_eq!(state.pellets, generate_pellets(Vec2::new(600.0, 900.0)));
        assert_eq!(state.ghosts.len(), GHOST_COUNT);
    }

    #[test]
    fn test_wander_mode() {
        let mut state = PursuitState::new(800.0, 600.0, true, GHOST_COUNT, 11);
        assert!(state.mode.is_wander());
        assert_eq!(state.pointer_moved(Vec2::new(100.0, 200.0)), 0);

        for step in 0..2000 {
            if step % 66 == 0 {
                state.retarget_wanderer();
            }
            state.wander_step();
            state.frame();
            assert!(state.target.y >= NAVBAR_OFFSET_PX);
            assert!(state.target.x >= 0.0 && state.target.x <= 800.0);
            for ghost in &state.ghosts {
                let goal = ghost.goal.unwrap();
                assert!(goal.y >= NAVBAR_OFFSET_PX && goal.y <= 600.0);
                assert!(ghost.pos.y >= NAVBAR_OFFSET_PX);
            }
        }
    }

    #[test]
    fn test_wanderer_stops_at_goal() {
        let mut state = PursuitState::new(800.0, 600.0, true, 0, 11);
        state.mode = TargetMode::Wander {
            goal: state.target + Vec2::new(4.0, 0.0),
        };
        let before = state.target;
        state.wander_step();
        assert_eq!(state.target, before);
    }
}
