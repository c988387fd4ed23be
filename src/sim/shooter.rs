//! Continuous-frame scrolling shooter
//!
//! Advanced once per display frame. Speeds are px/frame; with frame-rate
//! normalization on they are scaled by elapsed time against 60 Hz.
//! A `ShooterState` lives for exactly one session.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;

/// Per-frame input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShooterInput {
    pub left: bool,
    pub right: bool,
    /// One shot (press-down edge, see `input::ShooterControls`)
    pub fire: bool,
    /// Leave the session
    pub exit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    /// An enemy reached the ship
    Lost,
    /// Player left with the exit key
    Exited,
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Lost,
    Exited,
}

/// The player's ship, positioned by its top-left corner
#[derive(Debug, Clone, Copy)]
pub struct Ship {
    pub pos: Vec2,
    pub size: f32,
}

impl Ship {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    /// Where bullets leave the ship
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size / 2.0, self.pos.y)
    }
}

/// A projectile point travelling up
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub pos: Vec2,
}

/// An enemy box travelling down
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: f32,
    /// Cleared on hit; the enemy is dropped on the next filter pass
    pub alive: bool,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: ENEMY_SIZE,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// One shooter session
#[derive(Debug, Clone)]
pub struct ShooterState {
    pub width: f32,
    pub height: f32,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub kills: u32,
    pub phase: SessionPhase,
    pub frames: u64,
    /// Timestamp (ms) of the last enemy spawn
    pub last_spawn_ms: f64,
    /// Scale speeds by elapsed time instead of stepping per frame
    pub normalize_frame_rate: bool,
    last_frame_ms: Option<f64>,
    rng: Pcg32,
}

impl ShooterState {
    /// Start a session on a `width` x `height` playfield at time `now_ms`
    pub fn new(width: f32, height: f32, seed: u64, now_ms: f64) -> Self {
        let ship = Ship {
            pos: Vec2::new(width / 2.0 - SHIP_SIZE / 2.0, height - SHIP_SIZE * 3.0),
            size: SHIP_SIZE,
        };
        Self {
            width,
            height,
            ship,
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            kills: 0,
            phase: SessionPhase::Active,
            frames: 0,
            last_spawn_ms: now_ms,
            normalize_frame_rate: false,
            last_frame_ms: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Playfield changed size: keep the ship on its row above the bottom edge
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.ship.pos.y = height - self.ship.size * 3.0;
        self.ship.pos.x = self.ship.pos.x.clamp(0.0, (width - self.ship.size).max(0.0));
    }

    /// Live (not yet destroyed) enemies
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    /// Speed multiplier for this frame
    fn frame_scale(&mut self, now_ms: f64) -> f32 {
        let last = self.last_frame_ms.replace(now_ms);
        if !self.normalize_frame_rate {
            return 1.0;
        }
        match last {
            Some(last) => (((now_ms - last) / REFERENCE_FRAME_MS) as f32).clamp(0.0, MAX_FRAME_SCALE),
            None => 1.0,
        }
    }

    /// Advance the session by one display frame
    pub fn frame(&mut self, input: &ShooterInput, now_ms: f64) -> FrameOutcome {
        match self.phase {
            SessionPhase::Lost => return FrameOutcome::Lost,
            SessionPhase::Exited => return FrameOutcome::Exited,
            SessionPhase::Active => {}
        }

        if input.exit {
            self.phase = SessionPhase::Exited;
            log::info!("Shooter exited with score {}", self.score);
            return FrameOutcome::Exited;
        }

        self.frames += 1;
        let scale = self.frame_scale(now_ms);

        // Ship: horizontal only, clamped to the playfield
        let ship = &mut self.ship;
        if input.left {
            ship.pos.x -= SHIP_SPEED * scale;
        }
        if input.right {
            ship.pos.x += SHIP_SPEED * scale;
        }
        ship.pos.x = ship.pos.x.clamp(0.0, (self.width - ship.size).max(0.0));

        if now_ms - self.last_spawn_ms > ENEMY_SPAWN_INTERVAL_MS {
            self.spawn_enemy();
            self.last_spawn_ms = now_ms;
        }

        if input.fire {
            self.fire();
        }

        // Enemies fall; destroyed or off-bottom ones go
        let floor = self.height + ENEMY_SIZE;
        for enemy in &mut self.enemies {
            enemy.pos.y += ENEMY_SPEED * scale;
        }
        self.enemies.retain(|e| e.alive && e.pos.y < floor);

        for bullet in &mut self.bullets {
            bullet.pos.y -= BULLET_SPEED * scale;
        }
        self.bullets.retain(|b| b.pos.y > BULLET_CEILING);

        self.resolve_hits();

        let ship_box = self.ship.bounds();
        if self.live_enemies().any(|e| e.bounds().overlaps(&ship_box)) {
            self.phase = SessionPhase::Lost;
            log::info!(
                "Shooter lost after {} frames: score {}, {} kills",
                self.frames,
                self.score,
                self.kills
            );
            return FrameOutcome::Lost;
        }

        FrameOutcome::Continue
    }

    /// Bullet point inside a live enemy: enemy destroyed, bullet spent
    fn resolve_hits(&mut self) {
        let mut spent = vec![false; self.bullets.len()];
        for (i, bullet) in self.bullets.iter().enumerate() {
            if let Some(enemy) = self
                .enemies
                .iter_mut()
                .find(|e| e.alive && e.bounds().contains_point(bullet.pos))
            {
                enemy.alive = false;
                spent[i] = true;
                self.score += ENEMY_KILL_SCORE;
                self.kills += 1;
            }
        }

        let mut idx = 0;
        self.bullets.retain(|_| {
            let keep = !spent[idx];
            idx += 1;
            keep
        });
    }

    /// New enemy at a random x along the top edge, just above view
    pub fn spawn_enemy(&mut self) {
        let span = (self.width - ENEMY_SIZE).max(0.0);
        let x = if span > 0.0 {
            self.rng.random_range(0.0..span)
        } else {
            0.0
        };
        self.enemies.push(Enemy::new(Vec2::new(x, -ENEMY_SIZE)));
    }

    /// New bullet at the ship's nose
    pub fn fire(&mut self) {
        self.bullets.push(Bullet {
            pos: self.ship.nose(),
        });
    }
}
