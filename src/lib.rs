//! MetaVerse Arcade - the interactive layer of the hackathon page
//!
//! Core modules:
//! - `sim`: Self-contained simulations (snake, shooter, hero pursuit)
//! - `input`: Key names to game intents, fire latching, key routing
//! - `page`: Section order and the loading intro
//! - `settings`: Data-driven configuration
//! - `renderer`: Canvas 2D drawing (browser only)
//! - `platform`: Browser timers, frame loops and DOM glue (browser only)

pub mod error;
pub mod input;
pub mod page;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use error::ArcadeError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    // === Snake (About section) ===
    /// Board size in cells
    pub const SNAKE_BOARD_WIDTH: i32 = 20;
    pub const SNAKE_BOARD_HEIGHT: i32 = 20;
    /// Body length on (re)start
    pub const SNAKE_INITIAL_LENGTH: usize = 3;
    /// Fixed tick cadence, independent of rendering
    pub const SNAKE_TICK_MS: u32 = 120;
    /// Config clamps: largest board side and slowest tick
    pub const SNAKE_MAX_BOARD_SIDE: i32 = 200;
    pub const SNAKE_MAX_TICK_MS: u32 = 10_000;
    /// Food cells on the board at once
    pub const SNAKE_FOOD_COUNT: usize = 3;
    /// Score per food eaten
    pub const SNAKE_FOOD_SCORE: u32 = 10;
    /// Random attempts before falling back to `SNAKE_FALLBACK_FOOD_CELL`
    pub const SNAKE_FOOD_ATTEMPTS: u32 = 1000;
    pub const SNAKE_FALLBACK_FOOD_CELL: (i32, i32) = (0, 0);

    // === Shooter (Tracks section) ===
    /// All speeds are px per frame
    pub const SHIP_SPEED: f32 = 7.0;
    pub const SHIP_SIZE: f32 = 25.0;
    pub const BULLET_SPEED: f32 = 12.0;
    /// Bullets at or above this y are discarded
    pub const BULLET_CEILING: f32 = -10.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const ENEMY_KILL_SCORE: u64 = 100;
    /// Reference refresh rate when frame-rate normalization is on
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Upper bound on the normalized frame scale (tab switches etc.)
    pub const MAX_FRAME_SCALE: f32 = 4.0;

    // === Hero pursuit ===
    pub const HERO_CELL_SIZE: f32 = 30.0;
    pub const GHOST_SIZE: f32 = 26.0;
    pub const GHOST_SPEED: f32 = 2.5;
    pub const GHOST_COUNT: usize = 4;
    /// Ghost picks a new wander goal inside this distance
    pub const GHOST_WANDER_REACHED: f32 = 50.0;
    pub const PELLET_SIZE: f32 = 6.0;
    pub const PELLET_EAT_RADIUS: f32 = PELLET_SIZE * 3.0;
    /// Space kept clear for the navbar / scoreboard
    pub const NAVBAR_OFFSET_PX: f32 = 100.0;
    /// Wanderer (touch devices) retarget cadence
    pub const WANDER_RETARGET_MS: u32 = 2000;
    /// Wanderer stepping cadence and step length
    pub const WANDER_STEP_MS: u32 = 30;
    pub const WANDER_STEP: f32 = 3.0;
    /// Wanderer stops once this close to its goal
    pub const WANDER_ARRIVED: f32 = 5.0;

    // === Page ===
    pub const INTRO_VIDEO_SECS: f64 = 13.0;
    pub const INTRO_FLASH_MS: f64 = 1000.0;
    /// Below this viewport width the hero runs in wander mode
    pub const MOBILE_MAX_WIDTH: f64 = 768.0;
}
