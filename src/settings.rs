//! Arcade settings
//!
//! Read once at startup and never written back. In the browser the source is
//! an inline JSON script on the page; natively it is a file named by
//! `METAVERSE_ARCADE_CONFIG`. Every field has a default, so a partial (or
//! absent) document is fine.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// How replacement food picks its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FoodPlacement {
    /// Random cells with a retry budget, then a fixed fallback cell
    BoundedRetry { attempts: u32 },
    /// Sample uniformly from the free cells; no fallback needed
    FreeCells,
}

impl Default for FoodPlacement {
    fn default() -> Self {
        FoodPlacement::BoundedRetry {
            attempts: SNAKE_FOOD_ATTEMPTS,
        }
    }
}

/// Snake game (About section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub tick_ms: u32,
    pub board_width: i32,
    pub board_height: i32,
    pub food_count: usize,
    pub food_placement: FoodPlacement,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            tick_ms: SNAKE_TICK_MS,
            board_width: SNAKE_BOARD_WIDTH,
            board_height: SNAKE_BOARD_HEIGHT,
            food_count: SNAKE_FOOD_COUNT,
            food_placement: FoodPlacement::default(),
        }
    }
}

/// Shooter game (Tracks section)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterSettings {
    /// Scale per-frame speeds by elapsed time relative to 60 Hz
    pub normalize_frame_rate: bool,
}

/// Hero background animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSettings {
    pub ghost_count: usize,
    /// Skip the pursuit animation entirely
    pub enabled: bool,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            ghost_count: GHOST_COUNT,
            enabled: true,
        }
    }
}

/// Top-level arcade settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub snake: SnakeSettings,
    pub shooter: ShooterSettings,
    pub hero: HeroSettings,
    /// Minimum log level ("error" .. "trace")
    pub log_level: String,
    /// Skip the intro video and the hero animation
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snake: SnakeSettings::default(),
            shooter: ShooterSettings::default(),
            hero: HeroSettings::default(),
            log_level: "info".to_string(),
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and clamp them into workable ranges
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate();
        Ok(settings)
    }

    /// Log level as a `log` filter, defaulting to Info on unknown names
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Clamp values the simulations cannot work with
    pub fn validate(&mut self) {
        let snake = &mut self.snake;

        // The starting body needs INITIAL_LENGTH cells left of centre plus room to turn
        let min_side = SNAKE_INITIAL_LENGTH as i32 * 2;
        if snake.board_width < min_side || snake.board_height < min_side {
            log::warn!(
                "Snake board {}x{} too small, using {}x{}",
                snake.board_width,
                snake.board_height,
                min_side.max(snake.board_width),
                min_side.max(snake.board_height)
            );
            snake.board_width = snake.board_width.max(min_side);
            snake.board_height = snake.board_height.max(min_side);
        }

        if snake.board_width > SNAKE_MAX_BOARD_SIDE || snake.board_height > SNAKE_MAX_BOARD_SIDE {
            log::warn!(
                "Snake board {}x{} too large, capped at {} per side",
                snake.board_width,
                snake.board_height,
                SNAKE_MAX_BOARD_SIDE
            );
            snake.board_width = snake.board_width.min(SNAKE_MAX_BOARD_SIDE);
            snake.board_height = snake.board_height.min(SNAKE_MAX_BOARD_SIDE);
        }

        if snake.tick_ms < 16 {
            log::warn!("Snake tick {} ms too fast, using 16 ms", snake.tick_ms);
            snake.tick_ms = 16;
        } else if snake.tick_ms > SNAKE_MAX_TICK_MS {
            log::warn!(
                "Snake tick {} ms too slow, using {} ms",
                snake.tick_ms,
                SNAKE_MAX_TICK_MS
            );
            snake.tick_ms = SNAKE_MAX_TICK_MS;
        }

        if snake.food_count == 0 {
            log::warn!("Snake food_count 0, using 1");
            snake.food_count = 1;
        }

        if let FoodPlacement::BoundedRetry { attempts: 0 } = snake.food_placement {
            snake.food_placement = FoodPlacement::default();
        }

        if self.hero.ghost_count > 16 {
            log::warn!("Ghost count {} capped at 16", self.hero.ghost_count);
            self.hero.ghost_count = 16;
        }
    }

    /// Native: load from the file named by `METAVERSE_ARCADE_CONFIG`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        const ENV_KEY: &str = "METAVERSE_ARCADE_CONFIG";

        match std::env::var(ENV_KEY) {
            Ok(path) => {
                let json = std::fs::read_to_string(&path)?;
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path);
                Ok(settings)
            }
            Err(_) => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Browser: load from the inline `<script id="arcade-config">` block
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self> {
        const ELEMENT_ID: &str = "arcade-config";

        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.snake.tick_ms, 120);
        assert_eq!(settings.snake.board_width, 20);
    }

    #[test]
    fn test_partial_document() {
        let json = r#"{ "snake": { "tick_ms": 80 }, "shooter": { "normalize_frame_rate": true } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.snake.tick_ms, 80);
        assert_eq!(settings.snake.board_height, 20);
        assert!(settings.shooter.normalize_frame_rate);
        assert!(settings.hero.enabled);
    }

    #[test]
    fn test_food_placement_tagged() {
        let json = r#"{ "snake": { "food_placement": { "strategy": "free_cells" } } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.snake.food_placement, FoodPlacement::FreeCells);

        let json = r#"{ "snake": { "food_placement": { "strategy": "bounded_retry", "attempts": 50 } } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(
            settings.snake.food_placement,
            FoodPlacement::BoundedRetry { attempts: 50 }
        );
    }

    #[test]
    fn test_validate_clamps() {
        let json = r#"{ "snake": { "board_width": 2, "tick_ms": 1, "food_count": 0 }, "hero": { "ghost_count": 99 } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.snake.board_width, 6);
        assert_eq!(settings.snake.tick_ms, 16);
        assert_eq!(settings.snake.food_count, 1);
        assert_eq!(settings.hero.ghost_count, 16);
    }

    #[test]
    fn test_validate_caps_large_values() {
        let json = r#"{ "snake": { "board_width": 2000000000, "board_height": 70000, "tick_ms": 4000000000 } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.snake.board_width, SNAKE_MAX_BOARD_SIDE);
        assert_eq!(settings.snake.board_height, SNAKE_MAX_BOARD_SIDE);
        assert_eq!(settings.snake.tick_ms, SNAKE_MAX_TICK_MS);

        // The capped board is usable
        let state = crate::sim::SnakeState::new(&settings.snake, 1);
        assert_eq!(
            state.board.cell_count(),
            (SNAKE_MAX_BOARD_SIDE * SNAKE_MAX_BOARD_SIDE) as usize
        );
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, crate::ArcadeError::Config(_)));
    }

    #[test]
    fn test_level_filter() {
        let mut settings = Settings::default();
        assert_eq!(settings.level_filter(), log::LevelFilter::Info);
        settings.log_level = "debug".into();
        assert_eq!(settings.level_filter(), log::LevelFilter::Debug);
        settings.log_level = "chatty".into();
        assert_eq!(settings.level_filter(), log::LevelFilter::Info);
    }
}
