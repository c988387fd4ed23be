//! Keyboard intents
//!
//! Browser key names (`KeyboardEvent.key`) map to a small set of game keys.
//! Anything else is ignored.

use crate::sim::{Direction, ShooterInput};

/// A key the games care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Move(Direction),
    Fire,
    Exit,
}

impl GameKey {
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(GameKey::Move(Direction::Up)),
            "ArrowDown" | "s" | "S" => Some(GameKey::Move(Direction::Down)),
            "ArrowLeft" | "a" | "A" => Some(GameKey::Move(Direction::Left)),
            "ArrowRight" | "d" | "D" => Some(GameKey::Move(Direction::Right)),
            " " | "Spacebar" => Some(GameKey::Fire),
            "Escape" | "Esc" => Some(GameKey::Exit),
            _ => None,
        }
    }

    /// Keys that start a shooter session from the idle Tracks view
    pub fn activates_shooter(&self) -> bool {
        matches!(
            self,
            GameKey::Move(Direction::Left) | GameKey::Move(Direction::Right)
        )
    }
}

/// Held-key state for the shooter, turned into per-frame input.
///
/// Fire is latched: one shot per press, no autofire while held (key repeat
/// is swallowed). The shot is kept until the next frame consumes it, so a
/// press and release between two frames still fires.
#[derive(Debug, Clone, Default)]
pub struct ShooterControls {
    left: bool,
    right: bool,
    fire_held: bool,
    fire_queued: bool,
    exit_queued: bool,
}

impl ShooterControls {
    /// Returns true if the key was one the shooter uses
    pub fn key_down(&mut self, key: GameKey) -> bool {
        match key {
            GameKey::Move(Direction::Left) => self.left = true,
            GameKey::Move(Direction::Right) => self.right = true,
            GameKey::Fire => {
                if !self.fire_held {
                    self.fire_held = true;
                    self.fire_queued = true;
                }
            }
            GameKey::Exit => self.exit_queued = true,
            GameKey::Move(_) => return false,
        }
        true
    }

    pub fn key_up(&mut self, key: GameKey) -> bool {
        match key {
            GameKey::Move(Direction::Left) => self.left = false,
            GameKey::Move(Direction::Right) => self.right = false,
            GameKey::Fire => self.fire_held = false,
            _ => return false,
        }
        true
    }

    /// Input for the next frame; clears one-shot flags
    pub fn take_frame_input(&mut self) -> ShooterInput {
        let input = ShooterInput {
            left: self.left,
            right: self.right,
            fire: self.fire_queued,
            exit: self.exit_queued,
        };
        self.fire_queued = false;
        self.exit_queued = false;
        input
    }

    /// Forget everything (session ended)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Which game receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    Snake,
    Shooter,
    None,
}

/// Picks the game whose section is showing the most. Both games listen on
/// the window, so without routing one key press would drive both.
#[derive(Debug, Clone, Copy)]
pub struct KeyRouter {
    /// Minimum visible fraction for a section to receive keys
    pub threshold: f64,
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self { threshold: 0.25 }
    }
}

impl KeyRouter {
    /// `about` and `tracks` are the visible fractions (0..=1) of those sections
    pub fn route(&self, about: f64, tracks: f64) -> KeyTarget {
        let best = about.max(tracks);
        if best < self.threshold {
            KeyTarget::None
        } else if tracks > about {
            KeyTarget::Shooter
        } else {
            KeyTarget::Snake
        }
    }
}

/// Fraction of `[top, bottom)` that lies inside a viewport of height `viewport`
pub fn visible_fraction(top: f64, bottom: f64, viewport: f64) -> f64 {
    let height = bottom - top;
    if height <= 0.0 {
        return 0.0;
    }
    let shown = bottom.min(viewport) - top.max(0.0);
    (shown / height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(
            GameKey::from_key_name("ArrowUp"),
            Some(GameKey::Move(Direction::Up))
        );
        assert_eq!(
            GameKey::from_key_name("d"),
            Some(GameKey::Move(Direction::Right))
        );
        assert_eq!(GameKey::from_key_name(" "), Some(GameKey::Fire));
        assert_eq!(GameKey::from_key_name("Escape"), Some(GameKey::Exit));
        assert_eq!(GameKey::from_key_name("Enter"), None);
        assert_eq!(GameKey::from_key_name("q"), None);
    }

    #[test]
    fn test_activation_keys() {
        assert!(GameKey::Move(Direction::Left).activates_shooter());
        assert!(GameKey::Move(Direction::Right).activates_shooter());
        assert!(!GameKey::Move(Direction::Up).activates_shooter());
        assert!(!GameKey::Fire.activates_shooter());
    }

    #[test]
    fn test_fire_is_one_shot_per_press() {
        let mut controls = ShooterControls::default();
        controls.key_down(GameKey::Fire);
        // Key repeat while held
        controls.key_down(GameKey::Fire);
        assert!(controls.take_frame_input().fire);
        assert!(!controls.take_frame_input().fire);

        controls.key_down(GameKey::Fire);
        assert!(!controls.take_frame_input().fire);

        controls.key_up(GameKey::Fire);
        controls.key_down(GameKey::Fire);
        assert!(controls.take_frame_input().fire);
    }

    #[test]
    fn test_tap_between_frames_still_fires() {
        let mut controls = ShooterControls::default();
        controls.key_down(GameKey::Fire);
        controls.key_up(GameKey::Fire);
        assert!(controls.take_frame_input().fire);
    }

    #[test]
    fn test_held_movement() {
        let mut controls = ShooterControls::default();
        controls.key_down(GameKey::Move(Direction::Left));
        assert!(controls.take_frame_input().left);
        assert!(controls.take_frame_input().left);
        controls.key_up(GameKey::Move(Direction::Left));
        assert!(!controls.take_frame_input().left);
        assert!(!controls.key_down(GameKey::Move(Direction::Up)));
    }

    #[test]
    fn test_exit_is_one_shot() {
        let mut controls = ShooterControls::default();
        controls.key_down(GameKey::Exit);
        assert!(controls.take_frame_input().exit);
        assert!(!controls.take_frame_input().exit);
    }

    #[test]
    fn test_router() {
        let router = KeyRouter::default();
        assert_eq!(router.route(0.9, 0.1), KeyTarget::Snake);
        assert_eq!(router.route(0.2, 0.6), KeyTarget::Shooter);
        assert_eq!(router.route(0.1, 0.1), KeyTarget::None);
    }

    #[test]
    fn test_visible_fraction() {
        assert_eq!(visible_fraction(0.0, 100.0, 800.0), 1.0);
        assert_eq!(visible_fraction(-50.0, 50.0, 800.0), 0.5);
        assert_eq!(visible_fraction(700.0, 900.0, 800.0), 0.5);
        assert_eq!(visible_fraction(900.0, 1000.0, 800.0), 0.0);
        assert_eq!(visible_fraction(10.0, 10.0, 800.0), 0.0);
    }
}
