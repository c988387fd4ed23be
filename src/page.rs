//! Page composition: section order and the loading intro

use crate::consts::{INTRO_FLASH_MS, INTRO_VIDEO_SECS};

/// Page sections in mount order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    About,
    Tracks,
    Challenges,
    Schedule,
    Prizes,
    Venue,
    Contact,
}

impl Section {
    pub const ORDER: [Section; 8] = [
        Section::Hero,
        Section::About,
        Section::Tracks,
        Section::Challenges,
        Section::Schedule,
        Section::Prizes,
        Section::Venue,
        Section::Contact,
    ];

    /// Element id / anchor of the section
    pub fn id(&self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::About => "about",
            Section::Tracks => "tracks",
            Section::Challenges => "challenges",
            Section::Schedule => "schedule",
            Section::Prizes => "prizes",
            Section::Venue => "venue",
            Section::Contact => "contact",
        }
    }

    /// Navbar label, `None` for sections the navbar skips
    pub fn nav_label(&self) -> Option<&'static str> {
        match self {
            Section::Hero => Some("Home"),
            Section::About => Some("About"),
            Section::Tracks => Some("Tracks"),
            Section::Challenges => None,
            Section::Schedule => Some("Schedule"),
            Section::Prizes => Some("Prizes"),
            Section::Venue => Some("Venue"),
            Section::Contact => Some("Contact"),
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Self::ORDER.into_iter().find(|s| s.id() == id)
    }
}

/// Loading intro phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    /// Intro video playing
    VideoIntro,
    /// White flash over the cut to content
    WhiteFlash,
    /// Intro gone; content mounted
    Complete,
}

/// Intro timeline: video for `INTRO_VIDEO_SECS` (or until the video reports
/// that far), then a flash of `INTRO_FLASH_MS`, then the page.
#[derive(Debug, Clone)]
pub struct IntroSequence {
    pub phase: IntroPhase,
    /// Timestamp (ms) the current phase began
    phase_start_ms: f64,
}

impl IntroSequence {
    pub fn new(now_ms: f64) -> Self {
        Self {
            phase: IntroPhase::VideoIntro,
            phase_start_ms: now_ms,
        }
    }

    /// Skip straight to content (reduced motion)
    pub fn skipped(now_ms: f64) -> Self {
        Self {
            phase: IntroPhase::Complete,
            phase_start_ms: now_ms,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == IntroPhase::Complete
    }

    /// Advance on the clock. Returns the new phase if it changed.
    pub fn update(&mut self, now_ms: f64) -> Option<IntroPhase> {
        let elapsed = now_ms - self.phase_start_ms;
        match self.phase {
            IntroPhase::VideoIntro if elapsed >= INTRO_VIDEO_SECS * 1000.0 => {
                Some(self.enter(IntroPhase::WhiteFlash, now_ms))
            }
            IntroPhase::WhiteFlash if elapsed >= INTRO_FLASH_MS => {
                Some(self.enter(IntroPhase::Complete, now_ms))
            }
            _ => None,
        }
    }

    /// The video reported its playback position
    pub fn video_time(&mut self, current_secs: f64, now_ms: f64) -> Option<IntroPhase> {
        if self.phase == IntroPhase::VideoIntro && current_secs >= INTRO_VIDEO_SECS {
            return Some(self.enter(IntroPhase::WhiteFlash, now_ms));
        }
        None
    }

    fn enter(&mut self, phase: IntroPhase, now_ms: f64) -> IntroPhase {
        log::debug!("Intro {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phase_start_ms = now_ms;
        phase
    }
}
