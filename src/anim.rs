//! Animation frame clock.
//!
//! One track per sprite category, each with its own frame count and frame
//! duration. The clock is advanced from the frame callback with a monotonic
//! timestamp, so animation speed does not depend on how often the view is
//! redrawn. Nothing outside [`AnimationClock::tick`] and
//! [`AnimationClock::reset`] changes a frame index.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::world::MonsterKind;

/// Animation category: one per animated sprite strip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimKey {
    Vampire,
    Werewolf,
    Merchant,
    Goblin,
    Dragon,
    Troll,
    Phoenix,
    Arrows,
}

impl AnimKey {
    pub const ALL: [AnimKey; 8] = [
        AnimKey::Vampire,
        AnimKey::Werewolf,
        AnimKey::Merchant,
        AnimKey::Goblin,
        AnimKey::Dragon,
        AnimKey::Troll,
        AnimKey::Phoenix,
        AnimKey::Arrows,
    ];

    pub fn for_monster(kind: MonsterKind) -> Self {
        match kind {
            MonsterKind::Vampire => AnimKey::Vampire,
            MonsterKind::Werewolf => AnimKey::Werewolf,
            MonsterKind::Merchant => AnimKey::Merchant,
            MonsterKind::Goblin => AnimKey::Goblin,
            MonsterKind::Dragon => AnimKey::Dragon,
            MonsterKind::Troll => AnimKey::Troll,
            MonsterKind::Phoenix => AnimKey::Phoenix,
        }
    }
}

/// Static description of one track, as it appears in the config file.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackSpec {
    pub key: AnimKey,
    #[serde(default)]
    pub start_frame: u32,
    pub frame_count: u32,
    pub frame_ms: u32,
}

impl TrackSpec {
    pub const fn new(key: AnimKey, start_frame: u32, frame_count: u32, frame_ms: u32) -> Self {
        Self { key, start_frame, frame_count, frame_ms }
    }
}

/// Default tracks: staggered start frames so neighbouring monsters of
/// different kinds don't bob in lockstep.
pub fn default_tracks() -> Vec<TrackSpec> {
    vec![
        TrackSpec::new(AnimKey::Vampire, 0, 4, 400),
        TrackSpec::new(AnimKey::Werewolf, 1, 4, 200),
        TrackSpec::new(AnimKey::Merchant, 2, 4, 400),
        TrackSpec::new(AnimKey::Goblin, 3, 4, 200),
        TrackSpec::new(AnimKey::Dragon, 0, 4, 200),
        TrackSpec::new(AnimKey::Troll, 1, 4, 400),
        TrackSpec::new(AnimKey::Phoenix, 2, 4, 200),
        TrackSpec::new(AnimKey::Arrows, 0, 4, 200),
    ]
}

/// Live state of one track.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimTrack {
    pub frame: u32,
    pub frame_count: u32,
    /// Time accumulated since the last advance, in milliseconds.
    pub elapsed_ms: f64,
    pub frame_ms: f64,
}

impl AnimTrack {
    fn from_spec(spec: &TrackSpec) -> Self {
        let frame_count = spec.frame_count.max(1);
        Self {
            frame: spec.start_frame % frame_count,
            frame_count,
            elapsed_ms: 0.0,
            frame_ms: spec.frame_ms as f64,
        }
    }

    /// Accumulate, then advance by at most one frame.
    fn advance(&mut self, delta_ms: f64) {
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms >= self.frame_ms {
            self.elapsed_ms = 0.0;
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }
}

// ── AnimationClock ───────────────────────────────────────────────────────────

pub struct AnimationClock {
    specs: Vec<TrackSpec>,
    tracks: Vec<(AnimKey, AnimTrack)>,
    last: Option<Duration>,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(&default_tracks())
    }
}

impl AnimationClock {
    /// Later specs for the same key replace earlier ones.
    pub fn new(specs: &[TrackSpec]) -> Self {
        let mut deduped: Vec<TrackSpec> = Vec::with_capacity(specs.len());
        for spec in specs {
            match deduped.iter_mut().find(|s| s.key == spec.key) {
                Some(existing) => *existing = *spec,
                None => deduped.push(*spec),
            }
        }
        let tracks = deduped.iter().map(|s| (s.key, AnimTrack::from_spec(s))).collect();
        Self { specs: deduped, tracks, last: None }
    }

    /// Advance every track by the time since the previous tick.
    ///
    /// `now` is a monotonic timestamp. The first call only records it;
    /// timestamps that do not move forward are ignored. A long pause still
    /// advances each track by a single frame.
    pub fn tick(&mut self, now: Duration) {
        let Some(last) = self.last else {
            self.last = Some(now);
            return;
        };
        if now <= last {
            return;
        }
        let delta_ms = (now - last).as_secs_f64() * 1000.0;
        for (_, track) in &mut self.tracks {
            track.advance(delta_ms);
        }
        self.last = Some(now);
    }

    /// Restore every track to its configured start frame and forget the last
    /// timestamp.
    pub fn reset(&mut self) {
        self.tracks = self.specs.iter().map(|s| (s.key, AnimTrack::from_spec(s))).collect();
        self.last = None;
    }

    /// Current frame for `key`; unknown keys read as frame 0.
    pub fn frame(&self, key: AnimKey) -> u32 {
        self.track(key).map_or(0, |t| t.frame)
    }

    pub fn track(&self, key: AnimKey) -> Option<&AnimTrack> {
        self.tracks.iter().find(|(k, _)| *k == key).map(|(_, t)| t)
    }
}
