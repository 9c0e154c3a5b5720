//! Sound cues for simulation events
//!
//! The simulation emits [`GameEvent`]s; this module maps them to abstract
//! sound ids and hands them to whatever sink the host provides. The sim
//! itself never touches audio.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundId {
    /// Food collected
    Eat,
    /// Detonation (bomb or bomb apple)
    Bomb,
    /// Bird bites the worm
    Hit,
    /// Bird starts a charge
    Screech,
    /// Bird shot down
    DeadBird,
}

impl SoundId {
    pub fn as_str(self) -> &'static str {
        match self {
            SoundId::Eat => "eat",
            SoundId::Bomb => "bomb",
            SoundId::Hit => "hit",
            SoundId::Screech => "screech",
            SoundId::DeadBird => "dead_bird",
        }
    }
}

/// The sound cue for a simulation event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundId> {
    match event {
        GameEvent::FoodEaten => Some(SoundId::Eat),
        GameEvent::Detonation => Some(SoundId::Bomb),
        GameEvent::BirdScreech => Some(SoundId::Screech),
        GameEvent::BirdBite => Some(SoundId::Hit),
        GameEvent::BirdDowned => Some(SoundId::DeadBird),
        GameEvent::WormDied => Some(SoundId::DeadBird),
        GameEvent::BirdAppeared | GameEvent::Quote(_) => None,
    }
}

/// Playback backend provided by the host
pub trait AudioSink {
    fn play(&mut self, sound: SoundId);
}

/// Sink that discards everything (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: SoundId) {}
}

/// Forward the cues for one tick's events to the sink
pub fn dispatch(events: &[GameEvent], sink: &mut dyn AudioSink) {
    for event in events {
        if let Some(sound) = cue_for(event) {
            sink.play(sound);
        }
    }
}
