// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The audio subsystem: named sound sources and their playback state.
//!
//! Decoding and output devices are out of scope; sources track the state
//! machine a device backend would follow.

use anyhow::anyhow;
use pulse_core::Subsystem;
use std::any::Any;
use std::collections::BTreeMap;

/// Identifies a sound source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SoundId(u32);

/// Playback state of a sound source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundState {
    /// Not playing, position at the start.
    Stopped,
    /// Playing once.
    Playing,
    /// Playing and restarting at the end.
    Looping,
    /// Paused mid-playback.
    Paused,
}

#[derive(Debug)]
struct SoundSource {
    name: String,
    state: SoundState,
    looping: bool,
    volume: f32,
}

/// Owns every sound source and applies the master volume.
#[derive(Debug)]
pub struct AudioSubsystem {
    sources: BTreeMap<SoundId, SoundSource>,
    next_id: u32,
    master_volume: f32,
    initialized: bool,
}

impl AudioSubsystem {
    /// Creates the subsystem with no sources and full master volume.
    pub fn new() -> Self {
        Self {
            sources: BTreeMap::new(),
            next_id: 0,
            master_volume: 1.0,
            initialized: false,
        }
    }

    /// Creates a stopped, non-looping source at full volume.
    pub fn create_source(&mut self, name: impl Into<String>) -> SoundId {
        let id = SoundId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        log::debug!("Created sound source '{name}' ({id:?}).");
        self.sources.insert(
            id,
            SoundSource {
                name,
                state: SoundState::Stopped,
                looping: false,
                volume: 1.0,
            },
        );
        id
    }

    fn source_mut(&mut self, id: SoundId) -> anyhow::Result<&mut SoundSource> {
        self.sources
            .get_mut(&id)
            .ok_or_else(|| anyhow!("unknown sound source {id:?}"))
    }

    /// Starts playback. Does nothing if the source is already playing.
    pub fn play(&mut self, id: SoundId) -> anyhow::Result<()> {
        let source = self.source_mut(id)?;
        if matches!(source.state, SoundState::Playing | SoundState::Looping) {
            return Ok(());
        }
        source.state = if source.looping {
            SoundState::Looping
        } else {
            SoundState::Playing
        };
        Ok(())
    }

    /// Pauses playback. Does nothing unless the source is playing.
    pub fn pause(&mut self, id: SoundId) -> anyhow::Result<()> {
        let source = self.source_mut(id)?;
        if matches!(source.state, SoundState::Playing | SoundState::Looping) {
            source.state = SoundState::Paused;
        }
        Ok(())
    }

    /// Stops playback. Does nothing if already stopped.
    pub fn stop(&mut self, id: SoundId) -> anyhow::Result<()> {
        self.source_mut(id)?.state = SoundState::Stopped;
        Ok(())
    }

    /// Enables or disables looping, applied immediately to a playing source.
    pub fn set_looping(&mut self, id: SoundId, looping: bool) -> anyhow::Result<()> {
        let source = self.source_mut(id)?;
        source.looping = looping;
        source.state = match (source.state, looping) {
            (SoundState::Playing, true) => SoundState::Looping,
            (SoundState::Looping, false) => SoundState::Playing,
            (state, _) => state,
        };
        Ok(())
    }

    /// Sets a source's volume. Negative values are clamped to zero.
    pub fn set_volume(&mut self, id: SoundId, volume: f32) -> anyhow::Result<()> {
        self.source_mut(id)?.volume = volume.max(0.0);
        Ok(())
    }

    /// Removes a source, stopping it first.
    pub fn remove_source(&mut self, id: SoundId) -> anyhow::Result<()> {
        let source = self
            .sources
            .remove(&id)
            .ok_or_else(|| anyhow!("unknown sound source {id:?}"))?;
        log::debug!("Removed sound source '{}'.", source.name);
        Ok(())
    }

    /// Playback state of a source.
    pub fn state(&self, id: SoundId) -> Option<SoundState> {
        self.sources.get(&id).map(|s| s.state)
    }

    /// Returns `true` if the source loops.
    pub fn is_looping(&self, id: SoundId) -> bool {
        self.sources.get(&id).is_some_and(|s| s.looping)
    }

    /// Source volume scaled by the master volume.
    pub fn effective_volume(&self, id: SoundId) -> Option<f32> {
        self.sources.get(&id).map(|s| s.volume * self.master_volume)
    }

    /// Sets the master volume, clamped to `[0, 1]`.
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Returns `true` between init and dispose.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of sources currently audible.
    pub fn playing_count(&self) -> usize {
        self.sources
            .values()
            .filter(|s| matches!(s.state, SoundState::Playing | SoundState::Looping))
            .count()
    }
}

impl Default for AudioSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsystem for AudioSubsystem {
    fn name(&self) -> &str {
        "audio"
    }

    fn init(&mut self) -> anyhow::Result<()> {
        log::info!("Audio ready.");
        self.initialized = true;
        Ok(())
    }

    fn begin_frame(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn end_frame(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        log::info!("Audio disposing {} sound sources.", self.sources.len());
        self.sources.clear();
        self.initialized = false;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_pause_stop_transitions() {
        let mut audio = AudioSubsystem::new();
        let id = audio.create_source("jump");
        assert_eq!(audio.state(id), Some(SoundState::Stopped));

        audio.pause(id).unwrap();
        assert_eq!(audio.state(id), Some(SoundState::Stopped));

        audio.play(id).unwrap();
        assert_eq!(audio.state(id), Some(SoundState::Playing));
        audio.pause(id).unwrap();
        assert_eq!(audio.state(id), Some(SoundState::Paused));
        audio.play(id).unwrap();
        audio.stop(id).unwrap();
        assert_eq!(audio.state(id), Some(SoundState::Stopped));
    }

    #[test]
    fn test_looping_sources() {
        let mut audio = AudioSubsystem::new();
        let id = audio.create_source("music");
        audio.set_looping(id, true).unwrap();
        audio.play(id).unwrap();
        assert_eq!(audio.state(id), Some(SoundState::Looping));

        // Playing again is a no-op.
        audio.play(id).unwrap();
        assert_eq!(audio.state(id), Some(SoundState::Looping));

        audio.set_looping(id, false).unwrap();
        assert_eq!(audio.state(id), Some(SoundState::Playing));
        assert!(!audio.is_looping(id));
    }

    #[test]
    fn test_volume_is_scaled_by_master() {
        let mut audio = AudioSubsystem::new();
        let id = audio.create_source("hit");
        audio.set_volume(id, 0.5).unwrap();
        audio.set_master_volume(2.0);
        assert_eq!(audio.effective_volume(id), Some(0.5));
        audio.set_master_volume(0.5);
        assert_eq!(audio.effective_volume(id), Some(0.25));
    }

    #[test]
    fn test_unknown_source_is_an_error() {
        let mut audio = AudioSubsystem::new();
        let id = audio.create_source("x");
        audio.remove_source(id).unwrap();
        assert!(audio.play(id).is_err());
        assert!(audio.remove_source(id).is_err());
    }

    #[test]
    fn test_dispose_releases_sources() {
        let mut audio = AudioSubsystem::new();
        let id = audio.create_source("ambience");
        audio.init().unwrap();
        audio.play(id).unwrap();
        assert_eq!(audio.playing_count(), 1);
        audio.dispose().unwrap();
        assert_eq!(audio.state(id), None);
    }
}
