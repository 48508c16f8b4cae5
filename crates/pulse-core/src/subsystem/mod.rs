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

//! The subsystem lifecycle contract and the ordered set that drives it.

use crate::error::{EngineError, EngineResult, FramePhase};
use std::any::Any;

/// An engine service with a managed lifecycle.
///
/// The engine initializes subsystems once, brackets every loop iteration
/// with `begin_frame` / `end_frame`, and disposes them on shutdown.
pub trait Subsystem: Send + Sync {
    /// A short, stable name used in logs and errors.
    fn name(&self) -> &str;

    /// Acquires resources. Called once, before the loop starts.
    fn init(&mut self) -> anyhow::Result<()>;

    /// Called at the top of every loop iteration.
    fn begin_frame(&mut self) -> anyhow::Result<()>;

    /// Called at the end of every loop iteration that reached rendering.
    fn end_frame(&mut self) -> anyhow::Result<()>;

    /// Releases resources. Called at most once.
    fn dispose(&mut self) -> anyhow::Result<()>;

    /// Notifies the subsystem that the viewport changed size.
    fn resize(&mut self, _width: u32, _height: u32) -> anyhow::Result<()> {
        Ok(())
    }

    /// Allows downcasting to concrete subsystem types.
    fn as_any(&self) -> &dyn Any;

    /// Allows mutable downcasting to concrete subsystem types.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Where a subsystem is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsystemState {
    /// Registered, `init` not (successfully) called.
    Uninitialized,
    /// Ready, between frames.
    Initialized,
    /// Between `begin_frame` and `end_frame`.
    FrameActive,
    /// `dispose` has been called.
    Disposed,
}

struct Entry {
    subsystem: Box<dyn Subsystem>,
    state: SubsystemState,
}

/// An ordered, exclusively owned collection of subsystems.
///
/// Initialization and per-frame calls follow registration order; disposal
/// runs in reverse.
#[derive(Default)]
pub struct SubsystemSet {
    entries: Vec<Entry>,
    init_called: bool,
}

impl SubsystemSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subsystem. Must happen before [`init_all`](Self::init_all).
    pub fn register<S: Subsystem + 'static>(&mut self, subsystem: S) -> EngineResult<()> {
        self.register_boxed(Box::new(subsystem))
    }

    /// Appends an already boxed subsystem.
    pub fn register_boxed(&mut self, subsystem: Box<dyn Subsystem>) -> EngineResult<()> {
        if self.init_called {
            return Err(EngineError::Lifecycle(format!(
                "cannot register '{}' after the subsystems were initialized",
                subsystem.name()
            )));
        }
        log::debug!("Registered subsystem '{}'.", subsystem.name());
        self.entries.push(Entry {
            subsystem,
            state: SubsystemState::Uninitialized,
        });
        Ok(())
    }

    /// Initializes every subsystem in registration order.
    ///
    /// Stops at the first failure. Subsystems registered after the failing
    /// one stay uninitialized. May only be called once.
    pub fn init_all(&mut self) -> EngineResult<()> {
        if self.init_called {
            return Err(EngineError::Lifecycle(
                "subsystems were already initialized".to_string(),
            ));
        }
        self.init_called = true;

        for entry in &mut self.entries {
            let name = entry.subsystem.name().to_string();
            entry
                .subsystem
                .init()
                .map_err(|source| EngineError::SubsystemInit {
                    subsystem: name.clone(),
                    source,
                })?;
            entry.state = SubsystemState::Initialized;
            log::info!("Subsystem '{name}' initialized.");
        }
        Ok(())
    }

    /// Calls `begin_frame` on every subsystem, in registration order.
    pub fn begin_frame(&mut self) -> EngineResult<()> {
        self.each_frame(FramePhase::Begin, SubsystemState::FrameActive)
    }

    /// Calls `end_frame` on every subsystem, in registration order.
    pub fn end_frame(&mut self) -> EngineResult<()> {
        self.each_frame(FramePhase::End, SubsystemState::Initialized)
    }

    fn each_frame(&mut self, phase: FramePhase, next: SubsystemState) -> EngineResult<()> {
        for entry in &mut self.entries {
            if matches!(
                entry.state,
                SubsystemState::Uninitialized | SubsystemState::Disposed
            ) {
                return Err(EngineError::Lifecycle(format!(
                    "{phase} called on subsystem '{}' in state {:?}",
                    entry.subsystem.name(),
                    entry.state
                )));
            }
            let result = match phase {
                FramePhase::Begin => entry.subsystem.begin_frame(),
                _ => entry.subsystem.end_frame(),
            };
            result.map_err(|source| EngineError::SubsystemFrame {
                subsystem: entry.subsystem.name().to_string(),
                phase,
                source,
            })?;
            entry.state = next;
        }
        Ok(())
    }

    /// Forwards a viewport change to every live subsystem, in registration order.
    pub fn resize(&mut self, width: u32, height: u32) -> EngineResult<()> {
        log::debug!("Resizing subsystems to {width}x{height}.");
        for entry in &mut self.entries {
            if entry.state == SubsystemState::Disposed {
                continue;
            }
            entry
                .subsystem
                .resize(width, height)
                .map_err(|source| EngineError::SubsystemFrame {
                    subsystem: entry.subsystem.name().to_string(),
                    phase: FramePhase::Resize,
                    source,
                })?;
        }
        Ok(())
    }

    /// Disposes the live subsystems in reverse registration order.
    ///
    /// Before [`init_all`](Self::init_all) every registered subsystem counts
    /// as live. Afterwards only those whose `init` succeeded do; the one that
    /// failed and the ones never reached are marked disposed without a
    /// `dispose` call. Every live subsystem gets its `dispose` call even if
    /// an earlier one fails; the first failure is returned. Calling this
    /// again is a no-op.
    pub fn dispose_all(&mut self) -> EngineResult<()> {
        let init_called = self.init_called;
        let mut first_error = None;
        for entry in self.entries.iter_mut().rev() {
            match entry.state {
                SubsystemState::Disposed => continue,
                SubsystemState::Uninitialized if init_called => {
                    log::debug!(
                        "Subsystem '{}' never initialized; nothing to dispose.",
                        entry.subsystem.name()
                    );
                    entry.state = SubsystemState::Disposed;
                    continue;
                }
                _ => {}
            }
            let name = entry.subsystem.name().to_string();
            let result = entry.subsystem.dispose();
            entry.state = SubsystemState::Disposed;
            match result {
                Ok(()) => log::info!("Subsystem '{name}' disposed."),
                Err(source) => {
                    log::error!("Subsystem '{name}' failed to dispose: {source:#}");
                    if first_error.is_none() {
                        first_error = Some(EngineError::SubsystemDispose {
                            subsystem: name,
                            source,
                        });
                    }
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Returns the first subsystem of type `T`.
    pub fn get<T: Subsystem + 'static>(&self) -> Option<&T> {
        self.entries
            .iter()
            .find_map(|entry| entry.subsystem.as_any().downcast_ref::<T>())
    }

    /// Returns the first subsystem of type `T`, mutably.
    pub fn get_mut<T: Subsystem + 'static>(&mut self) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find_map(|entry| entry.subsystem.as_any_mut().downcast_mut::<T>())
    }

    /// Names of the registered subsystems, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.subsystem.name()).collect()
    }

    /// The lifecycle state of the first subsystem called `name`.
    pub fn state_of(&self, name: &str) -> Option<SubsystemState> {
        self.entries
            .iter()
            .find(|e| e.subsystem.name() == name)
            .map(|e| e.state)
    }

    /// Number of registered subsystems.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no subsystem is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Recording {
        name: &'static str,
        journal: Journal,
        fail_on: Option<&'static str>,
    }

    impl Recording {
        fn new(name: &'static str, journal: &Journal) -> Self {
            Self {
                name,
                journal: journal.clone(),
                fail_on: None,
            }
        }

        fn failing(mut self, call: &'static str) -> Self {
            self.fail_on = Some(call);
            self
        }

        fn record(&self, call: &'static str) -> anyhow::Result<()> {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}.{}", self.name, call));
            if self.fail_on == Some(call) {
                anyhow::bail!("{} refused {}", self.name, call);
            }
            Ok(())
        }
    }

    impl Subsystem for Recording {
        fn name(&self) -> &str {
            self.name
        }
        fn init(&mut self) -> anyhow::Result<()> {
            self.record("init")
        }
        fn begin_frame(&mut self) -> anyhow::Result<()> {
            self.record("begin")
        }
        fn end_frame(&mut self) -> anyhow::Result<()> {
            self.record("end")
        }
        fn dispose(&mut self) -> anyhow::Result<()> {
            self.record("dispose")
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn standard_set(journal: &Journal) -> SubsystemSet {
        let mut set = SubsystemSet::new();
        for name in ["graphics", "audio", "collision", "input"] {
            set.register(Recording::new(name, journal)).unwrap();
        }
        set
    }

    fn take(journal: &Journal) -> Vec<String> {
        std::mem::take(&mut *journal.lock().unwrap())
    }

    #[test]
    fn test_frames_follow_registration_order_and_dispose_reverses_it() {
        let journal = Journal::default();
        let mut set = standard_set(&journal);

        set.init_all().unwrap();
        set.begin_frame().unwrap();
        assert_eq!(set.state_of("audio"), Some(SubsystemState::FrameActive));
        set.end_frame().unwrap();
        set.dispose_all().unwrap();

        assert_eq!(
            take(&journal),
            vec![
                "graphics.init",
                "audio.init",
                "collision.init",
                "input.init",
                "graphics.begin",
                "audio.begin",
                "collision.begin",
                "input.begin",
                "graphics.end",
                "audio.end",
                "collision.end",
                "input.end",
                "input.dispose",
                "collision.dispose",
                "audio.dispose",
                "graphics.dispose",
            ]
        );
    }

    #[test]
    fn test_partial_set_disposes_audio_then_graphics() {
        let journal = Journal::default();
        let mut set = SubsystemSet::new();
        set.register(Recording::new("graphics", &journal)).unwrap();
        set.register(Recording::new("audio", &journal)).unwrap();

        assert!(set.dispose_all().is_ok());
        assert_eq!(take(&journal), vec!["audio.dispose", "graphics.dispose"]);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let journal = Journal::default();
        let mut set = standard_set(&journal);
        set.init_all().unwrap();
        set.dispose_all().unwrap();
        take(&journal);

        set.dispose_all().unwrap();
        assert!(take(&journal).is_empty());
        assert_eq!(set.state_of("graphics"), Some(SubsystemState::Disposed));
    }

    #[test]
    fn test_init_failure_names_the_subsystem_and_stops() {
        let journal = Journal::default();
        let mut set = SubsystemSet::new();
        set.register(Recording::new("graphics", &journal)).unwrap();
        set.register(Recording::new("audio", &journal).failing("init"))
            .unwrap();
        set.register(Recording::new("input", &journal)).unwrap();

        let err = set.init_all().unwrap_err();
        match err {
            EngineError::SubsystemInit { subsystem, .. } => assert_eq!(subsystem, "audio"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(take(&journal), vec!["graphics.init", "audio.init"]);
        assert_eq!(set.state_of("input"), Some(SubsystemState::Uninitialized));
    }

    #[test]
    fn test_dispose_after_init_failure_skips_uninitialized() {
        let journal = Journal::default();
        let mut set = SubsystemSet::new();
        set.register(Recording::new("graphics", &journal)).unwrap();
        set.register(Recording::new("audio", &journal).failing("init"))
            .unwrap();
        set.register(Recording::new("input", &journal)).unwrap();
        assert!(set.init_all().is_err());
        take(&journal);

        set.dispose_all().unwrap();

        assert_eq!(take(&journal), vec!["graphics.dispose"]);
        assert_eq!(set.state_of("audio"), Some(SubsystemState::Disposed));
        assert_eq!(set.state_of("input"), Some(SubsystemState::Disposed));
        set.dispose_all().unwrap();
        assert!(take(&journal).is_empty());
    }

    #[test]
    fn test_init_twice_is_a_lifecycle_error() {
        let journal = Journal::default();
        let mut set = standard_set(&journal);
        set.init_all().unwrap();
        assert!(matches!(set.init_all(), Err(EngineError::Lifecycle(_))));
        assert!(matches!(
            set.register(Recording::new("late", &journal)),
            Err(EngineError::Lifecycle(_))
        ));
    }

    #[test]
    fn test_frame_calls_before_init_are_rejected() {
        let journal = Journal::default();
        let mut set = standard_set(&journal);
        assert!(matches!(set.begin_frame(), Err(EngineError::Lifecycle(_))));
        assert!(take(&journal).is_empty());
    }

    #[test]
    fn test_dispose_error_is_reported_after_all_disposals() {
        let journal = Journal::default();
        let mut set = SubsystemSet::new();
        set.register(Recording::new("graphics", &journal)).unwrap();
        set.register(Recording::new("audio", &journal).failing("dispose"))
            .unwrap();
        set.register(Recording::new("input", &journal)).unwrap();

        let err = set.dispose_all().unwrap_err();
        assert!(matches!(err, EngineError::SubsystemDispose { ref subsystem, .. } if subsystem == "audio"));
        assert_eq!(
            take(&journal),
            vec!["input.dispose", "audio.dispose", "graphics.dispose"]
        );
    }

    #[test]
    fn test_typed_lookup() {
        let journal = Journal::default();
        let mut set = standard_set(&journal);
        assert_eq!(set.names(), vec!["graphics", "audio", "collision", "input"]);
        assert_eq!(set.get::<Recording>().map(|s| s.name), Some("graphics"));
        assert!(set.get_mut::<Recording>().is_some());
        assert_eq!(set.len(), 4);
    }
}
