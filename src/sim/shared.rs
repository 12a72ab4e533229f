//! Shared engine handle
//!
//! Input events and the frame clock may arrive on different threads. Every
//! mutation goes through one mutex, so a spawn can never land in the middle of
//! a tick. The slot starts empty: spawning or stepping before `init` is a
//! silent no-op, which tolerates a frame callback that fires before the engine
//! has been constructed.

use std::sync::{Arc, Mutex, MutexGuard};

use super::body::{BodyHandle, Color};
use super::collision::CollisionStats;
use super::engine::Engine;
use super::error::SimError;
use super::snapshot::RenderSnapshot;
use crate::settings::Settings;

#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<Option<Engine>>>,
}

impl SharedEngine {
    /// An uninitialized handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct the engine. A second call keeps the existing engine and
    /// returns `Ok(false)`.
    pub fn init(&self, settings: Settings) -> Result<bool, SimError> {
        let mut slot = self.lock();
        if slot.is_some() {
            log::debug!("Engine already initialized; keeping existing state");
            return Ok(false);
        }
        *slot = Some(Engine::new(settings)?);
        Ok(true)
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }

    /// Spawn a body; `Ok(None)` when the engine does not exist yet
    pub fn spawn(
        &self,
        x: f32,
        y: f32,
        radius: f32,
        is_static: bool,
        color: Option<Color>,
    ) -> Result<Option<BodyHandle>, SimError> {
        match self.lock().as_mut() {
            Some(engine) => engine.spawn(x, y, radius, is_static, color).map(Some),
            None => {
                log::trace!("Spawn ignored: engine not initialized");
                Ok(None)
            }
        }
    }

    /// Run one tick; `None` when the engine does not exist yet
    pub fn step(&self, dt: f32) -> Option<CollisionStats> {
        match self.lock().as_mut() {
            Some(engine) => Some(engine.step(dt)),
            None => {
                log::trace!("Step ignored: engine not initialized");
                None
            }
        }
    }

    /// Live body count (0 before init)
    pub fn count(&self) -> usize {
        self.lock().as_ref().map_or(0, Engine::count)
    }

    /// Copy of the body data between ticks
    pub fn snapshot(&self) -> Option<RenderSnapshot> {
        self.lock().as_ref().map(Engine::snapshot)
    }

    /// Run `f` against the engine while holding the lock
    pub fn with<R>(&self, f: impl FnOnce(&Engine) -> R) -> Option<R> {
        self.lock().as_ref().map(f)
    }

    /// Tear the engine down, returning it to the caller
    pub fn shutdown(&self) -> Option<Engine> {
        let engine = self.lock().take();
        if engine.is_some() {
            log::info!("Engine shut down");
        }
        engine
    }

    fn lock(&self) -> MutexGuard<'_, Option<Engine>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::warn!("Engine lock poisoned; continuing with last state");
            poisoned.into_inner()
        })
    }
}
