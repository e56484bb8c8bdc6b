//! Host-driven frame contract around the fire engine
//!
//! The host measures its surface once, then calls `on_frame` every display
//! refresh. Observers see each new frame synchronously, on the caller's thread.

use super::{FireEngine, GridGeometry, WindDirection};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// Callback invoked after every tick with the grid shape and its intensities
pub type FrameObserver = Box<dyn FnMut(&GridGeometry, &[u8])>;

pub struct FireSession<R: Rng = StdRng> {
    engine: Option<FireEngine<R>>,
    pending_rng: Option<R>,
    max_level: u8,
    wind: WindDirection,
    running: bool,
    observers: Vec<FrameObserver>,
    last_frame: Option<Instant>,
}

impl<R: Rng> FireSession<R> {
    pub fn new(max_level: u8, wind: WindDirection, rng: R) -> Self {
        Self {
            engine: None,
            pending_rng: Some(rng),
            max_level,
            wind,
            running: false,
            observers: Vec::new(),
            last_frame: None,
        }
    }

    /// Record the surface size. Only the first measurement initializes the
    /// engine; returns whether this call did so.
    pub fn measure(&mut self, width: u32, height: u32) -> bool {
        if self.engine.is_some() {
            return false;
        }
        let Some(rng) = self.pending_rng.take() else {
            return false;
        };

        let geometry = GridGeometry::resolve(width, height);
        info!(width, height, wind = self.wind.label(), "measured fire surface");
        self.engine = Some(FireEngine::new(geometry, self.max_level, rng));
        true
    }

    /// Re-initialize for a new surface size (terminal resize)
    pub fn remeasure(&mut self, width: u32, height: u32) {
        match self.engine.as_mut() {
            Some(engine) => {
                debug!(width, height, "re-measuring fire surface");
                engine.reinitialize(GridGeometry::resolve(width, height));
            }
            None => {
                self.measure(width, height);
            }
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_wind(&mut self, wind: WindDirection) {
        if wind != self.wind {
            debug!(wind = wind.label(), "wind changed");
        }
        self.wind = wind;
    }

    pub fn wind(&self) -> WindDirection {
        self.wind
    }

    pub fn subscribe(&mut self, observer: FrameObserver) {
        self.observers.push(observer);
    }

    /// Frame clock signal. Ticks the engine once when started and measured,
    /// then notifies observers. Returns whether a tick happened.
    pub fn on_frame(&mut self, frame_time: Instant) -> bool {
        if !self.running {
            return false;
        }
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };

        self.last_frame = Some(frame_time);
        let wind = self.wind;
        engine.tick(wind);

        let geometry = *engine.geometry();
        let pixels = engine.snapshot();
        for observer in &mut self.observers {
            observer(&geometry, pixels);
        }
        true
    }

    /// Latest frame, empty before the surface has been measured
    pub fn snapshot(&self) -> &[u8] {
        self.engine.as_ref().map(|e| e.snapshot()).unwrap_or(&[])
    }

    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.engine.as_ref().map(|e| e.geometry())
    }

    /// Source-row level, from the engine once measured
    pub fn max_level(&self) -> u8 {
        self.engine.as_ref().map(|e| e.max_level()).unwrap_or(self.max_level)
    }

    pub fn ticks(&self) -> u64 {
        self.engine.as_ref().map(|e| e.ticks()).unwrap_or(0)
    }

    pub fn last_frame(&self) -> Option<Instant> {
        self.last_frame
    }
}
