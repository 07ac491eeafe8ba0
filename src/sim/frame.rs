//! Fixed timestep frame loop
//!
//! One tick: observe stop → step physics → spin rings → detect escapes →
//! remove escaped entities → render → schedule the next tick. Every step
//! finishes before the next starts and a started tick always completes.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::escape;
use super::removal;
use super::scene::Simulation;
use crate::error::SimError;
use crate::physics::PhysicsAdapter;
use crate::renderer::RenderAdapter;

/// Frames averaged for the reported frame rate
const FPS_WINDOW: usize = 10;

/// Loop state; `Stopped` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Schedules ticks at a target rate and measures the achieved rate.
#[derive(Debug)]
pub struct FramePacer {
    frame_time: Duration,
    next_deadline: Instant,
    last_tick: Option<Instant>,
    samples: VecDeque<Duration>,
}

impl FramePacer {
    pub fn new(target_fps: u32, now: Instant) -> Self {
        Self {
            frame_time: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            next_deadline: now,
            last_tick: None,
            samples: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    /// When the next tick is due
    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// Record a finished tick and return the next deadline.
    ///
    /// Deadlines advance by whole frame times; after a stall the schedule
    /// restarts from `now` instead of trying to catch up.
    pub fn tick(&mut self, now: Instant) -> Instant {
        if let Some(last) = self.last_tick {
            if self.samples.len() == FPS_WINDOW {
                self.samples.pop_front();
            }
            self.samples.push_back(now.saturating_duration_since(last));
        }
        self.last_tick = Some(now);

        self.next_deadline += self.frame_time;
        if self.next_deadline <= now {
            self.next_deadline = now + self.frame_time;
        }
        self.next_deadline
    }

    /// Average frame rate over the last few ticks (0 until two ticks ran)
    pub fn fps(&self) -> f32 {
        let total: Duration = self.samples.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.samples.len() as f32 / total.as_secs_f32()
    }
}

/// Drives a `Simulation` one tick at a time.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    pacer: FramePacer,
    ticks: u64,
}

impl FrameLoop {
    pub fn new(target_fps: u32, now: Instant) -> Self {
        Self {
            state: LoopState::Running,
            pacer: FramePacer::new(target_fps, now),
            ticks: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn next_deadline(&self) -> Instant {
        self.pacer.next_deadline()
    }

    pub fn fps(&self) -> f32 {
        self.pacer.fps()
    }

    /// Run one full tick at time `now`.
    ///
    /// `stop_requested` is only looked at here, before anything else; once the
    /// loop is `Stopped` further calls do nothing. Any error leaves the scene
    /// in an unknown state and should end the program.
    pub fn tick<P, R>(
        &mut self,
        sim: &mut Simulation<P>,
        renderer: &mut R,
        stop_requested: bool,
        now: Instant,
    ) -> Result<LoopState, SimError>
    where
        P: PhysicsAdapter,
        R: RenderAdapter + ?Sized,
    {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }
        if stop_requested {
            log::info!("Stop requested after {} ticks", self.ticks);
            self.state = LoopState::Stopped;
            return Ok(LoopState::Stopped);
        }

        let dt = sim.settings().dt;
        let spin = sim.settings().rotation_step();

        sim.physics.step(dt);
        sim.rotate_boundaries(spin)?;

        let escaped = escape::detect(&sim.registry, &sim.physics)?;
        removal::apply(&mut sim.registry, &mut sim.physics, &escaped)?;

        sim.render(renderer)?;
        renderer.set_window_title(&format!("fps: {:.2}", self.fps()));
        renderer.present_frame()?;

        self.pacer.tick(now);
        self.ticks += 1;
        Ok(self.state)
    }
}
