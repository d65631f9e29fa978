use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use swarm_core::{AgentParams, Arena, Goal, Obstacle, SteeringConfig, TickSummary, Vector2D, World};
use swarm_shared::{Command, FpsCounter, Position, StatusResponse, SteeringSettings, WorldSnapshot};

use crate::script::Script;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub ticks: u64,
    /// Write a snapshot every N frames
    pub snapshot_every: Option<u64>,
    /// Sleep between frames to hold this rate
    pub target_fps: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: u64,
    pub goals_reached: u32,
    pub robot_count: usize,
    pub snapshots_written: u64,
    pub elapsed: Duration,
    pub last_fps: u32,
}

impl RunSummary {
    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            robot_count: self.robot_count,
            fps: self.last_fps,
            goals_reached: self.goals_reached,
            tick: self.frames,
        }
    }
}

/// Tracks frame timing: per-frame rate plus a once-per-second average for the log.
struct FrameClock {
    started: Instant,
    window_start: Instant,
    window_frames: u32,
    counter: FpsCounter,
}

impl FrameClock {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            window_start: now,
            window_frames: 0,
            counter: FpsCounter::new(),
        }
    }

    /// Returns the average rate once a full second has passed.
    fn frame(&mut self) -> Option<f64> {
        self.counter
            .frame(self.started.elapsed().as_secs_f64() * 1000.0);
        self.window_frames += 1;

        let window = self.window_start.elapsed();
        if window.as_secs() < 1 {
            return None;
        }
        let fps = self.window_frames as f64 / window.as_secs_f64();
        self.window_frames = 0;
        self.window_start = Instant::now();
        Some(fps)
    }
}

/// A world plus everything the driver feeds it: settings, randomness and
/// scripted interactions.
pub struct Simulation {
    world: World,
    settings: SteeringSettings,
    rng: StdRng,
    script: Script,
    frame: u64,
}

impl Simulation {
    pub fn new(robots: usize, seed: u64, settings: SteeringSettings) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let world = World::initialize(Arena::default(), AgentParams::default(), robots, &mut rng)
            .context("Failed to initialize world")?;

        Ok(Self {
            world,
            settings: settings.sanitized(),
            rng,
            script: Script::default(),
            frame: 0,
        })
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = script;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &SteeringSettings {
        &self.settings
    }

    /// Frames stepped since start; unlike the world tick it survives resets.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Picks where an added entity goes: the given point, or anywhere.
    fn placement(&mut self, position: Option<Position>) -> Vector2D {
        match position {
            Some(p) => p.into(),
            None => self.world.arena().random_point(&mut self.rng),
        }
    }

    pub fn apply(&mut self, command: &Command) -> Result<()> {
        match *command {
            Command::AddObstacle {
                position: None,
                radius: None,
            } => {
                self.world.add_random_obstacle(&mut self.rng);
            }
            Command::AddObstacle { position, radius } => {
                let position = self.placement(position);
                let radius = radius.unwrap_or(Obstacle::DEFAULT_RADIUS);
                self.world
                    .add_obstacle(position, radius)
                    .context("Failed to add obstacle")?;
            }
            Command::AddGoal {
                position: None,
                radius: None,
            } => {
                self.world.add_random_goal(&mut self.rng);
            }
            Command::AddGoal { position, radius } => {
                let position = self.placement(position);
                let radius = radius.unwrap_or(Goal::DEFAULT_RADIUS);
                self.world
                    .add_goal(position, radius)
                    .context("Failed to add goal")?;
            }
            Command::Drag { from, to } => {
                if self.world.begin_drag(from.into()).is_some() {
                    self.world.drag_to(to.into());
                    self.world.end_drag();
                } else {
                    log::warn!("Nothing to drag at ({:.1}, {:.1})", from.x, from.y);
                }
            }
            Command::UpdateSettings { settings } => {
                self.settings = settings.sanitized();
                log::info!("Settings updated: {:?}", self.settings);
            }
            Command::Reset { robots } => {
                self.world
                    .reset(robots, &mut self.rng)
                    .context("Failed to reset world")?;
            }
        }
        Ok(())
    }

    /// Applies due scripted commands, then advances the world one tick.
    pub fn step(&mut self) -> Result<TickSummary> {
        for command in self.script.take_due(self.frame) {
            log::debug!("Frame {}: applying {:?}", self.frame, command);
            self.apply(&command)?;
        }

        let config = SteeringConfig::from(self.settings);
        let summary = self.world.update(&config);
        self.frame += 1;
        Ok(summary)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.world)
    }

    /// Runs the frame loop, writing JSON-lines snapshots to `sink`.
    pub fn run<W: Write>(&mut self, options: &RunOptions, sink: &mut W) -> Result<RunSummary> {
        let frame_budget = options
            .target_fps
            .filter(|fps| *fps > 0.0)
            .map(|fps| Duration::from_secs_f64(1.0 / fps));

        let mut clock = FrameClock::new();
        let mut snapshots_written = 0;

        log::info!(
            "Running {} ticks with {} robots",
            options.ticks,
            self.world.agents().len()
        );

        for _ in 0..options.ticks {
            let frame_start = Instant::now();
            let summary = self.step()?;

            if let Some(every) = options.snapshot_every.filter(|n| *n > 0) {
                if self.frame % every == 0 {
                    serde_json::to_writer(&mut *sink, &self.snapshot())
                        .context("Failed to write snapshot")?;
                    writeln!(sink).context("Failed to write snapshot")?;
                    snapshots_written += 1;
                }
            }

            if let Some(fps) = clock.frame() {
                log::info!(
                    "FPS: {:.1}, tick {}, goals reached: {}",
                    fps,
                    summary.tick,
                    summary.goals_reached
                );
            }

            if let Some(budget) = frame_budget {
                if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }

        sink.flush().context("Failed to flush output")?;

        Ok(RunSummary {
            frames: self.frame,
            goals_reached: self.world.goals_reached(),
            robot_count: self.world.agents().len(),
            snapshots_written,
            elapsed: clock.started.elapsed(),
            last_fps: clock.counter.fps(),
        })
    }
}
