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

// Pulse Engine Sandbox
// A box bouncing inside an arena: a menu state, a play state, fixed-step
// movement resolved with polygon contacts, and interpolated rendering.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use pulse_sdk::prelude::*;

/// Frames rendered by a headless run when `--frames` is not given.
const HEADLESS_FRAMES: u64 = 600;
const BOX_SIZE: f32 = 40.0;
const WALL_THICKNESS: f32 = 20.0;
/// Pixels per second.
const SPEED: f32 = 180.0;

#[derive(Debug, Parser)]
#[command(name = "sandbox", about = "Bouncing-box demo for the Pulse game loop")]
struct Args {
    /// Run without opening a window.
    #[arg(long)]
    headless: bool,

    /// Stop after this many rendered frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Override the target updates per second.
    #[arg(long)]
    ups: Option<u32>,

    /// Update once per frame with the measured elapsed time.
    #[arg(long)]
    variable: bool,

    /// Load the engine configuration from a JSON file.
    #[arg(long)]
    config: Option<PathBuf>,
}

struct Sandbox {
    frame_limit: Option<u64>,
    frames: u64,
    seconds: Rc<Cell<u32>>,
}

impl Sandbox {
    fn new(frame_limit: Option<u64>) -> Self {
        Self {
            frame_limit,
            frames: 0,
            seconds: Rc::new(Cell::new(0)),
        }
    }
}

impl Game for Sandbox {
    fn init(&mut self, ctx: &mut EngineContext) -> Result<()> {
        let seconds = Rc::clone(&self.seconds);
        let one_second = convert(1.0, TimeUnit::Seconds, ctx.time_unit());
        let timers = ctx.timers_mut();
        let heartbeat = timers.add(one_second, TimerMode::Repeating, move || {
            seconds.set(seconds.get() + 1);
            log::debug!("Simulated {}s.", seconds.get());
        });
        timers.start(heartbeat);

        ctx.set_state(Menu::default());
        Ok(())
    }

    fn render(
        &mut self,
        ctx: &mut EngineContext,
        _alpha: f64,
        _batcher: &mut Batcher,
    ) -> Result<()> {
        self.frames += 1;
        if self.frames % 60 == 0 {
            let title = format!("Pulse Sandbox | {} UPS | {} FPS", ctx.ups(), ctx.fps());
            ctx.display_mut().set_title(&title);
        }
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            ctx.end();
        }
        Ok(())
    }

    fn dispose(&mut self, ctx: &mut EngineContext) -> Result<()> {
        let stats = ctx.stats();
        log::info!(
            "Sandbox ran {} frames and {} updates over {}s of simulated time.",
            stats.total_frames,
            stats.total_updates,
            self.seconds.get()
        );
        Ok(())
    }
}

/// Waits for Enter or Space, or one second, then starts playing.
#[derive(Default)]
struct Menu {
    waited: f64,
}

impl GameState for Menu {
    fn on_enter(&mut self, _ctx: &mut EngineContext) -> Result<()> {
        log::info!("Menu: press Enter to start.");
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, delta: f64) -> Result<()> {
        self.waited += convert(delta, ctx.time_unit(), TimeUnit::Seconds);
        let start = ctx
            .subsystem::<InputSubsystem>()
            .is_some_and(|input| input.is_key_pressed("Enter") || input.is_key_pressed("Space"));
        if start || self.waited >= 1.0 {
            let arena = (ctx.display().width() as f32, ctx.display().height() as f32);
            ctx.set_state(Play::new(arena.0, arena.1));
        }
        Ok(())
    }
}

struct Play {
    body: Polygon,
    previous: Vec2,
    velocity: Vec2,
    walls: Vec<Polygon>,
    bounce_sound: Option<SoundId>,
    bounces: u32,
}

impl Play {
    fn new(width: f32, height: f32) -> Self {
        let start = Vec2::new((width - BOX_SIZE) / 2.0, (height - BOX_SIZE) / 2.0);
        let t = WALL_THICKNESS;
        let walls = vec![
            Polygon::rectangle(width, t).with_position(Vec2::new(0.0, -t)),
            Polygon::rectangle(width, t).with_position(Vec2::new(0.0, height)),
            Polygon::rectangle(t, height).with_position(Vec2::new(-t, 0.0)),
            Polygon::rectangle(t, height).with_position(Vec2::new(width, 0.0)),
        ];
        Self {
            body: Polygon::rectangle(BOX_SIZE, BOX_SIZE).with_position(start),
            previous: start,
            velocity: Vec2::new(SPEED, SPEED * 0.6),
            walls,
            bounce_sound: None,
            bounces: 0,
        }
    }

    fn contacts(&self, collision: &CollisionSubsystem) -> Vec<Contact> {
        self.walls
            .iter()
            .filter_map(|wall| collision.test_polygons_contact(&self.body, wall))
            .collect()
    }
}

impl GameState for Play {
    fn on_enter(&mut self, ctx: &mut EngineContext) -> Result<()> {
        if let Some(audio) = ctx.subsystem_mut::<AudioSubsystem>() {
            let sound = audio.create_source("bounce");
            audio.set_volume(sound, 0.8)?;
            self.bounce_sound = Some(sound);
        }
        log::info!("Play: press Escape to quit.");
        Ok(())
    }

    fn on_leave(&mut self, ctx: &mut EngineContext) -> Result<()> {
        let audio = ctx.subsystem_mut::<AudioSubsystem>();
        if let (Some(sound), Some(audio)) = (self.bounce_sound.take(), audio) {
            audio.remove_source(sound)?;
        }
        log::info!("Left play after {} bounces.", self.bounces);
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, delta: f64) -> Result<()> {
        if ctx
            .subsystem::<InputSubsystem>()
            .is_some_and(|input| input.is_key_pressed("Escape"))
        {
            ctx.end();
            return Ok(());
        }

        let dt = convert(delta, ctx.time_unit(), TimeUnit::Seconds) as f32;
        self.previous = self.body.position;
        self.body.position = self.body.position + self.velocity * dt;

        let contacts = match ctx.subsystem::<CollisionSubsystem>() {
            Some(collision) => self.contacts(collision),
            None => Vec::new(),
        };
        let mut bounced = false;
        for contact in contacts {
            self.body.position = self.body.position - contact.normal * contact.depth;
            let closing = self.velocity.dot(contact.normal);
            if closing > 0.0 {
                self.velocity = self.velocity - contact.normal * (2.0 * closing);
                bounced = true;
            }
        }

        if bounced {
            self.bounces += 1;
            let audio = ctx.subsystem_mut::<AudioSubsystem>();
            if let (Some(sound), Some(audio)) = (self.bounce_sound, audio) {
                audio.play(sound)?;
            }
        }
        Ok(())
    }

    fn render(
        &mut self,
        _ctx: &mut EngineContext,
        alpha: f64,
        batcher: &mut Batcher,
    ) -> Result<()> {
        let position = self.previous + (self.body.position - self.previous) * alpha as f32;
        let color = Vec4::new(0.9, 0.4, 0.2, 1.0);
        let corner = |x: f32, y: f32| {
            Vertex::new(Vec3::new(position.x + x, position.y + y, 0.0)).with_color(color)
        };

        batcher.begin(Primitive::Triangles)?;
        for vertex in [
            corner(0.0, 0.0),
            corner(BOX_SIZE, 0.0),
            corner(BOX_SIZE, BOX_SIZE),
            corner(0.0, 0.0),
            corner(BOX_SIZE, BOX_SIZE),
            corner(0.0, BOX_SIZE),
        ] {
            batcher.vertex(vertex)?;
        }
        batcher.end()?;
        Ok(())
    }

    fn resize(&mut self, ctx: &mut EngineContext) -> Result<()> {
        let width = ctx.display().width() as f32;
        let height = ctx.display().height() as f32;
        let body = self.body.position;
        *self = Self {
            bounce_sound: self.bounce_sound,
            bounces: self.bounces,
            velocity: self.velocity,
            ..Self::new(width, height)
        };
        self.body.position = Vec2::new(
            body.x.clamp(0.0, (width - BOX_SIZE).max(0.0)),
            body.y.clamp(0.0, (height - BOX_SIZE).max(0.0)),
        );
        self.previous = self.body.position;
        Ok(())
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("winit", log::LevelFilter::Warn)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(ups) = args.ups {
        config.target_ups = ups;
    }
    if args.variable {
        config.loop_mode = LoopMode::Variable;
    }

    let frame_limit = match (args.frames, args.headless) {
        (None, true) => Some(HEADLESS_FRAMES),
        (frames, _) => frames,
    };
    let mut game = Sandbox::new(frame_limit);
    Engine::builder(config)
        .headless(args.headless)
        .run(&mut game)?;
    Ok(())
}
