//! Headless demo: a sprite walking around a walled arena

use anyhow::{Context, Result};
use ember_animation::{sheet, Animation, Playback};
use ember_core::{overlap, Color, Picture, Rect, SubPicture, Vec2, VideoOutput};
use ember_render::{Camera, Canvas};
use ember_runtime::{
    FrameContext, HeadlessPlatform, KeyCode, LoopConfig, MouseButton, PolledState, RawEvent,
};
use std::sync::Arc;

pub struct DemoArgs {
    pub output: String,
    pub frames: u64,
    pub config: Option<String>,
    pub zoom: f64,
}

const ARENA: Rect = Rect::new(0.0, 0.0, 160.0, 120.0);
const WALL: f64 = 8.0;
const SPRITE: u32 = 8;
/// Game units per second
const SPEED: f64 = 90.0;

pub fn run(args: DemoArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => LoopConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path))?,
        None => demo_config(),
    };

    let canvas = render(&config, args.frames, args.zoom)?;
    canvas
        .save_png(&args.output)
        .context("Failed to save demo frame")?;

    println!(
        "Rendered {} frames at {}x{} -> {}",
        args.frames, config.width, config.height, args.output
    );
    Ok(())
}

fn demo_config() -> LoopConfig {
    LoopConfig {
        title: "Ember demo".to_string(),
        width: 320,
        height: 240,
        fps: 0,
        ..Default::default()
    }
}

/// Run the demo for `frames` frames and return the canvas holding the last one
pub fn render(config: &LoopConfig, frames: u64, zoom: f64) -> Result<Canvas> {
    anyhow::ensure!(frames > 0, "the demo needs at least one frame");

    let mut platform = HeadlessPlatform::new(Canvas::new(config.width, config.height));
    script_input(&mut platform, frames);

    let mut scene = Scene::new(config, zoom)?;
    ember_runtime::run(config, |_| Ok(&mut platform), |ctx| {
        scene.update(ctx);
        scene.draw(&mut *ctx.output);
        if ctx.frame() + 1 >= frames {
            ctx.quit();
        }
    })
    .context("Demo loop failed")?;

    log::debug!("demo presented {} frames", platform.presents());
    Ok(platform.into_output())
}

/// Walk right for the first half, then down, clicking once in between
fn script_input(platform: &mut HeadlessPlatform<Canvas>, frames: u64) {
    let turn = frames / 2;
    let base = *platform.state();

    for frame in 0..frames {
        let mut events = Vec::new();
        if frame == 0 {
            events.push(RawEvent::KeyDown(KeyCode::ArrowRight));
        }
        if frame == turn {
            events.push(RawEvent::KeyUp(KeyCode::ArrowRight));
            events.push(RawEvent::KeyDown(KeyCode::ArrowDown));
            events.push(RawEvent::MouseButtonDown(MouseButton::Left));
        }
        if frame == turn + 1 {
            events.push(RawEvent::MouseButtonUp(MouseButton::Left));
        }

        let state = PolledState {
            mouse_position: Vec2::new(frame as f64, frame as f64 / 2.0),
            ..base
        };
        platform.push_batch_with_state(events, state);
    }
}

struct Scene {
    camera: Camera,
    player: Rect,
    walls: Vec<Rect>,
    walk: Animation<SubPicture>,
    playback: Playback,
    /// Fixed simulation step, so the result does not depend on wall-clock speed
    step: f64,
    tint: Color,
}

impl Scene {
    fn new(config: &LoopConfig, zoom: f64) -> Result<Self> {
        let zoom = Vec2::new(zoom, zoom);
        let display = Vec2::new(config.width as f64, config.height as f64);
        let half_view = Vec2::new(display.x / 2.0 / zoom.x, display.y / 2.0 / zoom.y);
        let camera = Camera::new(ARENA.center() - half_view, zoom)?;

        let step = if config.fps > 0 {
            1.0 / config.fps as f64
        } else {
            1.0 / 60.0
        };

        Ok(Self {
            camera,
            player: Rect::new(WALL + 4.0, WALL + 4.0, 16.0, 16.0),
            walls: walls(),
            walk: Animation::cyclic(walk_frames()?, 0.5)?,
            playback: Playback::new(),
            step,
            tint: Color::WHITE,
        })
    }

    fn update(&mut self, ctx: &FrameContext<'_, Canvas>) {
        let mut dir = Vec2::ZERO;
        if ctx.action_down("left") {
            dir.x -= 1.0;
        }
        if ctx.action_down("right") {
            dir.x += 1.0;
        }
        if ctx.action_down("up") {
            dir.y -= 1.0;
        }
        if ctx.action_down("down") {
            dir.y += 1.0;
        }

        self.player = self.player.moved_by(dir * SPEED * self.step);
        for wall in &self.walls {
            let push = overlap(&self.player, wall);
            if push == Vec2::ZERO {
                continue;
            }
            let push = if push.x.abs() < push.y.abs() {
                Vec2::new(push.x, 0.0)
            } else {
                Vec2::new(0.0, push.y)
            };
            self.player = self.player.moved_by(push);
        }

        if dir != Vec2::ZERO {
            self.playback.advance(self.step);
        }
        if ctx.action_just_down("click") {
            log::info!("click at {:?} on frame {}", ctx.input.mouse_position(), ctx.frame());
            self.tint = Color::named("orange").unwrap_or(Color::RED);
        }
    }

    fn draw(&self, sink: &mut Canvas) {
        let mut out = self.camera.output(sink);
        out.clear(Color::from_hex(0x1e1e2e));

        for wall in &self.walls {
            out.draw_rect(*wall, 0.0, Color::named("gray").unwrap_or(Color::WHITE));
        }

        let frame = self.playback.frame(&self.walk);
        out.sink_mut().set_mask(self.tint);
        out.draw_picture(self.player, frame);
        out.sink_mut().set_mask(Color::WHITE);
        out.draw_rect(self.player, 1.0, Color::WHITE);
    }
}

fn walls() -> Vec<Rect> {
    vec![
        Rect::new(ARENA.x, ARENA.y, ARENA.w, WALL),
        Rect::new(ARENA.x, ARENA.y + ARENA.h - WALL, ARENA.w, WALL),
        Rect::new(ARENA.x, ARENA.y, WALL, ARENA.h),
        Rect::new(ARENA.x + ARENA.w - WALL, ARENA.y, WALL, ARENA.h),
    ]
}

/// Four walk frames drawn into one sheet, then sliced back out
fn walk_frames() -> Result<Vec<SubPicture>> {
    let palette = ["red", "orange", "yellow", "green"];
    let mut canvas = Canvas::new(SPRITE * palette.len() as u32, SPRITE);
    let s = SPRITE as f64;

    for (i, name) in palette.iter().enumerate() {
        let x = i as f64 * s;
        let color = Color::named(name).unwrap_or(Color::WHITE);
        canvas.draw_rect(Rect::new(x, 0.0, s, s), 0.0, color);
        // a foot that moves with the frame
        canvas.draw_point(Vec2::new(x + 1.0 + i as f64 * 2.0, s - 1.0), Color::BLACK);
    }

    let sheet_picture: Arc<dyn Picture> = Arc::new(canvas);
    Ok(sheet(sheet_picture, SPRITE, SPRITE)?)
}
