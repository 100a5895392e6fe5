//! The frame loop

use crate::clock::FrameClock;
use crate::config::LoopConfig;
use crate::context::FrameContext;
use crate::input::InputState;
use crate::platform::Platform;
use ember_core::{EmberError, Result};
use log::{debug, info, trace};
use std::time::Instant;

/// Run the frame loop until the body requests quit.
///
/// `open` acquires the platform; any error it returns is reported as
/// [`EmberError::SetupFailure`] and no frame runs. Each iteration then:
///
/// 1. polls events and advances the input state,
/// 2. measures `dt` since the previous iteration (or since the loop started),
/// 3. calls `body`, with quit already requested if the window was closed and
///    `quit_on_window_close` is set,
/// 4. returns without presenting if quit was requested,
/// 5. presents,
/// 6. sleeps out the rest of the `1/fps` budget unless vsync is on or fps is 0.
///
/// Errors from `present` end the loop. Panics in `body` are not caught.
pub fn run<P, F, B>(config: &LoopConfig, open: F, mut body: B) -> Result<()>
where
    P: Platform,
    F: FnOnce(&LoopConfig) -> Result<P>,
    B: FnMut(&mut FrameContext<'_, P::Output>),
{
    config.validate()?;

    let mut platform = open(config).map_err(|e| match e {
        EmberError::SetupFailure(_) => e,
        other => EmberError::SetupFailure(other.to_string()),
    })?;
    debug!(
        "opened platform for \"{}\" ({}x{}, fps {}, vsync {})",
        config.title, config.width, config.height, config.fps, config.vsync
    );

    let budget = config.frame_budget();
    let mut input = InputState::with_polled(&platform.poll_state());
    let mut clock = FrameClock::new();
    let mut events = Vec::new();

    info!("starting frame loop \"{}\"", config.title);
    loop {
        let began = Instant::now();

        events.clear();
        platform.poll_events(&mut events);
        input = input.update(&events, &platform.poll_state());

        let frame = clock.frame_count();
        let dt = clock.tick();
        trace!("frame {} dt {:.6}s, {} events", frame, dt, events.len());

        let mut ctx = FrameContext::new(
            dt,
            &input,
            &config.bindings,
            platform.output(),
            frame,
            clock.total_time,
        );
        if config.quit_on_window_close && input.window_closed() {
            debug!("window closed on frame {}, requesting quit", frame);
            ctx.quit();
        }

        body(&mut ctx);

        if ctx.quit_requested() {
            debug!("quit requested on frame {}", frame);
            break;
        }

        platform.present()?;

        if let Some(budget) = budget {
            let spent = began.elapsed();
            if spent < budget {
                std::thread::sleep(budget - spent);
            }
        }
    }

    info!(
        "frame loop finished after {} frames ({:.3}s)",
        clock.frame_count(),
        clock.total_time
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RawEvent;
    use crate::headless::HeadlessPlatform;
    use crate::input::PolledState;
    use ember_core::{Color, Rect, Vec2, VideoOutput};
    use ember_render::{DrawCommand, Recorder};
    use std::time::Duration;
    use winit::keyboard::KeyCode;

    fn config() -> LoopConfig {
        LoopConfig {
            fps: 0,
            ..Default::default()
        }
    }

    fn platform() -> HeadlessPlatform<Recorder> {
        HeadlessPlatform::new(Recorder::new(Rect::new(0.0, 0.0, 64.0, 48.0)))
    }

    #[test]
    fn test_quit_stops_after_current_iteration() {
        let mut platform = platform();
        let mut calls = 0;

        run(&config(), |_| Ok(&mut platform), |ctx| {
            calls += 1;
            if ctx.frame() == 2 {
                ctx.quit();
            }
        })
        .unwrap();

        assert_eq!(calls, 3);
        // the quitting iteration does not present
        assert_eq!(platform.presents(), 2);
    }

    #[test]
    fn test_quit_on_window_close() {
        let mut platform = platform();
        platform.push_batch([]);
        platform.push_batch([RawEvent::WindowClosed]);
        let mut seen = Vec::new();

        run(&config(), |_| Ok(&mut platform), |ctx| {
            seen.push((ctx.input.window_closed(), ctx.quit_requested()));
        })
        .unwrap();

        assert_eq!(seen, vec![(false, false), (true, true)]);
        assert_eq!(platform.presents(), 1);
    }

    #[test]
    fn test_window_close_ignored_when_disabled() {
        let mut platform = platform();
        platform.push_batch([RawEvent::WindowClosed]);
        let config = LoopConfig {
            quit_on_window_close: false,
            ..config()
        };
        let mut calls = 0;

        run(&config, |_| Ok(&mut platform), |ctx| {
            calls += 1;
            assert!(!ctx.quit_requested());
            if ctx.frame() == 1 {
                ctx.quit();
            }
        })
        .unwrap();

        assert_eq!(calls, 2);
        assert_eq!(platform.presents(), 1);
    }

    #[test]
    fn test_open_failure_is_setup_failure() {
        let mut calls = 0;
        let result = run(
            &config(),
            |_| -> Result<HeadlessPlatform<Recorder>> {
                Err(EmberError::ResourceUnavailable("no display".into()))
            },
            |_| calls += 1,
        );

        assert!(matches!(result, Err(EmberError::SetupFailure(_))));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LoopConfig {
            width: 0,
            ..config()
        };
        let result = run(&config, |_| Ok(platform()), |_| {});
        assert!(matches!(result, Err(EmberError::InvalidArgument(_))));
    }

    #[test]
    fn test_input_edges_through_loop() {
        let mut platform = platform();
        platform.push_batch([RawEvent::KeyDown(KeyCode::Space)]);
        platform.push_batch([]);
        platform.push_batch([RawEvent::KeyUp(KeyCode::Space)]);
        let mut seen = Vec::new();

        run(&config(), |_| Ok(&mut platform), |ctx| {
            let space = KeyCode::Space;
            seen.push((
                ctx.input.key_down(space),
                ctx.input.key_just_down(space),
                ctx.input.key_just_up(space),
            ));
            if ctx.frame() == 2 {
                ctx.quit();
            }
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![(true, true, false), (true, false, false), (false, false, true)]
        );
    }

    #[test]
    fn test_mouse_delta_through_loop() {
        let mut platform = platform();
        platform.set_state(PolledState {
            mouse_position: Vec2::new(10.0, 10.0),
            ..*platform.state()
        });
        platform.push_batch([]);
        platform.push_batch_with_state(
            [],
            PolledState {
                mouse_position: Vec2::new(13.0, 6.0),
                ..*platform.state()
            },
        );
        let mut deltas = Vec::new();

        run(&config(), |_| Ok(&mut platform), |ctx| {
            deltas.push(ctx.input.mouse_delta());
            if ctx.frame() == 1 {
                ctx.quit();
            }
        })
        .unwrap();

        assert_eq!(deltas, vec![Vec2::ZERO, Vec2::new(3.0, -4.0)]);
    }

    #[test]
    fn test_body_draws_to_platform_output() {
        let mut platform = platform();

        run(&config(), |_| Ok(&mut platform), |ctx| {
            ctx.output.clear(Color::BLACK);
            ctx.quit();
        })
        .unwrap();

        assert_eq!(
            platform.output_ref().commands(),
            &[DrawCommand::Clear(Color::BLACK)]
        );
    }

    #[test]
    fn test_time_advances() {
        let mut platform = platform();
        let mut times = Vec::new();

        run(&config(), |_| Ok(&mut platform), |ctx| {
            times.push((ctx.dt, ctx.elapsed()));
            if ctx.frame() == 3 {
                ctx.quit();
            }
        })
        .unwrap();

        assert_eq!(times.len(), 4);
        let mut total = 0.0;
        for (dt, elapsed) in times {
            assert!(dt >= 0.0);
            total += dt;
            assert!((elapsed - total).abs() < 1e-10);
        }
    }

    /// Headless platform whose first event poll blocks for a while
    struct SlowStart {
        inner: HeadlessPlatform<Recorder>,
        stalled: bool,
    }

    impl Platform for SlowStart {
        type Output = Recorder;

        fn poll_events(&mut self, out: &mut Vec<RawEvent>) {
            if !self.stalled {
                self.stalled = true;
                std::thread::sleep(Duration::from_millis(5));
            }
            self.inner.poll_events(out);
        }

        fn poll_state(&self) -> PolledState {
            self.inner.poll_state()
        }

        fn output(&mut self) -> &mut Recorder {
            self.inner.output()
        }

        fn present(&mut self) -> Result<()> {
            self.inner.present()
        }
    }

    #[test]
    fn test_first_dt_measured_from_loop_start() {
        let mut platform = SlowStart {
            inner: platform(),
            stalled: false,
        };
        let mut deltas = Vec::new();

        run(&config(), |_| Ok(&mut platform), |ctx| {
            deltas.push(ctx.dt);
            if ctx.frame() == 1 {
                ctx.quit();
            }
        })
        .unwrap();

        assert_eq!(deltas.len(), 2);
        assert!(deltas[0] >= 0.005);
        assert!(deltas[1] >= 0.0);
    }

    #[test]
    fn test_fps_paces_loop() {
        let mut platform = platform();
        let config = LoopConfig {
            fps: 100,
            ..Default::default()
        };
        let started = Instant::now();

        run(&config, |_| Ok(&mut platform), |ctx| {
            if ctx.frame() == 2 {
                ctx.quit();
            }
        })
        .unwrap();

        // two presented frames, each padded to 10ms
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    struct BrokenDisplay {
        output: Recorder,
    }

    impl Platform for BrokenDisplay {
        type Output = Recorder;

        fn poll_events(&mut self, _out: &mut Vec<RawEvent>) {}

        fn poll_state(&self) -> PolledState {
            PolledState::default()
        }

        fn output(&mut self) -> &mut Recorder {
            &mut self.output
        }

        fn present(&mut self) -> Result<()> {
            Err(EmberError::ResourceUnavailable("display lost".into()))
        }
    }

    #[test]
    fn test_present_error_propagates() {
        let mut calls = 0;
        let result = run(
            &config(),
            |_| {
                Ok(BrokenDisplay {
                    output: Recorder::new(Rect::new(0.0, 0.0, 1.0, 1.0)),
                })
            },
            |_| calls += 1,
        );

        assert!(matches!(result, Err(EmberError::ResourceUnavailable(_))));
        assert_eq!(calls, 1);
    }
}
