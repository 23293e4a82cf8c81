//! src/app.rs
//!
//! Live sensor chart in the terminal.
//!
//! Subscribes to a sensor source (a serial device or the built-in simulator),
//! keeps the last `capacity` readings of each axis of one sensor in a
//! sliding window, and redraws a multi-line chart after every reading.
//!
//! # Building and Running
//!
//! ```text
//! cargo run --release                  # simulated accelerometer
//! cargo run --release -- monitor.json  # settings from a JSON file
//! ```
//! See `config.rs` for the settings format. Logs go to the configured
//! `log_file` (default `accel-tui-monitor.log`); `RUST_LOG` overrides the
//! level.
//!
//! # Serial Line Format
//!
//! One event per line, e.g. `ACC 0.12 9.79 -0.31` or `ACCURACY ACC 3`.
//! Readings for other sensors, readings with the wrong number of values, and
//! accuracy notices are counted as dropped and never reach the chart.
//!
//! # Keyboard Controls
//!
//! - **p**: Stop/start the sensor subscription. The window is kept.
//! - **a**: Toggle autoscale. Enabling autoscale clears locked bounds.
//! - **l**: Lock/unlock the y-axis at the bounds currently shown.
//! - **q** / **Esc**: Quit and restore the terminal.
//!
//! # Remote TCP Protocol (ASCII, Line-Based)
//!
//! Bound to `remote_addr` (default `127.0.0.1:4000`). One command per line,
//! one reply per command (`OK` or `ERR <msg>`):
//!
//! - `start` / `stop`
//! - `toggle autoscale`
//! - `lock` / `unlock`
//! - `shutdown`: quit the application
//! - `quit`: replies `OK bye` and closes the connection
//!
//! ```text
//! $ nc 127.0.0.1 4000
//! stop
//! OK
//! lock
//! OK
//! ```
//!
//! # Window Behavior
//!
//! Samples are numbered from 0 (oldest) upward. Eviction runs before each
//! append, so a full window holds `capacity + 1` samples between ticks; the
//! extra one is listed as `(buffered)` in the history panel and enters the
//! chart on the next reading.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::{Result, WrapErr};
use crossterm::event::{self, Event, KeyEventKind};
use log::{error, info};
use ratatui::backend::Backend;

use crate::config::Settings;
use crate::control::{self, ControlCommand, Flow};
use crate::graph::MultiChannelWindow;
use crate::net::remote_server;
use crate::render::ViewSettings;
use crate::sensor::{AXES, IngestionAdapter, SensorSource};
use crate::session::Session;
use crate::ui::Dashboard;

/// Spawn the remote control server when an address is configured.
fn start_remote(settings: &Settings) -> Result<Receiver<ControlCommand>> {
    let (tx, rx) = mpsc::channel();
    if let Some(addr) = settings.remote_addr.clone() {
        thread::Builder::new()
            .name("remote-control".to_string())
            .spawn(move || {
                if let Err(e) = remote_server(&addr, tx) {
                    error!("{e:#}");
                }
            })
            .wrap_err("failed to spawn remote control thread")?;
    }
    Ok(rx)
}

pub fn run(settings: Settings) -> Result<()> {
    info!("starting with {settings:?}");

    let window =
        MultiChannelWindow::<AXES>::new(settings.sensor.channel_labels(), settings.capacity)
            .wrap_err("invalid window configuration")?;
    let adapter = IngestionAdapter::new(settings.sensor.clone());
    let mut session = Session::new(window, adapter, settings.source.build());
    let commands = start_remote(&settings)?;

    // subscribe before taking over the terminal so a missing device is
    // reported on a usable screen
    session.start()?;

    let terminal = ratatui::try_init().wrap_err("failed to initialize terminal")?;
    let mut dashboard = Dashboard::new(
        terminal,
        format!("Live {} ({})", settings.sensor, session.status().source),
        ViewSettings::new(settings.autoscale, settings.y_range),
    );

    let result = event_loop(
        &mut session,
        &mut dashboard,
        &commands,
        settings.frame_time(),
    );
    ratatui::restore();
    session.stop();
    let window = session.window();
    info!(
        "exiting after {} ticks, window {}/{} {:?}",
        window.ticks(),
        window.count(),
        window.capacity(),
        window.state()
    );
    result
}

fn event_loop<S: SensorSource, B: Backend, const K: usize>(
    session: &mut Session<S, K>,
    dashboard: &mut Dashboard<B>,
    commands: &Receiver<ControlCommand>,
    frame_time: Duration,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // each applied reading is drawn as it is ingested; redraw otherwise so
        // control changes show up while the source is idle or stopped
        if session.pump(dashboard)? == 0 {
            session.redraw(dashboard)?;
        }

        for command in commands.try_iter() {
            if control::apply(command, session, &mut dashboard.view) == Flow::Quit {
                return Ok(());
            }
        }

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = control::key_command(key.code) {
                    if control::apply(command, session, &mut dashboard.view) == Flow::Quit {
                        return Ok(());
                    }
                }
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
