//! src/control.rs
//!
//! Commands that change the session or the view, whether they come from the
//! keyboard or from the remote control server.

use crossterm::event::KeyCode;
use log::{error, info};

use crate::render::ViewSettings;
use crate::sensor::SensorSource;
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCommand {
    Start,
    Stop,
    ToggleSubscription,
    ToggleAutoscale,
    Lock,
    Unlock,
    ToggleLock,
    Quit,
}

/// Whether the UI loop keeps running after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Keyboard bindings.
pub fn key_command(code: KeyCode) -> Option<ControlCommand> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(ControlCommand::Quit),
        KeyCode::Char('a') => Some(ControlCommand::ToggleAutoscale),
        KeyCode::Char('l') => Some(ControlCommand::ToggleLock),
        KeyCode::Char('p') => Some(ControlCommand::ToggleSubscription),
        _ => None,
    }
}

/// Apply a command between frames.
///
/// A failed subscribe is logged and leaves the session stopped; it does not
/// end the UI loop.
pub fn apply<S: SensorSource, const K: usize>(
    command: ControlCommand,
    session: &mut Session<S, K>,
    view: &mut ViewSettings,
) -> Flow {
    match command {
        ControlCommand::Start => start(session),
        ControlCommand::Stop => session.stop(),
        ControlCommand::ToggleSubscription => {
            if session.is_subscribed() {
                session.stop();
            } else {
                start(session);
            }
        }
        ControlCommand::ToggleAutoscale => view.toggle_autoscale(),
        ControlCommand::Lock => view.lock(&session.window().snapshot()),
        ControlCommand::Unlock => view.unlock(),
        ControlCommand::ToggleLock => {
            if view.locked_bounds.is_some() {
                view.unlock();
            } else {
                view.lock(&session.window().snapshot());
            }
        }
        ControlCommand::Quit => return Flow::Quit,
    }
    info!("applied {command:?}");
    Flow::Continue
}

fn start<S: SensorSource, const K: usize>(session: &mut Session<S, K>) {
    if let Err(e) = session.start() {
        error!("failed to subscribe: {e:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MultiChannelWindow;
    use crate::sensor::{IngestionAdapter, SensorEvent, SensorKind, Subscription};
    use color_eyre::eyre::{Result, eyre};
    use std::sync::mpsc::Sender;

    struct Flaky {
        fail: bool,
    }

    impl SensorSource for Flaky {
        fn name(&self) -> &str {
            "flaky"
        }

        fn subscribe(&mut self, tx: Sender<SensorEvent>) -> Result<Subscription> {
            if self.fail {
                return Err(eyre!("device unplugged"));
            }
            Subscription::spawn("flaky", move |stop| {
                while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                    std::thread::sleep(std::time::Duration::from_millis(1));
                }
                drop(tx);
            })
        }
    }

    fn session(fail: bool) -> Session<Flaky, 2> {
        Session::new(
            MultiChannelWindow::new(["a", "b"], 4).unwrap(),
            IngestionAdapter::new(SensorKind::Accelerometer),
            Flaky { fail },
        )
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(key_command(KeyCode::Char('q')), Some(ControlCommand::Quit));
        assert_eq!(
            key_command(KeyCode::Char('p')),
            Some(ControlCommand::ToggleSubscription)
        );
        assert_eq!(key_command(KeyCode::Char('x')), None);
    }

    #[test]
    fn subscription_commands() {
        let mut s = session(false);
        let mut view = ViewSettings::new(true, (-1.0, 1.0));

        assert_eq!(apply(ControlCommand::Start, &mut s, &mut view), Flow::Continue);
        assert!(s.is_subscribed());
        apply(ControlCommand::ToggleSubscription, &mut s, &mut view);
        assert!(!s.is_subscribed());
        apply(ControlCommand::ToggleSubscription, &mut s, &mut view);
        assert!(s.is_subscribed());
        apply(ControlCommand::Stop, &mut s, &mut view);
        assert!(!s.is_subscribed());
    }

    #[test]
    fn failed_start_keeps_running() {
        let mut s = session(true);
        let mut view = ViewSettings::new(true, (-1.0, 1.0));
        assert_eq!(apply(ControlCommand::Start, &mut s, &mut view), Flow::Continue);
        assert!(!s.is_subscribed());
    }

    #[test]
    fn view_commands_and_quit() {
        let mut s = session(false);
        let mut view = ViewSettings::new(false, (-2.0, 2.0));

        apply(ControlCommand::ToggleLock, &mut s, &mut view);
        assert_eq!(view.locked_bounds, Some((-2.0, 2.0)));
        apply(ControlCommand::ToggleLock, &mut s, &mut view);
        assert_eq!(view.locked_bounds, None);
        apply(ControlCommand::Lock, &mut s, &mut view);
        apply(ControlCommand::Unlock, &mut s, &mut view);
        assert_eq!(view.locked_bounds, None);
        apply(ControlCommand::ToggleAutoscale, &mut s, &mut view);
        assert!(view.autoscale);

        assert_eq!(apply(ControlCommand::Quit, &mut s, &mut view), Flow::Quit);
    }
}
