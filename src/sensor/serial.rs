//! src/sensor/serial.rs
//!
//! Serial-port source: reads the line protocol from `event.rs` off a device
//! such as `/dev/ttyACM0` and pushes every parsed line as an event.

use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use log::{debug, error, info, warn};

use super::event::{SensorEvent, parse_line};
use super::source::{SensorSource, Subscription};

pub struct SerialSource {
    name: String,
    port: String,
    baud_rate: u32,
    timeout: Duration,
}

impl SerialSource {
    pub fn new(port: &str, baud_rate: u32, timeout: Duration) -> Self {
        Self {
            name: format!("{port} @ {baud_rate} baud"),
            port: port.to_string(),
            baud_rate,
            timeout,
        }
    }
}

impl SensorSource for SerialSource {
    fn name(&self) -> &str {
        &self.name
    }

    /// Opens the port up front so a missing device is reported to the caller;
    /// reading happens on the worker thread.
    fn subscribe(&mut self, tx: Sender<SensorEvent>) -> Result<Subscription> {
        info!("opening serial port {} @ {} baud", self.port, self.baud_rate);
        let port = serialport::new(&self.port, self.baud_rate)
            .timeout(self.timeout)
            .open()
            .wrap_err_with(|| format!("failed to open serial port {}", self.port))?;

        let port_name = self.port.clone();
        Subscription::spawn("sensor-serial", move |stop: &AtomicBool| {
            read_events(port, &tx, stop);
            info!("serial reader on {port_name} exiting");
        })
    }
}

/// Pump parsed lines from `reader` into `tx` until stopped, disconnected, or
/// the stream fails. Read timeouts only re-check the stop flag.
fn read_events<R: Read>(reader: R, tx: &Sender<SensorEvent>, stop: &AtomicBool) {
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    while !stop.load(Ordering::Relaxed) {
        match reader.read_line(&mut line) {
            Ok(0) => {
                debug!("serial stream closed");
                break;
            }
            Ok(_) => {
                // a timeout can leave a partial line behind; only complete lines are parsed
                if !line.ends_with('\n') {
                    continue;
                }
                match parse_line(line.trim()) {
                    Some(event) => {
                        if tx.send(event).is_err() {
                            debug!("serial reader: receiver gone");
                            break;
                        }
                    }
                    None if !line.trim().is_empty() => {
                        debug!("unparsed serial line: {:?}", line.trim());
                    }
                    None => {}
                }
                line.clear();
            }
            Err(e) if e.kind() == ErrorKind::TimedOut => continue,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("serial reader: skipping non-UTF-8 line");
                line.clear();
            }
            Err(e) => {
                error!("error reading serial data: {e}");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::event::SensorKind;
    use std::io::Cursor;
    use std::sync::mpsc;

    #[test]
    fn forwards_each_parsed_line() {
        let input = "ACC 1 2 3\n\ngarbage here\nACCURACY ACC 2\nGYR 0.1 0.2 0.3\n";
        let (tx, rx) = mpsc::channel();
        read_events(Cursor::new(input), &tx, &AtomicBool::new(false));
        drop(tx);

        let events: Vec<SensorEvent> = rx.iter().collect();
        assert_eq!(
            events,
            vec![
                SensorEvent::reading(SensorKind::Accelerometer, vec![1.0, 2.0, 3.0]),
                SensorEvent::AccuracyChanged {
                    kind: SensorKind::Accelerometer,
                    accuracy: 2
                },
                SensorEvent::reading(SensorKind::Gyroscope, vec![0.1, 0.2, 0.3]),
            ]
        );
    }

    #[test]
    fn ignores_a_trailing_partial_line() {
        let (tx, rx) = mpsc::channel();
        read_events(Cursor::new("ACC 1 2 3\nACC 4 5"), &tx, &AtomicBool::new(false));
        drop(tx);
        assert_eq!(rx.iter().count(), 1);
    }

    #[test]
    fn stops_when_flag_is_set() {
        let (tx, rx) = mpsc::channel();
        read_events(Cursor::new("ACC 1 2 3\n"), &tx, &AtomicBool::new(true));
        drop(tx);
        assert_eq!(rx.iter().count(), 0);
    }
}
