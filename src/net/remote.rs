//! src/net/remote.rs
//!
//! Tiny line-based TCP control server.
//!
//! Each client gets its own thread. Parsed commands are forwarded to the UI
//! loop over a channel and applied between frames; the reply only confirms
//! that the command was understood and queued.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::mpsc::Sender;
use std::thread;

use color_eyre::eyre::{Result, WrapErr};
use log::{debug, info, warn};

use crate::control::ControlCommand;

/// What a client line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Request {
    Command(ControlCommand),
    Disconnect,
}

/// Parse one command line.
///
/// Commands:
/// - `start` / `stop`: subscribe to / unsubscribe from the sensor source
/// - `toggle autoscale`
/// - `lock` / `unlock`: freeze / release the y-axis bounds
/// - `shutdown`: quit the application
/// - `quit`: close this connection
fn parse_request(line: &str) -> Result<Request, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(head) = parts.first() else {
        return Err("empty".to_string());
    };
    let command = match head.to_lowercase().as_str() {
        "start" if parts.len() == 1 => ControlCommand::Start,
        "stop" if parts.len() == 1 => ControlCommand::Stop,
        "toggle" if parts.len() == 2 && parts[1].eq_ignore_ascii_case("autoscale") => {
            ControlCommand::ToggleAutoscale
        }
        "lock" if parts.len() == 1 => ControlCommand::Lock,
        "unlock" if parts.len() == 1 => ControlCommand::Unlock,
        "shutdown" if parts.len() == 1 => ControlCommand::Quit,
        "quit" if parts.len() == 1 => return Ok(Request::Disconnect),
        _ => return Err(format!("unknown {}", parts.join(" "))),
    };
    Ok(Request::Command(command))
}

/// Bind `addr` and serve clients until the listener fails.
pub fn remote_server(addr: &str, commands: Sender<ControlCommand>) -> Result<()> {
    let listener =
        TcpListener::bind(addr).wrap_err_with(|| format!("remote control: bind {addr}"))?;
    info!("remote control listening on {addr}");
    serve(listener, commands);
    Ok(())
}

fn serve(listener: TcpListener, commands: Sender<ControlCommand>) {
    for stream in listener.incoming() {
        match stream {
            Ok(s) => {
                let tx = commands.clone();
                if let Err(e) = thread::Builder::new()
                    .name("remote-client".to_string())
                    .spawn(move || handle_remote_client(s, tx))
                {
                    warn!("remote control: cannot spawn client thread: {e}");
                }
            }
            Err(e) => warn!("remote control: accept error: {e}"),
        }
    }
}

/// Serve one client until it disconnects, sends `quit`, or the UI is gone.
fn handle_remote_client(s: TcpStream, commands: Sender<ControlCommand>) {
    let peer = s
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "<peer?>".into());
    info!("remote client {peer} connected");
    if let Err(e) = client_loop(&s, &commands) {
        debug!("remote client {peer}: {e:#}");
    }
    let _ = s.shutdown(Shutdown::Both);
    info!("remote client {peer} disconnected");
}

fn client_loop(s: &TcpStream, commands: &Sender<ControlCommand>) -> Result<()> {
    let mut rdr = BufReader::new(s.try_clone().wrap_err("clone stream")?);
    let mut writer = s;
    let mut line = String::new();

    loop {
        line.clear();
        if rdr.read_line(&mut line).wrap_err("read")? == 0 {
            return Ok(());
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }

        let reply = match parse_request(raw) {
            Ok(Request::Disconnect) => {
                writer.write_all(b"OK bye\n").wrap_err("write")?;
                return Ok(());
            }
            Ok(Request::Command(command)) => {
                debug!("remote command {command:?}");
                if commands.send(command).is_err() {
                    writer.write_all(b"ERR closed\n").wrap_err("write")?;
                    return Ok(());
                }
                "OK\n".to_string()
            }
            Err(msg) => format!("ERR {msg}\n"),
        };
        writer.write_all(reply.as_bytes()).wrap_err("write")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_request("start"),
            Ok(Request::Command(ControlCommand::Start))
        );
        assert_eq!(
            parse_request("TOGGLE Autoscale"),
            Ok(Request::Command(ControlCommand::ToggleAutoscale))
        );
        assert_eq!(
            parse_request("shutdown"),
            Ok(Request::Command(ControlCommand::Quit))
        );
        assert_eq!(parse_request("quit"), Ok(Request::Disconnect));
        assert_eq!(parse_request("lock 0"), Err("unknown lock 0".to_string()));
        assert_eq!(parse_request("   "), Err("empty".to_string()));
    }

    #[test]
    fn forwards_commands_and_replies() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || serve(listener, tx));

        let stream = TcpStream::connect(addr).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut writer = stream;
        let mut reply = String::new();

        for (line, expected) in [
            ("stop\n", "OK\n"),
            ("lock\n", "OK\n"),
            ("bogus\n", "ERR unknown bogus\n"),
            ("quit\n", "OK bye\n"),
        ] {
            writer.write_all(line.as_bytes()).unwrap();
            reply.clear();
            reader.read_line(&mut reply).unwrap();
            assert_eq!(reply, expected);
        }

        let received: Vec<ControlCommand> = rx.try_iter().collect();
        assert_eq!(received, vec![ControlCommand::Stop, ControlCommand::Lock]);
    }
}
