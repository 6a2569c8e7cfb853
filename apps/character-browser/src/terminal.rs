//! Keyboard input for the terminal host.

use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use charpage_core::UiDispatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Retry,
    Quit,
}

impl Command {
    /// Parses one input line. Only the first character matters.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().chars().next()?.to_ascii_lowercase() {
            'n' => Some(Self::Next),
            'p' => Some(Self::Previous),
            'r' => Some(Self::Retry),
            'q' => Some(Self::Quit),
            _ => None,
        }
    }
}

pub const HELP: &str = "[n] next  [p] previous  [r] retry  [q] quit";

/// Forward commands read from `input` until it ends, then send [`Command::Quit`].
///
/// Every command is followed by an empty UI task so a host blocked in
/// `RuntimeHandle::wait_for_work` wakes up.
pub fn forward_commands(input: impl BufRead, commands: Sender<Command>, dispatcher: UiDispatcher) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::warn!("stdin closed: {err}");
                break;
            }
        };
        match Command::parse(&line) {
            Some(command) => {
                if commands.send(command).is_err() {
                    return;
                }
                dispatcher.post(|| {});
                if command == Command::Quit {
                    return;
                }
            }
            None if line.trim().is_empty() => {}
            None => log::warn!("unknown command {:?}; {HELP}", line.trim()),
        }
    }
    if commands.send(Command::Quit).is_ok() {
        dispatcher.post(|| {});
    }
}

pub fn spawn_stdin_reader(
    commands: Sender<Command>,
    dispatcher: UiDispatcher,
) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("charpage-stdin".into())
        .spawn(move || forward_commands(io::stdin().lock(), commands, dispatcher))
}
