//! Reading user input.
//!
//! Stdin is read line by line on a background thread; each line is posted to
//! the form as `FormEvent::Line`. End of input posts `FormEvent::Shutdown`.
use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::Sender;
use log::{debug, error};

use crate::form::FormEvent;

/// Forward every line of `reader` to `tx`, then ask the form to shut down.
pub fn forward_lines<R: BufRead>(reader: R, tx: &Sender<FormEvent>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if tx.send(FormEvent::Line(line)).is_err() {
                    debug!("Form is gone, input reader stopping");
                    return;
                }
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }
    debug!("Input closed");
    let _ = tx.send(FormEvent::Shutdown);
}

/// Spawn the stdin reader thread.
pub fn spawn_stdin_reader(tx: Sender<FormEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        forward_lines(stdin.lock(), &tx);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_lines_then_shutdown() {
        let (tx, rx) = unbounded();
        forward_lines(&b"from eth\namount 1\n"[..], &tx);
        let events: Vec<FormEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], FormEvent::Line(l) if l == "from eth"));
        assert!(matches!(&events[1], FormEvent::Line(l) if l == "amount 1"));
        assert!(matches!(events[2], FormEvent::Shutdown));
    }
}
