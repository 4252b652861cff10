//! Manual beacon trigger
//!
//! A momentary input that forces a beacon. On a host the "button" is a line
//! on an input stream (pressing Enter on a terminal); a reader thread turns
//! each line into a press event on a channel.

use std::io::BufRead;
use std::thread;

use crossbeam_channel::{Receiver, Sender, unbounded};

/// Sending half used by whatever produces button presses
#[derive(Clone)]
pub struct TriggerHandle {
    tx: Sender<()>,
}

impl TriggerHandle {
    /// Register one press; returns false once the trigger has been dropped
    pub fn press(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

pub struct ManualTrigger {
    rx: Receiver<()>,
}

impl ManualTrigger {
    pub fn channel() -> (TriggerHandle, Self) {
        let (tx, rx) = unbounded();
        (TriggerHandle { tx }, Self { rx })
    }

    /// Spawn a thread that presses the trigger for every line read
    pub fn spawn_line_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (handle, trigger) = Self::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                if line.is_err() || !handle.press() {
                    break;
                }
            }
            log::debug!("Manual trigger input closed");
        });
        trigger
    }

    /// Whether the trigger was pressed since the last poll
    ///
    /// All pending presses are consumed, so a burst counts once.
    pub fn poll(&self) -> bool {
        let mut pressed = false;
        while self.rx.try_recv().is_ok() {
            pressed = true;
        }
        pressed
    }
}
