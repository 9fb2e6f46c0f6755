//! Device-local audio feedback.
//!
//! A short "tick" cue played on reveal/grade/complete. The output device is a
//! process-wide resource: one dedicated thread owns the non-`Send` rodio
//! handles and receives commands over a channel, created lazily on the first
//! cue and released by [`shutdown`]. Every failure path -- no output device,
//! dead thread, poisoned lock -- degrades to silence; the cue must never
//! crash or block a session.

use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, OnceLock};
use std::thread;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};

enum CueCommand {
    Tick,
    Shutdown,
}

fn cue_channel() -> &'static Mutex<Option<Sender<CueCommand>>> {
    static CHANNEL: OnceLock<Mutex<Option<Sender<CueCommand>>>> = OnceLock::new();
    CHANNEL.get_or_init(|| Mutex::new(None))
}

fn spawn_cue_thread() -> Option<Sender<CueCommand>> {
    let (tx, rx) = mpsc::channel::<CueCommand>();

    let spawned = thread::Builder::new()
        .name("hafiz-audio".to_string())
        .spawn(move || {
            // The stream and sink are created on this thread and never leave
            // it; rodio's output handles are not Send.
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::debug!("audio unavailable, cues disabled: {e}");
                    return;
                }
            };
            let _stream = stream;
            let sink = match Sink::try_new(&handle) {
                Ok(sink) => sink,
                Err(e) => {
                    log::debug!("audio sink unavailable, cues disabled: {e}");
                    return;
                }
            };

            while let Ok(cmd) = rx.recv() {
                match cmd {
                    CueCommand::Tick => {
                        // 880 Hz sine, ~100 ms, soft attack so it clicks less.
                        let beep = SineWave::new(880.0)
                            .take_duration(Duration::from_millis(100))
                            .amplify(0.20)
                            .fade_in(Duration::from_millis(10));
                        sink.append(beep);
                    }
                    CueCommand::Shutdown => break,
                }
            }
        });

    match spawned {
        Ok(_) => Some(tx),
        Err(e) => {
            log::debug!("failed to spawn audio thread: {e}");
            None
        }
    }
}

/// Play the tick cue. Silent no-op when audio is unavailable.
pub fn tick() {
    let Ok(mut slot) = cue_channel().lock() else {
        return;
    };
    if slot.is_none() {
        *slot = spawn_cue_thread();
    }
    if let Some(tx) = slot.as_ref() {
        if tx.send(CueCommand::Tick).is_err() {
            // Thread is gone; drop the sender so the next cue respawns it.
            *slot = None;
        }
    }
}

/// Release the audio device and stop the cue thread.
///
/// Safe to call repeatedly or without a prior [`tick`].
pub fn shutdown() {
    let Ok(mut slot) = cue_channel().lock() else {
        return;
    };
    if let Some(tx) = slot.take() {
        let _ = tx.send(CueCommand::Shutdown);
    }
}

/// RAII handle tying cue-device release to scope exit.
///
/// Sessions hold one for their lifetime so the device is released on every
/// exit path, early returns and errors included.
pub struct CueGuard {
    _private: (),
}

impl CueGuard {
    pub fn acquire() -> Self {
        Self { _private: () }
    }
}

impl Drop for CueGuard {
    fn drop(&mut self) {
        shutdown();
    }
}
