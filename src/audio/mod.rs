pub mod cues;
pub mod tone;

pub use cues::{AppSound, SoundCue};

use anyhow::{anyhow, Result};
use rodio::{OutputStream, Sink};
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

use tone::CueSource;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

/// Plays short audible cues. Implementations must not block on playback.
pub trait CuePlayer: Send + Sync {
    fn play_cue(&self, cue: SoundCue) -> Result<()>;

    /// Output gain for every later cue, `0.0..=1.0`.
    fn set_volume(&self, volume: f32) -> Result<()>;
}

enum AudioCommand {
    Play(SoundCue),
    SetVolume(f32),
    Stop,
}

/// Handle to the audio thread. The thread and its output device are created
/// on first use.
pub struct AudioEngineHandle {
    tx: Arc<Mutex<Option<Sender<AudioCommand>>>>,
}

impl Default for AudioEngineHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngineHandle {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>> {
        let mut guard = self
            .tx
            .lock()
            .map_err(|_| anyhow!("audio sender lock poisoned"))?;
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();

        // rodio's output stream is not Send, so it lives on this thread only.
        thread::Builder::new()
            .name("audio-engine".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;
                let mut volume = 1.0_f32;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                    volume: f32,
                ) -> Result<()> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| anyhow!("Failed to create audio output stream: {e}"))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| anyhow!("Failed to create audio sink: {e}"))?;
                        new_sink.set_volume(volume);
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Play(cue) => {
                            if let Err(err) = ensure_sink(&mut _stream, &mut sink, volume) {
                                log_warn!("Cannot play {:?}: {err}", cue);
                                continue;
                            }
                            if let Some(ref s) = sink {
                                log_debug!("Playing {:?}", cue);
                                s.append(CueSource::new(cue.tones()));
                            }
                        }
                        AudioCommand::SetVolume(v) => {
                            volume = v.clamp(0.0, 1.0);
                            if let Some(ref s) = sink {
                                s.set_volume(volume);
                            }
                        }
                        AudioCommand::Stop => {
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            _stream = None;
                        }
                    }
                }
            })
            .map_err(|e| anyhow!("Failed to spawn audio thread: {e}"))?;

        *guard = Some(tx.clone());
        Ok(tx)
    }

    pub fn stop(&self) -> Result<()> {
        if let Ok(Some(tx)) = self.tx.lock().map(|g| g.clone()) {
            let _ = tx.send(AudioCommand::Stop);
        }
        Ok(())
    }
}

impl CuePlayer for AudioEngineHandle {
    fn play_cue(&self, cue: SoundCue) -> Result<()> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::Play(cue))
            .map_err(|e| anyhow!("audio thread gone: {e}"))
    }

    fn set_volume(&self, volume: f32) -> Result<()> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::SetVolume(volume))
            .map_err(|e| anyhow!("audio thread gone: {e}"))
    }
}

/// Records cues instead of playing them.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingCuePlayer {
    pub played: Mutex<Vec<SoundCue>>,
    pub volume: Mutex<Option<f32>>,
}

#[cfg(test)]
impl RecordingCuePlayer {
    pub fn played(&self) -> Vec<SoundCue> {
        self.played.lock().unwrap().clone()
    }

    pub fn volume(&self) -> Option<f32> {
        *self.volume.lock().unwrap()
    }
}

#[cfg(test)]
impl CuePlayer for RecordingCuePlayer {
    fn play_cue(&self, cue: SoundCue) -> Result<()> {
        self.played.lock().unwrap().push(cue);
        Ok(())
    }

    fn set_volume(&self, volume: f32) -> Result<()> {
        *self.volume.lock().unwrap() = Some(volume);
        Ok(())
    }
}
