use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::{create_paused_sink, probe_duration};
use super::types::{AudioEngine, EngineError, EngineStatus};

/// `AudioEngine` backed by the default rodio output device.
///
/// A rodio `Sink` cannot be rewound once it has been stopped or has drained,
/// so the engine keeps the loaded path and builds a fresh sink whenever it
/// needs to play again from a stopped state.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    duration: Duration,
    volume: f32,
    state: EngineStatus,
}

impl RodioEngine {
    pub fn new() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::NoOutput(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would land on the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: None,
            duration: Duration::ZERO,
            volume: 1.0,
            state: EngineStatus::Stopped,
        })
    }

    /// Replace the sink with a fresh paused one for the loaded path.
    fn rebuild_sink(&mut self) -> Result<(), EngineError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let (sink, _) = create_paused_sink(self.stream.mixer(), &path)?;
        sink.set_volume(self.volume);
        self.sink = Some(sink);
        Ok(())
    }

    fn sink_drained(&self) -> bool {
        self.sink.as_ref().map(Sink::empty).unwrap_or(true)
    }
}

impl AudioEngine for RodioEngine {
    fn open(&mut self, path: &Path) -> Result<(), EngineError> {
        self.stop();
        self.path = None;
        self.duration = Duration::ZERO;

        let (sink, total) = create_paused_sink(self.stream.mixer(), path)?;
        sink.set_volume(self.volume);

        self.duration = total
            .or_else(|| probe_duration(path))
            .unwrap_or(Duration::ZERO);
        self.sink = Some(sink);
        self.path = Some(path.to_path_buf());
        self.state = EngineStatus::Stopped;
        tracing::debug!(path = %path.display(), duration = ?self.duration, "opened track");
        Ok(())
    }

    fn play(&mut self) {
        if self.path.is_none() {
            return;
        }
        if self.sink_drained() {
            if let Err(e) = self.rebuild_sink() {
                tracing::warn!(error = %e, "could not restart track");
                self.state = EngineStatus::Stopped;
                return;
            }
        }
        if let Some(sink) = &self.sink {
            sink.play();
            self.state = EngineStatus::Playing;
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            if !sink.empty() {
                sink.pause();
                self.state = EngineStatus::Paused;
            }
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.state = EngineStatus::Stopped;
    }

    fn status(&self) -> EngineStatus {
        match self.state {
            // A playing sink that ran out of samples has finished naturally.
            EngineStatus::Playing if self.sink_drained() => EngineStatus::Stopped,
            state => state,
        }
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = f32::from(volume.min(100)) / 100.0;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn offset(&self) -> Duration {
        match (&self.sink, self.status()) {
            (Some(sink), EngineStatus::Playing | EngineStatus::Paused) => sink.get_pos(),
            _ => Duration::ZERO,
        }
    }

    fn set_offset(&mut self, offset: Duration) {
        if self.sink_drained() {
            if let Err(e) = self.rebuild_sink() {
                tracing::warn!(error = %e, "could not reopen track for seeking");
                return;
            }
            if self.state == EngineStatus::Playing {
                self.state = EngineStatus::Stopped;
            }
        }
        if let Some(sink) = &self.sink {
            if let Err(e) = sink.try_seek(offset) {
                tracing::warn!(error = %e, offset = ?offset, "seek failed");
            }
        }
    }
}
