use crate::audio::{AudioEngine, EngineStatus};
use crate::session::KeyValueStore;

use super::model::App;

impl<E: AudioEngine, S: KeyValueStore> App<E, S> {
    /// Timer tick: observe the engine, auto-advance when a track ran out,
    /// refresh the time display and periodically save the session.
    pub fn tick(&mut self) {
        let status = self.status();
        if status == EngineStatus::Playing {
            self.was_playing = true;
        }

        if let Some(cur) = self.playlist.current() {
            if status == EngineStatus::Stopped && !self.stopped_by_user && self.was_playing {
                self.was_playing = false;
                if cur + 1 < self.playlist.len() {
                    tracing::debug!(from = cur, "track finished, advancing");
                    if self.load_index(cur + 1) {
                        self.engine.play();
                    } else {
                        self.stopped_by_user = true;
                    }
                }
            }
        }

        self.refresh_time();

        self.tick_count = self.tick_count.wrapping_add(1);
        let every = self.settings.playback.save_every_ticks.max(1);
        if self.tick_count % every == 0 {
            self.save_session(false);
        }
    }
}
