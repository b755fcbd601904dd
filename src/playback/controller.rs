//! Synchronized playback controller
//!
//! Keeps any number of playback surfaces locked to one shared play
//! intent. The preview shows two surfaces over the same source, so every
//! transition must be issued to all of them in the same logical step;
//! surfaces are never commanded independently. The controller does not
//! attempt corrective seeking, both sides are expected to end together
//! because they receive identical commands over identical sources.

use std::sync::Arc;

use log::debug;

use super::sink::{PlaybackSink, ViewId};

/// Fan-out of one play/pause intent to N sinks
pub struct SyncedPlayback {
    sinks: Vec<Arc<dyn PlaybackSink>>,
    playing: bool,
}

impl SyncedPlayback {
    /// Create a controller with no sinks attached yet
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            playing: false,
        }
    }

    /// Attach a sink and bring it in line with the shared play state
    pub fn attach(&mut self, sink: Arc<dyn PlaybackSink>) {
        sink.set_playing(self.playing);
        self.sinks.push(sink);
    }

    /// Shared play state, the source of truth for the play/pause affordance
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip the shared play state and broadcast it to every sink
    ///
    /// A no-op while no sinks are attached (the preview has not mounted
    /// yet), not an error.
    pub fn toggle(&mut self) -> bool {
        if self.sinks.is_empty() {
            return self.playing;
        }
        self.playing = !self.playing;
        self.broadcast();
        self.playing
    }

    /// One view reached its natural end, stop the whole set
    ///
    /// Which view reported first does not matter: the shared state drops
    /// to paused and the pause is broadcast so every sink stays in step.
    pub fn on_ended(&mut self, view: ViewId) {
        debug!("{} view reached end of stream", view);
        self.playing = false;
        self.broadcast();
    }

    fn broadcast(&self) {
        for sink in &self.sinks {
            sink.set_playing(self.playing);
        }
    }
}

impl Default for SyncedPlayback {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::SourceAsset;
    use crate::playback::surface::VideoSurface;
    use bytes::Bytes;

    fn pair() -> (SyncedPlayback, Arc<VideoSurface>, Arc<VideoSurface>) {
        let asset = SourceAsset::new("clip.mp4", Bytes::new());
        let left = Arc::new(VideoSurface::bind(&asset, ViewId::Left));
        let right = Arc::new(VideoSurface::bind(&asset, ViewId::Right));
        let mut control = SyncedPlayback::new();
        control.attach(left.clone());
        control.attach(right.clone());
        (control, left, right)
    }

    fn assert_in_sync(control: &SyncedPlayback, left: &VideoSurface, right: &VideoSurface) {
        assert_eq!(control.is_playing(), left.is_playing());
        assert_eq!(control.is_playing(), right.is_playing());
    }

    #[test]
    fn test_toggle_drives_both_views() {
        let (mut control, left, right) = pair();

        assert!(control.toggle());
        assert_in_sync(&control, &left, &right);
        assert!(left.is_playing());

        assert!(!control.toggle());
        assert_in_sync(&control, &left, &right);
        assert!(!right.is_playing());
    }

    #[test]
    fn test_toggle_twice_is_involution() {
        let (mut control, left, right) = pair();
        let before = control.is_playing();

        control.toggle();
        control.toggle();
        assert_eq!(control.is_playing(), before);
        assert_in_sync(&control, &left, &right);
    }

    #[test]
    fn test_toggle_without_sinks_is_noop() {
        let mut control = SyncedPlayback::new();
        assert!(!control.toggle());
        assert!(!control.is_playing());
    }

    #[test]
    fn test_ended_stops_both_regardless_of_reporter() {
        for reporter in [ViewId::Left, ViewId::Right] {
            let (mut control, left, right) = pair();
            control.toggle();
            assert!(control.is_playing());

            control.on_ended(reporter);
            assert!(!control.is_playing());
            assert_in_sync(&control, &left, &right);
        }
    }

    #[test]
    fn test_late_attach_matches_shared_state() {
        let asset = SourceAsset::new("clip.mp4", Bytes::new());
        let (mut control, _left, _right) = pair();
        control.toggle();

        let late = Arc::new(VideoSurface::bind(&asset, ViewId::Right));
        control.attach(late.clone());
        assert!(late.is_playing());
    }
}
