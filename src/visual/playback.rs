use bevy::prelude::Resource;

/// Run/stop state of the frame loop.
///
/// Ticking is an explicit state machine rather than a self-rescheduling
/// callback chain; `stop` guarantees that no further tick advances the
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Running,
    Stopped,
}

/// The only cancellable unit of work: the per-frame simulate+draw pass
#[derive(Resource, Debug, Default)]
pub struct Playback {
    state: PlaybackState,
}

impl Playback {
    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn start(&mut self) {
        self.state = PlaybackState::Running;
    }

    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_running() {
        assert!(Playback::default().is_running());
    }

    #[test]
    fn test_stop_then_start() {
        let mut playback = Playback::default();
        playback.stop();
        assert!(!playback.is_running());
        playback.start();
        assert!(playback.is_running());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut playback = Playback::default();
        playback.stop();
        playback.stop();
        assert!(!playback.is_running());
    }

    #[test]
    fn test_toggle_round_trips() {
        let mut playback = Playback::default();
        playback.toggle();
        assert!(!playback.is_running());
        playback.toggle();
        assert!(playback.is_running());
    }
}
