//! # Video player state machine
//!
//! The view owns a native `<video>` element and mirrors it into a
//! [`PlayerState`]. Media events (`loadedmetadata`, `timeupdate`, `play`,
//! `pause`, `error`) feed the state; user input (click, keys, sliders)
//! produces the commands the view forwards to the element.
//!
//! ```text
//! Idle ─load_source─▶ Loading ─metadata_loaded─▶ Ready ⇄ Playing ⇄ Paused
//!                        any state ─failed─▶ Error
//! ```
//!
//! Control bar visibility uses a single idle timer. Every pointer move shows
//! the controls and bumps `idle_epoch`; the view sleeps for the idle delay and
//! then calls [`PlayerState::idle_elapsed`] with the epoch it started with, so
//! only the most recent timer can hide the bar.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Error,
}

/// What the view should do to the media element after a key press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerCommand {
    TogglePlay,
    SeekBy(f64),
    ToggleFullscreen,
    ToggleMute,
}

/// Map a keyboard key (`KeyboardEvent.key`) to a player command.
pub fn key_command(key: &str, seek_step: f64) -> Option<PlayerCommand> {
    match key {
        " " => Some(PlayerCommand::TogglePlay),
        "ArrowRight" => Some(PlayerCommand::SeekBy(seek_step)),
        "ArrowLeft" => Some(PlayerCommand::SeekBy(-seek_step)),
        "f" | "F" => Some(PlayerCommand::ToggleFullscreen),
        "m" | "M" => Some(PlayerCommand::ToggleMute),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub status: PlaybackStatus,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub fullscreen: bool,
    pub controls_visible: bool,
    pub idle_epoch: u64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Idle,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            controls_visible: true,
            idle_epoch: 0,
        }
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_source(&mut self) {
        self.status = PlaybackStatus::Loading;
        self.current_time = 0.0;
        self.duration = 0.0;
    }

    pub fn metadata_loaded(&mut self, duration: f64) {
        self.duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        if matches!(self.status, PlaybackStatus::Idle | PlaybackStatus::Loading) {
            self.status = PlaybackStatus::Ready;
        }
    }

    pub fn failed(&mut self) {
        self.status = PlaybackStatus::Error;
        self.controls_visible = true;
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    /// Flip between playing and paused. Returns the new playing flag, which
    /// the view applies to the element. No effect before the media is ready.
    pub fn toggle_play(&mut self) -> Option<bool> {
        let next = match self.status {
            PlaybackStatus::Playing => PlaybackStatus::Paused,
            PlaybackStatus::Ready | PlaybackStatus::Paused => PlaybackStatus::Playing,
            _ => return None,
        };
        self.status = next;
        if next == PlaybackStatus::Paused {
            self.controls_visible = true;
        }
        Some(next == PlaybackStatus::Playing)
    }

    /// Native `play` event.
    pub fn played(&mut self) {
        if self.status != PlaybackStatus::Error {
            self.status = PlaybackStatus::Playing;
        }
    }

    /// Native `pause` event.
    pub fn paused(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
            self.controls_visible = true;
        }
    }

    pub fn time_update(&mut self, time: f64) {
        if time.is_finite() {
            self.current_time = time.max(0.0);
        }
    }

    /// Jump to `time`, clamped into `[0, duration]` when the duration is
    /// known. Returns the position to set on the element.
    pub fn seek(&mut self, time: f64) -> f64 {
        let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
        self.current_time = if self.duration > 0.0 {
            time.min(self.duration)
        } else {
            time
        };
        self.current_time
    }

    pub fn seek_by(&mut self, delta: f64) -> f64 {
        self.seek(self.current_time + delta)
    }

    pub fn set_volume(&mut self, volume: f64) -> f64 {
        self.volume = if volume.is_finite() { volume.clamp(0.0, 1.0) } else { 1.0 };
        if self.volume > 0.0 {
            self.muted = false;
        }
        self.volume
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    /// Record a fullscreen change the browser made on its own (Esc).
    pub fn fullscreen_changed(&mut self, on: bool) {
        self.fullscreen = on;
    }

    /// Show the controls and start a new idle period. Returns its epoch.
    pub fn pointer_moved(&mut self) -> u64 {
        self.controls_visible = true;
        self.idle_epoch = self.idle_epoch.wrapping_add(1);
        self.idle_epoch
    }

    /// Hide the controls if `epoch` is still the latest idle period and the
    /// video is playing.
    pub fn idle_elapsed(&mut self, epoch: u64) {
        if epoch == self.idle_epoch && self.is_playing() {
            self.controls_visible = false;
        }
    }

    /// Seek bar fill, 0–100.
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// `m:ss` for a position in seconds.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Local paths are served from the site root: exactly one leading `/`.
/// Absolute `http(s)` and `blob:` URLs pass through.
pub fn normalize_source(src: &str) -> String {
    let src = src.trim();
    if src.starts_with("http") || src.starts_with("blob:") {
        return src.to_string();
    }
    format!("/{}", src.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(duration: f64) -> PlayerState {
        let mut player = PlayerState::new();
        player.load_source();
        player.metadata_loaded(duration);
        player
    }

    #[test]
    fn test_lifecycle() {
        let mut player = PlayerState::new();
        assert_eq!(player.toggle_play(), None);
        player.load_source();
        assert_eq!(player.status, PlaybackStatus::Loading);
        player.metadata_loaded(120.0);
        assert_eq!(player.status, PlaybackStatus::Ready);
        assert_eq!(player.toggle_play(), Some(true));
        assert!(player.is_playing());
        player.failed();
        assert_eq!(player.status, PlaybackStatus::Error);
        assert_eq!(player.toggle_play(), None);
    }

    #[test]
    fn test_toggle_twice_from_paused_returns_to_paused() {
        let mut player = ready(60.0);
        player.toggle_play();
        player.paused();
        assert_eq!(player.status, PlaybackStatus::Paused);

        assert_eq!(player.toggle_play(), Some(true));
        assert_eq!(player.toggle_play(), Some(false));
        assert_eq!(player.status, PlaybackStatus::Paused);
    }

    #[test]
    fn test_seek_is_exact_in_range() {
        let mut player = ready(90.0);
        assert_eq!(player.seek(42.25), 42.25);
        assert_eq!(player.current_time, 42.25);
        assert_eq!(player.seek(500.0), 90.0);
        assert_eq!(player.seek(-3.0), 0.0);
    }

    #[test]
    fn test_seek_by_clamps() {
        let mut player = ready(25.0);
        player.time_update(20.0);
        assert_eq!(player.seek_by(10.0), 25.0);
        player.time_update(4.0);
        assert_eq!(player.seek_by(-10.0), 0.0);
    }

    #[test]
    fn test_idle_timer_only_latest_epoch_hides() {
        let mut player = ready(60.0);
        player.toggle_play();
        let first = player.pointer_moved();
        let second = player.pointer_moved();

        player.idle_elapsed(first);
        assert!(player.controls_visible);
        player.idle_elapsed(second);
        assert!(!player.controls_visible);

        // Paused video keeps its controls.
        let epoch = player.pointer_moved();
        player.toggle_play();
        player.idle_elapsed(epoch);
        assert!(player.controls_visible);
    }

    #[test]
    fn test_volume_and_mute() {
        let mut player = ready(1.0);
        assert!(player.toggle_mute());
        assert_eq!(player.set_volume(0.4), 0.4);
        assert!(!player.muted);
        assert_eq!(player.set_volume(3.0), 1.0);
        assert!(player.toggle_fullscreen());
    }

    #[test]
    fn test_browser_exit_from_fullscreen_is_synced() {
        let mut player = ready(1.0);
        assert!(player.toggle_fullscreen());
        player.fullscreen_changed(false);
        assert!(!player.fullscreen);
        // One press enters fullscreen again.
        assert!(player.toggle_fullscreen());
    }

    #[test]
    fn test_key_commands() {
        assert_eq!(key_command(" ", 10.0), Some(PlayerCommand::TogglePlay));
        assert_eq!(key_command("ArrowLeft", 10.0), Some(PlayerCommand::SeekBy(-10.0)));
        assert_eq!(key_command("f", 10.0), Some(PlayerCommand::ToggleFullscreen));
        assert_eq!(key_command("m", 10.0), Some(PlayerCommand::ToggleMute));
        assert_eq!(key_command("x", 10.0), None);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn test_normalize_source() {
        assert_eq!(normalize_source("mp4/a.mp4"), "/mp4/a.mp4");
        assert_eq!(normalize_source("///mp4/a.mp4"), "/mp4/a.mp4");
        assert_eq!(normalize_source("https://cdn/x.mp4"), "https://cdn/x.mp4");
        assert_eq!(normalize_source("blob:abc"), "blob:abc");
    }

    #[test]
    fn test_progress_percent() {
        let mut player = ready(200.0);
        player.time_update(50.0);
        assert_eq!(player.progress_percent(), 25.0);
        assert_eq!(PlayerState::new().progress_percent(), 0.0);
    }
}
