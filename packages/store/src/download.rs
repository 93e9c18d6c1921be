//! Watch/download action for the detail page and the simulated download.

use crate::models::Film;

/// The primary action offered for a film.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WatchAction {
    Watch { src: String },
    Download { url: String },
    Unavailable,
}

impl WatchAction {
    pub fn for_film(film: &Film) -> Self {
        if let Some(src) = film.playable_url() {
            WatchAction::Watch { src: src.to_string() }
        } else if let Some(url) = film.download_url() {
            WatchAction::Download { url: url.to_string() }
        } else {
            WatchAction::Unavailable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WatchAction::Watch { .. } => "Watch Now",
            WatchAction::Download { .. } => "Download",
            WatchAction::Unavailable => "Not available",
        }
    }
}

/// Title with every whitespace run replaced by `_`.
pub fn download_stem(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join("_")
}

pub fn download_file_name(title: &str) -> String {
    format!("{}.mp4", download_stem(title))
}

/// Video path recorded on the film once the download finishes.
pub fn local_video_path(title: &str) -> String {
    format!("mp4/{}", download_file_name(title))
}

/// Progress bar of a simulated download.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    percent: u8,
    active: bool,
}

impl DownloadProgress {
    pub fn start() -> Self {
        Self {
            percent: 0,
            active: true,
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance by `step`, capped at 100. Returns the new value.
    pub fn tick(&mut self, step: u8) -> u8 {
        if self.active {
            self.percent = self.percent.saturating_add(step).min(100);
        }
        self.percent
    }

    pub fn complete(&mut self) {
        self.percent = 100;
        self.active = false;
    }

    pub fn label(&self) -> String {
        format!("Downloading... {}%", self.percent)
    }

    pub fn hint(&self) -> &'static str {
        if self.percent < 100 {
            "Please wait"
        } else {
            "Almost done!"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(video: Option<&str>, torrent: Option<&str>) -> Film {
        let mut film: Film = serde_json::from_str(r#"{"id":1,"title":"The Big Sleep"}"#).unwrap();
        film.video_url = video.map(Into::into);
        film.torrent_url = torrent.map(Into::into);
        film
    }

    #[test]
    fn test_watch_action_resolution() {
        assert_eq!(
            WatchAction::for_film(&film(Some("mp4/x.mp4"), Some("t"))),
            WatchAction::Watch { src: "mp4/x.mp4".into() }
        );
        assert_eq!(
            WatchAction::for_film(&film(Some("none"), Some("http://t/x"))).label(),
            "Download"
        );
        assert_eq!(WatchAction::for_film(&film(None, None)), WatchAction::Unavailable);
        assert_eq!(WatchAction::Unavailable.label(), "Not available");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(download_file_name("The  Big\tSleep"), "The_Big_Sleep.mp4");
        assert_eq!(local_video_path("Up"), "mp4/Up.mp4");
    }

    #[test]
    fn test_progress_caps_at_100() {
        let mut progress = DownloadProgress::start();
        for _ in 0..9 {
            progress.tick(10);
        }
        assert_eq!(progress.percent(), 90);
        assert_eq!(progress.hint(), "Please wait");
        assert_eq!(progress.tick(30), 100);
        assert_eq!(progress.tick(10), 100);
        assert_eq!(progress.label(), "Downloading... 100%");

        progress.complete();
        assert!(!progress.is_active());
        assert_eq!(progress.tick(10), 100);
    }
}
