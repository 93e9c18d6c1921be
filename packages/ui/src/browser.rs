//! Direct DOM access the renderer does not cover: the `<video>` element,
//! the fullscreen API and programmatic downloads. Everything is a no-op
//! outside the browser.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// DOM id of the player's `<video>` element.
pub const VIDEO_ID: &str = "moviel-video";
/// DOM id of the player container that goes fullscreen.
pub const PLAYER_ID: &str = "moviel-player";

#[cfg(target_arch = "wasm32")]
fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

#[cfg(target_arch = "wasm32")]
fn video() -> Option<web_sys::HtmlVideoElement> {
    document()?
        .get_element_by_id(VIDEO_ID)?
        .dyn_into::<web_sys::HtmlVideoElement>()
        .ok()
}

/// Start or pause playback.
pub fn set_playing(playing: bool) {
    #[cfg(target_arch = "wasm32")]
    if let Some(video) = video() {
        if playing {
            if let Err(e) = video.play() {
                tracing::warn!("play() rejected: {:?}", e);
            }
        } else if let Err(e) = video.pause() {
            tracing::warn!("pause() failed: {:?}", e);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = playing;
}

pub fn current_time() -> Option<f64> {
    #[cfg(target_arch = "wasm32")]
    {
        video().map(|v| v.current_time())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

pub fn duration() -> Option<f64> {
    #[cfg(target_arch = "wasm32")]
    {
        video().map(|v| v.duration())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

pub fn seek_to(time: f64) {
    #[cfg(target_arch = "wasm32")]
    if let Some(video) = video() {
        video.set_current_time(time);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = time;
}

pub fn set_volume(volume: f64) {
    #[cfg(target_arch = "wasm32")]
    if let Some(video) = video() {
        video.set_volume(volume);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = volume;
}

pub fn set_muted(muted: bool) {
    #[cfg(target_arch = "wasm32")]
    if let Some(video) = video() {
        video.set_muted(muted);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = muted;
}

/// Enter or leave fullscreen on the player container.
pub fn set_fullscreen(on: bool) {
    #[cfg(target_arch = "wasm32")]
    if let Some(document) = document() {
        let result = if on {
            document
                .get_element_by_id(PLAYER_ID)
                .map(|el| el.request_fullscreen())
                .unwrap_or(Ok(()))
        } else {
            document.exit_fullscreen();
            Ok(())
        };
        if let Err(e) = result {
            tracing::warn!("fullscreen request failed: {:?}", e);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = on;
}

/// Whether the document is currently fullscreen. `None` outside the browser.
pub fn is_fullscreen() -> Option<bool> {
    #[cfg(target_arch = "wasm32")]
    {
        document().map(|d| d.fullscreen_element().is_some())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Ask the browser to download `url` under `file_name` via a hidden link.
pub fn trigger_download(url: &str, file_name: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = document() else { return };
        let Some(body) = document.body() else { return };
        let anchor = match document
            .create_element("a")
            .ok()
            .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok())
        {
            Some(anchor) => anchor,
            None => return,
        };
        anchor.set_href(url);
        anchor.set_download(file_name);
        let _ = anchor.set_attribute("style", "display: none");
        if body.append_child(&anchor).is_ok() {
            anchor.click();
            let _ = body.remove_child(&anchor);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!("download of {} as {} requested outside the browser", url, file_name);
}
