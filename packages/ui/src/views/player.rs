//! Full-window video player with a custom control bar.
//!
//! The `<video>` element stays the source of truth for playback; its media
//! events update a [`PlayerState`] and user input is applied back to the
//! element through [`crate::browser`].

use dioxus::prelude::*;
use store::player::{format_time, key_command, normalize_source, PlaybackStatus, PlayerCommand, PlayerState};

use crate::auth::use_auth;
use crate::browser::{self, PLAYER_ID, VIDEO_ID};
use crate::client::{use_api, use_config};
use crate::hooks::sleep_ms;
use crate::icons::{FaArrowLeft, FaCompress, FaExpand, FaPause, FaPlay, FaVolumeHigh, FaVolumeXmark};
use crate::nav::{use_navigate, Destination};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[component]
pub fn VideoPlayerView(id: i64, src: String, #[props(default)] title: String) -> Element {
    let config = use_config();
    let api = use_api();
    let auth = use_auth();
    let navigate = use_navigate();

    let idle_ms = u64::from(config.player.idle_hide_secs) * 1000;
    let seek_step = f64::from(config.player.seek_step_secs);

    let mut player = use_signal(|| {
        let mut state = PlayerState::new();
        state.load_source();
        state
    });

    // Recording history must not interrupt playback.
    use_hook(move || {
        if auth.peek().is_signed_in() {
            spawn(async move {
                if let Err(e) = api.client().add_watch_history(id).await {
                    tracing::warn!("could not record watch history for film {}: {}", id, e);
                }
            });
        }
    });

    let mut toggle_play = move || {
        let next = player.write().toggle_play();
        if let Some(playing) = next {
            browser::set_playing(playing);
        }
    };

    let mut sync_fullscreen = move || {
        if let Some(on) = browser::is_fullscreen() {
            if player.peek().fullscreen != on {
                player.write().fullscreen_changed(on);
            }
        }
    };

    let mut toggle_fullscreen = move || {
        sync_fullscreen();
        let on = player.write().toggle_fullscreen();
        browser::set_fullscreen(on);
    };

    let mut toggle_mute = move || {
        let muted = player.write().toggle_mute();
        browser::set_muted(muted);
    };

    let handle_key = move |evt: KeyboardEvent| {
        let key = evt.key().to_string();
        let Some(command) = key_command(&key, seek_step) else {
            return;
        };
        evt.prevent_default();
        match command {
            PlayerCommand::TogglePlay => toggle_play(),
            PlayerCommand::SeekBy(delta) => {
                let time = player.write().seek_by(delta);
                browser::seek_to(time);
            }
            PlayerCommand::ToggleFullscreen => toggle_fullscreen(),
            PlayerCommand::ToggleMute => toggle_mute(),
        }
    };

    let handle_pointer = move |_| {
        let epoch = player.write().pointer_moved();
        spawn(async move {
            sleep_ms(idle_ms).await;
            player.write().idle_elapsed(epoch);
        });
    };

    let source = src.trim();
    let state = player();
    if source.is_empty() || state.status == PlaybackStatus::Error {
        return rsx! {
            document::Link { rel: "stylesheet", href: VIEWS_CSS }
            div {
                class: "player player--unavailable",
                h2 { "Video not available" }
                p { "The video for this movie could not be loaded." }
                button {
                    class: "btn btn--primary",
                    onclick: move |_| navigate.call(Destination::Back),
                    "Go Back"
                }
            }
        };
    }
    let source = normalize_source(source);

    let current = format_time(state.current_time);
    let total = format_time(state.duration);
    let percent = state.progress_percent();
    let volume = if state.muted { 0.0 } else { state.volume };
    let controls_class = if state.controls_visible {
        "player__controls"
    } else {
        "player__controls player__controls--hidden"
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            id: PLAYER_ID,
            class: "player",
            tabindex: "0",
            onmounted: move |evt: MountedEvent| async move {
                if let Err(e) = evt.set_focus(true).await {
                    tracing::debug!("could not focus the player: {:?}", e);
                }
            },
            onkeydown: handle_key,
            onmousemove: handle_pointer,
            onresize: move |_| sync_fullscreen(),

            video {
                id: VIDEO_ID,
                class: "player__video",
                src: "{source}",
                preload: "metadata",
                onclick: move |_| toggle_play(),
                onloadedmetadata: move |_| {
                    let duration = browser::duration().unwrap_or(0.0);
                    player.write().metadata_loaded(duration);
                },
                ontimeupdate: move |_| {
                    if let Some(time) = browser::current_time() {
                        player.write().time_update(time);
                    }
                },
                onplay: move |_| player.write().played(),
                onpause: move |_| player.write().paused(),
                onerror: move |_| {
                    tracing::error!("video source failed to load for film {}", id);
                    player.write().failed();
                },
            }

            div {
                class: "player__top {controls_class}",
                button {
                    class: "player__button",
                    aria_label: "Back",
                    onclick: move |_| navigate.call(Destination::Back),
                    Icon { icon: FaArrowLeft, width: 18, height: 18 }
                }
                h2 { class: "player__title", "{title}" }
            }

            div {
                class: "{controls_class}",
                input {
                    class: "player__seek",
                    r#type: "range",
                    min: "0",
                    max: "{state.duration}",
                    step: "0.1",
                    value: "{state.current_time}",
                    style: "--progress: {percent}%",
                    oninput: move |evt: FormEvent| {
                        if let Ok(time) = evt.value().parse::<f64>() {
                            let time = player.write().seek(time);
                            browser::seek_to(time);
                        }
                    },
                }
                div {
                    class: "player__row",
                    button {
                        class: "player__button",
                        aria_label: if state.is_playing() { "Pause" } else { "Play" },
                        onclick: move |_| toggle_play(),
                        if state.is_playing() {
                            Icon { icon: FaPause, width: 18, height: 18 }
                        } else {
                            Icon { icon: FaPlay, width: 18, height: 18 }
                        }
                    }
                    button {
                        class: "player__button",
                        aria_label: "Mute",
                        onclick: move |_| toggle_mute(),
                        if state.muted || state.volume == 0.0 {
                            Icon { icon: FaVolumeXmark, width: 18, height: 18 }
                        } else {
                            Icon { icon: FaVolumeHigh, width: 18, height: 18 }
                        }
                    }
                    input {
                        class: "player__volume",
                        r#type: "range",
                        min: "0",
                        max: "1",
                        step: "0.05",
                        value: "{volume}",
                        oninput: move |evt: FormEvent| {
                            if let Ok(volume) = evt.value().parse::<f64>() {
                                let volume = player.write().set_volume(volume);
                                browser::set_volume(volume);
                                browser::set_muted(false);
                            }
                        },
                    }
                    span { class: "player__time", "{current} / {total}" }
                    span { class: "player__spacer" }
                    button {
                        class: "player__button",
                        aria_label: "Fullscreen",
                        onclick: move |_| toggle_fullscreen(),
                        if state.fullscreen {
                            Icon { icon: FaCompress, width: 18, height: 18 }
                        } else {
                            Icon { icon: FaExpand, width: 18, height: 18 }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    const STYLES: &str = include_str!("views.css");

    #[test]
    fn test_player_stylesheet_carries_idle_hide_rules() {
        assert!(STYLES.contains(".player {"));
        assert!(STYLES.contains(".player--unavailable"));
        assert!(STYLES.contains(".player__controls--hidden { opacity: 0;"));
    }
}
