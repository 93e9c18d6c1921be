//! Film detail page: metadata, watch/download, "My List", reviews and
//! similar films.

use dioxus::prelude::*;
use store::catalog::similar_films;
use store::clock::{format_long_date, now_iso};
use store::download::{download_file_name, local_video_path, DownloadProgress, WatchAction};
use store::reviews::{author_initial, author_name, ReviewDraft, ReviewWindow};
use store::Film;

use crate::auth::use_auth;
use crate::browser;
use crate::client::{use_api, use_config};
use crate::components::{ErrorBanner, FilmGrid, Spinner, StarRating};
use crate::hooks::{sleep_ms, use_api_resource, use_prop_signal, FetchState};
use crate::icons::{FaCheck, FaDownload, FaPlay, FaPlus, FaStar};
use crate::nav::{use_navigate, Destination};
use crate::Icon;

#[component]
pub fn MovieDetailsView(id: i64) -> Element {
    let config = use_config();
    let api = use_api();
    let auth = use_auth();
    let navigate = use_navigate();
    let id = use_prop_signal(id);

    let film = use_api_resource(move |client| {
        let id = id();
        async move { client.film(id).await }
    });
    let mut favorites = use_api_resource(|client| async move {
        if client.is_authenticated() {
            client.favorites().await
        } else {
            Ok(Vec::new())
        }
    });
    let catalog = use_api_resource(|client| async move { client.all_films().await });

    // Set when a finished download assigns the film a local video path.
    let mut updated = use_signal(|| Option::<Film>::None);
    let mut progress = use_signal(DownloadProgress::default);
    let mut download_error = use_signal(|| Option::<String>::None);
    let mut favorite_busy = use_signal(|| false);

    let film = match FetchState::of(&film, "Failed to load movie details") {
        FetchState::Loading => return rsx! { Spinner { label: "Loading movie..." } },
        FetchState::Failed(message) => return rsx! { ErrorBanner { message } },
        FetchState::Ready(film) => match updated() {
            Some(newer) if newer.id == film.id => newer,
            _ => film,
        },
    };

    let film_id = film.id;
    let signed_in = auth().is_signed_in();
    let is_favorite = match &*favorites.read() {
        Some(Ok(list)) => list.iter().any(|f| f.film_id == film_id),
        _ => false,
    };
    let similar = match &*catalog.read() {
        Some(Ok(all)) => similar_films(&film, all, config.catalog.similar_limit),
        _ => Vec::new(),
    };

    let action = WatchAction::for_film(&film);
    let action_label = action.label();
    let downloading = progress().is_active();

    let toggle_favorite = move |_| {
        spawn(async move {
            favorite_busy.set(true);
            let client = api.client();
            let result = if is_favorite {
                client.remove_favorite(film_id).await
            } else {
                client.add_favorite(film_id).await
            };
            match result {
                Ok(()) => favorites.restart(),
                Err(e) => tracing::error!("updating favorites for film {} failed: {}", film_id, e),
            }
            favorite_busy.set(false);
        });
    };

    let handle_watch = {
        let title = film.title.clone();
        let action = action.clone();
        let settings = config.download.clone();
        move |_| match action.clone() {
            WatchAction::Watch { src } => navigate.call(Destination::Watch {
                id: film_id,
                src,
                title: title.clone(),
            }),
            WatchAction::Download { url } => {
                if progress.peek().is_active() {
                    return;
                }
                progress.set(DownloadProgress::start());
                download_error.set(None);
                browser::trigger_download(&url, &download_file_name(&title));

                let title = title.clone();
                let settings = settings.clone();
                spawn(async move {
                    let ticks = (settings.complete_after_ms / settings.tick_ms.max(1)).max(1);
                    for _ in 0..ticks {
                        sleep_ms(u64::from(settings.tick_ms)).await;
                        progress.write().tick(settings.step_percent);
                    }
                    match api.client().set_video_url(film_id, &local_video_path(&title)).await {
                        Ok(film) => updated.set(Some(film)),
                        Err(e) => {
                            tracing::error!("recording download of film {} failed: {}", film_id, e);
                            download_error.set(Some("Failed to update video URL".to_string()));
                        }
                    }
                    progress.write().complete();
                });
            }
            WatchAction::Unavailable => {}
        }
    };

    rsx! {
        section {
            class: "details",
            img { class: "details__cover", src: "{film.cover_url}", alt: "{film.title}" }
            div {
                class: "details__info",
                h1 { class: "details__title", "{film.title}" }
                div {
                    class: "details__meta",
                    if film.release_year > 0 {
                        span { "{film.release_year}" }
                    }
                    if film.duration > 0 {
                        span { "{film.duration} min" }
                    }
                    span {
                        class: "details__rating",
                        Icon { icon: FaStar, width: 14, height: 14 }
                        " {film.rating}"
                    }
                }
                div {
                    class: "details__genres",
                    for genre in film.genres.clone() {
                        a {
                            key: "{genre.id}",
                            class: "chip",
                            onclick: move |_| navigate.call(Destination::Genre(genre.id)),
                            "{genre.name}"
                        }
                    }
                }
                p { class: "details__description", "{film.description}" }

                div {
                    class: "details__actions",
                    button {
                        class: "btn btn--primary",
                        disabled: action == WatchAction::Unavailable || downloading,
                        onclick: handle_watch,
                        if matches!(action, WatchAction::Download { .. }) {
                            Icon { icon: FaDownload, width: 14, height: 14 }
                        } else {
                            Icon { icon: FaPlay, width: 14, height: 14 }
                        }
                        " {action_label}"
                    }
                    if signed_in {
                        button {
                            class: "btn btn--ghost",
                            disabled: favorite_busy(),
                            onclick: toggle_favorite,
                            if is_favorite {
                                Icon { icon: FaCheck, width: 14, height: 14 }
                            } else {
                                Icon { icon: FaPlus, width: 14, height: 14 }
                            }
                            " My List"
                        }
                    }
                }

                if downloading {
                    div {
                        class: "download-progress",
                        div {
                            class: "download-progress__bar",
                            div {
                                class: "download-progress__fill",
                                style: "width: {progress().percent()}%",
                            }
                        }
                        p { "{progress().label()}" }
                        p { class: "download-progress__hint", "{progress().hint()}" }
                    }
                }
                if let Some(message) = download_error() {
                    ErrorBanner { message }
                }
            }
        }

        ReviewSection { film: film.clone() }

        if !similar.is_empty() {
            section {
                class: "page-section",
                h2 { class: "page-section__title", "Similar Movies" }
                FilmGrid { films: similar }
            }
        }
    }
}

/// Review list with show more/less, and the write-a-review form for
/// signed-in users. A failed submission keeps the draft.
#[component]
fn ReviewSection(film: Film) -> Element {
    let config = use_config();
    let api = use_api();
    let auth = use_auth();
    let film_id = use_prop_signal(film.id);

    let mut reviews = use_api_resource(move |client| {
        let id = film_id();
        async move { client.film_reviews(id).await }
    });
    let step = config.catalog.reviews_step;
    let mut window = use_signal(move || ReviewWindow::new(step));
    let mut draft = use_signal(ReviewDraft::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let handle_submit = {
        let film = film.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let Some(user) = auth.peek().user.clone() else {
                return;
            };
            let current = draft.peek().clone();
            if let Err(message) = current.validate() {
                error.set(Some(message));
                return;
            }
            let submission = current.into_submission(&user, &film, now_iso());
            spawn(async move {
                submitting.set(true);
                error.set(None);
                match api.client().add_review(&submission).await {
                    Ok(()) => {
                        draft.write().reset();
                        reviews.restart();
                    }
                    Err(e) => {
                        tracing::error!("submitting review for film {} failed: {}", submission.film_id, e);
                        error.set(Some("Failed to submit review".to_string()));
                    }
                }
                submitting.set(false);
            });
        }
    };

    let signed_in = auth().is_signed_in();

    rsx! {
        section {
            class: "page-section reviews",
            h2 { class: "page-section__title", "Reviews" }

            {match FetchState::of(&reviews, "Failed to load reviews") {
                FetchState::Loading => rsx! { Spinner { label: "Loading reviews..." } },
                FetchState::Failed(message) => rsx! { ErrorBanner { message } },
                FetchState::Ready(list) if list.is_empty() => rsx! {
                    p { class: "empty-state", "No reviews yet. Be the first to review!" }
                },
                FetchState::Ready(list) => {
                    let total = list.len();
                    let current = window();
                    let shown = current.slice(&list).to_vec();
                    rsx! {
                        ul {
                            class: "reviews__list",
                            for review in shown {
                                li {
                                    key: "{review.id}",
                                    class: "review",
                                    div { class: "review__avatar", "{author_initial(review.user.as_ref())}" }
                                    div {
                                        class: "review__body",
                                        div {
                                            class: "review__header",
                                            strong { "{author_name(review.user.as_ref())}" }
                                            StarRating { rating: review.rating }
                                            span { class: "review__date", "{format_long_date(&review.created_at)}" }
                                        }
                                        if let Some(text) = review.review_text.as_deref().filter(|t| !t.trim().is_empty()) {
                                            p { class: "review__text", "{text}" }
                                        }
                                    }
                                }
                            }
                        }
                        if current.shows_controls(total) {
                            div {
                                class: "reviews__controls",
                                if current.has_more(total) {
                                    button {
                                        class: "btn btn--ghost",
                                        onclick: move |_| window.write().show_more(),
                                        "Show more"
                                    }
                                }
                                if current.is_expanded() {
                                    button {
                                        class: "btn btn--ghost",
                                        onclick: move |_| window.write().show_less(),
                                        "Show less"
                                    }
                                }
                            }
                        }
                    }
                }
            }}

            if signed_in {
                form {
                    class: "review-form",
                    onsubmit: handle_submit,
                    h3 { "Write a Review" }
                    div {
                        class: "rating-picker",
                        for n in 1..=5u8 {
                            button {
                                key: "{n}",
                                r#type: "button",
                                class: if draft().rating >= n { "rating-picker__star rating-picker__star--on" } else { "rating-picker__star" },
                                aria_label: "{n} stars",
                                onclick: move |_| draft.write().rating = n,
                                Icon { icon: FaStar, width: 20, height: 20 }
                            }
                        }
                    }
                    textarea {
                        class: "review-form__text",
                        placeholder: "Share your thoughts about this movie...",
                        value: draft().text,
                        oninput: move |evt: FormEvent| draft.write().text = evt.value(),
                    }
                    if let Some(message) = error() {
                        ErrorBanner { message }
                    }
                    button {
                        class: "btn btn--primary",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Submitting..." } else { "Submit Review" }
                    }
                }
            }
        }
    }
}
