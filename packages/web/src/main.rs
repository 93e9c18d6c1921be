use dioxus::prelude::*;

use store::AppConfig;
use ui::views::ShellView;
use ui::{provide_app_context, provide_navigation, use_auth, Access, AuthProvider, Destination};
use views::{
    Favorites, FilmsAdmin, GenreFilms, Genres, History, Home, Login, MovieDetails, Movies, Register,
    UsersAdmin, Watch,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Frame)]
        #[route("/watch/:id?:src&:title")]
        Watch { id: i64, src: String, title: String },

        #[layout(Shell)]
            #[route("/")]
            Home {},
            #[route("/movies?:search")]
            Movies { search: String },
            #[route("/movies/:id")]
            MovieDetails { id: i64 },
            #[route("/genres")]
            Genres {},
            #[route("/genres/:id")]
            GenreFilms { id: i64 },
            #[route("/login")]
            Login {},
            #[route("/register")]
            Register {},

            #[layout(RequireUser)]
                #[route("/favorites")]
                Favorites {},
                #[route("/history")]
                History {},
            #[end_layout]

            #[layout(RequireAdmin)]
                #[route("/users")]
                UsersAdmin {},
                #[route("/films")]
                FilmsAdmin {},
            #[end_layout]

            #[route("/:..segments")]
            NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CONFIG_TOML: &str = include_str!("../moviel.toml");

fn main() {
    dioxus::logger::init(tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

/// Bundled config, with `MOVIEL_API_URL` from the build environment
/// overriding the backend base URL.
fn load_config() -> AppConfig {
    let mut config = AppConfig::from_toml(CONFIG_TOML).unwrap_or_else(|e| {
        tracing::warn!("invalid {}, using defaults: {}", AppConfig::filename(), e);
        AppConfig::default()
    });
    if let Some(url) = option_env!("MOVIEL_API_URL") {
        config.api.base_url = url.to_string();
    }
    config
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);
    provide_app_context(config);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// The route a shared view's navigation request leads to. `Back` has none.
fn route_for(destination: Destination) -> Option<Route> {
    let route = match destination {
        Destination::Home => Route::Home {},
        Destination::Movies { search } => Route::Movies { search },
        Destination::Movie(id) => Route::MovieDetails { id },
        Destination::Genres => Route::Genres {},
        Destination::Genre(id) => Route::GenreFilms { id },
        Destination::Watch { id, src, title } => Route::Watch { id, src, title },
        Destination::Login => Route::Login {},
        Destination::Register => Route::Register {},
        Destination::Favorites => Route::Favorites {},
        Destination::History => Route::History {},
        Destination::AdminFilms => Route::FilmsAdmin {},
        Destination::AdminUsers => Route::UsersAdmin {},
        Destination::Back => return None,
    };
    Some(route)
}

/// Root layout: lets `ui` views navigate without knowing [`Route`].
#[component]
fn Frame() -> Element {
    let nav = use_navigator();
    let navigate = use_callback(move |destination: Destination| match route_for(destination) {
        Some(route) => {
            nav.push(route);
        }
        None => nav.go_back(),
    });
    provide_navigation(navigate);

    rsx! {
        Outlet::<Route> {}
    }
}

#[component]
fn Shell() -> Element {
    rsx! {
        ShellView {
            Outlet::<Route> {}
        }
    }
}

/// Send the visitor away when `access` does not admit them: to the login
/// page when signed out, home otherwise. Returns whether to render.
fn use_guard(access: Access) -> bool {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        let state = auth();
        if !access.allows(&state) {
            let target = if state.is_signed_in() {
                Route::Home {}
            } else {
                Route::Login {}
            };
            tracing::info!("redirecting from a {:?} view to {}", access, target);
            nav.replace(target);
        }
    });

    access.allows(&auth())
}

#[component]
fn RequireUser() -> Element {
    if !use_guard(Access::Authenticated) {
        return rsx! {};
    }
    rsx! {
        Outlet::<Route> {}
    }
}

#[component]
fn RequireAdmin() -> Element {
    if !use_guard(Access::Admin) {
        return rsx! {};
    }
    rsx! {
        Outlet::<Route> {}
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!("no route for /{}", segments.join("/"));
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(Route::Home {});
    });
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_matches_defaults() {
        let config = AppConfig::from_toml(CONFIG_TOML).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_destinations_map_to_routes() {
        assert_eq!(route_for(Destination::Movie(7)), Some(Route::MovieDetails { id: 7 }));
        assert_eq!(
            route_for(Destination::Movies { search: "alien".into() }),
            Some(Route::Movies { search: "alien".into() })
        );
        assert_eq!(route_for(Destination::AdminUsers), Some(Route::UsersAdmin {}));
        assert_eq!(route_for(Destination::Back), None);
    }

    #[test]
    fn test_watch_route_carries_source_and_title() {
        let route = route_for(Destination::Watch {
            id: 3,
            src: "mp4/Alien.mp4".into(),
            title: "Alien".into(),
        });
        assert_eq!(
            route,
            Some(Route::Watch {
                id: 3,
                src: "mp4/Alien.mp4".into(),
                title: "Alien".into(),
            })
        );
    }
}
