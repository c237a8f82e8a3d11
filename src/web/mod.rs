pub mod middleware;
pub mod routes;

use axum::{
    middleware as axum_middleware,
    response::Redirect,
    routing::{get, get_service, post},
    Extension, Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::state::AppState;
use crate::swipe::DeckKind;
use self::middleware::auth as auth_middleware;
use self::routes::{chats, deck, profile, recommendations, swipes};

fn deck_routes(kind: DeckKind) -> Router<AppState> {
    Router::new()
        .route("/", get(deck::deck_page_handler))
        .route("/release", post(deck::release_handler))
        .route("/action", post(deck::action_handler))
        .route("/reload", post(deck::reload_handler))
        .route("/visuals", get(deck::visuals_handler))
        .route("/card/:id", get(deck::card_detail_handler))
        .layer(Extension(kind))
}

/// Full application router; `main` and the integration tests share it.
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .nest("/dashboard/match", deck_routes(DeckKind::Profiles))
        .nest("/dashboard/search", deck_routes(DeckKind::Hikes))
        .route("/dashboard/chats", get(chats::chats_handler))
        .route("/apinextjs/activities/swipes", post(swipes::activity_swipe_handler))
        .route("/apinextjs/users/swipes", post(swipes::profile_swipe_handler))
        .route("/api/hikes", get(recommendations::hikes_handler))
        .route("/api/userRecs", get(recommendations::my_recommendations_handler))
        .route(
            "/api/userRecs/:user_id",
            get(recommendations::user_recommendations_handler),
        )
        .route("/api/profile/me", get(profile::me_handler))
        .route("/api/groupmatches", get(profile::group_matches_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.pool.clone(),
            auth_middleware::require_auth,
        ));

    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard/match") }))
        .merge(protected_routes)
        .nest_service(
            "/assets",
            get_service(ServeDir::new("assets")).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
