use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Extension, Form, Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::services::deck_service::{self, DeckNext};
use crate::state::AppState;
use crate::swipe::gesture::{self, Point};
use crate::swipe::{CandidateId, DeckKind, SwipeAction};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::BUILD_ID;

#[derive(Template)]
#[template(path = "deck.html")]
pub struct DeckTemplate {
    pub deck: deck_service::DeckView,
    pub build_id: &'static str,
}

pub async fn deck_page_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Extension(kind): Extension<DeckKind>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let deck = deck_service::build_deck_view(&state, &auth_user.id, kind).await;
    render(DeckTemplate {
        deck,
        build_id: BUILD_ID,
    })
}

#[derive(Debug, Deserialize)]
pub struct ReleaseForm {
    pub candidate_id: String,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

pub async fn release_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Extension(kind): Extension<DeckKind>,
    State(state): State<AppState>,
    Form(form): Form<ReleaseForm>,
) -> impl IntoResponse {
    let Some(candidate_id) = CandidateId::parse(kind, &form.candidate_id) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let start = Point::new(form.start_x, form.start_y);
    let end = Point::new(form.end_x, form.end_y);
    match deck_service::release(&state, auth_user.actor(), kind, &candidate_id, start, end).await {
        DeckNext::Detail(href) => Redirect::to(&href).into_response(),
        DeckNext::Deck => Redirect::to(&deck_path(kind)).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct ActionForm {
    pub candidate_id: String,
    pub action: String, // like|dislike
}

pub async fn action_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Extension(kind): Extension<DeckKind>,
    State(state): State<AppState>,
    Form(form): Form<ActionForm>,
) -> impl IntoResponse {
    let Some(action) = SwipeAction::parse(&form.action) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Some(candidate_id) = CandidateId::parse(kind, &form.candidate_id) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let applied = deck_service::act(&state, auth_user.actor(), kind, &candidate_id, action.direction()).await;
    if !applied {
        warn!(
            deck = kind.slug(),
            candidate_id = %candidate_id,
            "swipe action ignored: not the active card"
        );
    }
    Redirect::to(&deck_path(kind)).into_response()
}

pub async fn reload_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Extension(kind): Extension<DeckKind>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    deck_service::start_deck(&state, &auth_user.id, kind).await;
    Redirect::to(&deck_path(kind))
}

#[derive(Debug, Deserialize)]
pub struct VisualsQuery {
    pub dx: f64,
}

pub async fn visuals_handler(Query(q): Query<VisualsQuery>) -> Json<gesture::CardVisuals> {
    Json(gesture::project(q.dx))
}

#[derive(Template)]
#[template(path = "card_detail.html")]
pub struct CardDetailTemplate {
    pub detail: deck_service::CardDetailView,
    pub build_id: &'static str,
}

pub async fn card_detail_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Extension(kind): Extension<DeckKind>,
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let Some(id) = CandidateId::parse(kind, &raw_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let detail = match deck_service::load_card_detail(&state.pool, kind, &id).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Card detail load failed for {}: {}", raw_id, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let Some(detail) = detail else {
        return StatusCode::NOT_FOUND.into_response();
    };

    render(CardDetailTemplate {
        detail,
        build_id: BUILD_ID,
    })
}

fn deck_path(kind: DeckKind) -> String {
    format!("/dashboard/{}", kind.slug())
}

fn render(template: impl Template) -> axum::response::Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!("Template render failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
