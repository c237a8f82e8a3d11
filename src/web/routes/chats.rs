use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Extension,
};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::match_service::{self, MatchView};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::BUILD_ID;

#[derive(Template)]
#[template(path = "chats.html")]
pub struct ChatsTemplate {
    pub matches: Vec<MatchView>,
    pub build_id: &'static str,
}

pub async fn chats_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let matches = match_service::load_match_views(&pool, &auth_user.id)
        .await
        .unwrap_or_else(|e| {
            warn!("Match list load failed for {}: {}", auth_user.id, e);
            vec![]
        });

    let template = ChatsTemplate {
        matches,
        build_id: BUILD_ID,
    };
    Html(template.render().unwrap_or_default())
}
