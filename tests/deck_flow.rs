mod common;

use anyhow::Result;
use axum::{http::StatusCode, routing::get as get_route, Json, Router};
use serde_json::json;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use common::*;
use hyking::database::{current_user_repo, swipes_repo};

async fn hiker_with_hikes(ids: &[i64]) -> Result<SqlitePool> {
    let pool = memory_pool().await?;
    let activities: Vec<_> = ids
        .iter()
        .map(|id| json!({ "id": id, "title": format!("Hike {}", id), "primaryRegion": "Tirol" }))
        .collect();
    seed(
        &pool,
        json!({
            "currentUser": "me",
            "profiles": [{ "id": "me", "displayName": "Me", "email": "me@example.com" }],
            "activities": activities
        }),
    )
    .await?;
    Ok(pool)
}

/// Serves a fixed ranking on an ephemeral port and returns its base url.
async fn fake_recommender(ranking: Vec<&'static str>) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().route(
        "/api/py/recommendations",
        get_route(move || {
            let ranking = ranking.clone();
            async move { Json(json!({ "recommendedUserIDs": ranking })) }
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn empty_hike_feed_shows_exhausted_message() -> Result<()> {
    let pool = hiker_with_hikes(&[]).await?;
    let app = app(pool);

    let response = get(&app, "/dashboard/search").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await?;
    assert!(html.contains("No more activities available!"));
    assert!(html.contains("data-state=\"exhausted\""));
    Ok(())
}

#[tokio::test]
async fn long_drag_removes_active_card_and_records_like() -> Result<()> {
    let pool = hiker_with_hikes(&[1, 2, 3]).await?;
    let app = app(pool.clone());

    let html = body_text(get(&app, "/dashboard/search").await?).await?;
    assert!(html.contains("data-candidate-id=\"3\""));
    assert!(html.contains("data-threshold=\"100\""));
    assert!(html.contains("data-exit-accept=\"200\""));
    assert!(html.contains("data-exit-reject=\"-200\""));

    let response = post_form(
        &app,
        "/dashboard/search/release",
        "candidate_id=3&start_x=0&start_y=0&end_x=150&end_y=0",
    )
    .await?;
    assert_redirect(&response, "/dashboard/search");

    let html = body_text(get(&app, "/dashboard/search").await?).await?;
    assert!(html.contains("data-candidate-id=\"2\""));
    assert!(html.contains("Accepted: 1"));
    assert!(html.contains("Remaining: 2"));

    let recorded = wait_for_count(
        &pool,
        "SELECT COUNT(*) FROM activity_swipes WHERE activity_id = 3 AND action = 'like'",
        1,
    )
    .await?;
    assert_eq!(recorded, 1);
    Ok(())
}

#[tokio::test]
async fn resubmitted_release_does_not_decide_the_next_card() -> Result<()> {
    let pool = hiker_with_hikes(&[1, 2, 3]).await?;
    let app = app(pool.clone());
    get(&app, "/dashboard/search").await?;

    let form = "candidate_id=3&start_x=0&start_y=0&end_x=150&end_y=0";
    let first = post_form(&app, "/dashboard/search/release", form).await?;
    assert_redirect(&first, "/dashboard/search");
    let second = post_form(&app, "/dashboard/search/release", form).await?;
    assert_redirect(&second, "/dashboard/search");

    assert_eq!(
        wait_for_count(&pool, "SELECT COUNT(*) FROM activity_swipes", 1).await?,
        1
    );
    // give a wrongly spawned second dispatch the chance to land
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM activity_swipes").await?, 1);
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM activity_swipes WHERE activity_id = 2").await?,
        0
    );

    let html = body_text(get(&app, "/dashboard/search").await?).await?;
    assert!(html.contains("data-candidate-id=\"2\""));
    assert!(html.contains("Accepted: 1"));
    assert!(html.contains("Remaining: 2"));

    let garbled = post_form(
        &app,
        "/dashboard/search/release",
        "candidate_id=abc&start_x=0&start_y=0&end_x=150&end_y=0",
    )
    .await?;
    assert_eq!(garbled.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn short_drag_snaps_back() -> Result<()> {
    let pool = hiker_with_hikes(&[1, 2, 3]).await?;
    let app = app(pool.clone());
    get(&app, "/dashboard/search").await?;

    let response = post_form(
        &app,
        "/dashboard/search/release",
        "candidate_id=3&start_x=100&start_y=0&end_x=50&end_y=0",
    )
    .await?;
    assert_redirect(&response, "/dashboard/search");

    let html = body_text(get(&app, "/dashboard/search").await?).await?;
    assert!(html.contains("data-candidate-id=\"3\""));
    assert!(html.contains("Remaining: 3"));
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM activity_swipes").await?, 0);
    Ok(())
}

#[tokio::test]
async fn tap_opens_the_detail_page() -> Result<()> {
    let pool = hiker_with_hikes(&[7]).await?;
    let app = app(pool);
    get(&app, "/dashboard/search").await?;

    let response = post_form(
        &app,
        "/dashboard/search/release",
        "candidate_id=7&start_x=40&start_y=40&end_x=43&end_y=42",
    )
    .await?;
    assert_redirect(&response, "/dashboard/search/card/7");

    let detail = get(&app, "/dashboard/search/card/7").await?;
    assert_eq!(detail.status(), StatusCode::OK);
    let html = body_text(detail).await?;
    assert!(html.contains("Hike 7"));
    assert!(html.contains("Region: Tirol"));

    let missing = get(&app, "/dashboard/search/card/99").await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn buttons_only_act_on_the_active_card() -> Result<()> {
    let pool = hiker_with_hikes(&[1, 2]).await?;
    let app = app(pool.clone());
    get(&app, "/dashboard/search").await?;

    // 1 is not on top
    post_form(&app, "/dashboard/search/action", "candidate_id=1&action=dislike").await?;
    post_form(&app, "/dashboard/search/action", "candidate_id=2&action=dislike").await?;
    // stale resubmit of the same card
    post_form(&app, "/dashboard/search/action", "candidate_id=2&action=dislike").await?;

    let html = body_text(get(&app, "/dashboard/search").await?).await?;
    assert!(html.contains("Rejected: 1"));
    assert!(html.contains("Remaining: 1"));

    let bad = post_form(&app, "/dashboard/search/action", "candidate_id=1&action=maybe").await?;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn visuals_follow_the_drag() -> Result<()> {
    let pool = hiker_with_hikes(&[]).await?;
    let app = app(pool);

    let visuals = body_json(get(&app, "/dashboard/search/visuals?dx=200").await?).await?;
    assert_eq!(visuals["rotation_deg"], json!(25.0));
    assert_eq!(visuals["opacity"], json!(0.0));
    assert_eq!(visuals["accept"]["opacity"], json!(1.0));

    let rest = body_json(get(&app, "/dashboard/search/visuals?dx=0").await?).await?;
    assert_eq!(rest["rotation_deg"], json!(0.0));
    assert_eq!(rest["opacity"], json!(1.0));
    Ok(())
}

#[tokio::test]
async fn unreachable_recommender_leaves_profile_deck_loading() -> Result<()> {
    let pool = hiker_with_hikes(&[]).await?;
    let app = app(pool);

    let html = body_text(get(&app, "/dashboard/match").await?).await?;
    assert!(html.contains("data-state=\"loading\""));
    assert!(!html.contains("No more profiles available!"));
    Ok(())
}

#[tokio::test]
async fn recommendations_follow_the_ranking() -> Result<()> {
    let pool = hiker_with_hikes(&[]).await?;
    seed(
        &pool,
        json!({
            "profiles": [
                { "id": "ana", "displayName": "Ana" },
                {
                    "id": "ben",
                    "displayName": "Ben",
                    "interests": ["Photography", "Wild swimming"],
                    "skills": [{ "skill": "Endurance", "level": "Advanced" }]
                },
                { "id": "cat", "displayName": "Cat" }
            ]
        }),
    )
    .await?;
    let url = fake_recommender(vec!["cat", "me", "ghost", "ana", "ben"]).await?;
    let app = app_with(pool, |config| config.recommender_url = url);

    let recs = body_json(get(&app, "/api/userRecs").await?).await?;
    let ids: Vec<&str> = recs
        .as_array()
        .map(|a| a.iter().filter_map(|p| p["id"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec!["cat", "ana", "ben"]);
    assert_eq!(recs[2]["interests"], json!(["Photography", "Wild swimming"]));
    assert_eq!(
        recs[2]["skills"],
        json!([{ "skill": "Endurance", "level": "Advanced" }])
    );
    assert_eq!(recs[0]["interests"], json!([]));

    // the tail of the ranking is on top of the deck
    let html = body_text(get(&app, "/dashboard/match").await?).await?;
    assert!(html.contains("data-candidate-id=\"ben\""));
    assert!(html.contains("<li>Photography</li>"));
    Ok(())
}

#[tokio::test]
async fn mutual_like_from_the_deck_raises_a_toast() -> Result<()> {
    let pool = hiker_with_hikes(&[]).await?;
    seed(&pool, json!({ "profiles": [{ "id": "ana", "displayName": "Ana" }] })).await?;
    swipes_repo::upsert_user_swipe(
        &pool,
        swipes_repo::NewSwipe {
            id: "s-1",
            actor_id: "ana",
            target_id: "me",
            action: "like",
        },
    )
    .await?;
    current_user_repo::set_current_user_id(&pool, "me").await?;

    let url = fake_recommender(vec!["ana"]).await?;
    let app = app_with(pool.clone(), |config| config.recommender_url = url);
    get(&app, "/dashboard/match").await?;

    let response = post_form(&app, "/dashboard/match/action", "candidate_id=ana&action=like").await?;
    assert_redirect(&response, "/dashboard/match");
    assert_eq!(wait_for_count(&pool, "SELECT COUNT(*) FROM matches", 1).await?, 1);

    let mut toast_seen = false;
    for _ in 0..50 {
        let html = body_text(get(&app, "/dashboard/match").await?).await?;
        if html.contains("It&#x27;s a Match!") || html.contains("It's a Match!") {
            assert!(html.contains("/dashboard/chats"));
            toast_seen = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(toast_seen);

    let chats = body_text(get(&app, "/dashboard/chats").await?).await?;
    assert!(chats.contains("Ana"));
    Ok(())
}
