mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::*;
use hyking::database::current_user_repo;

async fn two_profiles() -> Result<sqlx::SqlitePool> {
    let pool = memory_pool().await?;
    seed(
        &pool,
        json!({
            "profiles": [
                { "id": "ana", "displayName": "Ana" },
                { "id": "ben", "displayName": "Ben" }
            ],
            "activities": [
                { "id": 1, "title": "Ridge loop" },
                { "id": 2, "title": "Lake walk" }
            ]
        }),
    )
    .await?;
    Ok(pool)
}

#[tokio::test]
async fn protected_routes_require_a_user() -> Result<()> {
    let pool = two_profiles().await?;
    let app = app(pool);

    let response = get(&app, "/api/hikes").await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        &app,
        "/apinextjs/users/swipes",
        None,
        json!({ "receiverId": "ben", "action": "like" }),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn reciprocal_likes_report_a_single_match() -> Result<()> {
    let pool = two_profiles().await?;
    let app = app(pool.clone());

    let first = post_json(
        &app,
        "/apinextjs/users/swipes",
        Some("ana"),
        json!({ "receiverId": "ben", "action": "like" }),
    )
    .await?;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await?, json!({ "match": false }));

    let second = post_json(
        &app,
        "/apinextjs/users/swipes",
        Some("ben"),
        json!({ "receiverId": "ana", "action": "like" }),
    )
    .await?;
    assert_eq!(body_json(second).await?, json!({ "match": true }));

    // swiping again keeps one swipe row and one match row
    let again = post_json(
        &app,
        "/apinextjs/users/swipes",
        Some("ben"),
        json!({ "receiverId": "ana", "action": "like" }),
    )
    .await?;
    assert_eq!(body_json(again).await?, json!({ "match": true }));

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM user_swipes").await?, 2);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM matches").await?, 1);
    Ok(())
}

#[tokio::test]
async fn dislike_never_matches() -> Result<()> {
    let pool = two_profiles().await?;
    let app = app(pool.clone());

    post_json(
        &app,
        "/apinextjs/users/swipes",
        Some("ana"),
        json!({ "receiverId": "ben", "action": "like" }),
    )
    .await?;
    let response = post_json(
        &app,
        "/apinextjs/users/swipes",
        Some("ben"),
        json!({ "receiverId": "ana", "action": "dislike" }),
    )
    .await?;
    assert_eq!(body_json(response).await?, json!({ "match": false }));
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM matches").await?, 0);
    Ok(())
}

#[tokio::test]
async fn bad_profile_swipes_are_rejected() -> Result<()> {
    let pool = two_profiles().await?;
    let app = app(pool.clone());

    let cases = [
        json!({ "receiverId": "ana", "action": "like" }),
        json!({ "receiverId": "nobody", "action": "like" }),
        json!({ "receiverId": "ben", "action": "superlike" }),
    ];
    for body in cases {
        let response = post_json(&app, "/apinextjs/users/swipes", Some("ana"), body).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM user_swipes").await?, 0);
    Ok(())
}

#[tokio::test]
async fn activity_swipes_hide_hikes_from_the_feed() -> Result<()> {
    let pool = two_profiles().await?;
    let app = app(pool.clone());

    let response = post_json(
        &app,
        "/apinextjs/activities/swipes",
        Some("ana"),
        json!({ "activityId": 1, "action": "dislike" }),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?, json!({ "success": true }));

    let unknown = post_json(
        &app,
        "/apinextjs/activities/swipes",
        Some("ana"),
        json!({ "activityId": 999, "action": "like" }),
    )
    .await?;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

    current_user_repo::set_current_user_id(&pool, "ana").await?;
    let hikes = body_json(get(&app, "/api/hikes").await?).await?;
    let ids: Vec<i64> = hikes
        .as_array()
        .map(|a| a.iter().filter_map(|h| h["id"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![2]);
    Ok(())
}
