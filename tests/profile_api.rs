mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::*;

#[tokio::test]
async fn me_summarises_the_current_user() -> Result<()> {
    let pool = memory_pool().await?;
    seed(
        &pool,
        json!({
            "currentUser": "me",
            "profiles": [
                { "id": "me", "displayName": "Mia", "email": " mia@example.com ", "location": "Graz" },
                { "id": "ana", "displayName": "Ana" }
            ]
        }),
    )
    .await?;
    let app = app(pool);

    post_json(
        &app,
        "/apinextjs/users/swipes",
        Some("me"),
        json!({ "receiverId": "ana", "action": "like" }),
    )
    .await?;

    let response = get(&app, "/api/profile/me").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await?;
    assert_eq!(me["id"], "me");
    assert_eq!(me["displayName"], "Mia");
    assert_eq!(me["email"], "mia@example.com");
    assert_eq!(me["avatarInitial"], "M");
    assert_eq!(me["likesSent"], 1);
    assert_eq!(me["matchesCount"], 0);
    Ok(())
}

#[tokio::test]
async fn unknown_current_user_has_no_profile() -> Result<()> {
    let pool = memory_pool().await?;
    seed(&pool, json!({ "currentUser": "ghost" })).await?;
    let app = app(pool);

    let response = get(&app, "/api/profile/me").await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn group_matches_list_their_members() -> Result<()> {
    let pool = memory_pool().await?;
    let fixture = json!({
        "currentUser": "me",
        "profiles": [
            { "id": "me", "displayName": "Mia" },
            { "id": "ana", "displayName": "Ana" },
            { "id": "ben" }
        ],
        "groupMatches": [
            { "id": "g1", "title": "Sunday summit", "profileIds": ["me", "ana", "ben"] },
            { "id": "g2", "title": "Not mine", "profileIds": ["ana", "ben"] }
        ]
    });
    seed(&pool, fixture.clone()).await?;
    // seeding twice must not duplicate members
    seed(&pool, fixture).await?;
    let app = app(pool);

    let groups = body_json(get(&app, "/api/groupmatches").await?).await?;
    let groups = groups.as_array().cloned().unwrap_or_default();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["id"], "g1");
    assert_eq!(groups[0]["title"], "Sunday summit");

    let mut names: Vec<String> = groups[0]["profiles"]
        .as_array()
        .map(|members| {
            members
                .iter()
                .filter_map(|m| m["displayName"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    assert_eq!(names, vec!["Ana", "Mia", "No name provided"]);
    Ok(())
}

#[tokio::test]
async fn profile_detail_shows_interests_and_hiking_preferences() -> Result<()> {
    let pool = memory_pool().await?;
    let profile = |interests: serde_json::Value, level: &str| {
        json!({
            "currentUser": "me",
            "profiles": [
                { "id": "me" },
                {
                    "id": "ana",
                    "displayName": "Ana",
                    "interests": interests,
                    "skills": [
                        { "skill": "Endurance", "level": level },
                        { "skill": "Navigation", "level": "Beginner" }
                    ]
                }
            ]
        })
    };
    seed(&pool, profile(json!(["Photography", "Botany", "  "]), "Intermediate")).await?;
    let app = app(pool.clone());

    let response = get(&app, "/dashboard/match/card/ana").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await?;
    assert!(html.contains("Interests"));
    assert!(html.contains("<li>Botany</li>"));
    assert!(html.contains("<li>Photography</li>"));
    assert!(html.contains("Hiking Preferences"));
    assert!(html.contains("Endurance: Intermediate"));
    assert!(html.contains("Navigation: Beginner"));

    // re-seeding replaces the lists instead of appending
    seed(&pool, profile(json!(["Botany"]), "Advanced")).await?;
    let html = body_text(get(&app, "/dashboard/match/card/ana").await?).await?;
    assert!(!html.contains("Photography"));
    assert!(html.contains("Endurance: Advanced"));
    assert!(!html.contains("Endurance: Intermediate"));
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM profile_interests WHERE profile_id = 'ana'").await?,
        1
    );
    Ok(())
}
