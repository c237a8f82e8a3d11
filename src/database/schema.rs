use sqlx::SqlitePool;

const SQL_CREATE_PROFILES: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
  id TEXT PRIMARY KEY,
  email TEXT,
  display_name TEXT,
  age INTEGER,
  location TEXT,
  bio TEXT,
  image_url TEXT,
  spotify_connected INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
"#;

const SQL_CREATE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
  id INTEGER PRIMARY KEY,
  title TEXT,
  teaser_text TEXT,
  primary_region TEXT,
  length INTEGER,
  difficulty TEXT,
  primary_image_id TEXT,
  duration_min INTEGER,
  ascent INTEGER,
  descent INTEGER,
  max_altitude INTEGER,
  public_transport_friendly INTEGER NOT NULL DEFAULT 0
)
"#;

const SQL_CREATE_ACTIVITY_SWIPES: &str = r#"
CREATE TABLE IF NOT EXISTS activity_swipes (
  id TEXT PRIMARY KEY,
  profile_id TEXT NOT NULL,
  activity_id INTEGER NOT NULL,
  action TEXT NOT NULL CHECK (action IN ('like', 'dislike')),
  created_at TEXT NOT NULL DEFAULT (datetime('now')),
  UNIQUE (profile_id, activity_id)
)
"#;

const SQL_CREATE_USER_SWIPES: &str = r#"
CREATE TABLE IF NOT EXISTS user_swipes (
  id TEXT PRIMARY KEY,
  sender_id TEXT NOT NULL,
  receiver_id TEXT NOT NULL,
  action TEXT NOT NULL CHECK (action IN ('like', 'dislike')),
  created_at TEXT NOT NULL DEFAULT (datetime('now')),
  UNIQUE (sender_id, receiver_id)
)
"#;

// user_a < user_b, so a pair can only be stored once.
const SQL_CREATE_MATCHES: &str = r#"
CREATE TABLE IF NOT EXISTS matches (
  id TEXT PRIMARY KEY,
  user_a TEXT NOT NULL,
  user_b TEXT NOT NULL,
  created_at TEXT NOT NULL DEFAULT (datetime('now')),
  UNIQUE (user_a, user_b)
)
"#;

const SQL_CREATE_GROUP_MATCHES: &str = r#"
CREATE TABLE IF NOT EXISTS group_matches (
  id TEXT PRIMARY KEY,
  title TEXT,
  description TEXT,
  created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
"#;

const SQL_CREATE_GROUP_MATCH_PROFILES: &str = r#"
CREATE TABLE IF NOT EXISTS group_match_profiles (
  group_match_id TEXT NOT NULL,
  profile_id TEXT NOT NULL,
  PRIMARY KEY (group_match_id, profile_id)
)
"#;

const SQL_CREATE_CURRENT_USER: &str = r#"
CREATE TABLE IF NOT EXISTS current_user (
  user_id TEXT NOT NULL
)
"#;

const SQL_CREATE_INTERESTS: &str = r#"
CREATE TABLE IF NOT EXISTS interests (
  id TEXT PRIMARY KEY,
  display_name TEXT NOT NULL
)
"#;

const SQL_CREATE_PROFILE_INTERESTS: &str = r#"
CREATE TABLE IF NOT EXISTS profile_interests (
  profile_id TEXT NOT NULL,
  interest_id TEXT NOT NULL,
  PRIMARY KEY (profile_id, interest_id)
)
"#;

const SQL_CREATE_SKILLS: &str = r#"
CREATE TABLE IF NOT EXISTS skills (
  id TEXT PRIMARY KEY,
  display_name TEXT NOT NULL
)
"#;

const SQL_CREATE_SKILL_LEVELS: &str = r#"
CREATE TABLE IF NOT EXISTS skill_levels (
  id TEXT PRIMARY KEY,
  display_name TEXT NOT NULL
)
"#;

const SQL_CREATE_PROFILE_SKILLS: &str = r#"
CREATE TABLE IF NOT EXISTS profile_skills (
  profile_id TEXT NOT NULL,
  skill_id TEXT NOT NULL,
  skill_level_id TEXT NOT NULL,
  PRIMARY KEY (profile_id, skill_id)
)
"#;

const SCHEMA: [&str; 13] = [
    SQL_CREATE_PROFILES,
    SQL_CREATE_ACTIVITIES,
    SQL_CREATE_ACTIVITY_SWIPES,
    SQL_CREATE_USER_SWIPES,
    SQL_CREATE_MATCHES,
    SQL_CREATE_GROUP_MATCHES,
    SQL_CREATE_GROUP_MATCH_PROFILES,
    SQL_CREATE_CURRENT_USER,
    SQL_CREATE_INTERESTS,
    SQL_CREATE_PROFILE_INTERESTS,
    SQL_CREATE_SKILLS,
    SQL_CREATE_SKILL_LEVELS,
    SQL_CREATE_PROFILE_SKILLS,
];

/// Creates any missing tables. Safe to run on every start.
pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
