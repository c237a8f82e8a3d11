pub mod current_user_repo;
pub mod group_matches_repo;
pub mod hikes_repo;
pub mod profile_traits_repo;
pub mod profiles_repo;
pub mod schema;
pub mod swipes_repo;
