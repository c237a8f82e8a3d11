pub mod candidates_service;
pub mod deck_service;
pub mod group_match_service;
pub mod match_service;
pub mod profile_service;
pub mod profile_traits_service;
pub mod recommender_service;
pub mod seed_service;
pub mod swipe_service;
