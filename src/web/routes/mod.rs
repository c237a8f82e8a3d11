pub mod chats;
pub mod deck;
pub mod profile;
pub mod recommendations;
pub mod swipes;

/// Cache-busting id stamped by the build script.
pub const BUILD_ID: &str = env!("HYKING_BUILD_ID");
