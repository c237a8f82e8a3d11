pub mod activities;
pub mod current_user;
pub mod group_matches;
pub mod matches;
pub mod profile_summary;
pub mod profile_traits;
pub mod profiles;

pub use activities::ActivityRow;
pub use current_user::CurrentUserRow;
pub use group_matches::{GroupMatchMemberRow, GroupMatchRow};
pub use matches::MatchRow;
pub use profile_summary::ProfileSummaryRow;
pub use profile_traits::{ProfileInterestRow, ProfileSkillRow};
pub use profiles::ProfileRow;
