pub mod account;
pub mod listing;
pub mod profile;

pub use account::{avatar_url, AccountCredentials, AccountPublic};
pub use listing::Listing;
pub use profile::{
    Experience, OwnerSummary, ProfileRow, ProfileView, ProfileWithOwnerRow, SocialLinks,
};
