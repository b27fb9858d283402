pub mod artist_profile;
pub mod manager_profile;
pub mod music;
pub mod user;
pub mod user_profile;
