pub mod avatar;
pub mod entry;
pub mod profile;
pub mod user;
