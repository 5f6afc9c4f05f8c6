pub mod avatar;
pub mod entry;
pub mod id;
pub mod profile;
pub mod user;
