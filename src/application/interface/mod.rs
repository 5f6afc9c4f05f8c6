pub mod db;
pub mod gateway;
pub mod identity;
pub mod token;
