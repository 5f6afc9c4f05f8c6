use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: &Id<User>) -> AppResult<TokenPair>;
    fn decode_access(&self, token: &str) -> AppResult<Id<User>>;
    fn decode_refresh(&self, token: &str) -> AppResult<Id<User>>;
}
