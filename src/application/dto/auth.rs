#[derive(Debug)]
pub struct SignInDTO {
    pub credential: String,
    pub auth_provider: String,
}

#[derive(Debug)]
pub struct RefreshDTO {
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct AuthTokensDTO {
    pub access_token: String,
    pub refresh_token: String,
    pub nik: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthenticatedDTO {
    pub user_id: String,
}
