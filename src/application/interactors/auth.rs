use std::sync::Arc;

use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::auth::{AuthTokensDTO, AuthenticatedDTO, RefreshDTO, SignInDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::entry::EntryWriter;
use crate::application::interface::gateway::profile::ProfileWriter;
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::application::interface::identity::IdentityVerifier;
use crate::application::interface::token::TokenIssuer;
use crate::domain::entities::entry::{Contact, ContactData};
use crate::domain::entities::profile::Profile;
use crate::domain::entities::user::{AuthProvider, User};

fn tokens_for(token_issuer: &dyn TokenIssuer, user: &User) -> AppResult<AuthTokensDTO> {
    let pair = token_issuer.issue(&user.id)?;
    Ok(AuthTokensDTO {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        nik: user.nik.clone(),
    })
}

#[derive(Clone)]
pub struct SignInInteractor {
    db_session: Arc<dyn DBSession>,
    identity_verifier: Arc<dyn IdentityVerifier>,
    user_reader: Arc<dyn UserReader>,
    user_writer: Arc<dyn UserWriter>,
    profile_writer: Arc<dyn ProfileWriter>,
    contact_writer: Arc<dyn EntryWriter<ContactData>>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl SignInInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        identity_verifier: Arc<dyn IdentityVerifier>,
        user_reader: Arc<dyn UserReader>,
        user_writer: Arc<dyn UserWriter>,
        profile_writer: Arc<dyn ProfileWriter>,
        contact_writer: Arc<dyn EntryWriter<ContactData>>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            db_session,
            identity_verifier,
            user_reader,
            user_writer,
            profile_writer,
            contact_writer,
            token_issuer,
        }
    }

    pub async fn execute(&self, dto: SignInDTO) -> AppResult<AuthTokensDTO> {
        let provider: AuthProvider = dto.auth_provider.parse()?;
        let identity = self.identity_verifier.verify(&dto.credential).await?;
        let email = identity.email.ok_or_else(|| {
            warn!("Identity token for subject {} carries no email", identity.sub);
            AppError::InvalidToken
        })?;

        let user = match self.user_reader.find_by_email(&email).await? {
            Some(user) => user,
            None => self.register(User::new(email, identity.sub, provider)).await?,
        };

        info!("User {} signed in", user.id);
        tokens_for(self.token_issuer.as_ref(), &user)
    }

    /// Creates the user with a default profile and an email contact. Losing a
    /// race against a concurrent first sign-in yields the winner's user.
    async fn register(&self, user: User) -> AppResult<User> {
        let user_id = match self.user_writer.insert(user.clone()).await {
            Ok(user_id) => user_id,
            Err(AppError::UserAlreadyExists) => {
                info!("User {} was registered by a concurrent sign-in", user.email);
                return self
                    .user_reader
                    .find_by_email(&user.email)
                    .await?
                    .ok_or(AppError::UserAlreadyExists);
            }
            Err(err) => return Err(err),
        };
        let profile_id = self.profile_writer.insert(Profile::default_for(user_id.clone())).await?;
        self.contact_writer
            .save(Contact::email(user_id, profile_id, user.email.clone()))
            .await?;
        self.db_session.commit().await?;
        info!("Registered user {} via {}", user.id, user.auth_provider.as_str());
        Ok(user)
    }
}

#[derive(Clone)]
pub struct RefreshInteractor {
    user_reader: Arc<dyn UserReader>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl RefreshInteractor {
    pub fn new(user_reader: Arc<dyn UserReader>, token_issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            user_reader,
            token_issuer,
        }
    }

    pub async fn execute(&self, dto: RefreshDTO) -> AppResult<AuthTokensDTO> {
        let user_id = self.token_issuer.decode_refresh(&dto.refresh_token)?;
        let user = self.user_reader.find_by_id(&user_id).await?.ok_or_else(|| {
            warn!("Refresh token for unknown user {}", user_id);
            AppError::InvalidToken
        })?;
        tokens_for(self.token_issuer.as_ref(), &user)
    }
}

#[derive(Clone)]
pub struct AuthenticateInteractor {
    user_reader: Arc<dyn UserReader>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthenticateInteractor {
    pub fn new(user_reader: Arc<dyn UserReader>, token_issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            user_reader,
            token_issuer,
        }
    }

    pub async fn execute(&self, access_token: &str) -> AppResult<AuthenticatedDTO> {
        let user_id = self.token_issuer.decode_access(access_token)?;
        let user = self
            .user_reader
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;
        Ok(AuthenticatedDTO {
            user_id: user.id.value.to_string(),
        })
    }
}
