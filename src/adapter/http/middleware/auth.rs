use crate::{
    adapter::http::middleware::extractor::AuthUser,
    application::{
        app_error::{AppError, AppResult},
        interactors::auth::AuthenticateInteractor,
    },
};
use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

pub async fn auth_middleware(
    interactor: AuthenticateInteractor,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = extract_bearer_token(&request)?.to_owned();
    let authenticated = interactor.execute(&token).await?;
    request.extensions_mut().insert(AuthUser {
        user_id: authenticated.user_id,
    });

    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> AppResult<&str> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::InvalidToken)?;

    let (scheme, token) = header.trim().split_once(' ').ok_or(AppError::InvalidToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AppError::InvalidToken);
    }
    Ok(token.trim())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::extract::Request;
    use rstest::rstest;

    use super::extract_bearer_token;

    fn request_with(header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/profile/");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[rstest]
    #[case("Bearer abc.def.ghi")]
    #[case("bearer abc.def.ghi")]
    #[case("Bearer   abc.def.ghi ")]
    fn test_bearer_token_extracted(#[case] header: &str) {
        let request = request_with(Some(header));
        assert_eq!(extract_bearer_token(&request).unwrap(), "abc.def.ghi");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("abc.def.ghi"))]
    #[case(Some("Basic dXNlcjpwYXNz"))]
    #[case(Some("Bearer "))]
    fn test_bearer_token_missing(#[case] header: Option<&str>) {
        let request = request_with(header);
        assert!(extract_bearer_token(&request).is_err());
    }
}
