use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// Out-of-range values are clamped rather than rejected.
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct OffsetQuery {
    #[param(minimum = 0, default = 0)]
    pub offset: Option<i64>,
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: Option<i64>,
}
