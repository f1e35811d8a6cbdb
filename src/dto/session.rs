use derive_more::Display;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// DTO for signing in to the board. Only the username appears in log output.
#[derive(Deserialize, Display, Validate, ToSchema)]
#[display("{username}")]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct LoginRequest {
    #[schema(example = "alice")]
    #[validate(length(min = 1))]
    pub username: String,
    #[schema(example = "hunter2")]
    #[validate(length(min = 1))]
    pub password: String,
}
