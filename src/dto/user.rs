use crate::domain;
use serde::Serialize;
use utoipa::ToSchema;

/// DTO for a user profile returned from the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize, PartialEq, Eq, Debug))]
pub struct User {
    #[schema(example = "0")]
    pub id: String,
    #[schema(example = "alice")]
    pub name: String,
    #[schema(example = "/placeholder.svg?height=32&width=32")]
    pub avatar: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
}

impl From<domain::user::User> for User {
    fn from(value: domain::user::User) -> Self {
        User {
            id: value.id,
            name: value.name,
            avatar: value.avatar,
            email: value.email,
        }
    }
}
