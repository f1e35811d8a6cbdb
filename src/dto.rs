use chrono::{DateTime, NaiveDate};
use utoipa::OpenApi;
use validator::ValidationError;

pub mod action_item;
pub mod board;
pub mod card;
pub mod session;
pub mod user;

/// Registers the API's schemas and reusable error responses for OpenAPI documentation
#[derive(OpenApi)]
#[openapi(components(
    schemas(
        user::User,
        session::LoginRequest,
        card::CardKind,
        card::NewCard,
        card::RetroCard,
        action_item::NewActionItem,
        action_item::ActionItem,
        action_item::ActionItemDraft,
        board::BoardView,
        crate::routing_utils::ExtraInfo,
        crate::routing_utils::ValidationErrorSchema,
    ),
    responses(
        crate::routing_utils::BasicErrorResponse,
        err_resps::BasicError400,
        err_resps::BasicError401,
        err_resps::BasicError404,
        err_resps::BasicError500,
    )
))]
pub struct OpenApiSchemas;

/// Rejects strings which are empty or contain nothing but whitespace
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }

    Ok(())
}

/// Accepts an empty due date, a plain `YYYY-MM-DD` day, or a full RFC 3339 timestamp
pub(crate) fn validate_due_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }

    let parses_as_day = NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    let parses_as_timestamp = DateTime::parse_from_rfc3339(value).is_ok();
    if !parses_as_day && !parses_as_timestamp {
        return Err(ValidationError::new("due_date_format"));
    }

    Ok(())
}

/// Reusable OpenAPI response definitions for the error statuses the API shares
/// across endpoints
pub mod err_resps {
    use utoipa::ToResponse;

    #[derive(ToResponse)]
    #[response(
        description = "The submitted request body failed validation",
        example = json!({
            "error_code": "invalid_input",
            "error_description": "Submitted data was invalid.",
            "extra_info": {
                "username": [
                    {
                        "code": "length",
                        "message": null,
                        "params": {
                            "value": "",
                            "min": 1
                        }
                    }
                ]
            }
        })
    )]
    pub struct BasicError400 {
        pub error_code: String,
        pub error_description: String,
        pub extra_info: Option<String>,
    }

    #[derive(ToResponse)]
    #[response(
        description = "Nobody is logged in, so the board cannot be used",
        example = json!({
            "error_code": "unauthorized",
            "error_description": "You must be logged in to use the board.",
            "extra_info": null
        })
    )]
    pub struct BasicError401 {
        pub error_code: String,
        pub error_description: String,
        pub extra_info: Option<String>,
    }

    #[derive(ToResponse)]
    #[response(
        description = "The requested entity does not exist",
        example = json!({
            "error_code": "not_found",
            "error_description": "The requested entity could not be found.",
            "extra_info": null
        })
    )]
    pub struct BasicError404 {
        pub error_code: String,
        pub error_description: String,
        pub extra_info: Option<String>,
    }

    #[derive(ToResponse)]
    #[response(
        description = "Something unexpectedly failed inside the server",
        example = json!({
            "error_code": "internal_error",
            "error_description": "Could not access data to complete your request",
            "extra_info": null
        })
    )]
    pub struct BasicError500 {
        pub error_code: String,
        pub error_description: String,
        pub extra_info: Option<String>,
    }
}
