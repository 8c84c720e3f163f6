use actix_web::web;

use crate::api_error::ApiError;

pub mod game_handler;
pub mod health;

/// Turn body-deserialization failures into the shared JSON error shape
/// instead of actix's default plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::MalformedBody(err.to_string()).into())
}
