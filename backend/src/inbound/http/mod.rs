//! HTTP inbound adapter exposing REST endpoints and the typed query layer.

pub mod dto;
pub mod error;
pub mod experiences;
pub mod health;
pub mod query;
pub mod resources;
pub mod reviews;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod trace;
pub(crate) mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Every `/api/v1` route with JSON and query-string errors mapped onto the
/// standard envelope.
///
/// Callers wrap the scope with their session middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use peerbridge::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(reviews::list_reviews)
        .service(reviews::reviews_for_course)
        .service(reviews::add_review)
        .service(reviews::toggle_like)
        .service(reviews::like_status)
        .service(experiences::list_experiences)
        .service(experiences::add_experience)
        .service(resources::list_resources)
        .service(resources::resources_by_skill)
        .service(resources::add_resource)
        .service(resources::extend_resource)
        .service(query::run_query)
}
