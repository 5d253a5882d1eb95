//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::{Identity, StudentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Stand-in for the external issuer: stores the path id in the session.
async fn sign_in(session: SessionContext, id: web::Path<i32>) -> ApiResult<HttpResponse> {
    session.persist_identity(Identity::new(StudentId::new(id.into_inner())))?;
    Ok(HttpResponse::Ok().finish())
}

/// Full API surface over `state`, plus `GET /test/sign-in/{id}`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .route("/test/sign-in/{id}", web::get().to(sign_in))
        .service(crate::inbound::http::api_scope())
}

/// Session cookie for `student_id`, issued through the sign-in route.
pub async fn signed_in_cookie(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    student_id: i32,
) -> Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/test/sign-in/{student_id}"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "sign-in failed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}
