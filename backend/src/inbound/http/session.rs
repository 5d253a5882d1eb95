//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The external auth service issues the private session cookie; this module
//! only reads the student id out of it and turns absence into `401` and a
//! non-admin caller into `403`.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Identity, StudentId};

pub(crate) const STUDENT_ID_KEY: &str = "student_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist an identity in the session cookie.
    pub fn persist_identity(&self, identity: Identity) -> Result<(), Error> {
        self.0
            .insert(STUDENT_ID_KEY, identity.student_id().get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The caller's identity, if the cookie carries a usable student id.
    pub fn identity(&self) -> Result<Option<Identity>, Error> {
        let raw = self
            .0
            .get::<i32>(STUDENT_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw {
            Some(id) if id > 0 => Ok(Some(Identity::new(StudentId::new(id)))),
            Some(id) => {
                tracing::warn!(id, "non-positive student id in session cookie");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Require an identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<Identity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require the administrator identity or return `403 Forbidden`.
    pub fn require_admin(&self, admin: StudentId) -> Result<Identity, Error> {
        let identity = self.require_identity()?;
        if identity.is_admin(admin) {
            Ok(identity)
        } else {
            Err(Error::forbidden("administrator access required"))
        }
    }
}

/// Reject a body `studentId` that names someone other than the caller.
pub(crate) fn ensure_acting_as(identity: Identity, claimed: StudentId) -> Result<(), Error> {
    if claimed == identity.student_id() {
        Ok(())
    } else {
        Err(Error::forbidden(
            "studentId does not match the signed-in student",
        ))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
