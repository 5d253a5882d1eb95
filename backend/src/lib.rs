//! peerbridge: course reviews, interview experiences and learning resources
//! shared between students.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the rules and the
//! ports, [`inbound`] adapts HTTP requests onto the driving ports and
//! [`outbound`] implements the driven ports over PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use inbound::http::trace::Trace;
