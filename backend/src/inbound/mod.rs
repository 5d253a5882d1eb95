//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTTP handlers for the REST surface and the typed query layer live under
//! [`http`].

pub mod http;
