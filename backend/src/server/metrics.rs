//! Optional Prometheus middleware.
//!
//! Metrics are best effort: when the exporter cannot be built the server
//! still starts and requests pass through an identity layer.

use std::fmt::Display;
use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

const METRICS_NAMESPACE: &str = "peerbridge";

/// Build the exporter, logging and discarding construction failures.
pub(crate) fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(error = %error, "Prometheus metrics disabled");
            None
        }
    }
}

/// Exporter serving `/metrics` from a private registry.
pub(crate) fn default_metrics() -> Option<PrometheusMetrics> {
    initialize_metrics(|| {
        PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
            .registry(prometheus::Registry::new())
            .endpoint("/metrics")
            .build()
    })
}

/// Wraps the exporter when present and boxes the body either way so both
/// branches share one service type.
#[derive(Clone)]
pub(crate) struct MetricsLayer(Option<Arc<PrometheusMetrics>>);

impl MetricsLayer {
    pub(crate) fn new(metrics: Option<PrometheusMetrics>) -> Self {
        Self(metrics.map(Arc::new))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        if let Some(metrics) = self.0.clone() {
            let pending = Compat::new((*metrics).clone()).new_transform(service);
            Box::pin(async move { Ok(boxed::service(pending.await?)) })
        } else {
            let passthrough = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
            Box::pin(async move { Ok(boxed::service(passthrough)) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_failures_disable_metrics() {
        assert!(initialize_metrics(|| -> Result<PrometheusMetrics, &str> { Err("boom") }).is_none());
    }

    #[test]
    fn default_exporter_builds_with_a_private_registry() {
        assert!(default_metrics().is_some());
        assert!(default_metrics().is_some(), "registries must not collide");
    }
}
