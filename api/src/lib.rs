// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup wiring
// - infrastructure: Postgres, file storage and Google Drive adapters
// - presentation: HTTP handlers and routing
// - application: ports, use cases and the payment/fulfillment services
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
