//! gallery-server: HTTP API for the multi-tenant image gallery
//!
//! Every `/api/images/{id}` route is gated on ownership of that image;
//! `POST /api/images` is gated on the creator role. Caller identity comes
//! from the `X-Verified-Claims` header set by the upstream authenticator.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
