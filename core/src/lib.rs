//! API client for the workspace management service.
//!
//! # Overview
//! `ApiClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `Api` runs the round
//! trip over `reqwest`, exposing one async method per REST endpoint.
//!
//! # Design
//! - Both clients are stateless apart from the base URL (and, for `Api`, the
//!   pooled HTTP client).
//! - Every operation is split into `build_*` (produces the request) and a
//!   generic `parse_json` / `parse_empty`, so the I/O boundary is explicit.
//! - DTOs live in `workspace-types`, shared with the mock server; the
//!   end-to-end tests catch drift between routes on either side.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod provisioners;

pub use api::Api;
pub use client::{workspaces_url, ApiClient, ME};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use provisioners::provisioners;
pub use workspace_types as types;
