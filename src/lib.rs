//! Milestonenest - Main Library
//!
//! Milestonenest is a project-management backend built with Rust, featuring
//! positional kanban task ordering and real-time event relay over WebSockets.
//!
//! # Overview
//!
//! This library provides the core functionality for the Milestonenest server:
//! - Task CRUD with per-project, per-status positional ordering
//! - Kanban moves that shift neighbours in the destination column
//! - Milestones with task-derived progress
//! - Room-scoped real-time event fan-out to project subscribers
//! - JWT authentication for both the REST surface and the socket handshake
//!
//! # Module Structure
//!
//! - **`server`** - configuration, shared state, and app construction
//! - **`routes`** - router assembly and REST endpoint wiring
//! - **`tasks`** / **`milestones`** - stores and handlers per entity
//! - **`realtime`** - connection registry, rooms, and the WebSocket handler
//! - **`auth`** / **`middleware`** - JWT verification and request guarding
//! - **`models`** - wire-level entity types
//! - **`error`** / **`response`** - HTTP error taxonomy and success envelopes
//!
//! # Usage
//!
//! ```rust,no_run
//! use milestonenest::server::config::ServerConfig;
//! use milestonenest::server::init::create_app;
//!
//! let config = ServerConfig::from_env();
//! let app = create_app(config);
//! // Serve `app` with axum.
//! ```

pub mod auth;
pub mod error;
pub mod middleware;
pub mod milestones;
pub mod models;
pub mod realtime;
pub mod response;
pub mod routes;
pub mod server;
pub mod tasks;
