//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, CORS, WebSocket route
//! └── api_routes.rs   - Authenticated REST endpoints
//! ```
//!
//! # Route Types
//!
//! ## Open Routes
//!
//! - `GET /health` - Liveness probe
//! - `GET /ws` - WebSocket upgrade (token checked in the handler)
//!
//! ## API Routes (JWT required)
//!
//! - `/api/tasks` and `/api/tasks/{id}` - Task CRUD
//! - `PATCH /api/tasks/{id}/status` - Status reassignment
//! - `PATCH /api/tasks/{id}/move` - Kanban board move
//! - `/api/milestones` and `/api/milestones/{id}` - Milestone CRUD
//! - `PATCH /api/milestones/{id}/complete` - Mark complete

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
