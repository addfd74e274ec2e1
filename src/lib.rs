//! Live terminal viewer for a disk usage scan running in a remote backend.
//!
//! The backend pushes progress snapshots over a WebSocket. The
//! [`ConnectionManager`](crate::core::connection::ConnectionManager) keeps that socket alive and turns
//! frames into [`Event`](crate::core::events::Event)s, [`reduce`](crate::core::sync::reduce) folds them into
//! a [`SyncState`](crate::core::sync::SyncState), and the `ui` module renders a projection of it.

pub mod app;
pub mod config;
pub mod core;
pub mod export;
pub mod models;
pub mod ui;
