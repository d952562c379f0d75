//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Expired-entry purge: reclaims memory held by expired store entries

mod purge;

pub use purge::spawn_purge_task;
