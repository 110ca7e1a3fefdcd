//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod post_processor;
pub mod prediction;
pub mod remote_service;
pub mod session_store;
