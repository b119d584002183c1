//! Chowplan Tools module
//!
//! MCP tool implementations for the dog-food planner.

pub mod planner;
pub mod status;
