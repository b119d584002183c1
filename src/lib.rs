//! Chowplan Library
//!
//! Dog-food portion calculation and purchase planning.

pub mod build_info;
pub mod feeding;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
