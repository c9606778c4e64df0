//! Services Layer
//!
//! This module contains pure business logic extracted from HTTP handlers.

pub mod catalog_service;
