//! File I/O operations for documents.
//!
//! This module provides functionality to load JSON or YAML documents from
//! disk or stdin, optionally gzip-compressed.

pub mod loader;
