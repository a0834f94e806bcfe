//! xcstool - inspect and edit Xcode string catalogs
//!
//! A CLI tool and library for working with `.xcstrings` localization
//! catalogs: translation progress, editing of standard values, plural forms
//! and device variants, and consistency checks.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Catalog model, state derivation, editing operations and statistics
//! - `history`: Recently opened catalog files
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod history;
pub mod mcp;
