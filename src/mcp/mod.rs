//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes catalog statistics and editing to AI assistants over stdio. Tools
//! read and write the catalog named in each request and never touch the
//! recent-files list.
//!
//! ## Module Structure
//!
//! - `helpers`: Catalog loading, parameter parsing and error mapping
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameter and result types

mod helpers;
mod server;
pub mod types;

pub use server::{XcsMcpServer, run_server};
