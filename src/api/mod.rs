/*
 * Responsibility
 * - Public surface of the HTTP API (routes() re-export)
 */
pub mod handlers;
pub mod mcp;
mod routes;

pub use routes::routes;
