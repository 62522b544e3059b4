/*!
 * MCP endpoint
 *
 * Responsibility:
 * - Expose the tool server over rmcp's streamable HTTP transport
 * - Sessions live in memory (LocalSessionManager)
 *
 * The returned service is mounted under `/mcp` behind the API-key gate.
 */

mod server;
pub mod tools;

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};

pub use server::LeaveManagerServer;
pub use tools::AuthStatus;

pub type McpService = StreamableHttpService<LeaveManagerServer, LocalSessionManager>;

pub fn service(status: AuthStatus) -> McpService {
    StreamableHttpService::new(
        move || Ok(LeaveManagerServer::new(status.clone())),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    )
}
