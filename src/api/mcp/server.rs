use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};

use super::tools::{self, AuthStatus};

/// MCP server behind the API-key gate. One instance per MCP session; all of
/// them share the same read-only `AuthStatus`.
#[derive(Debug, Clone)]
pub struct LeaveManagerServer {
    status: AuthStatus,
}

impl LeaveManagerServer {
    pub fn new(status: AuthStatus) -> Self {
        Self { status }
    }

    fn dispatch(&self, name: &str) -> Result<CallToolResult, McpError> {
        let text = match name {
            tools::GENERATE_API_KEY => tools::generate_api_key(&self.status).map_err(|e| {
                tracing::error!(error = %e, "os rng failure while generating api key");
                McpError::internal_error("failed to generate api key", None)
            })?,
            tools::CHECK_AUTH_STATUS => tools::check_auth_status(&self.status),
            other => {
                return Err(McpError::invalid_params(
                    format!("unknown tool: {other}"),
                    None,
                ));
            }
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

impl ServerHandler for LeaveManagerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "leave-manager".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Leave manager MCP server. Calls require an API key unless authentication is disabled."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: tools::catalog(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = %request.name, "tool call");
        self.dispatch(&request.name)
    }
}
