//! MCP (Model Context Protocol) server implementation.
//!
//! Service mode: the same analysis the CLI runs, exposed as MCP tools over
//! stdio. Tools return the rendered report and summary message and never
//! write report files.
//!
//! The reference word sets are loaded once at startup and shared read-only
//! by every tool call.

use std::sync::Arc;

use drat_core::analyze_text;
use drat_core::config::DEFAULT_MAX_INPUT_BYTES;
use drat_core::extract::{DocumentFormat, extract_text};
use drat_core::report::{LexicalReport, render};
use drat_core::word_sets::WordSets;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

/// Document name used when the caller does not supply one.
const DEFAULT_DOCUMENT_NAME: &str = "text";

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `check_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckTextParams {
    /// The text to analyze.
    pub text: String,
    /// Name shown in the report header (e.g. a file name or URL).
    pub document: Option<String>,
    /// Extra words to treat as common for this call only.
    #[serde(default)]
    pub extra_words: Vec<String>,
    /// How to read `text`: "plain-text" (default), "markdown" or "html".
    pub format: Option<DocumentFormat>,
}

/// Result of the `check_text` tool.
#[derive(Debug, Serialize)]
struct CheckTextResponse {
    #[serde(flatten)]
    report: LexicalReport,
    report_text: String,
    message: String,
}

/// MCP server exposing lexical analysis to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct DratServer {
    words: Arc<WordSets>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for DratServer {
    fn default() -> Self {
        Self::new(WordSets::builtin())
    }
}

#[tool_router]
impl DratServer {
    /// Create a server that analyzes against `words`.
    pub fn new(words: WordSets) -> Self {
        Self {
            words: Arc::new(words),
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, description and word list sizes")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "function_words": self.words.function_len(),
            "common_words": self.words.common_len(),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}\n{} function words, {} common words",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
                self.words.function_len(),
                self.words.common_len(),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Report lexical density and uncommon words of a text.
    #[tool(
        description = "Analyze text: returns lexical density, unique and uncommon word counts, the list of uncommon words, the full report text and a one-line summary. Writes no files."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_text(
        &self,
        Parameters(params): Parameters<CheckTextParams>,
    ) -> Result<CallToolResult, McpError> {
        let format = params.format.unwrap_or(DocumentFormat::PlainText);
        tracing::debug!(
            tool = "check_text",
            %format,
            extra_words = params.extra_words.len(),
            "executing MCP tool"
        );

        let text = extract_text(format, params.text.as_bytes(), Some(DEFAULT_MAX_INPUT_BYTES))
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let document = params.document.as_deref().unwrap_or(DEFAULT_DOCUMENT_NAME);

        let report = if params.extra_words.is_empty() {
            analyze_text(document, &text, &self.words)
        } else {
            analyze_text(document, &text, &self.words.with_supplement(&params.extra_words))
        }
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let rendered = render(&report);
        let response = CheckTextResponse {
            report,
            report_text: rendered.text,
            message: rendered.message,
        };

        let json = serde_json::to_string_pretty(&response)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "check_text",
            uncommon = response.report.uncommon_count(),
            density = response.report.lexical_density,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for DratServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use check_text to get the lexical density and uncommon words of a text.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
