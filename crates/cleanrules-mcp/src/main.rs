use std::path::Path;

use anyhow::{Context, Result};
use cleanrules_core::{
    get_rule, list_rules, render_all_as, render_as, render_index, Error, Format, RenderOptions,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Name under which the server registers itself in client config files.
const SERVER_NAME: &str = "cleanrules";

// --- Request types ---

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct GetRuleRequest {
    /// Rule id, e.g. "naming" or "error-handling". Call list_rules for the full set.
    id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct ExplainRuleRequest {
    /// Rule id, e.g. "naming" or "error-handling"
    id: String,
    /// Output format: "text" (default), "markdown" or "json"
    format: Option<String>,
    /// Include the bad/good example pair. Default: true.
    examples: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct GetGuideRequest {
    /// Output format: "markdown" (default), "text" or "json"
    format: Option<String>,
    /// Include the bad/good example pairs. Default: true.
    examples: Option<bool>,
}

// --- Tool bodies ---
//
// Kept free of rmcp types so they can be tested directly. Err carries the
// message shown to the client as an error tool result.

fn parse_format(format: Option<&str>, default: Format) -> Result<Format, String> {
    match format {
        None => Ok(default),
        Some(s) => s.parse(),
    }
}

fn options(examples: Option<bool>) -> RenderOptions {
    RenderOptions {
        examples: examples.unwrap_or(true),
    }
}

fn not_found_message(err: Error) -> String {
    match &err {
        Error::NotFound {
            suggestion: Some(s),
            ..
        } => format!("{err} (did you mean `{s}`?)"),
        Error::NotFound { .. } => format!("{err}. Call list_rules for the available ids."),
        _ => err.to_string(),
    }
}

fn rule_json(id: &str) -> Result<String, String> {
    let rule = get_rule(id).map_err(not_found_message)?;
    serde_json::to_string_pretty(rule).map_err(|e| e.to_string())
}

fn explain_text(req: &ExplainRuleRequest) -> Result<String, String> {
    let format = parse_format(req.format.as_deref(), Format::Text)?;
    let rule = get_rule(&req.id).map_err(not_found_message)?;
    render_as(rule, format, &options(req.examples)).map_err(|e| e.to_string())
}

fn guide_text(req: &GetGuideRequest) -> Result<String, String> {
    let format = parse_format(req.format.as_deref(), Format::Markdown)?;
    render_all_as(list_rules(), format, &options(req.examples)).map_err(|e| e.to_string())
}

fn to_result(outcome: Result<String, String>) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            tracing::debug!(error = %e, "tool call failed");
            CallToolResult::error(vec![Content::text(e)])
        }
    }
}

// --- Server ---

#[derive(Clone)]
pub struct CleanRulesServer {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CleanRulesServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "List clean-code rule ids and titles, in guide order")]
    fn list_rules(&self) -> Result<CallToolResult, McpError> {
        Ok(to_result(Ok(render_index(list_rules()))))
    }

    #[tool(
        description = "Get one rule as JSON: {id, title, description, guidance: [..], badExample, goodExample}"
    )]
    fn get_rule(
        &self,
        Parameters(req): Parameters<GetRuleRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(to_result(rule_json(&req.id)))
    }

    #[tool(
        description = "Explain one rule: description, guidance and a bad/good example pair. Use this when reviewing or writing code that the rule applies to."
    )]
    fn explain_rule(
        &self,
        Parameters(req): Parameters<ExplainRuleRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(to_result(explain_text(&req)))
    }

    #[tool(description = "Get the whole style guide, every rule in order")]
    fn get_guide(
        &self,
        Parameters(req): Parameters<GetGuideRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(to_result(guide_text(&req)))
    }
}

#[tool_handler]
impl ServerHandler for CleanRulesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(instructions().into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn instructions() -> String {
    format!(
        "{}\n\n## Rules\n{}",
        INSTRUCTIONS,
        render_index(list_rules())
    )
}

const INSTRUCTIONS: &str = r#"Clean-code style guide. Rules cover naming, function size, error handling, module layout, tests, variables, data modeling, comments and formatting.

## Tools
- `list_rules`: ids and titles.
- `explain_rule`: one rule with guidance and a bad/good example. Prefer this when a review comment or a code change touches a specific rule.
- `get_rule`: the same rule as JSON, for programmatic use.
- `get_guide`: the full guide (Markdown by default).

Cite rules by id (e.g. `error-handling`) when pointing out a violation."#;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    if std::env::args().nth(1).as_deref() == Some("init") {
        return init_project();
    }

    tracing::info!("cleanrules-mcp v{} starting", env!("CARGO_PKG_VERSION"));
    let service = CleanRulesServer::new()
        .serve(rmcp::transport::io::stdio())
        .await
        .inspect_err(|e| tracing::error!("MCP server error: {e}"))?;
    service.waiting().await?;
    Ok(())
}

/// stdout carries the MCP transport, so logs must go to stderr.
fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

// --- init ---

/// Write project-scoped MCP config files in the current directory so that
/// MCP clients working in this project discover cleanrules-mcp.
fn init_project() -> Result<()> {
    let binary_path = std::env::current_exe()?
        .canonicalize()?
        .to_string_lossy()
        .to_string();
    let cwd = std::env::current_dir()?;

    let mcp_json = init_mcp_json(&cwd, &binary_path)?;
    eprintln!("Wrote {}", mcp_json.display());
    let codex = init_codex(&cwd, &binary_path)?;
    eprintln!("Wrote {}", codex.display());
    Ok(())
}

/// Write .mcp.json, merging with any existing config.
fn init_mcp_json(cwd: &Path, binary_path: &str) -> Result<std::path::PathBuf> {
    let mcp_json_path = cwd.join(".mcp.json");
    let mut root: serde_json::Value = if mcp_json_path.exists() {
        let contents = std::fs::read_to_string(&mcp_json_path)
            .with_context(|| format!("reading {}", mcp_json_path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", mcp_json_path.display()))?
    } else {
        serde_json::json!({})
    };
    if !root.is_object() {
        anyhow::bail!("{} is not a JSON object", mcp_json_path.display());
    }

    if !root.get("mcpServers").is_some_and(|v| v.is_object()) {
        root["mcpServers"] = serde_json::json!({});
    }
    root["mcpServers"][SERVER_NAME] = serde_json::json!({
        "type": "stdio",
        "command": binary_path,
        "args": [],
    });

    std::fs::write(&mcp_json_path, serde_json::to_string_pretty(&root)?)?;
    Ok(mcp_json_path)
}

/// Write .codex/config.toml, merging with any existing config.
fn init_codex(cwd: &Path, binary_path: &str) -> Result<std::path::PathBuf> {
    let codex_dir = cwd.join(".codex");
    let config_toml_path = codex_dir.join("config.toml");

    let mut doc: toml_edit::DocumentMut = if config_toml_path.exists() {
        std::fs::read_to_string(&config_toml_path)?
            .parse()
            .with_context(|| format!("parsing {}", config_toml_path.display()))?
    } else {
        toml_edit::DocumentMut::new()
    };

    // An inline `mcp_servers = { ... }` is promoted to a regular table so its entries survive.
    let servers = doc
        .entry("mcp_servers")
        .or_insert(toml_edit::Item::Table(toml_edit::Table::new()));
    if let Some(inline) = servers.as_inline_table().cloned() {
        *servers = toml_edit::Item::Table(inline.into_table());
    } else if !servers.is_table() {
        *servers = toml_edit::Item::Table(toml_edit::Table::new());
    }

    let mut server = toml_edit::Table::new();
    server.insert("command", toml_edit::value(binary_path));
    server.insert("args", toml_edit::value(toml_edit::Array::new()));
    doc["mcp_servers"][SERVER_NAME] = toml_edit::Item::Table(server);

    std::fs::create_dir_all(&codex_dir)?;
    std::fs::write(&config_toml_path, doc.to_string())?;
    Ok(config_toml_path)
}
