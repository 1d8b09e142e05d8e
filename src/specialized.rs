//! Specialized validators for AI tool units.
//!
//! Generic structural validation cannot tell whether an agent tool is usable:
//! the agent relies on the tool's description, and each tool kind has its own
//! required target (endpoint, code body, workflow, server). Checks here are
//! purely additive. Unit types outside [`UnitKind`] get no extra issues.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::report::ValidationIssue;
use crate::types::{is_expression, normalize_unit_type, Unit};

/// Descriptions shorter than this are flagged as too weak.
pub const MIN_DESCRIPTION_LENGTH: usize = 15;

/// Search breadth above this is almost certainly a mistake.
pub const MAX_REASONABLE_TOP_K: f64 = 50.0;

/// Agent iteration caps above this risk runaway loops.
pub const MAX_REASONABLE_ITERATIONS: f64 = 50.0;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{+([A-Za-z_][A-Za-z0-9_]*)\}+").expect("internal built-in regex must compile")
});

/// The closed family of unit kinds with specialized validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    HttpRequestTool,
    CodeTool,
    VectorStoreTool,
    WorkflowTool,
    AgentTool,
    McpClientTool,
    CalculatorTool,
    ThinkTool,
    SerpApiTool,
    WikipediaTool,
    SearXngTool,
    WolframAlphaTool,
}

impl UnitKind {
    pub const ALL: [UnitKind; 12] = [
        UnitKind::HttpRequestTool,
        UnitKind::CodeTool,
        UnitKind::VectorStoreTool,
        UnitKind::WorkflowTool,
        UnitKind::AgentTool,
        UnitKind::McpClientTool,
        UnitKind::CalculatorTool,
        UnitKind::ThinkTool,
        UnitKind::SerpApiTool,
        UnitKind::WikipediaTool,
        UnitKind::SearXngTool,
        UnitKind::WolframAlphaTool,
    ];

    /// Normalized unit type identifier of this kind.
    pub fn type_id(&self) -> &'static str {
        match self {
            UnitKind::HttpRequestTool => "nodes-langchain.toolHttpRequest",
            UnitKind::CodeTool => "nodes-langchain.toolCode",
            UnitKind::VectorStoreTool => "nodes-langchain.toolVectorStore",
            UnitKind::WorkflowTool => "nodes-langchain.toolWorkflow",
            UnitKind::AgentTool => "nodes-langchain.agentTool",
            UnitKind::McpClientTool => "nodes-langchain.mcpClientTool",
            UnitKind::CalculatorTool => "nodes-langchain.toolCalculator",
            UnitKind::ThinkTool => "nodes-langchain.toolThink",
            UnitKind::SerpApiTool => "nodes-langchain.toolSerpApi",
            UnitKind::WikipediaTool => "nodes-langchain.toolWikipedia",
            UnitKind::SearXngTool => "nodes-langchain.toolSearXng",
            UnitKind::WolframAlphaTool => "nodes-langchain.toolWolframAlpha",
        }
    }

    /// Human-readable name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            UnitKind::HttpRequestTool => "HTTP Request Tool",
            UnitKind::CodeTool => "Code Tool",
            UnitKind::VectorStoreTool => "Vector Store Tool",
            UnitKind::WorkflowTool => "Workflow Tool",
            UnitKind::AgentTool => "AI Agent Tool",
            UnitKind::McpClientTool => "MCP Client Tool",
            UnitKind::CalculatorTool => "Calculator Tool",
            UnitKind::ThinkTool => "Think Tool",
            UnitKind::SerpApiTool => "SerpApi Tool",
            UnitKind::WikipediaTool => "Wikipedia Tool",
            UnitKind::SearXngTool => "SearXNG Tool",
            UnitKind::WolframAlphaTool => "Wolfram|Alpha Tool",
        }
    }

    /// Look up the kind of a unit type (full or short form).
    pub fn from_unit_type(unit_type: &str) -> Option<Self> {
        let normalized = normalize_unit_type(unit_type);
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_id() == normalized)
    }

    /// Run this kind's checks against a unit.
    pub fn validate(&self, unit: &Unit) -> Vec<ValidationIssue> {
        let mut out = Findings::new(unit);
        match self {
            UnitKind::HttpRequestTool => validate_http_request_tool(&mut out),
            UnitKind::CodeTool => validate_code_tool(&mut out),
            UnitKind::VectorStoreTool => validate_vector_store_tool(&mut out),
            UnitKind::WorkflowTool => validate_workflow_tool(&mut out),
            UnitKind::AgentTool => validate_agent_tool(&mut out),
            UnitKind::McpClientTool => validate_mcp_client_tool(&mut out),
            UnitKind::CalculatorTool | UnitKind::ThinkTool | UnitKind::WikipediaTool => {}
            UnitKind::SerpApiTool => require_credential(&mut out, *self, "serpApi"),
            UnitKind::SearXngTool => require_credential(&mut out, *self, "searXngApi"),
            UnitKind::WolframAlphaTool => require_credential(&mut out, *self, "wolframAlphaApi"),
        }
        out.issues
    }
}

/// Run specialized validation for a unit, if its kind is registered.
pub fn validate_specialized(unit: &Unit) -> Vec<ValidationIssue> {
    match UnitKind::from_unit_type(&unit.unit_type) {
        Some(kind) => kind.validate(unit),
        None => {
            log::debug!("no specialized validator for '{}'", unit.unit_type);
            Vec::new()
        }
    }
}

/// Issue collector bound to one unit.
struct Findings<'a> {
    unit: &'a Unit,
    issues: Vec<ValidationIssue>,
}

impl<'a> Findings<'a> {
    fn new(unit: &'a Unit) -> Self {
        Self {
            unit,
            issues: Vec::new(),
        }
    }

    fn error(&mut self, code: &str, property: &str, message: impl Into<String>) {
        let issue = ValidationIssue::error(message);
        self.push(issue, code, property);
    }

    fn warn(&mut self, code: &str, property: &str, message: impl Into<String>) {
        let issue = ValidationIssue::warning(message);
        self.push(issue, code, property);
    }

    fn push(&mut self, issue: ValidationIssue, code: &str, property: &str) {
        self.issues.push(
            issue
                .with_code(code)
                .with_property(property)
                .for_unit(self.unit.id.as_deref(), &self.unit.name),
        );
    }
}

fn check_description(out: &mut Findings, key: &str, label: &str) {
    let unit = out.unit;
    match unit.param_str(key) {
        None => out.error(
            "MISSING_TOOL_DESCRIPTION",
            key,
            format!(
                "{} has no {}; the agent uses it to decide when to call this tool",
                label, key
            ),
        ),
        Some(description) if description.trim().chars().count() < MIN_DESCRIPTION_LENGTH => out
            .warn(
                "WEAK_TOOL_DESCRIPTION",
                key,
                format!(
                    "{} {} is very short; describe what the tool does and when to use it",
                    label, key
                ),
            ),
        Some(_) => {}
    }
}

/// Check an endpoint URL. Expressions are resolved at run time and skipped.
fn check_url(out: &mut Findings, key: &str, value: &Value) {
    if is_expression(value) {
        return;
    }
    let Some(raw) = value.as_str() else {
        out.error("INVALID_URL", key, format!("{} must be a string", key));
        return;
    };
    match Url::parse(raw) {
        Ok(url) => match url.scheme() {
            "http" | "https" => {}
            other => out.error(
                "INVALID_URL_PROTOCOL",
                key,
                format!("URL must use http or https, got \"{}\"", other),
            ),
        },
        // Templated hosts cannot be parsed until placeholders are filled in
        Err(_) if raw.contains('{') => {}
        Err(e) => out.error(
            "INVALID_URL",
            key,
            format!("\"{}\" is not a valid URL: {}", raw, e),
        ),
    }
}

/// Check a numeric cap: must be positive, warned above `threshold`.
fn check_positive_bound(out: &mut Findings, key: &str, value: &Value, threshold: f64, what: &str) {
    if is_expression(value) {
        return;
    }
    let Some(n) = value.as_f64() else {
        out.error(
            "INVALID_VALUE",
            key,
            format!("{} must be a number", key),
        );
        return;
    };
    if n <= 0.0 {
        out.error(
            "INVALID_VALUE",
            key,
            format!("{} must be a positive number, got {}", key, value),
        );
    } else if n > threshold {
        out.warn(
            "HIGH_VALUE",
            key,
            format!(
                "{} of {} is unusually large for {}; values above {} are rarely useful",
                key, value, what, threshold
            ),
        );
    }
}

fn require_credential(out: &mut Findings, kind: UnitKind, credential: &str) {
    let unit = out.unit;
    if !unit.credentials.contains_key(credential) {
        out.error(
            "MISSING_CREDENTIALS",
            "credentials",
            format!("{} requires {} credentials", kind.label(), credential),
        );
    }
}

fn validate_http_request_tool(out: &mut Findings) {
    let unit = out.unit;
    let label = UnitKind::HttpRequestTool.label();
    check_description(out, "toolDescription", label);

    match unit.param("url") {
        Some(url) if !is_blank(url) => check_url(out, "url", url),
        _ => out.error("MISSING_URL", "url", format!("{} requires a url", label)),
    }

    check_placeholders(out);

    let authentication = unit.param_str("authentication");
    if matches!(
        authentication,
        Some("predefinedCredentialType") | Some("genericCredentialType")
    ) {
        if authentication == Some("predefinedCredentialType")
            && unit.param_str("nodeCredentialType").is_none()
        {
            out.error(
                "MISSING_CREDENTIAL_TYPE",
                "nodeCredentialType",
                "predefined credential authentication requires nodeCredentialType",
            );
        }
        if unit.credentials.is_empty() {
            out.error(
                "MISSING_CREDENTIALS",
                "credentials",
                format!("{} authentication is set but no credentials are attached", label),
            );
        }
    }
}

/// Compare `{name}` references in request templates with declared
/// placeholder definitions.
fn check_placeholders(out: &mut Findings) {
    let unit = out.unit;
    let declared: Vec<String> = unit
        .param("placeholderDefinitions")
        .and_then(|defs| defs.get("values"))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.get("name").and_then(Value::as_str))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let mut referenced: Vec<String> = Vec::new();
    for (key, value) in &unit.parameters {
        if key == "placeholderDefinitions" || key == "toolDescription" {
            continue;
        }
        collect_placeholders(value, &mut referenced);
    }

    for name in &referenced {
        if !declared.contains(name) {
            out.error(
                "UNDEFINED_PLACEHOLDER",
                "placeholderDefinitions",
                format!("placeholder {{{}}} is used but not defined", name),
            );
        }
    }
    for name in &declared {
        if !referenced.contains(name) {
            out.warn(
                "UNUSED_PLACEHOLDER",
                "placeholderDefinitions",
                format!("placeholder \"{}\" is defined but never used", name),
            );
        }
    }
}

fn collect_placeholders(value: &Value, found: &mut Vec<String>) {
    match value {
        Value::String(text) => {
            for captures in PLACEHOLDER.captures_iter(text) {
                let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                    continue;
                };
                // `{{ ... }}` is expression syntax, not a placeholder
                if whole.len() != name.len() + 2 {
                    continue;
                }
                let name = name.as_str().to_string();
                if !found.contains(&name) {
                    found.push(name);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_placeholders(item, found)),
        Value::Object(map) => map.values().for_each(|item| collect_placeholders(item, found)),
        _ => {}
    }
}

fn validate_code_tool(out: &mut Findings) {
    let unit = out.unit;
    let label = UnitKind::CodeTool.label();
    check_description(out, "description", label);

    let code_key = match unit.param_str("language") {
        Some("python") => "pythonCode",
        _ => "jsCode",
    };
    if unit.param_str(code_key).is_none() {
        out.error(
            "MISSING_CODE",
            code_key,
            format!("{} has no code to execute", label),
        );
    }

    if unit.param("specifyInputSchema").and_then(Value::as_bool) == Some(true) {
        let schema_key = match unit.param_str("schemaType") {
            Some("manual") => "inputSchema",
            _ => "jsonSchemaExample",
        };
        if unit.param_str(schema_key).is_none() {
            out.error(
                "MISSING_INPUT_SCHEMA",
                schema_key,
                format!("input schema is enabled but {} is empty", schema_key),
            );
        }
    }
}

fn validate_vector_store_tool(out: &mut Findings) {
    let unit = out.unit;
    check_description(out, "description", UnitKind::VectorStoreTool.label());
    if let Some(top_k) = unit.param("topK") {
        check_positive_bound(out, "topK", top_k, MAX_REASONABLE_TOP_K, "search breadth");
    }
}

fn validate_workflow_tool(out: &mut Findings) {
    let unit = out.unit;
    let label = UnitKind::WorkflowTool.label();
    check_description(out, "description", label);

    if unit.param_str("source") == Some("parameter") {
        if unit.param_str("workflowJson").is_none() {
            out.error(
                "MISSING_WORKFLOW",
                "workflowJson",
                format!("{} source is 'parameter' but workflowJson is empty", label),
            );
        }
        return;
    }

    // Either a plain id or a resource locator `{ "value": id }`
    let workflow_id = unit.param("workflowId").and_then(|value| match value {
        Value::Object(locator) => locator.get("value"),
        other => Some(other),
    });
    if workflow_id.map_or(true, is_blank) {
        out.error(
            "MISSING_WORKFLOW",
            "workflowId",
            format!("{} must reference the workflow to call", label),
        );
    }
}

fn validate_agent_tool(out: &mut Findings) {
    let unit = out.unit;
    check_description(out, "toolDescription", UnitKind::AgentTool.label());

    let max_iterations = unit
        .param("maxIterations")
        .or_else(|| unit.param("options").and_then(|o| o.get("maxIterations")));
    if let Some(value) = max_iterations {
        check_positive_bound(
            out,
            "maxIterations",
            value,
            MAX_REASONABLE_ITERATIONS,
            "agent iterations",
        );
    }
}

fn validate_mcp_client_tool(out: &mut Findings) {
    let unit = out.unit;
    let label = UnitKind::McpClientTool.label();
    let endpoint = ["sseEndpoint", "endpointUrl"]
        .into_iter()
        .find_map(|key| unit.param(key).filter(|v| !is_blank(v)).map(|v| (key, v)));

    match endpoint {
        Some((key, value)) => check_url(out, key, value),
        None => out.error(
            "MISSING_ENDPOINT",
            "sseEndpoint",
            format!("{} requires a server endpoint", label),
        ),
    }

    if matches!(
        unit.param_str("authentication"),
        Some("bearerAuth") | Some("headerAuth")
    ) && unit.credentials.is_empty()
    {
        out.error(
            "MISSING_CREDENTIALS",
            "credentials",
            format!("{} authentication is set but no credentials are attached", label),
        );
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
