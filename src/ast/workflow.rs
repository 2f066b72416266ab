//! Workflow Types - declarative node graph parsed from YAML
//!
//! Contains the core parsed types:
//! - `Workflow`: named, ordered node list
//! - `WorkflowNode`: one step with its dependencies and config
//! - `NodeType`: enumerated step kind (extensible)
//! - `NodeConfig`: per-kind configuration, typed for the cost-bearing kind
//!
//! Authored node order is irrelevant to compilation but preserved for
//! display. Existence of `depends_on` targets is a validation concern, not
//! a parsing one.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Node kind tag.
///
/// Known kinds drive duration lookup and config typing; unknown strings
/// are preserved verbatim in `Other` so new kinds degrade gracefully
/// instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Datasource,
    LlmCall,
    CustomCode,
    Conditional,
    Loop,
    Output,
    #[serde(untagged)]
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Datasource => "datasource",
            Self::LlmCall => "llm_call",
            Self::CustomCode => "custom_code",
            Self::Conditional => "conditional",
            Self::Loop => "loop",
            Self::Output => "output",
            Self::Other(other) => other,
        }
    }

    /// The one kind that contributes to cost estimates.
    #[inline]
    pub fn is_llm_call(&self) -> bool {
        matches!(self, Self::LlmCall)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed configuration for `llm_call` nodes.
///
/// All fields are optional; the estimators substitute their documented
/// defaults for missing ones. Keys outside the schema are kept intact in
/// `extra` so a node round-trips through a plan unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmCallConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-kind node configuration.
///
/// The cost-bearing kind gets an explicit schema; every other kind keeps
/// an opaque map interpreted only by downstream consumers.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum NodeConfig {
    LlmCall(LlmCallConfig),
    Opaque(Map<String, Value>),
}

impl NodeConfig {
    fn from_raw(
        kind: &NodeType,
        raw: Map<String, Value>,
    ) -> std::result::Result<Self, serde_json::Error> {
        if kind.is_llm_call() {
            Ok(Self::LlmCall(serde_json::from_value(Value::Object(raw))?))
        } else {
            Ok(Self::Opaque(raw))
        }
    }

    /// Typed view for `llm_call` nodes; `None` for any other kind.
    pub fn as_llm_call(&self) -> Option<&LlmCallConfig> {
        match self {
            Self::LlmCall(config) => Some(config),
            Self::Opaque(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::LlmCall(config) => {
                config.model.is_none()
                    && config.prompt.is_none()
                    && config.max_tokens.is_none()
                    && config.extra.is_empty()
            }
            Self::Opaque(map) => map.is_empty(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::Opaque(Map::new())
    }
}

/// Node parsed from YAML (raw)
#[derive(Debug, Deserialize)]
struct WorkflowNodeRaw {
    id: String,
    #[serde(rename = "type")]
    kind: NodeType,
    #[serde(default)]
    depends_on: Vec<String>,
    #[serde(default)]
    config: Map<String, Value>,
}

/// One workflow step: identity, kind, dependencies, configuration.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    /// Ids this node must wait on. May be empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "NodeConfig::is_empty")]
    pub config: NodeConfig,
}

impl<'de> Deserialize<'de> for WorkflowNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = WorkflowNodeRaw::deserialize(deserializer)?;
        let config =
            NodeConfig::from_raw(&raw.kind, raw.config).map_err(serde::de::Error::custom)?;
        Ok(WorkflowNode {
            id: raw.id,
            kind: raw.kind,
            depends_on: raw.depends_on,
            config,
        })
    }
}

impl WorkflowNode {
    /// Build a node programmatically (tests, embedding callers).
    pub fn new(id: impl Into<String>, kind: NodeType) -> Self {
        Self {
            id: id.into(),
            kind,
            depends_on: Vec::new(),
            config: NodeConfig::default(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_llm_config(mut self, config: LlmCallConfig) -> Self {
        self.config = NodeConfig::LlmCall(config);
        self
    }
}

/// Workflow parsed from YAML (raw)
#[derive(Debug, Deserialize)]
struct WorkflowRaw {
    #[serde(default)]
    name: String,
    #[serde(default)]
    nodes: Vec<WorkflowNode>,
}

/// Workflow with Arc-wrapped nodes for efficient cloning into plans.
///
/// An empty node list parses fine; rejecting it is the validator's job
/// (and the compiler's, with its own error).
#[derive(Debug, Clone)]
pub struct Workflow {
    pub name: String,
    pub nodes: Vec<Arc<WorkflowNode>>,
}

impl<'de> Deserialize<'de> for Workflow {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = WorkflowRaw::deserialize(deserializer)?;
        Ok(Workflow {
            name: raw.name,
            nodes: raw.nodes.into_iter().map(Arc::new).collect(),
        })
    }
}

impl Workflow {
    /// Build a workflow programmatically (tests, embedding callers).
    pub fn new(name: impl Into<String>, nodes: Vec<WorkflowNode>) -> Self {
        Self {
            name: name.into(),
            nodes: nodes.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse the YAML authoring format.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
