//! Structured error types shared across the tbh crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`TbhError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the tbh workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum TbhError {
    /// Mixed graph structural errors (unknown vertices, bad edges, …).
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Binary mixed tree errors (restriction, missing contraction edge, …).
    #[error("tree error: {0}")]
    Tree(ErrorInfo),
    /// Hypergraph errors (malformed hyperedges, missing supremum, …).
    #[error("hypergraph error: {0}")]
    Hypergraph(ErrorInfo),
    /// Contraction engine and strategy errors.
    #[error("contraction error: {0}")]
    Contract(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl TbhError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            TbhError::Graph(info)
            | TbhError::Tree(info)
            | TbhError::Hypergraph(info)
            | TbhError::Contract(info)
            | TbhError::Serde(info) => info,
        }
    }

    /// Returns the stable error code carried by the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
