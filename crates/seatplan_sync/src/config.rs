//! Session configuration.

use seatplan_store::LAYOUT_DOC_ID;

/// Operator label used when none is supplied.
pub const DEFAULT_OPERATOR: &str = "Anonymous";

/// Configuration for an editing session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Free-text operator label recorded in audit entries.
    pub operator: String,
    /// Document id of the shared layout.
    pub doc_id: String,
}

impl SessionConfig {
    /// Creates a configuration for the given operator and the deployment's
    /// fixed layout document.
    pub fn new(operator: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            doc_id: LAYOUT_DOC_ID.to_string(),
        }
    }

    /// Overrides the document id. Only tests and tooling need this; a
    /// deployment has exactly one layout document.
    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = doc_id.into();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OPERATOR)
    }
}

/// Extracts the operator label from a URL query string.
///
/// Accepts either a bare query (`operator=Ana&x=1`) or a full URL
/// (everything before the first `?` is ignored). `+` is decoded as a
/// space. A missing or empty `operator` parameter yields
/// [`DEFAULT_OPERATOR`].
pub fn operator_from_query(query: &str) -> String {
    let query = match query.split_once('?') {
        Some((_, rest)) => rest,
        None => query,
    };

    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            if key == "operator" && !value.is_empty() {
                return value.replace('+', " ");
            }
        }
    }
    DEFAULT_OPERATOR.to_string()
}
