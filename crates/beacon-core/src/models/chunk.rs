use serde::{Deserialize, Serialize};

/// A retrieved unit of a tenant document.
///
/// Immutable once retrieved: later stages only read chunks through shared
/// references, and fusion emits re-scored copies via [`Chunk::rescored`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub doc_id: String,
    pub company_id: String,
    /// Heading path inside the document, outermost first.
    #[serde(default)]
    pub section_path: Vec<String>,
    pub title: String,
    pub content: String,
    /// Ordinal of the chunk within its document.
    pub position: u32,
    /// Character window of the chunk in the source document.
    #[serde(default)]
    pub window_start: u32,
    #[serde(default)]
    pub window_end: u32,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
}

impl Chunk {
    /// Section path joined for display, e.g. `Medical > PPO > Deductibles`.
    pub fn section(&self) -> String {
        self.section_path.join(" > ")
    }

    /// Copy with a new relevance score; content is untouched.
    pub fn rescored(&self, relevance_score: f64) -> Self {
        Self {
            relevance_score,
            ..self.clone()
        }
    }
}

/// Tenant scope passed to every search call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantFilter {
    pub company_id: String,
}

impl TenantFilter {
    pub fn new(company_id: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
        }
    }

    /// Whether `chunk` belongs to this tenant.
    pub fn allows(&self, chunk: &Chunk) -> bool {
        chunk.company_id == self.company_id
    }
}

/// Request-scoped retrieval context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalContext {
    pub company_id: String,
    pub request_id: String,
}

impl RetrievalContext {
    pub fn new(company_id: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            request_id: request_id.into(),
        }
    }

    pub fn tenant(&self) -> TenantFilter {
        TenantFilter::new(self.company_id.clone())
    }
}
