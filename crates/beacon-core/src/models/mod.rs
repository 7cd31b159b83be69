mod answer;
mod cache_entry;
mod chunk;
mod citation;
mod generation;
mod grounding;
mod pii;
mod query_profile;
mod retrieval_result;
mod routing_signals;
mod tier;
mod validation_result;

pub use answer::{
    AnswerMetadata, AnswerRequest, AnswerResponse, CacheLayer, Outcome, StageLatency,
};
pub use cache_entry::{CacheEntry, CachedAnswer};
pub use chunk::{Chunk, RetrievalContext, TenantFilter};
pub use citation::Citation;
pub use generation::{Generation, TokenUsage};
pub use grounding::GroundingMetrics;
pub use pii::{PiiCategory, PiiFinding, PiiReport};
pub use query_profile::{Entity, EntityKind, Intent, QueryProfile, QuerySignals};
pub use retrieval_result::{MethodScores, RetrievalLatency, RetrievalMethod, RetrievalResult};
pub use routing_signals::RoutingSignals;
pub use tier::Tier;
pub use validation_result::{CitationCheck, CitationRejection, ValidationResult};
