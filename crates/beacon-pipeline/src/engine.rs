//! AnswerEngine: owns the collaborators and runs one request end to end.

use std::sync::Arc;
use std::time::Duration;

use beacon_cache::keys::exact_key;
use beacon_cache::{AnswerCache, CacheLookup, CacheWrite};
use beacon_core::config::BeaconConfig;
use beacon_core::constants::VERSION;
use beacon_core::errors::{BeaconError, BeaconResult, GenerationError, RetrievalError};
use beacon_core::models::{
    AnswerMetadata, AnswerRequest, AnswerResponse, CacheLayer, CachedAnswer, Chunk, Citation,
    Generation, Outcome, RetrievalContext, RetrievalMethod, StageLatency, Tier, TokenUsage,
    ValidationResult,
};
use beacon_core::traits::{CacheBackend, EmbeddingProvider, GenerationProvider, SearchProvider};
use beacon_observability::{events, MetricsSnapshot, PipelineMetrics};
use beacon_privacy::PiiRedactor;
use beacon_retrieval::HybridRetriever;
use beacon_routing::{derive_signals, downgrade_tier, escalate_tier, select_tier_with_reason};
use beacon_validation::OutputValidator;
use chrono::Utc;
use tokio::time::Instant;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

use crate::fallback;
use crate::prompt::{self, ParsedAnswer};
use crate::state::{self, AttemptFailure, AttemptState, RetryBudget};

/// The benefits answer engine.
///
/// Built once with [`AnswerEngine::new`], shared by reference across
/// requests, and torn down with [`AnswerEngine::shutdown`]. All request state
/// is local to [`AnswerEngine::answer`]; the only shared state is the cache
/// backend and the metrics counters.
pub struct AnswerEngine<S, E, G, C> {
    search: S,
    embedder: E,
    generator: G,
    cache: C,
    config: BeaconConfig,
    validator: OutputValidator,
    redactor: PiiRedactor,
    metrics: Arc<PipelineMetrics>,
}

/// A generated answer that has been validated.
struct Candidate {
    tier: Tier,
    parsed: ParsedAnswer,
    validation: ValidationResult,
}

/// Everything the attempt loop produced.
struct AttemptRun {
    result: Result<Outcome, AttemptFailure>,
    candidate: Option<Candidate>,
    usage: TokenUsage,
    escalations: usize,
    downgrades: usize,
    generation_ms: Vec<u64>,
    validation_ms: Vec<u64>,
}

impl<S, E, G, C> AnswerEngine<S, E, G, C>
where
    S: SearchProvider,
    E: EmbeddingProvider,
    G: GenerationProvider,
    C: CacheBackend,
{
    /// Validate `config` and assemble the engine.
    pub fn new(
        search: S,
        embedder: E,
        generator: G,
        cache: C,
        config: BeaconConfig,
    ) -> BeaconResult<Self> {
        config.validate()?;
        let redactor = PiiRedactor::new(config.privacy.clone());
        let validator = OutputValidator::new(config.validation.clone(), redactor.clone());
        info!(
            version = VERSION,
            embedder = embedder.name(),
            cache_enabled = config.cache.enabled,
            "answer engine initialized"
        );
        Ok(Self {
            search,
            embedder,
            generator,
            cache,
            config,
            validator,
            redactor,
            metrics: Arc::new(PipelineMetrics::new()),
        })
    }

    pub fn config(&self) -> &BeaconConfig {
        &self.config
    }

    /// Shared handle to the live counters.
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Stop the engine and return the final counters.
    pub fn shutdown(self) -> MetricsSnapshot {
        let snapshot = self.metrics.snapshot();
        info!(
            requests = snapshot.requests,
            escalations = snapshot.escalations,
            cache_hit_rate = snapshot.cache_hit_rate(),
            "answer engine shut down"
        );
        snapshot
    }

    /// Answer one question.
    ///
    /// Returns `Err` only for [`BeaconError::PipelineExhausted`]. When the
    /// request deadline passes, in-flight calls are dropped and a fixed
    /// fallback answer is returned.
    pub async fn answer(&self, request: AnswerRequest) -> BeaconResult<AnswerResponse> {
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let started = Instant::now();
        self.metrics.record_request();

        let span = beacon_observability::pipeline_span!(request_id, request.company_id);
        let deadline = Duration::from_millis(self.config.pipeline.request_deadline_ms);
        let run = self.run(&request, &request_id).instrument(span);

        let mut response = match tokio::time::timeout(deadline, run).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                self.metrics.record_exhausted();
                error!(request_id = %request_id, error = ?e, "pipeline exhausted");
                return Err(e);
            }
            Err(_) => {
                self.metrics.record_deadline_fallback();
                warn!(
                    request_id = %request_id,
                    deadline_ms = self.config.pipeline.request_deadline_ms,
                    "request deadline exceeded"
                );
                fallback::response(&request_id, Outcome::DeadlineExceeded)
            }
        };

        response.metadata.latency.total_ms = elapsed_ms(started);
        self.metrics.record_answer(response.tier);
        events::answer_completed(
            &request_id,
            response.metadata.outcome,
            response.tier,
            response.metadata.escalations,
            response.metadata.latency.total_ms,
        );
        Ok(response)
    }

    async fn run(&self, request: &AnswerRequest, request_id: &str) -> BeaconResult<AnswerResponse> {
        let mut latency = StageLatency::default();

        let stage = Instant::now();
        let profile = beacon_query::analyze(&request.query);
        latency.understanding_ms = elapsed_ms(stage);

        let cache = AnswerCache::new(&self.cache, &self.config.cache);
        let key = exact_key(&profile.normalized, &request.company_id);
        let retriever = HybridRetriever::new(&self.search, &self.embedder, &self.config.retrieval);

        // L0
        let stage = Instant::now();
        let mut cache_unavailable = false;
        let lookup = cache
            .lookup_exact(&key)
            .instrument(beacon_observability::cache_span!(request_id, "lookup_exact"))
            .await;
        latency.cache_lookup_ms = elapsed_ms(stage);
        match lookup {
            CacheLookup::Hit { answer, layer, .. } => {
                return Ok(self.cached_response(request_id, answer, layer, latency));
            }
            CacheLookup::Unavailable => cache_unavailable = true,
            CacheLookup::Miss => {}
        }

        let stage = Instant::now();
        let embedding = match retriever.embed_query(&request.query).await {
            Ok(v) => Some(v),
            Err(e) => {
                events::degradation_triggered(self.embedder.name(), &e.to_string(), "lexical_only");
                None
            }
        };
        let embed_ms = elapsed_ms(stage);

        // L1
        if let Some(embedding) = &embedding {
            let stage = Instant::now();
            let lookup = cache
                .lookup_semantic(&request.company_id, embedding)
                .instrument(beacon_observability::cache_span!(request_id, "lookup_semantic"))
                .await;
            latency.cache_lookup_ms += elapsed_ms(stage);
            match lookup {
                CacheLookup::Hit { answer, layer, .. } => {
                    return Ok(self.cached_response(request_id, answer, layer, latency));
                }
                CacheLookup::Unavailable => cache_unavailable = true,
                CacheLookup::Miss => {}
            }
        }
        if cache_unavailable {
            self.metrics.record_cache_unavailable();
        }
        self.metrics.record_cache_miss();

        let ctx = RetrievalContext::new(request.company_id.clone(), request_id);
        let retrieval = match retriever
            .retrieve_with_embedding(&request.query, embedding.as_deref(), &ctx)
            .await
        {
            Ok(mut retrieval) => {
                retrieval.latency.embed_ms = embed_ms;
                retrieval.latency.total_ms += embed_ms;
                retrieval
            }
            Err(RetrievalError::Empty) => {
                return Ok(self.no_information(&cache, &key, request_id, latency).await);
            }
            Err(e) => {
                self.metrics.record_retrieval_unavailable();
                warn!(error = %e, "retrieval unavailable, returning fallback");
                let mut response = fallback::response(request_id, Outcome::RetrievalUnavailable);
                response.metadata.latency = latency;
                return Ok(response);
            }
        };
        if retrieval.method != RetrievalMethod::Hybrid {
            self.metrics.record_retrieval_degraded();
        }
        latency.retrieval = Some(retrieval.latency);

        let stage = Instant::now();
        let signals = derive_signals(&profile, &retrieval);
        let (rule, tier) = select_tier_with_reason(&signals, &self.config.routing);
        events::tier_selected(tier, rule.as_str());
        latency.routing_ms = elapsed_ms(stage);

        let system_prompt = prompt::build_system_prompt(&retrieval.chunks);
        let run = self
            .attempt(&request.query, request_id, &system_prompt, &retrieval.chunks, tier)
            .await;
        latency.generation_ms = run.generation_ms;
        latency.validation_ms = run.validation_ms;

        let mut metadata = AnswerMetadata::new(request_id, Outcome::Answered);
        metadata.retrieved_chunks = retrieval.len();
        metadata.total_candidates = retrieval.total_candidates;
        metadata.retrieval_method = Some(retrieval.method);
        metadata.coverage = Some(retrieval.coverage);
        metadata.escalations = run.escalations;
        metadata.downgrades = run.downgrades;

        let outcome = match run.result {
            Ok(outcome) => outcome,
            Err(AttemptFailure::Exhausted { attempts }) => {
                return Err(BeaconError::PipelineExhausted { attempts });
            }
            Err(AttemptFailure::Permanent(e)) => {
                warn!(error = %e, "generation failed permanently, returning apology");
                return Ok(apology(metadata, latency, run.usage));
            }
            Err(AttemptFailure::Internal(e)) => {
                self.metrics.record_validation_internal();
                error!(error = %e, "validator rejected the retrieved evidence");
                return Ok(apology(metadata, latency, run.usage));
            }
        };
        let Some(candidate) = run.candidate else {
            error!(outcome = ?outcome, "attempt loop finished without a candidate");
            return Ok(apology(metadata, latency, run.usage));
        };

        let (answer, citations, pii_detected) = self.redact_candidate(&candidate);
        if pii_detected {
            self.metrics.record_pii_redaction();
        }
        metadata.outcome = outcome;
        metadata.grounding_score = Some(candidate.validation.grounding.score);
        metadata.pii_detected = pii_detected;

        let stage = Instant::now();
        let cached = CachedAnswer {
            answer: answer.clone(),
            citations: citations.clone(),
            tier: candidate.tier,
            grounding_score: candidate.validation.grounding.score,
            negative: false,
            cached_at: Utc::now(),
        };
        let write = cache
            .store(
                &key,
                &request.company_id,
                embedding.as_deref(),
                &cached,
                retrieval.len(),
            )
            .instrument(beacon_observability::cache_span!(request_id, "store"))
            .await;
        self.record_write(write, false, &mut metadata);
        latency.cache_write_ms = elapsed_ms(stage);
        metadata.latency = latency;

        Ok(AnswerResponse {
            answer,
            citations,
            tier: candidate.tier,
            from_cache: false,
            usage: run.usage,
            metadata,
        })
    }

    /// Generate, validate, and escalate or downgrade until the state
    /// machine reaches `Done` or `Failed`.
    async fn attempt(
        &self,
        query: &str,
        request_id: &str,
        system_prompt: &str,
        chunks: &[Chunk],
        initial: Tier,
    ) -> AttemptRun {
        let mut budget = RetryBudget::new(self.config.pipeline.max_retries);
        let mut candidate: Option<Candidate> = None;
        let mut usage = TokenUsage::default();
        let mut escalations = 0;
        let mut downgrades = 0;
        let mut generation_ms = Vec::new();
        let mut validation_ms = Vec::new();
        let mut attempt = 0usize;

        let mut state = AttemptState::Generating { tier: initial };
        let result = loop {
            state = match state {
                AttemptState::Generating { tier } => {
                    attempt += 1;
                    let span = beacon_observability::generation_span!(request_id, tier, attempt);
                    let started = Instant::now();
                    let result = self.generate(system_prompt, query, tier).instrument(span).await;
                    let elapsed = elapsed_ms(started);
                    generation_ms.push(elapsed);
                    match result {
                        Ok(generation) => {
                            usage += generation.usage;
                            AttemptState::Validating {
                                tier,
                                raw: generation.text,
                            }
                        }
                        Err(e) => {
                            self.metrics.record_generation_failure();
                            warn!(tier = %tier, attempt, error = %e, "generation attempt failed");
                            state::on_generation_error(
                                tier,
                                &e,
                                elapsed,
                                candidate.is_some(),
                                &mut budget,
                                &self.config.routing,
                            )
                        }
                    }
                }
                AttemptState::Validating { tier, raw } => {
                    let parsed = prompt::parse_answer(&raw, chunks);
                    let span = beacon_observability::validation_span!(request_id, tier);
                    let started = Instant::now();
                    let result = span.in_scope(|| {
                        self.validator
                            .validate_response(&parsed.text, &parsed.citations, chunks, tier)
                    });
                    validation_ms.push(elapsed_ms(started));
                    match result {
                        Ok(validation) => {
                            let next = state::on_validation(tier, &validation, &mut budget);
                            candidate = Some(Candidate {
                                tier,
                                parsed,
                                validation,
                            });
                            next
                        }
                        Err(e) => AttemptState::Failed(AttemptFailure::Internal(e)),
                    }
                }
                AttemptState::Escalate { from } => {
                    let to = escalate_tier(from);
                    if let Some(c) = &candidate {
                        events::tier_escalated(
                            from,
                            to,
                            c.validation.grounding.score,
                            c.validation.citations_valid(),
                        );
                    }
                    self.metrics.record_escalation();
                    escalations += 1;
                    AttemptState::Generating { tier: to }
                }
                AttemptState::Downgrade { from, reason } => {
                    let to = downgrade_tier(from);
                    events::tier_downgraded(from, to, &reason);
                    self.metrics.record_downgrade();
                    downgrades += 1;
                    AttemptState::Generating { tier: to }
                }
                AttemptState::Done { outcome } => break Ok(outcome),
                AttemptState::Failed(failure) => break Err(failure),
            };
        };

        AttemptRun {
            result,
            candidate,
            usage,
            escalations,
            downgrades,
            generation_ms,
            validation_ms,
        }
    }

    /// One generation call under the tier's own deadline.
    async fn generate(
        &self,
        system_prompt: &str,
        query: &str,
        tier: Tier,
    ) -> Result<Generation, GenerationError> {
        let timeout_ms = self.config.pipeline.generation_timeout_ms(tier);
        let call = self.generator.generate(system_prompt, query, tier);
        match tokio::time::timeout(Duration::from_millis(timeout_ms), call).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout {
                tier,
                elapsed_ms: timeout_ms,
            }),
        }
    }

    /// Redacted answer text and the valid citations with their quotes
    /// redacted. The flag is set when PII was found in either.
    fn redact_candidate(&self, candidate: &Candidate) -> (String, Vec<Citation>, bool) {
        let pii = &candidate.validation.pii;
        let mut detected = pii.detected;

        let citations = candidate
            .parsed
            .citations
            .iter()
            .zip(&candidate.validation.citations)
            .filter(|(_, check)| check.valid)
            .map(|(citation, _)| {
                let report = self.redactor.scan(&citation.text);
                detected |= report.detected;
                Citation {
                    text: report.redacted_text,
                    ..citation.clone()
                }
            })
            .collect();

        (pii.redacted_text.clone(), citations, detected)
    }

    /// Retrieval found nothing: fixed answer, negative-cached briefly.
    async fn no_information(
        &self,
        cache: &AnswerCache<'_, C>,
        key: &str,
        request_id: &str,
        mut latency: StageLatency,
    ) -> AnswerResponse {
        self.metrics.record_retrieval_empty();
        let mut response = fallback::response(request_id, Outcome::NoInformation);

        let stage = Instant::now();
        let negative = CachedAnswer {
            answer: response.answer.clone(),
            citations: Vec::new(),
            tier: response.tier,
            grounding_score: 0.0,
            negative: true,
            cached_at: Utc::now(),
        };
        let write = cache
            .store_negative(key, &negative)
            .instrument(beacon_observability::cache_span!(request_id, "store_negative"))
            .await;
        self.record_write(write, true, &mut response.metadata);
        latency.cache_write_ms = elapsed_ms(stage);
        response.metadata.latency = latency;
        response
    }

    fn cached_response(
        &self,
        request_id: &str,
        cached: CachedAnswer,
        layer: CacheLayer,
        latency: StageLatency,
    ) -> AnswerResponse {
        self.metrics.record_cache_hit(layer);
        let mut metadata = AnswerMetadata::new(request_id, Outcome::Cached);
        metadata.cache_layer = Some(layer);
        metadata.grounding_score = Some(cached.grounding_score);
        metadata.latency = latency;
        AnswerResponse {
            answer: cached.answer,
            citations: cached.citations,
            tier: cached.tier,
            from_cache: true,
            usage: TokenUsage::default(),
            metadata,
        }
    }

    fn record_write(&self, write: CacheWrite, negative: bool, metadata: &mut AnswerMetadata) {
        match write {
            CacheWrite::Written { ttl_secs } => {
                self.metrics.record_cache_write(negative);
                metadata.cache_ttl_secs = Some(ttl_secs);
            }
            CacheWrite::Gated => self.metrics.record_cache_gated(),
            CacheWrite::Unavailable => self.metrics.record_cache_unavailable(),
            CacheWrite::Disabled => {}
        }
    }
}

/// Citation-free apology carrying whatever metadata was gathered.
fn apology(mut metadata: AnswerMetadata, latency: StageLatency, usage: TokenUsage) -> AnswerResponse {
    let mut response = fallback::response(&metadata.request_id, Outcome::GenerationFailed);
    metadata.outcome = Outcome::GenerationFailed;
    metadata.latency = latency;
    response.metadata = metadata;
    response.usage = usage;
    response
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
