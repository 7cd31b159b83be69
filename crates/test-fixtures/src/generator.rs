use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use beacon_core::errors::GenerationError;
use beacon_core::models::{Generation, Tier, TokenUsage};
use beacon_core::traits::GenerationProvider;

/// One recorded `generate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationCall {
    pub tier: Tier,
    pub system_prompt: String,
    pub user_query: String,
}

/// Generation fake answering from per-tier scripts.
///
/// Each tier has a queue of scripted results consumed in order; once a
/// queue is drained the tier's default response is used, and without a
/// default the call fails with a non-transient error.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    queues: Mutex<HashMap<Tier, VecDeque<Result<String, GenerationError>>>>,
    defaults: HashMap<Tier, String>,
    delays: HashMap<Tier, Duration>,
    calls: Mutex<Vec<GenerationCall>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same answer at every tier, forever.
    pub fn always(text: &str) -> Self {
        let mut g = Self::new();
        for tier in Tier::ALL {
            g.defaults.insert(tier, text.to_string());
        }
        g
    }

    pub fn with_default(mut self, tier: Tier, text: &str) -> Self {
        self.defaults.insert(tier, text.to_string());
        self
    }

    pub fn with_delay(mut self, tier: Tier, delay: Duration) -> Self {
        self.delays.insert(tier, delay);
        self
    }

    /// Queue one successful response at `tier`.
    pub fn respond(self, tier: Tier, text: &str) -> Self {
        self.push(tier, Ok(text.to_string()));
        self
    }

    /// Queue one failure at `tier`.
    pub fn fail(self, tier: Tier, err: GenerationError) -> Self {
        self.push(tier, Err(err));
        self
    }

    fn push(&self, tier: Tier, item: Result<String, GenerationError>) {
        let mut queues = self.queues.lock().unwrap_or_else(|e| e.into_inner());
        queues.entry(tier).or_default().push_back(item);
    }

    pub fn calls(&self) -> Vec<GenerationCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Tiers of every call so far, in order.
    pub fn tiers_called(&self) -> Vec<Tier> {
        self.calls().into_iter().map(|c| c.tier).collect()
    }

    fn next(&self, tier: Tier) -> Result<String, GenerationError> {
        let scripted = {
            let mut queues = self.queues.lock().unwrap_or_else(|e| e.into_inner());
            queues.get_mut(&tier).and_then(VecDeque::pop_front)
        };
        match scripted {
            Some(result) => result,
            None => self
                .defaults
                .get(&tier)
                .cloned()
                .ok_or_else(|| GenerationError::Failed {
                    tier,
                    reason: "no scripted response".to_string(),
                }),
        }
    }
}

fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

impl GenerationProvider for ScriptedGenerator {
    async fn generate(
        &self,
        system_prompt: &str,
        user_query: &str,
        tier: Tier,
    ) -> Result<Generation, GenerationError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(GenerationCall {
                tier,
                system_prompt: system_prompt.to_string(),
                user_query: user_query.to_string(),
            });
        if let Some(delay) = self.delays.get(&tier) {
            tokio::time::sleep(*delay).await;
        }
        let text = self.next(tier)?;
        Ok(Generation {
            usage: TokenUsage {
                prompt_tokens: word_count(system_prompt) + word_count(user_query),
                completion_tokens: word_count(&text),
            },
            text,
        })
    }
}
