//! System prompt assembly and inline citation markers.
//!
//! Evidence is numbered in retrieval order. The model cites it inline as
//! `[cite:<chunk_id>|<quoted text>]`; markers are stripped from the answer
//! and turned into [`Citation`]s. A literal `]` inside the quote must be
//! written `\]`; an unescaped one ends the marker and cuts the quote short.

use std::sync::LazyLock;

use beacon_core::models::{Chunk, Citation};
use regex::Regex;

static RE_CITE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[cite:\s*([^|\]\s]+)\s*\|((?:\\.|[^\]\\])*)\]").ok());
static RE_CITE_WITH_SPACE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[ \t]*\[cite:(?:\\.|[^\]\\])*\]").ok());

const INSTRUCTIONS: &str = "You answer employee benefits questions using only the evidence below. \
If the evidence does not contain the answer, say so. \
After each claim, cite the evidence it comes from as [cite:<chunk_id>|<exact quote>], \
quoting at least a short phrase verbatim. Write any ] inside a quote as \\]. \
Never include personal data.";

/// System prompt with instructions followed by the numbered evidence.
pub fn build_system_prompt(chunks: &[Chunk]) -> String {
    let mut prompt = String::from(INSTRUCTIONS);
    prompt.push_str("\n\nEvidence:\n");
    for (i, chunk) in chunks.iter().enumerate() {
        let section = chunk.section();
        let location = if section.is_empty() {
            chunk.title.clone()
        } else {
            format!("{} > {}", chunk.title, section)
        };
        prompt.push_str(&format!(
            "[{}] chunk_id: {} ({})\n{}\n\n",
            i + 1,
            chunk.id,
            location,
            chunk.content.trim()
        ));
    }
    prompt
}

/// Generated text with its citation markers removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAnswer {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Split generated text into clean answer text and citations.
///
/// A marker naming an unknown chunk still yields a citation (with empty
/// document fields) so the validator can reject it.
pub fn parse_answer(raw: &str, chunks: &[Chunk]) -> ParsedAnswer {
    let (Some(cite), Some(strip)) = (RE_CITE.as_ref(), RE_CITE_WITH_SPACE.as_ref()) else {
        return ParsedAnswer {
            text: raw.trim().to_string(),
            citations: Vec::new(),
        };
    };

    let citations = cite
        .captures_iter(raw)
        .map(|caps| {
            let chunk_id = caps[1].trim();
            let text = unescape_quote(caps[2].trim());
            match chunks.iter().find(|c| c.id == chunk_id) {
                Some(chunk) => Citation {
                    chunk_id: chunk.id.clone(),
                    doc_id: chunk.doc_id.clone(),
                    title: chunk.title.clone(),
                    section: chunk.section(),
                    relevance_score: chunk.relevance_score,
                    text,
                },
                None => Citation {
                    chunk_id: chunk_id.to_string(),
                    doc_id: String::new(),
                    title: String::new(),
                    section: String::new(),
                    relevance_score: 0.0,
                    text,
                },
            }
        })
        .collect();

    ParsedAnswer {
        text: strip.replace_all(raw, "").trim().to_string(),
        citations,
    }
}

fn unescape_quote(quote: &str) -> String {
    quote.replace("\\]", "]").replace("\\[", "[")
}
