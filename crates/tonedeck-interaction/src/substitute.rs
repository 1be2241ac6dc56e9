//! Demo (substitute) responder.
//!
//! Bypasses the remote engine entirely: answers from the demo table, with
//! a generic synthesized record for unmatched input. This path never
//! reports an error.

use std::collections::BTreeMap;
use std::time::Duration;
use tonedeck_core::samples::SampleLibrary;
use tonedeck_core::AnalysisResult;
use tracing::debug;

/// Lookup-table responder used when demo mode is active.
#[derive(Debug, Clone)]
pub struct SubstituteResponder {
    latency: Duration,
}

impl SubstituteResponder {
    /// Creates a responder with the given smoothing delay.
    ///
    /// The delay is presentation only; pass `Duration::ZERO` in tests.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Produces a record for the input, always.
    ///
    /// A table hit returns the precomputed record verbatim; a miss falls
    /// back to a generic, well-formed record.
    pub async fn respond(&self, library: &SampleLibrary, input: &str) -> AnalysisResult {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match library.demo_lookup(input) {
            Some(result) => result.clone(),
            None => {
                debug!("no demo-table match, synthesizing generic record");
                generic_record(input)
            }
        }
    }
}

fn generic_record(input: &str) -> AnalysisResult {
    let mut input_tags = BTreeMap::new();
    input_tags.insert("thoughtful".to_string(), 0.62_f32);
    input_tags.insert("curious".to_string(), 0.48_f32);
    input_tags.insert("engaged".to_string(), 0.41_f32);

    let mut response_tags = BTreeMap::new();
    response_tags.insert("empathetic_listener".to_string(), true);
    response_tags.insert("supportive".to_string(), true);
    response_tags.insert("thoughtful".to_string(), true);

    let topic: String = input.trim().chars().take(80).collect();

    AnalysisResult {
        input_tags: Some(input_tags),
        response_tags: Some(response_tags),
        final_prompt: Some(format!(
            "Respond as a supportive, thoughtful listener. Engage genuinely with what the person wrote (\"{topic}\"), reflect the feeling behind it, and offer one concrete, encouraging next step."
        )),
        response_text: Some(
            "Thanks for sharing that. What you're describing deserves a real answer, not a canned one - but even in demo mode, here's the honest part: naming the thing out loud is usually the hardest step, and you've already done it. Pick the smallest next action you can take today and let the momentum do the rest."
                .to_string(),
        ),
    }
}
