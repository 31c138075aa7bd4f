//! Result types returned by the analysis pipeline.

use serde::{Deserialize, Serialize};

/// The outcome of analyzing one document.
///
/// Both model replies are carried **verbatim**: `detection` is whatever free
/// text the model produced for the likelihood prompt (typically something
/// like `"85%"`, but no shape is guaranteed or enforced), and `humanized` is
/// the unedited rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Verbatim reply to the AI-likelihood prompt.
    pub detection: String,
    /// Verbatim reply to the humanize prompt.
    pub humanized: String,
    /// Character count of the extracted text the prompts embedded.
    pub extracted_chars: usize,
    /// Stage timings and token usage.
    pub stats: AnalysisStats,
}

/// Timings and token usage for one analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Wall-clock time spent extracting text from the document.
    pub extract_duration_ms: u64,
    /// Wall-clock time spent in the two (concurrent) model calls.
    pub llm_duration_ms: u64,
    /// Total request time, intake included.
    pub total_duration_ms: u64,
    /// Prompt tokens across both calls.
    pub prompt_tokens: u64,
    /// Completion tokens across both calls.
    pub completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_round_trips_through_json() {
        let report = AnalysisReport {
            detection: "85%".into(),
            humanized: "so basically the thing is...".into(),
            extracted_chars: 28,
            stats: AnalysisStats {
                extract_duration_ms: 12,
                llm_duration_ms: 900,
                total_duration_ms: 915,
                prompt_tokens: 40,
                completion_tokens: 55,
            },
        };

        let json = serde_json::to_string_pretty(&report).expect("serialize");
        let back: AnalysisReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.detection, report.detection);
        assert_eq!(back.stats.prompt_tokens, 40);
    }
}
