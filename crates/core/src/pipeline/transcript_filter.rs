use crate::shared::constants::NA_TRANSCRIPT;
use crate::speech::domain::recognition_result::SyncResult;

/// Joins the top alternative of every segment whose confidence is strictly
/// above `threshold`, in segment order, separated by single spaces.
///
/// Returns `None` when no segment qualifies (including an empty result).
pub fn confident_transcript(result: &SyncResult, threshold: f32) -> Option<String> {
    let kept: Vec<&str> = result
        .segments
        .iter()
        .filter_map(|segment| segment.top())
        .filter(|alt| alt.confidence > threshold)
        .map(|alt| alt.transcript.as_str())
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join(" "))
    }
}

/// Report text for a result: the confident transcript, or `"NA"`.
pub fn report_transcript(result: &SyncResult, threshold: f32) -> String {
    confident_transcript(result, threshold).unwrap_or_else(|| NA_TRANSCRIPT.to_string())
}
