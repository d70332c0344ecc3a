//! Notification formatting: header, body, and filter URL.

use seqwatch_core::{direct_submission_count, Classified, SequenceRecord};
use seqwatch_notify::Notification;

/// Build the full notification for a batch of new records.
///
/// `new_records` must be non-empty and in API order; the body shows at
/// most the first `cap` records, the header and filter URL cover all
/// of them.
pub fn build_notification(
    organism: &str,
    new_records: &[SequenceRecord],
    cap: usize,
    search_base_url: &str,
) -> serde_json::Result<Notification> {
    let classified = Classified::from_records(new_records);
    Ok(Notification {
        text: build_body(new_records, cap)?,
        header: build_header(organism, &classified, direct_submission_count(new_records)),
        filter_url: build_filter_url(search_base_url, organism, new_records),
    })
}

/// Pluralized per-category counts plus the optional direct-submission alert.
///
/// Example: `"1 initial release(s), 1 revision(s) for mpox"`.
pub fn build_header(organism: &str, classified: &Classified, direct_submissions: usize) -> String {
    let mut parts = Vec::new();
    if !classified.initial_releases.is_empty() {
        parts.push(format!("{} initial release(s)", classified.initial_releases.len()));
    }
    if !classified.revisions.is_empty() {
        parts.push(format!("{} revision(s)", classified.revisions.len()));
    }
    if !classified.revocations.is_empty() {
        parts.push(format!("{} revocation(s)", classified.revocations.len()));
    }

    let mut header = format!("{} for {organism}", parts.join(", "));
    if direct_submissions > 0 {
        header.push('\n');
        header.push_str(&format!(
            "⚠️ SubmissionAlert: {direct_submissions} new direct submissions! 🎉"
        ));
    }
    header
}

/// Deep link into the search UI covering the new records.
///
/// The release-timestamp range is widened by one second on each side so
/// boundary records are not excluded by the UI's filter semantics.
pub fn build_filter_url(base_url: &str, organism: &str, records: &[SequenceRecord]) -> String {
    let min_time = records
        .iter()
        .map(|r| r.released_at_timestamp)
        .min()
        .unwrap_or_default();
    let max_time = records
        .iter()
        .map(|r| r.released_at_timestamp)
        .max()
        .unwrap_or_default();

    format!(
        "{base_url}/{organism}/search?visibility_releasedAtTimestamp=true\
         &releasedAtTimestampFrom={}&releasedAtTimestampTo={}&isRevocation=",
        min_time - 1,
        max_time + 1
    )
}

/// Pretty-printed dumps of up to the first `cap` records.
pub fn build_body(records: &[SequenceRecord], cap: usize) -> serde_json::Result<String> {
    let dumps = records
        .iter()
        .take(cap)
        .map(serde_json::to_string_pretty)
        .collect::<serde_json::Result<Vec<_>>>()?;
    Ok(format!(
        "Details of up to {cap} new sequences (the webhook backend can't handle more):\n{}",
        dumps.join("\n\n")
    ))
}
