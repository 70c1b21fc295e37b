//! Stable stub deduplication.

use std::collections::HashSet;

use jobscout_shared::JobStub;

/// Collapse stubs referring to the same posting, keeping the first
/// occurrence in the input order.
///
/// Identity is [`JobStub::dedup_key`] — lower-cased title plus the
/// query-stripped canonical URL — so the same job reposted with tracking
/// parameters, or discovered through several boards under the same link,
/// survives exactly once. Idempotent by construction.
pub fn dedupe(stubs: Vec<JobStub>) -> Vec<JobStub> {
    let mut seen: HashSet<String> = HashSet::with_capacity(stubs.len());
    stubs
        .into_iter()
        .filter(|stub| seen.insert(stub.dedup_key()))
        .collect()
}
