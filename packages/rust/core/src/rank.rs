//! Filtering and ranking of scored jobs.

use jobscout_shared::RankedJob;

/// Keep jobs the model marked backend, remote, and at or above the fit
/// threshold. Order is untouched.
pub fn filter_jobs(jobs: Vec<RankedJob>, fit_threshold: u8) -> Vec<RankedJob> {
    jobs.into_iter()
        .filter(|job| {
            job.score.is_backend
                && job.score.is_remote
                && job.score.fit_score >= fit_threshold
        })
        .collect()
}

/// Sort by fit score, best first. The sort is stable, so jobs with equal
/// scores keep their discovery order.
pub fn rank_jobs(mut jobs: Vec<RankedJob>) -> Vec<RankedJob> {
    jobs.sort_by(|a, b| b.score.fit_score.cmp(&a.score.fit_score));
    jobs
}

/// Truncate a ranked list to the digest size.
pub fn top_jobs(mut jobs: Vec<RankedJob>, digest_size: usize) -> Vec<RankedJob> {
    jobs.truncate(digest_size);
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobscout_shared::{JobListing, JobStub, ScoreResult, Source};
    use url::Url;

    fn job(title: &str, fit_score: u8, is_backend: bool, is_remote: bool) -> RankedJob {
        RankedJob {
            listing: JobListing {
                stub: JobStub {
                    source: Source::Remotive,
                    title: title.into(),
                    url: Url::parse(&format!("https://example.com/jobs/{title}")).unwrap(),
                },
                description: "desc".into(),
                listed_salary: None,
            },
            score: ScoreResult {
                fit_score,
                is_backend,
                is_remote,
                salary_estimate: None,
                summary: "s".into(),
                match_reason: "m".into(),
                concerns: "c".into(),
            },
        }
    }

    fn titles(jobs: &[RankedJob]) -> Vec<&str> {
        jobs.iter().map(|j| j.listing.stub.title.as_str()).collect()
    }

    #[test]
    fn filter_requires_all_three_criteria() {
        let jobs = vec![
            job("keep", 7, true, true),
            job("frontend", 9, false, true),
            job("onsite", 9, true, false),
            job("weak", 4, true, true),
        ];
        assert_eq!(titles(&filter_jobs(jobs, 5)), vec!["keep"]);
    }

    #[test]
    fn filter_threshold_is_inclusive() {
        let jobs = vec![job("edge", 5, true, true)];
        assert_eq!(filter_jobs(jobs, 5).len(), 1);
    }

    #[test]
    fn rank_sorts_best_first() {
        let ranked = rank_jobs(vec![
            job("six", 6, true, true),
            job("nine", 9, true, true),
            job("seven", 7, true, true),
        ]);
        assert_eq!(titles(&ranked), vec!["nine", "seven", "six"]);
    }

    #[test]
    fn equal_scores_keep_discovery_order() {
        let ranked = rank_jobs(vec![
            job("first", 8, true, true),
            job("second", 8, true, true),
            job("third", 9, true, true),
            job("fourth", 8, true, true),
        ]);
        assert_eq!(titles(&ranked), vec!["third", "first", "second", "fourth"]);
    }

    #[test]
    fn top_caps_the_digest() {
        let jobs: Vec<_> = (0..15).map(|i| job(&format!("j{i}"), 8, true, true)).collect();
        assert_eq!(top_jobs(jobs, 10).len(), 10);
    }

    #[test]
    fn top_keeps_short_lists_whole() {
        let jobs = vec![job("only", 8, true, true)];
        assert_eq!(top_jobs(jobs, 10).len(), 1);
    }
}
