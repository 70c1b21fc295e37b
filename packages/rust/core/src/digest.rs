//! Digest delivery seam.

use jobscout_shared::{RankedJob, Result, RunReport};

/// Delivers the final digest somewhere a human will see it. The pipeline
/// never knows or cares whether that is a terminal, a file, or a mailbox.
pub trait DigestSender: Send + Sync {
    fn send(&self, jobs: &[RankedJob], report: &RunReport) -> Result<()>;
}

/// No-op sender for headless/test usage.
pub struct SilentDigest;

impl DigestSender for SilentDigest {
    fn send(&self, _jobs: &[RankedJob], _report: &RunReport) -> Result<()> {
        Ok(())
    }
}
