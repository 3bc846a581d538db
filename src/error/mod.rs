//! Distinguished check-failure conditions
//!
//! Test failures the harness raises itself, as opposed to errors propagated
//! from the API client or the cluster CLI. Each variant carries the payload a
//! failing test needs for diagnosis.

use thiserror::Error;

use crate::diff::DiffReport;

/// A verification performed by the harness did not hold
#[derive(Debug, Error)]
pub enum CheckFailure {
    /// Two values expected to match structurally do not
    #[error("values are not the same, difference is:\n{report}")]
    Mismatch { report: DiffReport },

    /// A pod was found outside the Running phase
    #[error("pod {name} in {namespace} has phase {phase}, expected Running")]
    PodNotRunning {
        name: String,
        namespace: String,
        phase: String,
    },

    /// A deleted resource survived every confirmation poll
    #[error("{kind} {name} still present after {attempts} attempts")]
    StillPresent {
        kind: String,
        name: String,
        attempts: u32,
    },
}
