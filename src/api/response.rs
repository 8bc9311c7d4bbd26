//! JSON response bodies.

use crate::steel::{Composition, Metrics, Solution};
use serde::Serialize;

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub message: &'static str,
}

impl HealthBody {
    pub fn online() -> Self {
        Self {
            status: "online",
            message: "Steel AI Solver Active",
        }
    }
}

/// Body of a successful `POST /optimize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeBody {
    pub status: &'static str,
    pub solutions: Vec<SolutionBody>,
}

impl OptimizeBody {
    pub fn success(solutions: &[Solution]) -> Self {
        Self {
            status: "success",
            solutions: solutions.iter().map(SolutionBody::from).collect(),
        }
    }
}

/// One front entry as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionBody {
    /// `[C, Mn, Si, Cr, Ni, Mo]`
    pub composition: Composition,
    pub objectives: [f64; 2],
    pub metrics: Metrics,
}

impl From<&Solution> for SolutionBody {
    fn from(s: &Solution) -> Self {
        Self {
            composition: s.composition,
            objectives: s.objectives,
            metrics: s.metrics,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}
