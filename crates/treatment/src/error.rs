use agroplan_catalog::{PlotType, ProductKey};
use thiserror::Error;

use crate::Target;

/// A broken plan invariant, as found by [`crate::Plan::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanViolation {
    #[error("Treatment {position} is numbered {actual}")]
    Numbering { position: usize, actual: usize },

    #[error("Treatment {treatment} holds {count} products (at most 4 allowed)")]
    TooManyProducts { treatment: usize, count: usize },

    #[error("Treatment {treatment} lists {key} twice")]
    DuplicateProduct { treatment: usize, key: ProductKey },

    #[error("{key} is used {uses} times (at most 2 allowed)")]
    UsageCapExceeded { key: ProductKey, uses: usize },

    #[error("{key} repeats right after treatment {treatment}")]
    ImmediateRepeat { treatment: usize, key: ProductKey },

    #[error("Contact fungicide {key} scheduled in treatment {treatment}")]
    ContactAfterCutoff { treatment: usize, key: ProductKey },

    #[error("Treatment {treatment} mixes {systemic} with {contact}")]
    TankMix {
        treatment: usize,
        systemic: ProductKey,
        contact: ProductKey,
    },

    #[error("{key} has no {plot} rate but appears in treatment {treatment}")]
    NotAvailableForPlot {
        treatment: usize,
        key: ProductKey,
        plot: PlotType,
    },

    #[error("Excluded product {key} appears in treatment {treatment}")]
    ExcludedProduct { treatment: usize, key: ProductKey },

    #[error("Treatment {treatment} reports uncovered {actual:?}, expected {expected:?}")]
    UncoveredTargets {
        treatment: usize,
        expected: Vec<Target>,
        actual: Vec<Target>,
    },
}
