mod errors;
mod reconcile;

pub use errors::ReconcileError;
pub use reconcile::{ReconcileOutcome, SkipReason, reconcile};
