use crate::{aweber_client::AweberError, routes::error_chain_fmt};

#[derive(thiserror::Error)]
pub enum ReconcileError {
    #[error("No email field found in form submission. Available fields: {available:?}")]
    MissingEmail { available: Vec<String> },
    #[error("AWeber subscription failed.")]
    Api(#[from] AweberError),
}

impl std::fmt::Debug for ReconcileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
