mod health_check;
mod helpers;
mod triggers;

pub use health_check::health_check;
pub use helpers::error_chain_fmt;
pub use triggers::{OutcomeKind, TriggerPayload, TriggerResponse, aweber_trigger};
