mod handler;
mod types;

pub use handler::aweber_trigger;
pub use types::{OutcomeKind, TriggerPayload, TriggerResponse};
