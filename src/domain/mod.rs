mod action_configuration;
mod form_entry;
mod subscriber;
mod subscriber_email;
mod tags;
mod variable_set;

pub use action_configuration::{ActionConfiguration, FieldMapping};
pub use form_entry::{EntryValue, FormDefinition, FormEntry};
pub use subscriber::{Subscriber, SubscriberPatch, TagChanges};
pub use subscriber_email::SubscriberEmail;
pub use tags::{TagList, tags_to_add};
pub use variable_set::VariableSet;
