use crate::{
    aweber_client::{AweberClient, AweberError, FindOutcome, MailingList},
    domain::{
        ActionConfiguration, FormEntry, Subscriber, SubscriberEmail, SubscriberPatch,
        VariableSet, tags_to_add,
    },
};

use super::errors::ReconcileError;

#[derive(Debug)]
pub enum ReconcileOutcome {
    /// Nothing is configured for this submission.
    Skipped(SkipReason),
    Created(Subscriber),
    Updated(Subscriber),
    /// The subscriber already carries every tag of this submission.
    Unchanged(Subscriber),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoAccount,
    NoListId,
    ListNotFound,
}

#[tracing::instrument(
    name = "Reconciling AWeber subscription",
    skip(client, action, entry),
    fields(
        entry_id = ?entry.id,
        list_id = tracing::field::Empty,
        subscriber_email = tracing::field::Empty
    )
)]
pub async fn reconcile(
    client: &AweberClient,
    action: &ActionConfiguration,
    entry: &FormEntry,
) -> Result<ReconcileOutcome, ReconcileError> {
    tracing::debug!(action = ?action, "AWeber action settings");

    let Some(list_id) = action.list_id() else {
        return Ok(skipped(SkipReason::NoListId));
    };
    if !client.has_credentials() {
        return Ok(skipped(SkipReason::NoAccount));
    }

    let vars = VariableSet::from_submission(action, entry);

    let Some(email) = vars.email.clone() else {
        let e = ReconcileError::MissingEmail {
            available: vars.field_names(),
        };
        tracing::error!(error.message = %e, "Cannot subscribe without an email");
        return Err(e);
    };
    tracing::Span::current().record("subscriber_email", tracing::field::display(&email));

    let list = match resolve_list(client, list_id).await {
        Ok(Ok(list)) => list,
        Ok(Err(reason)) => return Ok(skipped(reason)),
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                subscriber_email = %email,
                "Failed to resolve the AWeber list"
            );
            return Err(e.into());
        }
    };
    tracing::Span::current().record("list_id", tracing::field::display(&list.id));

    match subscribe(client, &list, &email, &vars).await {
        Ok(outcome) => {
            if let ReconcileOutcome::Created(s) | ReconcileOutcome::Updated(s) = &outcome {
                if let Some(uuid) = s.uuid {
                    tracing::info!(%uuid, variables = ?vars, "AWeber subscription");
                }
            }
            Ok(outcome)
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                subscriber_email = %email,
                variables = ?vars,
                "AWeber subscription failed"
            );
            Err(e.into())
        }
    }
}

fn skipped(reason: SkipReason) -> ReconcileOutcome {
    tracing::info!(?reason, "Nothing to reconcile");
    ReconcileOutcome::Skipped(reason)
}

async fn resolve_list(
    client: &AweberClient,
    list_id: &str,
) -> Result<Result<MailingList, SkipReason>, AweberError> {
    let Some(account) = client.active_account().await? else {
        return Ok(Err(SkipReason::NoAccount));
    };
    Ok(client
        .find_list(&account, list_id)
        .await?
        .ok_or(SkipReason::ListNotFound))
}

async fn subscribe(
    client: &AweberClient,
    list: &MailingList,
    email: &SubscriberEmail,
    vars: &VariableSet,
) -> Result<ReconcileOutcome, AweberError> {
    match client.find_subscriber(list, email).await? {
        FindOutcome::NotFound => {
            let created = client.create_subscriber(list, vars).await?;
            Ok(ReconcileOutcome::Created(created))
        }
        FindOutcome::Found(existing) => update_existing(client, existing, vars).await,
    }
}

#[tracing::instrument(name = "Adding tags to an existing subscriber", skip_all)]
async fn update_existing(
    client: &AweberClient,
    existing: Subscriber,
    vars: &VariableSet,
) -> Result<ReconcileOutcome, AweberError> {
    let existing_tags = existing.existing_tags();
    let to_add = tags_to_add(&vars.tags, &existing_tags);

    if to_add.is_empty() {
        tracing::info!(
            subscriber_email = %existing.email,
            "No new tags to add for subscriber"
        );
        return Ok(ReconcileOutcome::Unchanged(existing));
    }

    let patch = build_patch(&existing, vars, to_add);
    tracing::debug!(
        ?existing_tags,
        new_tags = ?vars.tags,
        ?patch,
        subscriber = ?existing,
        "AWeber update"
    );

    match client.update_subscriber(&existing.self_link, &patch).await {
        Ok(updated) => {
            tracing::debug!(
                response = ?updated,
                subscriber_url = %existing.self_link,
                "AWeber update response"
            );
            Ok(ReconcileOutcome::Updated(updated))
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                ?patch,
                subscriber_url = %existing.self_link,
                "AWeber update failed"
            );
            Err(e)
        }
    }
}

fn build_patch(existing: &Subscriber, vars: &VariableSet, to_add: Vec<String>) -> SubscriberPatch {
    let mut patch = SubscriberPatch::adding_tags(to_add);
    if vars.name.is_some() && vars.name != existing.name {
        patch.name = vars.name.clone();
    }
    if !vars.custom_fields.is_empty() {
        patch.custom_fields = Some(vars.custom_fields.clone());
    }
    patch
}
