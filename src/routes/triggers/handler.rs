use actix_web::{HttpResponse, web};

use super::types::{OutcomeKind, TriggerPayload, TriggerResponse};
use crate::{aweber_client::AweberClient, reconciler::reconcile};

#[tracing::instrument(
    name = "Handling the AWeber form action",
    skip(payload, aweber_client),
    fields(
        form_id = ?payload.form.id,
        form_name = ?payload.form.name
    )
)]
pub async fn aweber_trigger(
    payload: web::Json<TriggerPayload>,
    aweber_client: web::Data<AweberClient>,
) -> HttpResponse {
    let TriggerPayload { action, entry, .. } = payload.into_inner();

    // Failures are already recorded by the reconciler and never reach the submitter.
    let result = reconcile(&aweber_client, &action, &entry).await;

    HttpResponse::Ok().json(TriggerResponse {
        handled: true,
        suppress_default: true,
        outcome: OutcomeKind::from(&result),
    })
}
