//! Contact form submission.

use axum::{extract::State, http::StatusCode, Form, Json};

use crate::contact::{submit, ContactForm, ContactOutcome};
use crate::state::SharedState;

/// POST /contact: validate (captcha included) and forward.
pub async fn contact_submit(
    State(state): State<SharedState>,
    Form(form): Form<ContactForm>,
) -> (StatusCode, Json<ContactOutcome>) {
    let outcome = submit(&form, &state.config.contact, &state.client).await;
    let status = if outcome.ok {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(outcome))
}
