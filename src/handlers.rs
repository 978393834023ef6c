//! HTTP request handlers
//!
//! Each handler extracts the request, drives the catalog session or the open
//! wizard, and returns the resulting view. The session lock is never held
//! across the notification call.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};

use crate::catalog::{Icon, Offering};
use crate::error::{AppError, CatalogError, DeliveryError, WizardError};
use crate::models::*;
use crate::services::order_wizard::Continue;
use crate::state::AppState;

/// Liveness probe
pub async fn health() -> &'static str {
    "ok"
}

/// Profile page with the offering list and the open wizard, if any
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let view = {
        let session = state.session.lock().await;
        session.current().map(|wizard| wizard.view(&state.wallets))
    };
    let page = crate::views::render_page(
        &state.templates,
        &state.profile,
        &state.catalog,
        view.as_ref(),
    )?;
    Ok(Html(page))
}

/// Named icon asset, e.g. `/static/icons/lock.svg`
pub async fn icon(Path(name): Path<String>) -> Result<impl IntoResponse, AppError> {
    let icon = Icon::from_asset(&name).ok_or(AppError::NotFound(name))?;
    Ok((
        [(header::CONTENT_TYPE, "image/svg+xml")],
        crate::views::icon_svg(icon),
    ))
}

pub async fn list_offerings(State(state): State<AppState>) -> Json<Vec<Offering>> {
    Json(state.catalog.iter().cloned().collect())
}

pub async fn get_wizard(State(state): State<AppState>) -> Result<Json<WizardView>, AppError> {
    let session = state.session.lock().await;
    let wizard = session.current().ok_or(CatalogError::NoWizardOpen)?;
    Ok(Json(wizard.view(&state.wallets)))
}

/// Open a wizard for the selected offering
pub async fn open_wizard(
    State(state): State<AppState>,
    Json(payload): Json<OpenWizard>,
) -> Result<(StatusCode, Json<WizardView>), AppError> {
    let mut session = state.session.lock().await;
    let wizard = session.select(&state.catalog, payload.offering_id, &state.required_fields)?;
    Ok((StatusCode::CREATED, Json(wizard.view(&state.wallets))))
}

/// Apply form edits
///
/// Edits are ignored (202) while a submission is in flight or after completion.
pub async fn update_wizard(
    State(state): State<AppState>,
    Json(payload): Json<UpdateForm>,
) -> Result<(StatusCode, Json<WizardView>), AppError> {
    let mut session = state.session.lock().await;
    let wizard = session.current_mut()?;
    let status = if wizard.update(payload) {
        StatusCode::OK
    } else {
        StatusCode::ACCEPTED
    };
    Ok((status, Json(wizard.view(&state.wallets))))
}

/// Continue action
///
/// From `contact` this validates the form and delivers the order. A continue
/// that arrives while a delivery is pending is ignored (202). Delivery runs on
/// its own task, so the wizard is settled even if the request is dropped.
pub async fn continue_wizard(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ContinueResponse>), AppError> {
    let submission = {
        let mut session = state.session.lock().await;
        let wizard = session.current_mut()?;
        match wizard.begin_continue()? {
            Continue::Moved(_) => {
                return Ok(respond(StatusCode::OK, "moved", Some(wizard.view(&state.wallets))));
            }
            Continue::Ignored => {
                return Ok(respond(
                    StatusCode::ACCEPTED,
                    "ignored",
                    Some(wizard.view(&state.wallets)),
                ));
            }
            Continue::Closed => {
                session.discard();
                return Ok(respond(StatusCode::OK, "closed", None));
            }
            Continue::Submit(submission) => submission,
        }
    };

    let task_state = state.clone();
    let delivery = tokio::spawn(async move {
        let result = task_state.gateway.submit(&submission).await;

        let mut session = task_state.session.lock().await;
        let wizard = session.current_mut()?;
        wizard.finish_submission(result)?;
        Ok::<_, AppError>(wizard.view(&task_state.wallets))
    });

    match delivery.await {
        Ok(outcome) => outcome.map(|view| respond(StatusCode::OK, "completed", Some(view))),
        Err(err) => {
            tracing::error!(error = %err, "delivery task failed");
            let failure = DeliveryError::Transport("delivery task failed".to_string());
            let mut session = state.session.lock().await;
            if let Ok(wizard) = session.current_mut() {
                let _ = wizard.finish_submission(Err(failure.clone()));
            }
            Err(WizardError::Delivery(failure).into())
        }
    }
}

/// Back action; 409 when going back is not allowed from the current step
pub async fn back_wizard(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<WizardView>), AppError> {
    let mut session = state.session.lock().await;
    let wizard = session.current_mut()?;
    let status = if wizard.back() {
        StatusCode::OK
    } else {
        StatusCode::CONFLICT
    };
    Ok((status, Json(wizard.view(&state.wallets))))
}

/// Close the open wizard and reset its form
pub async fn close_wizard(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.session.lock().await.close()?;
    Ok(StatusCode::NO_CONTENT)
}

fn respond(
    status: StatusCode,
    outcome: &'static str,
    wizard: Option<WizardView>,
) -> (StatusCode, Json<ContinueResponse>) {
    (status, Json(ContinueResponse { outcome, wizard }))
}
