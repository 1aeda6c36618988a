use axum::{
    Form, Json,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::gateway::error::{GatewayError, status_headers};
use crate::gateway::page::{PageModel, render_page};
use crate::gateway::state::HandlerState;
use crate::gateway::{QASCORE_STATUS_READY, QASCORE_STATUS_SCORED};
use crate::scoring::{SimilarityScores, TextPair};

/// Form body posted by the page. Missing fields arrive as empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreForm {
    #[serde(default)]
    pub sentence: String,
    #[serde(default)]
    pub target_sentence: String,
}

#[instrument]
pub async fn index_handler() -> Response {
    (
        StatusCode::OK,
        status_headers(QASCORE_STATUS_READY),
        Html(render_page(&PageModel::empty())),
    )
        .into_response()
}

#[instrument(skip(state, form), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn score_form_handler(
    State(state): State<HandlerState>,
    form: Result<Form<ScoreForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let reason = rejection.body_text();
            debug!(error = %reason, "Rejected form body");
            let err = GatewayError::InvalidRequest(format!("Invalid form submission: {}", reason));
            return render_error(String::new(), String::new(), &err);
        }
    };
    let pair = TextPair::new(form.sentence, form.target_sentence);

    match score_pair(&state, pair.clone()).await {
        Ok(scores) => (
            StatusCode::OK,
            status_headers(QASCORE_STATUS_SCORED),
            Html(render_page(&PageModel::scored(
                pair.sentence,
                pair.target_sentence,
                scores,
            ))),
        )
            .into_response(),
        Err(err) => render_error(pair.sentence, pair.target_sentence, &err),
    }
}

/// Re-renders the form with the submitted text and an error message.
fn render_error(sentence: String, target_sentence: String, err: &GatewayError) -> Response {
    let (status, qascore_status) = err.status();
    let page = PageModel::failed(sentence, target_sentence, err.user_message());
    (status, status_headers(qascore_status), Html(render_page(&page))).into_response()
}

#[instrument(skip(state, request), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn score_api_handler(
    State(state): State<HandlerState>,
    request: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let Json(request) = request.map_err(|e| {
        GatewayError::InvalidRequest(format!("Invalid JSON body: {}", e.body_text()))
    })?;
    let pair: TextPair = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let scores = score_pair(&state, pair).await?;

    Ok((
        StatusCode::OK,
        status_headers(QASCORE_STATUS_SCORED),
        Json(scores),
    )
        .into_response())
}

async fn score_pair(
    state: &HandlerState,
    pair: TextPair,
) -> Result<SimilarityScores, GatewayError> {
    debug!(
        sentence_len = pair.sentence.len(),
        target_len = pair.target_sentence.len(),
        "Scoring sentence pair"
    );

    let result = state
        .scorer
        .clone()
        .score_with_timeout(pair, state.inference_timeout)
        .await;

    match result {
        Ok(scores) => {
            info!(labse = scores.labse, pml = scores.pml, "Scored");
            Ok(scores)
        }
        Err(err) if err.is_client_error() => {
            debug!(error = %err, "Rejected input");
            Err(err.into())
        }
        Err(err) => {
            warn!(error = %err, "Scoring failed");
            Err(err.into())
        }
    }
}
