use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    domain::synthesis::{
        JobRequest, JobResponse, SynthesisRequest, SynthesisResponse, SynthesisService,
        SynthesisServiceApi,
    },
    error::{AppError, AppResult},
    infrastructure::http::RequestId,
};

pub struct SynthesisController {
    synthesis_service: Arc<SynthesisService>,
}

impl SynthesisController {
    pub fn new(synthesis_service: Arc<SynthesisService>) -> Self {
        Self { synthesis_service }
    }

    /// POST /synthesize - Synthesize one request body directly
    pub async fn synthesize(
        State(controller): State<Arc<SynthesisController>>,
        payload: Result<Json<SynthesisRequest>, JsonRejection>,
    ) -> AppResult<Json<SynthesisResponse>> {
        let Json(request) = payload?;

        let response = controller
            .synthesis_service
            .synthesize(request)
            .await
            .map_err(AppError::from)?;

        Ok(Json(response))
    }

    /// POST /runsync - Run a serverless job envelope to completion
    pub async fn run_sync(
        State(controller): State<Arc<SynthesisController>>,
        Extension(request_id): Extension<RequestId>,
        payload: Result<Json<JobRequest>, JsonRejection>,
    ) -> (StatusCode, Json<JobResponse>) {
        let job = match payload {
            Ok(Json(job)) => job,
            Err(rejection) => {
                let err = AppError::from(rejection);
                err.log();
                return (
                    err.status_code(),
                    Json(JobResponse::failed(request_id.0, err.to_response())),
                );
            }
        };

        let job_id = job.id.clone().unwrap_or(request_id.0);
        let (status, response) = run_job(controller.synthesis_service.as_ref(), job_id, &job).await;
        (status, Json(response))
    }
}

/// Execute one job through the synthesis service and wrap the outcome.
///
/// Shared by the HTTP worker and the local `invoke` command so that both
/// produce the same envelope.
pub async fn run_job(
    service: &dyn SynthesisServiceApi,
    job_id: String,
    job: &JobRequest,
) -> (StatusCode, JobResponse) {
    tracing::info!(job_id = %job_id, "Job received");

    let outcome = match job.synthesis_request() {
        Ok(request) => service.synthesize(request).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(output) => {
            tracing::info!(
                job_id = %job_id,
                duration_seconds = output.duration_seconds,
                "Job completed"
            );
            (StatusCode::OK, JobResponse::completed(job_id, output))
        }
        Err(e) => {
            let err = AppError::from(e);
            err.log();
            (
                err.status_code(),
                JobResponse::failed(job_id, err.to_response()),
            )
        }
    }
}
