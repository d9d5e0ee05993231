use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use crate::controllers::synthesis::run_job;
use crate::domain::synthesis::{JobRequest, JobResponse, JobStatus, SynthesisServiceApi};

/// Run one job from `--test-input` and print its envelope to `out`.
///
/// Fails after printing when the job did not complete, so the process exits
/// non-zero. The audio is only written to `output` for completed jobs.
pub async fn invoke(
    service: &dyn SynthesisServiceApi,
    test_input: &str,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> anyhow::Result<JobResponse> {
    let value: serde_json::Value =
        serde_json::from_str(test_input).context("--test-input is not valid JSON")?;
    let job = JobRequest::from_test_input(value).context("--test-input is not a valid job")?;
    let job_id = job
        .id
        .clone()
        .unwrap_or_else(|| format!("local-{}", Uuid::new_v4()));

    let (_, response) = run_job(service, job_id, &job).await;
    writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;

    if response.status != JobStatus::Completed {
        anyhow::bail!("job {} failed", response.id);
    }

    if let (Some(path), Some(result)) = (output, response.output.as_ref()) {
        let wav = STANDARD.decode(&result.audio_base64)?;
        std::fs::write(path, wav).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved audio");
    }

    Ok(response)
}
