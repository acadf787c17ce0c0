//! Generation workflow: validate the draft, call the backend, append a version.
//!
//! Flow: validate → acquire busy flag → backend.tailor → parse_reply →
//!       append GeneratedVersion. The busy flag is released on every path.

use tracing::info;

use crate::errors::AppError;
use crate::generation::{parse_reply, TailorBackend, TailorRequest};
use crate::models::{Draft, GeneratedVersion};
use crate::store::{lock, record_error, Action, BusyGuard, SharedStore};

/// Runs one tailoring request against the current draft.
///
/// Validation failures are recorded in the error slot without any network
/// call. A second request while one is in flight is rejected with
/// [`AppError::Busy`].
pub async fn generate(
    store: &SharedStore,
    backend: &dyn TailorBackend,
) -> Result<GeneratedVersion, AppError> {
    let draft = lock(store).snapshot().draft.clone();

    let request = match validate(&draft) {
        Ok(request) => request,
        Err(e) => {
            record_error(store, &e);
            return Err(e);
        }
    };

    let _busy = BusyGuard::acquire(store)?;

    info!(
        "Tailoring resume ({} chars) against job description ({} chars) with {}",
        request.resume.len(),
        request.job_description.len(),
        request.model
    );

    let reply = match backend.tailor(&request).await.and_then(|text| parse_reply(&text)) {
        Ok(reply) => reply,
        Err(e) => {
            let e = AppError::from(e);
            record_error(store, &e);
            return Err(e);
        }
    };

    let (version, persisted) = {
        let mut store = lock(store);
        let (id, created_at) = store.next_version_id();
        let version = GeneratedVersion {
            id,
            tailored_resume: reply.tailored_resume,
            explanation: reply.explanation,
            created_at,
        };
        let persisted = store.dispatch(Action::AddGeneratedVersion(version.clone()));
        (version, persisted)
    };
    if let Err(e) = persisted {
        let e = AppError::from(e);
        record_error(store, &e);
        return Err(e);
    }

    info!("Generated version {}", version.id);
    Ok(version)
}

fn validate(draft: &Draft) -> Result<TailorRequest, AppError> {
    if draft.api_key.is_empty() {
        return Err(AppError::Validation(
            "Please provide an OpenAI API Key.".to_string(),
        ));
    }
    if draft.original_resume.is_empty() || draft.job_description.is_empty() {
        return Err(AppError::Validation(
            "Please provide both resume and job description.".to_string(),
        ));
    }

    Ok(TailorRequest {
        resume: draft.original_resume.clone(),
        job_description: draft.job_description.clone(),
        api_key: draft.api_key.clone(),
        model: draft.selected_model,
    })
}
