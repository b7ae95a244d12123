//! Evidence upload
//!
//! The multipart body is read fully into memory, bounded by the configured
//! upload limit, before anything is written. A client that disconnects
//! mid-transfer therefore never reaches the artifact store.

use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;

use nyaya_core::domain::entities::case::CaseId;
use nyaya_core::domain::value_objects::PendingArtifact;
use nyaya_core::errors::{DomainError, DomainResult, ValidationError};
use nyaya_core::repositories::{
    ArtifactStore, AuditLogRepository, CaseRepository, EvidenceRepository, UserRepository,
};
use nyaya_core::services::IntakeRequest;

use crate::dto::evidence::UploadResponse;
use crate::handlers::handle_upload_error;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Multipart field carrying the artifact
pub const FILE_FIELD: &str = "file";
pub const CASE_ID_FIELD: &str = "case_id";
pub const DECLARATION_FIELD: &str = "declaration";

/// Upper bound for the plain text form fields
const TEXT_FIELD_LIMIT: usize = 256;

/// Fields collected from one multipart body
#[derive(Debug, Default)]
struct UploadForm {
    case_id: Option<CaseId>,
    declaration: bool,
    filename: Option<String>,
    bytes: Vec<u8>,
}

impl UploadForm {
    /// Declaration is judged before anything else about the request
    fn into_intake_request(self) -> DomainResult<IntakeRequest> {
        if !self.declaration {
            return Err(ValidationError::DeclarationRequired.into());
        }
        let case_id = self
            .case_id
            .ok_or_else(|| ValidationError::required(CASE_ID_FIELD))?;

        Ok(IntakeRequest {
            case_id,
            declaration: self.declaration,
            artifact: PendingArtifact::new(self.filename, self.bytes),
        })
    }
}

/// `POST /api/nyaya/upload`
///
/// Multipart fields: `file`, `case_id`, `declaration` (must be the string
/// `true`). Answers `201 Created` with the artifact location.
pub async fn upload_evidence<U, C, E, A, S>(
    auth: AuthContext,
    state: web::Data<AppState<U, C, E, A, S>>,
    mut payload: Multipart,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CaseRepository + 'static,
    E: EvidenceRepository + 'static,
    A: AuditLogRepository + 'static,
    S: ArtifactStore + 'static,
{
    let limit = state.evidence_service.max_upload_bytes();
    let request = match read_upload_form(&mut payload, limit)
        .await
        .and_then(UploadForm::into_intake_request)
    {
        Ok(request) => request,
        Err(e) => return handle_upload_error(e),
    };

    match state.evidence_service.intake(&auth.claims, request).await {
        Ok(receipt) => HttpResponse::Created().json(UploadResponse::from(receipt)),
        Err(e) => handle_upload_error(e),
    }
}

async fn read_upload_form(payload: &mut Multipart, file_limit: usize) -> DomainResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(malformed)?;
        let name = field.name().to_string();

        match name.as_str() {
            FILE_FIELD => {
                form.filename = field
                    .content_disposition()
                    .get_filename()
                    .map(String::from);
                form.bytes = read_field(&mut field, file_limit, || {
                    ValidationError::PayloadTooLarge { limit: file_limit }.into()
                })
                .await?;
            }
            CASE_ID_FIELD => {
                let raw = read_text(&mut field, CASE_ID_FIELD).await?;
                let case_id = raw
                    .trim()
                    .parse::<CaseId>()
                    .map_err(|_| ValidationError::invalid(CASE_ID_FIELD))?;
                form.case_id = Some(case_id);
            }
            DECLARATION_FIELD => {
                form.declaration = read_text(&mut field, DECLARATION_FIELD).await?.trim() == "true";
            }
            _ => {
                // drain unknown parts so the stream can advance
                read_field(&mut field, TEXT_FIELD_LIMIT, || ValidationError::invalid(name.as_str()).into())
                    .await?;
            }
        }
    }

    Ok(form)
}

async fn read_text(field: &mut Field, name: &str) -> DomainResult<String> {
    let bytes = read_field(field, TEXT_FIELD_LIMIT, || ValidationError::invalid(name).into()).await?;
    String::from_utf8(bytes).map_err(|_| ValidationError::invalid(name).into())
}

/// Collect a field's chunks, failing as soon as `limit` would be exceeded
async fn read_field(
    field: &mut Field,
    limit: usize,
    on_overflow: impl FnOnce() -> DomainError,
) -> DomainResult<Vec<u8>> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed)?;
        if buffer.len() + chunk.len() > limit {
            return Err(on_overflow());
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}

fn malformed(err: actix_multipart::MultipartError) -> DomainError {
    log::debug!("Malformed multipart body: {}", err);
    ValidationError::invalid("multipart").into()
}
