use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use crate::agents::backend::ImagePayload;
use crate::agents::timecard_reader::TimecardReaderAgent;
use crate::agents::Agent;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::enrich::{enrich_entries, enrich_timecards, EnrichedBatch, EnrichedEntries};
use crate::models::DayEntry;

const DEFAULT_MIME: &str = "image/jpeg";

/// Upload a photographed timecard sheet and get back enriched timecards.
///
/// Expects a multipart form with the image under the `file` field.
pub async fn upload_timecard(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EnrichedBatch>, ApiError> {
    let mut upload: Option<ImagePayload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let mime_type = field.content_type().unwrap_or(DEFAULT_MIME).to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        upload = Some(ImagePayload::new(bytes.to_vec(), mime_type));
    }

    let image = upload.ok_or_else(|| ApiError::BadRequest("No file part".to_string()))?;
    if image.bytes.is_empty() {
        return Err(ApiError::BadRequest("No selected file".to_string()));
    }

    info!(bytes = image.bytes.len(), mime = %image.mime_type, "Processing uploaded timecard image");

    let agent = TimecardReaderAgent::new(Arc::clone(&state.backend));
    let cards = agent.execute(image).await?;

    Ok(Json(enrich_timecards(cards)))
}

/// Recompute hours for an edited list of day entries.
///
/// Bypasses extraction entirely; the client sends corrected entries
/// and gets them back with fresh per-entry and total hours.
pub async fn edit_timecard(Json(entries): Json<Vec<DayEntry>>) -> Json<EnrichedEntries> {
    info!(entries = entries.len(), "Recomputing edited timecard entries");
    Json(enrich_entries(entries))
}
