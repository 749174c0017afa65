use crate::error::BiographyError;
use axum::extract::{Multipart, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use biography_database::BiographyStore;
use biography_service::form::{self, BiographyForm, FormError};
use biography_service::view::{self, Notice, View, PICTURE_FIELD};
use biography_service::{BiographyRecord, Field};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

// Flags set by the redirects after a save or an upload.
#[derive(Debug, Default, Deserialize)]
pub struct EditQuery {
    #[serde(default)]
    saved: bool,
    #[serde(default)]
    uploaded: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BiographyResponse {
    pub biography: BiographyRecord,
    pub has_image: bool,
}

pub async fn home_page<T: BiographyStore>(
    State(store): State<T>,
) -> Result<Html<String>, BiographyError> {
    let record: BiographyRecord = store.load()?;

    Ok(Html(view::render_page(View::Home, &record, store.has_image(), None)))
}

pub async fn edit_page<T: BiographyStore>(
    State(store): State<T>,
    Query(query): Query<EditQuery>,
) -> Result<Html<String>, BiographyError> {
    let notice = if query.saved {
        Some(Notice::Info("Biography saved successfully!".to_string()))
    } else if query.uploaded {
        Some(Notice::Info("Profile picture uploaded.".to_string()))
    } else {
        None
    };

    let (record, malformed) = load_for_edit(&store)?;
    let notice = malformed.or(notice);

    Ok(Html(view::render_page(
        View::Edit,
        &record,
        store.has_image(),
        notice.as_ref(),
    )))
}

/// Saves the complete record from the edit form, replacing whatever was stored.
pub async fn save_biography<T: BiographyStore>(
    State(store): State<T>,
    mut multipart: Multipart,
) -> Result<Response, BiographyError> {
    let mut biography_form = BiographyForm::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match Field::from_key(&name) {
            Some(key) => {
                let value = field.text().await?;
                biography_form.set(key, value);
            }
            None => debug!(field = %name, "ignoring unexpected form field"),
        }
    }

    let record = match biography_form.to_record() {
        Ok(record) => record,
        Err(err) => return rejected_edit_page(&store, Some(biography_form.draft_record()), &err),
    };

    store.save(&record)?;
    info!("biography saved");

    Ok(Redirect::to("/edit?saved=true").into_response())
}

/// Stores the picture right away, independent of the record save.
pub async fn upload_picture<T: BiographyStore>(
    State(store): State<T>,
    mut multipart: Multipart,
) -> Result<Response, BiographyError> {
    let mut uploaded = false;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(PICTURE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        let data = field.bytes().await?;

        // Browsers send an empty part when no file was chosen.
        if data.is_empty() {
            continue;
        }

        if let Err(err) = form::check_picture_name(&file_name) {
            return rejected_edit_page(&store, None, &err);
        }

        store.save_image(&data)?;
        info!(file = %file_name, size = data.len(), "profile picture uploaded");
        uploaded = true;
    }

    let target = if uploaded { "/edit?uploaded=true" } else { "/edit" };
    Ok(Redirect::to(target).into_response())
}

pub async fn get_picture<T: BiographyStore>(
    State(store): State<T>,
) -> Result<Response, BiographyError> {
    match store.load_image()? {
        Some(bytes) => {
            let headers = [
                (header::CONTENT_TYPE, view::picture_content_type(&bytes)),
                (header::CACHE_CONTROL, "no-store"),
            ];
            Ok((headers, bytes).into_response())
        }
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

pub async fn api_get_biography<T: BiographyStore>(
    State(store): State<T>,
) -> Result<Json<BiographyResponse>, BiographyError> {
    let biography = store.load()?;

    Ok(Json(BiographyResponse {
        biography,
        has_image: store.has_image(),
    }))
}

pub async fn api_save_biography<T: BiographyStore>(
    State(store): State<T>,
    Json(record): Json<BiographyRecord>,
) -> Result<StatusCode, BiographyError> {
    form::validate_record(&record)?;

    store.save(&record)?;
    info!("biography saved through api");

    Ok(StatusCode::OK)
}

// A broken record file still gets an edit form, so it can be replaced.
fn load_for_edit<T: BiographyStore>(
    store: &T,
) -> Result<(BiographyRecord, Option<Notice>), BiographyError> {
    match store.load::<BiographyRecord>() {
        Ok(record) => Ok((record, None)),
        Err(err) if err.is_malformed() => {
            warn!(error = %err, "showing empty edit form over malformed record");
            let notice = Notice::Error(format!("{err}. Saving the form will replace it."));
            Ok((BiographyRecord::default(), Some(notice)))
        }
        Err(err) => Err(err.into()),
    }
}

/// Answers a rejected submission with the edit form again. `draft` holds what
/// the user typed; without one the stored record is shown.
fn rejected_edit_page<T: BiographyStore>(
    store: &T,
    draft: Option<BiographyRecord>,
    err: &FormError,
) -> Result<Response, BiographyError> {
    warn!(error = %err, "rejected edit submission");

    let record = match draft {
        Some(record) => record,
        None => load_for_edit(store)?.0,
    };
    let notice = Notice::Error(err.to_string());
    let page = view::render_page(View::Edit, &record, store.has_image(), Some(&notice));

    Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
}
