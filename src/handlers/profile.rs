use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderMap, HeaderValue,
    },
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use ulid::Ulid;

use crate::{
    extractors::AuthGuard,
    names,
    rejections::{AppError, ResultExt},
    AppState,
};

const UPLOAD_CACHE_CONTROL: &str = "max-age=3600, must-revalidate";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::PROFILE_URL, put(update_profile))
        .route(names::PROFILE_IMAGE_URL, post(upload_profile_image))
        .route("/uploads/profiles/{file}", get(serve_profile_image))
        // Uploads may exceed axum's default body cap; leave headroom for
        // the multipart framing.
        .layer(DefaultBodyLimit::max(names::MAX_UPLOAD_BYTES + 64 * 1024))
}

#[derive(Deserialize)]
struct ProfileBody {
    name: String,
}

async fn update_profile(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<ProfileBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Input("name is required"));
    }

    state
        .db
        .update_profile(&user.email, name, user.profile_image.as_deref())
        .await
        .reject("could not update profile")?;

    Ok(Json(json!({ "ok": true })))
}

async fn upload_profile_image(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("failed to read multipart field: {e}");
        AppError::Input("failed to read multipart field")
    })? {
        if field.name() != Some(names::UPLOAD_FIELD_NAME) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(AppError::Input("invalid file type"));
        }

        let extension = extension_for(field.file_name(), &content_type);
        let data = field.bytes().await.map_err(|e| {
            tracing::error!("failed to read field data: {e}");
            AppError::Input("failed to read field data")
        })?;

        if data.len() > names::MAX_UPLOAD_BYTES {
            return Err(AppError::Input("file too large"));
        }

        image = Some((extension, data.to_vec()));
    }

    let (extension, data) = image.ok_or(AppError::Input("no file provided"))?;

    let file_name = format!("{}_{}.{extension}", sanitize(&user.email), Ulid::new());
    let dir = state.uploads_dir.join("profiles");
    tokio::fs::create_dir_all(&dir)
        .await
        .reject("could not create uploads directory")?;
    tokio::fs::write(dir.join(&file_name), &data)
        .await
        .reject("could not save file")?;

    let url = format!("{}/{file_name}", names::UPLOADS_PREFIX);
    state
        .db
        .update_profile_image(&user.email, &url)
        .await
        .reject("could not update profile image")?;

    Ok(Json(json!({ "profile_image": url })))
}

async fn serve_profile_image(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // The stored names only ever contain sanitized characters; anything
    // else is a traversal attempt.
    if file.contains(['/', '\\']) || file.contains("..") {
        return Err(AppError::NotFound);
    }

    let path = state.uploads_dir.join("profiles").join(&file);
    let contents = tokio::fs::read(&path).await.map_err(|_| AppError::NotFound)?;

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(UPLOAD_CACHE_CONTROL));

    Ok((headers, contents))
}

fn sanitize(email: &str) -> String {
    email
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn extension_for(file_name: Option<&str>, content_type: &str) -> String {
    let from_name = file_name
        .and_then(|n| std::path::Path::new(n).extension())
        .and_then(|e| e.to_str())
        .filter(|e| e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()));

    match from_name {
        Some(ext) => ext.to_ascii_lowercase(),
        None => content_type
            .strip_prefix("image/")
            .unwrap_or("bin")
            .to_string(),
    }
}
