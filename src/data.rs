//! Network layer: random-image lookup and image download.
//!
//! All requests are blocking and run inside the event loop; the caller passes
//! a progress callback for the image download so the UI can redraw while
//! bytes stream in.

use crate::error::QuizError;
use serde::Deserialize;
use std::io::Read;
use std::time::Duration;
use tracing::debug;

/// The public random-image endpoint the quiz is built around.
pub const RANDOM_IMAGE_ENDPOINT: &str = "https://dog.ceo/api/breeds/image/random";

/// Response body of the random-image endpoint:
/// `{ "message": "<image url>", "status": "success" }`.
#[derive(Debug, Deserialize)]
struct RandomImageReply {
    message: String,
    status: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct DownloadProgress {
    pub downloaded: u64,
    pub total: Option<u64>,
}

/// What the frame pane shows once the image has finished loading.
///
/// The terminal cannot render the photo itself, and the full URL would give
/// the answer away through its `/breeds/` segment, so the card carries only
/// the trailing file name plus transfer metadata.
#[derive(Debug, Clone)]
pub struct ImageCard {
    pub file_name: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, QuizError> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?)
}

/// Fetches one random image URL from the API.
pub fn fetch_random_image(
    client: &reqwest::blocking::Client,
    endpoint: &str,
) -> Result<String, QuizError> {
    let response = client.get(endpoint).send()?;
    if !response.status().is_success() {
        return Err(QuizError::Response(format!(
            "{} returned {}",
            endpoint,
            response.status()
        )));
    }
    let body = response.text()?;
    message_from_body(&body)
}

/// Extracts the image URL from an API response body.
fn message_from_body(body: &str) -> Result<String, QuizError> {
    let reply: RandomImageReply = serde_json::from_str(body)
        .map_err(|err| QuizError::Response(format!("unexpected body: {}", err)))?;
    if let Some(status) = &reply.status
        && status != "success"
    {
        return Err(QuizError::Response(format!(
            "API reported status {:?}: {}",
            status, reply.message
        )));
    }
    Ok(reply.message)
}

/// Downloads the image at `url`, reporting progress as bytes stream in.
///
/// The bytes themselves are discarded; a completed download is the signal
/// that the image "finished loading" and the round can be shown.
pub fn download_image<F>(
    client: &reqwest::blocking::Client,
    url: &str,
    mut on_progress: F,
) -> Result<ImageCard, QuizError>
where
    F: FnMut(DownloadProgress),
{
    let mut response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(QuizError::Response(format!(
            "{} returned {}",
            url,
            response.status()
        )));
    }

    let total = response.content_length();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    let mut downloaded = 0u64;
    let mut buffer = [0u8; 65536];

    on_progress(DownloadProgress { downloaded, total });

    loop {
        let read = response.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        downloaded += read as u64;
        on_progress(DownloadProgress { downloaded, total });
    }

    debug!(url, bytes = downloaded, "image download finished");

    Ok(ImageCard {
        file_name: file_name_from_url(url),
        content_type,
        byte_len: downloaded,
    })
}

/// Trailing path segment of an image URL, e.g. `n02113799_2280.jpg`.
pub fn file_name_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .to_string()
}

/// Converts a download progress value into a `[0.0, 1.0]` ratio.
///
/// When total size is unknown, uses a hyperbolic curve that approaches 1.0
/// as `downloaded` grows.
pub fn progress_ratio(progress: DownloadProgress) -> f64 {
    if let Some(total) = progress.total
        && total > 0
    {
        return progress.downloaded as f64 / total as f64;
    }

    let d = progress.downloaded as f64;
    d / (d + 100_000.0)
}
