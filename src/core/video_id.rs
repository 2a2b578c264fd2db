use crate::error::{Error, Result};

/// Pulls the video id out of a watch, shorts or youtu.be URL, or accepts a bare id.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    let raw_id = if let Some(v_param) = url.split("v=").nth(1) {
        v_param.split('&').next().unwrap_or(v_param)
    } else if let Some(short) = url.split("/shorts/").nth(1) {
        short.split(['?', '/']).next().unwrap_or(short)
    } else if let Some(youtu_be) = url.split("youtu.be/").nth(1) {
        youtu_be.split('?').next().unwrap_or(youtu_be)
    } else {
        url
    };

    sanitize_video_id(raw_id).ok()
}

const MAX_VIDEO_ID_LEN: usize = 128;

/// Only ASCII alphanumeric characters plus `_` and `-` are allowed.
pub fn sanitize_video_id(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(Error::custom("Video ID cannot be empty"));
    }

    if trimmed.len() > MAX_VIDEO_ID_LEN {
        return Err(Error::custom("Video ID is unexpectedly long"));
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(Error::custom(
            "Video ID contains unsupported characters; expected only letters, numbers, '-' or '_'",
        ));
    }

    Ok(trimmed.to_string())
}
