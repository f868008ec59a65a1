// src/process/image.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

const DRIVE_HOST: &str = "drive.google.com";
const THUMBNAIL_SIZE: &str = "w2000";

static FILE_PATH_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/file/d/([^/]+)").expect("file path pattern should compile"));
static QUERY_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]id=([^&]+)").expect("id query pattern should compile"));

/// Rewrite a Drive sharing link into the large thumbnail endpoint, which
/// renders for public files without a login redirect.
///
/// Links to other hosts, and Drive links without a recognizable file id,
/// come back unchanged. Feeding the output back in returns it as is.
pub fn normalize_image_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if !url.contains(DRIVE_HOST) {
        return url.to_string();
    }

    match drive_file_id(url) {
        Some(id) => format!("https://{DRIVE_HOST}/thumbnail?id={id}&sz={THUMBNAIL_SIZE}"),
        None => {
            trace!(url, "no file id in drive link; passing through");
            url.to_string()
        }
    }
}

fn drive_file_id(url: &str) -> Option<&str> {
    [&*FILE_PATH_ID, &*QUERY_ID]
        .into_iter()
        .find_map(|re| re.captures(url).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
}
