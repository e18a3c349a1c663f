//! Content-store addressing.
//!
//! The store is a flat HTTP namespace: `{prefix}/{deviceId}/{filename}`.
//! A filename that already contains a path separator is treated as rooted
//! under the prefix instead, so shared assets can live outside a device
//! directory.

/// Default content-store origin (public object-storage bucket).
pub const DEFAULT_PREFIX_URL: &str = "https://pub-5028263d95314adf96c555f4bbb022f0.r2.dev";

/// Instructions file appended to every bundle unless a device opts out.
pub const INSTRUCTIONS_FILE: &str = "instructions.txt";

/// Joins a filename into the store namespace for a device.
pub fn file_url(prefix: &str, device_id: &str, filename: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if filename.contains('/') {
        format!("{}/{}", prefix, filename.trim_start_matches('/'))
    } else {
        format!("{}/{}/{}", prefix, device_id, filename)
    }
}

/// Last path segment of a URL, used as the archive entry name.
///
/// Parses the URL properly so query strings never leak into entry names;
/// falls back to a plain rightmost-`/` split for strings that do not parse
/// as absolute URLs.
pub fn filename_of(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(segments) = parsed.path_segments() {
            if let Some(last) = segments.filter(|s| !s.is_empty()).last() {
                return last.to_string();
            }
        }
    }
    url.rsplit('/').next().unwrap_or(url).to_string()
}
