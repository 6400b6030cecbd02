//! Source image loading.
//!
//! An input string is either an inline `data:image/...` payload, an
//! `http(s)` URL, or a path to a local image file. Inline payloads and
//! downloads are written to disk first so the generated maps have a source
//! file to sit next to.

use anyhow::{bail, Context, Result};
use base64::Engine;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use texmaps_filters::PixelGrid;

/// File name used for decoded or downloaded images when none is given.
pub const DEFAULT_FILE_NAME: &str = "DownloadedImage.png";

/// Output directory used for decoded or downloaded images when none is given.
pub const DEFAULT_DOWNLOAD_DIR: &str = "DownloadedImages";

/// URL schemes fetched over HTTP.
const REMOTE_SCHEMES: &[&str] = &["http://", "https://"];

/// Whole-request timeout for downloads.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// What an input string refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind<'a> {
    /// `data:image/...;base64,<payload>`.
    DataUri(&'a str),
    /// An `http://` or `https://` URL.
    RemoteUrl(&'a str),
    /// A local file path.
    File(&'a Path),
}

/// Where a loaded source came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    File,
    DataUri,
    Url,
}

impl SourceKind {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::File => "file",
            SourceKind::DataUri => "data_uri",
            SourceKind::Url => "url",
        }
    }
}

/// A decoded source image plus where its maps should go.
#[derive(Debug)]
pub struct LoadedSource {
    /// Decoded pixels.
    pub grid: PixelGrid,
    /// Source format.
    pub kind: SourceKind,
    /// Image file on disk (for data URIs and URLs, the file they were saved to).
    pub path: PathBuf,
    /// File name the map names are derived from.
    pub name: String,
    /// Directory the maps are written to.
    pub out_dir: PathBuf,
}

/// Classify a (trimmed) input string.
pub fn classify_input(input: &str) -> InputKind<'_> {
    if input.starts_with("data:image/") {
        return InputKind::DataUri(input);
    }
    let lower = input.to_ascii_lowercase();
    if REMOTE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return InputKind::RemoteUrl(input);
    }
    InputKind::File(Path::new(input))
}

/// Decode the base64 payload of a data URI.
///
/// Everything up to and including the first comma is header; if there is
/// no comma the whole string is treated as payload.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let payload = match uri.find(',') {
        Some(idx) => &uri[idx + 1..],
        None => uri,
    };
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .context("Invalid base64 image data")
}

/// Download the body of an `http(s)` URL.
///
/// Non-success statuses are errors. Loopback hosts bypass any configured
/// proxy.
pub fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let mut builder = reqwest::blocking::Client::builder().timeout(FETCH_TIMEOUT);
    if is_loopback(url) {
        builder = builder.no_proxy();
    }
    let client = builder.build().context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to download image: {}", url))?;
    let status = response.status();
    if !status.is_success() {
        bail!("Failed to download image: {} (HTTP {})", url, status);
    }

    let bytes = response
        .bytes()
        .with_context(|| format!("Failed to read download body: {}", url))?;
    Ok(bytes.to_vec())
}

fn is_loopback(url: &str) -> bool {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| matches!(h, "localhost" | "127.0.0.1" | "[::1]")))
        .unwrap_or(false)
}

/// Reduce a requested file name to its last path component.
///
/// Directory parts are dropped so the saved file always lands inside the
/// output directory. Names with no usable component fall back to
/// [`DEFAULT_FILE_NAME`].
pub fn sanitize_file_name(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name.trim()).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}

/// Decode encoded image bytes (PNG or JPEG) into an RGBA grid.
pub fn decode_image(bytes: &[u8]) -> Result<PixelGrid> {
    let image = image::load_from_memory(bytes)
        .context("Failed to decode image")?
        .to_rgba8();
    let grid = PixelGrid::from_rgba8(image.width(), image.height(), image.as_raw())?;
    Ok(grid)
}

/// Load a source image from a file path, data URI, or URL.
///
/// `out_dir` overrides where maps are written: by default that is the
/// source file's directory, or [`DEFAULT_DOWNLOAD_DIR`] for data URIs and
/// URLs. `file_name` names the file those are saved as.
pub fn load_source(
    input: &str,
    out_dir: Option<&Path>,
    file_name: Option<&str>,
) -> Result<LoadedSource> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Image input is empty. Provide a file path, URL, or base64 image data.");
    }

    match classify_input(input) {
        InputKind::DataUri(uri) => {
            let bytes = decode_data_uri(uri)?;
            store_source(&bytes, SourceKind::DataUri, out_dir, file_name)
        }
        InputKind::RemoteUrl(url) => {
            let bytes = fetch_url(url)?;
            store_source(&bytes, SourceKind::Url, out_dir, file_name)
                .with_context(|| format!("Failed to load texture: {}", url))
        }
        InputKind::File(path) => {
            if !path.is_file() {
                bail!(
                    "Invalid input: not a valid file path, URL, or base64 image data: {}",
                    path.display()
                );
            }
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read image: {}", path.display()))?;
            let grid = decode_image(&bytes)
                .with_context(|| format!("Failed to load texture: {}", path.display()))?;

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
            let out_dir = match out_dir {
                Some(dir) => dir.to_path_buf(),
                None => match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => PathBuf::from("."),
                },
            };

            Ok(LoadedSource {
                grid,
                kind: SourceKind::File,
                path: path.to_path_buf(),
                name,
                out_dir,
            })
        }
    }
}

/// Save fetched or decoded bytes into the output directory and decode them.
fn store_source(
    bytes: &[u8],
    kind: SourceKind,
    out_dir: Option<&Path>,
    file_name: Option<&str>,
) -> Result<LoadedSource> {
    let out_dir = out_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR));
    let name = sanitize_file_name(file_name);

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
    let path = out_dir.join(&name);
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to save image: {}", path.display()))?;

    let grid = decode_image(bytes)?;
    Ok(LoadedSource {
        grid,
        kind,
        path,
        name,
        out_dir,
    })
}

/// Short description of an input for progress output.
pub fn describe_input(input: &str) -> String {
    let input = input.trim();
    match classify_input(input) {
        InputKind::DataUri(uri) => format!("inline base64 image data ({} chars)", uri.len()),
        InputKind::RemoteUrl(url) => url.to_string(),
        InputKind::File(path) => path.display().to_string(),
    }
}
