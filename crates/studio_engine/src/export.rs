use std::path::{Path, PathBuf};

use crate::data_url::{DataUrlError, ImageData};
use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid image payload: {0}")]
    Payload(#[from] DataUrlError),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Decodes a data-URL image and writes it as `{stem}-{timestamp}.{ext}`.
pub fn save_image(
    output_dir: &Path,
    file_stem: &str,
    timestamp: &str,
    data_url: &str,
) -> Result<PathBuf, ExportError> {
    let image = ImageData::from_data_url(data_url)?;
    let bytes = image.decode()?;
    let filename = format!(
        "{}-{}.{}",
        sanitize_component(file_stem),
        sanitize_component(timestamp),
        image.extension()
    );
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    Ok(writer.write(&filename, &bytes)?)
}

fn sanitize_component(input: &str) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .map(|c| if is_forbidden(c) { '-' } else { c })
        .collect();
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' | '\0'..='\u{1F}'
    )
}

#[cfg(test)]
mod tests {
    use super::sanitize_component;

    #[test]
    fn rfc3339_timestamps_become_filename_safe() {
        assert_eq!(
            sanitize_component("2026-10-19T08:30:00+00:00"),
            "2026-10-19T08-30-00+00-00"
        );
        assert_eq!(sanitize_component("  "), "image");
    }
}
