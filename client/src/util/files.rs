//! Browser file helpers: reading picked files and saving base64 images.
//!
//! TRADE-OFFS
//! ==========
//! Files are read fully into memory before upload. Uploads are capped at
//! 10 MB by validation, so this stays cheap.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use crate::net::types::FilePayload;

/// `data:` URL for a base64 PNG returned by the backend.
pub fn image_data_url(base64_png: &str) -> String {
    format!("data:image/png;base64,{base64_png}")
}

/// Suggested download name for a segmentation artifact.
pub fn artifact_filename(kind: &str, stamp: u64) -> String {
    format!("{kind}_{stamp}.png")
}

/// Trigger a browser download of `url` as `filename`. No-op outside the browser.
pub fn download_data_url(url: &str, filename: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        let Ok(link) = document
            .create_element("a")
            .map(|el| el.unchecked_into::<web_sys::HtmlAnchorElement>())
        else {
            log::warn!("download failed: cannot create anchor");
            return;
        };
        link.set_href(url);
        link.set_download(filename);
        if body.append_child(&link).is_ok() {
            link.click();
            let _ = body.remove_child(&link);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, filename);
    }
}

/// Read a picked file into memory.
///
/// # Errors
///
/// Returns an error string when the browser refuses to read the file.
#[cfg(feature = "hydrate")]
pub async fn read_file(file: &web_sys::File) -> Result<FilePayload, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    Ok(FilePayload {
        name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// First file selected in an `<input type="file">`.
#[cfg(feature = "hydrate")]
pub fn first_selected(input: &web_sys::HtmlInputElement) -> Option<web_sys::File> {
    input.files()?.get(0)
}

/// Human-readable size, e.g. `2.4 Mo`.
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let value = bytes as f64;
    if value < KB {
        format!("{bytes} o")
    } else if value < KB * KB {
        format!("{:.1} Ko", value / KB)
    } else {
        format!("{:.1} Mo", value / (KB * KB))
    }
}

pub fn describe(payload: &FilePayload) -> String {
    format!("{} ({})", payload.name, format_size(payload.size()))
}
