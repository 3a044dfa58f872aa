//! Browser download of a generated CSV artifact
use contracts::shared::report_view::CsvArtifact;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Object URL that is revoked when dropped, on every exit path
struct ObjectUrl(String);

impl ObjectUrl {
    fn for_blob(blob: &Blob) -> Result<Self, String> {
        Url::create_object_url_with_blob(blob)
            .map(Self)
            .map_err(|e| format!("Failed to create object URL: {:?}", e))
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            log::warn!("Failed to revoke object URL: {:?}", e);
        }
    }
}

/// Offer the artifact to the user as a file download
pub fn download_csv(artifact: &CsvArtifact) -> Result<(), String> {
    let blob = create_blob(&artifact.content, CsvArtifact::MIME)?;
    let url = ObjectUrl::for_blob(&blob)?;

    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url.0);
    anchor.set_download(&artifact.filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    log::info!("Exported {} ({} bytes)", artifact.filename, artifact.content.len());
    Ok(())
}

fn create_blob(content: &str, mime: &str) -> Result<Blob, String> {
    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_str_sequence_and_options(&parts, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}
