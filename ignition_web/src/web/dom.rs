use ignition::LaunchConfig;

pub(super) fn document() -> Result<web_sys::Document, String> {
    let window = web_sys::window().ok_or("no window".to_string())?;
    window.document().ok_or("no document".to_string())
}

pub(super) fn element_by_id(
    document: &web_sys::Document,
    id: &str,
) -> Option<web_sys::Element> {
    document.get_element_by_id(id)
}

/// Optional page-embedded overrides:
/// `<script type="application/json" id="launch-config">…</script>`.
///
/// A missing or empty block means defaults; a malformed one is an error so
/// a broken page fails loudly at load instead of at click time.
pub(super) fn page_config(document: &web_sys::Document) -> Result<LaunchConfig, String> {
    let Some(block) = element_by_id(document, "launch-config") else {
        return Ok(LaunchConfig::default());
    };

    let text = block.text_content().unwrap_or_default();
    if text.trim().is_empty() {
        return Ok(LaunchConfig::default());
    }

    LaunchConfig::from_json(&text).map_err(|e| e.to_string())
}
