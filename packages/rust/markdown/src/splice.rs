//! Replacing the generated region of a document.

use repolens_shared::{RepolensError, Result};

/// The two literal lines delimiting the generated region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Markers {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new("<!-- PROJECTS:START -->", "<!-- PROJECTS:END -->")
    }
}

/// Replace everything from the first start marker through the last end
/// marker with `start`, a blank line, `body`, a blank line and `end`.
///
/// Text outside the markers is returned unchanged.
pub fn splice(template: &str, markers: &Markers, body: &str) -> Result<String> {
    if markers.start.is_empty() || markers.end.is_empty() {
        return Err(RepolensError::Render("markers must not be empty".into()));
    }

    let start_at = template
        .find(&markers.start)
        .ok_or_else(|| RepolensError::Render(format!("start marker '{}' not found", markers.start)))?;
    let end_at = template
        .rfind(&markers.end)
        .ok_or_else(|| RepolensError::Render(format!("end marker '{}' not found", markers.end)))?;

    let body_at = start_at + markers.start.len();
    if end_at < body_at {
        return Err(RepolensError::Render(format!(
            "end marker '{}' appears before start marker '{}'",
            markers.end, markers.start
        )));
    }

    let before = &template[..start_at];
    let after = &template[end_at + markers.end.len()..];
    let body = body.trim_end_matches('\n');

    Ok(format!(
        "{before}{}\n\n{body}\n\n{}{after}",
        markers.start, markers.end
    ))
}
