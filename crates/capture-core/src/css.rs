// File: crates/capture-core/src/css.rs
// Summary: CSS length validation and inline style assembly.

use crate::error::{CaptureError, Result};

const UNITS: &[&str] = &[
    "%", "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "in", "cm", "mm", "pt", "pc",
];
const KEYWORDS: &[&str] = &["auto", "inherit", "initial", "fit-content", "min-content", "max-content"];

/// A width/height before validation: a bare number (pixels) or CSS text.
#[derive(Clone, Debug, PartialEq)]
pub enum CssLength {
    Px(f64),
    Raw(String),
}

impl From<f64> for CssLength { fn from(v: f64) -> Self { CssLength::Px(v) } }
impl From<u32> for CssLength { fn from(v: u32) -> Self { CssLength::Px(v as f64) } }
impl From<&str> for CssLength { fn from(v: &str) -> Self { CssLength::Raw(v.to_string()) } }
impl From<String> for CssLength { fn from(v: String) -> Self { CssLength::Raw(v) } }

/// Format a pixel count without a trailing `.0` (`375` → `375px`, `37.5` → `37.5px`).
fn px(v: f64) -> String {
    format!("{}px", v)
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().map(|v| v.is_finite()).unwrap_or(false) && !s.contains(['e', 'E'])
}

/// Convert a length into valid CSS text.
///
/// Numbers and unitless numeric strings become pixels; `%`, absolute/relative
/// units, sizing keywords and `calc(...)` pass through.
pub fn validate_css_unit(len: impl Into<CssLength>) -> Result<String> {
    match len.into() {
        CssLength::Px(v) if v.is_finite() => Ok(px(v)),
        CssLength::Px(v) => Err(CaptureError::InvalidCssUnit(v.to_string())),
        CssLength::Raw(raw) => {
            let s = raw.trim();
            if is_number(s) {
                let v: f64 = s.parse().map_err(|_| CaptureError::InvalidCssUnit(raw.clone()))?;
                return Ok(px(v));
            }
            if KEYWORDS.contains(&s) || (s.starts_with("calc(") && s.ends_with(')')) {
                return Ok(s.to_string());
            }
            let valid = UNITS
                .iter()
                .filter_map(|u| s.strip_suffix(u))
                .any(is_number);
            if valid { Ok(s.to_string()) } else { Err(CaptureError::InvalidCssUnit(raw)) }
        }
    }
}

/// Join declarations into an inline style (`width:375px;height:275px;`),
/// skipping `None` values. Returns `None` when nothing is left.
pub fn style<'a>(decls: impl IntoIterator<Item = (&'a str, Option<String>)>) -> Option<String> {
    let out: String = decls
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| format!("{k}:{v};")))
        .collect();
    if out.is_empty() { None } else { Some(out) }
}
