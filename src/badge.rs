//! SVG badge rendering.

use crate::projects::{Release, ReleaseStatus};

/// `Cache-Control: max-age` for rendered badges.
pub const MAX_AGE_SECONDS: u32 = 3600;

pub const CONTENT_TYPE: &str = "image/svg+xml;charset=utf-8";

const LABEL_FILL: &str = "#555";
const HEIGHT: usize = 20;
const MIN_SEGMENT_WIDTH: usize = 60;
const GRADIENT: &str = "<linearGradient id=\"s\" x2=\"0\" y2=\"100%\"><stop offset=\"0\" stop-color=\"#bbb\" stop-opacity=\".1\"/><stop offset=\"1\" stop-opacity=\".1\"/></linearGradient>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub svg: Vec<u8>,
    pub etag: String,
    pub max_age: u32,
}

/// Render a two-segment badge: project name on the left, release version on the right.
#[must_use]
pub fn render(project_name: &str, release: &Release) -> Badge {
    Badge {
        svg: badge_svg(project_name, &release.version, status_fill(release.status)).into_bytes(),
        etag: format!("\"{}\"", release.version),
        max_age: MAX_AGE_SECONDS,
    }
}

const fn status_fill(status: ReleaseStatus) -> &'static str {
    match status {
        ReleaseStatus::GeneralAvailability => "#4c1",
        ReleaseStatus::Prerelease => "#dfb317",
        ReleaseStatus::Snapshot => "#fe7d37",
    }
}

fn segment_width(text: &str) -> usize {
    (text.chars().count() * 7 + 20).max(MIN_SEGMENT_WIDTH)
}

fn badge_svg(label: &str, value: &str, value_fill: &str) -> String {
    let label_width = segment_width(label);
    let value_width = segment_width(value);
    let width = label_width + value_width;
    let label_x = label_width / 2;
    let value_x = label_width + value_width / 2;

    let label = escape_xml(label);
    let value = escape_xml(value);

    // Named arguments are explicit: captures don't work through `concat!`.
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" role=\"img\" aria-label=\"{label}: {value}\">",
            "<title>{label}: {value}</title>",
            "{gradient}",
            "<clipPath id=\"r\"><rect width=\"{width}\" height=\"{height}\" rx=\"3\" fill=\"#fff\"/></clipPath>",
            "<g clip-path=\"url(#r)\"><rect width=\"{label_width}\" height=\"{height}\" fill=\"{label_fill}\"/>",
            "<rect x=\"{label_width}\" width=\"{value_width}\" height=\"{height}\" fill=\"{value_fill}\"/>",
            "<rect width=\"{width}\" height=\"{height}\" fill=\"url(#s)\"/></g>",
            "<g fill=\"#fff\" text-anchor=\"middle\" font-family=\"Verdana,Geneva,DejaVu Sans,sans-serif\" font-size=\"11\">",
            "<text x=\"{label_x}\" y=\"14\">{label}</text><text x=\"{value_x}\" y=\"14\">{value}</text></g>",
            "</svg>",
        ),
        width = width,
        height = HEIGHT,
        gradient = GRADIENT,
        label_width = label_width,
        value_width = value_width,
        label_fill = LABEL_FILL,
        value_fill = value_fill,
        label_x = label_x,
        value_x = value_x,
        label = label,
        value = value,
    )
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
