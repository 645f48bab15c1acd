// Photo resolution: destination filenames and public download URLs.
//
// The filename and the URL are resolved independently for every direction.
// A record may carry a URL with no recorded filename answer, or the other
// way around; either side simply stays empty.

use serde_json::Value as JSValue;

use crate::config::Attachment;
use crate::value::{get_string, key};

/// The four cardinal directions photographed at every site.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

// The query suffix the collection server appends to attachment URLs.
const TRANSPORT_SUFFIX: &str = "?format=json";

/// Builds the canonical destination filename for one direction's photo.
///
/// Returns the empty string when no original filename was recorded for that
/// direction, meaning no photo was actually captured. Otherwise the name is
/// `{record id}-{direction}.jpg`, with any `uuid:` namespace tag stripped
/// and the extension always forced to `.jpg` for the normalized photo store.
pub fn image_file_name(record_id: &str, direction: Direction, original: Option<&str>) -> String {
    match original {
        Some(s) if !s.is_empty() => {}
        _ => return String::new(),
    }
    let clean = record_id.strip_prefix("uuid:").unwrap_or(record_id);
    format!("{}-{}.jpg", clean, direction.as_str())
}

/// Resolves the public download URL for one direction by exact question-path
/// match against the attachment list, stripping the transport query suffix.
/// Returns the empty string when nothing matches.
pub fn attachment_url(
    attachments: &[Attachment],
    photo_prefix: &str,
    direction: Direction,
) -> String {
    let xpath = photo_field(photo_prefix, direction);
    match attachments.iter().find(|a| a.question_xpath == xpath) {
        Some(a) if !a.download_url.is_empty() => strip_transport_suffix(&a.download_url).to_string(),
        _ => String::new(),
    }
}

/// Picks the photo group path in use for this record. Form revisions nest
/// the photo group under different parents; the first convention with at
/// least one direction answered wins, else the last one listed.
pub(crate) fn resolve_photo_prefix<'a>(data: &JSValue, conventions: &[&'a str]) -> &'a str {
    for prefix in conventions {
        let answered = Direction::ALL
            .iter()
            .any(|d| get_string(data, &photo_field(prefix, *d)).is_some());
        if answered {
            return prefix;
        }
    }
    conventions.last().copied().unwrap_or("")
}

pub(crate) fn photo_field(prefix: &str, direction: Direction) -> String {
    key(prefix, &format!("photo_{}", direction.as_str()))
}

pub(crate) fn read_attachments(data: &JSValue) -> Vec<Attachment> {
    let arr = match data.get("_attachments") {
        Some(JSValue::Array(arr)) => arr,
        _ => return Vec::new(),
    };
    arr.iter()
        .filter_map(|a| {
            let xpath = a.get("question_xpath")?.as_str()?;
            let url = a
                .get("download_url")
                .and_then(|u| u.as_str())
                .unwrap_or("");
            Some(Attachment {
                question_xpath: xpath.to_string(),
                download_url: url.to_string(),
            })
        })
        .collect()
}

fn strip_transport_suffix(url: &str) -> &str {
    let n = url.len();
    let k = TRANSPORT_SUFFIX.len();
    if n >= k && url.is_char_boundary(n - k) && url[n - k..].eq_ignore_ascii_case(TRANSPORT_SUFFIX) {
        &url[..n - k]
    } else {
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filename_requires_an_original() {
        assert_eq!(image_file_name("uuid:abcd", Direction::North, None), "");
        assert_eq!(image_file_name("uuid:abcd", Direction::North, Some("")), "");
        assert_eq!(
            image_file_name("uuid:abcd", Direction::North, Some("IMG_0001.png")),
            "abcd-north.jpg"
        );
        // No namespace tag, nothing to strip.
        assert_eq!(
            image_file_name("abcd", Direction::West, Some("x.jpeg")),
            "abcd-west.jpg"
        );
    }

    #[test]
    fn url_suffix_is_stripped_case_insensitively() {
        let atts = vec![Attachment {
            question_xpath: "g/photos/photo_north".to_string(),
            download_url: "https://kc.example.org/attachments/123/?FORMAT=json".to_string(),
        }];
        assert_eq!(
            attachment_url(&atts, "g/photos", Direction::North),
            "https://kc.example.org/attachments/123/"
        );
    }

    #[test]
    fn unmatched_directions_are_empty() {
        let atts = vec![Attachment {
            question_xpath: "g/photos/photo_north".to_string(),
            download_url: "https://kc.example.org/attachments/123/".to_string(),
        }];
        assert_eq!(attachment_url(&atts, "g/photos", Direction::South), "");
    }

    #[test]
    fn prefix_fallback_uses_answered_convention() {
        let data = json!({
            "new_group/photos/photo_east": "1650000000000.jpg",
        });
        let conventions = ["old_group/photos", "new_group/photos"];
        assert_eq!(resolve_photo_prefix(&data, &conventions), "new_group/photos");

        let empty = json!({});
        assert_eq!(resolve_photo_prefix(&empty, &conventions), "new_group/photos");
    }
}
