//! Wikimedia thumbnail URLs.
//!
//! Commons serves resized copies under `/thumb/`:
//! `.../wikipedia/commons/a/ab/File.jpg` becomes
//! `.../wikipedia/commons/thumb/a/ab/File.jpg/800px-File.jpg`.

use once_cell::sync::Lazy;
use regex::Regex;

static ORIGINAL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^(https://upload\.wikimedia\.org/wikipedia/[^/]+)/([a-f0-9]/[a-f0-9]{2})/(.+)$")
        .ok()
});

static THUMB_WIDTH: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"/\d+px-").ok());

/// Rewrite a Wikimedia upload URL to a `width`-pixel thumbnail.
///
/// Other hosts and unrecognised paths are returned unchanged.
#[must_use]
pub fn wiki_thumb(url: &str, width: u32) -> String {
    if !url.contains("upload.wikimedia.org") {
        return url.to_string();
    }

    if url.contains("/thumb/") {
        return THUMB_WIDTH.as_ref().map_or_else(
            || url.to_string(),
            |re| re.replace(url, format!("/{width}px-")).into_owned(),
        );
    }

    ORIGINAL
        .as_ref()
        .and_then(|re| re.captures(url))
        .map_or_else(
            || url.to_string(),
            |caps| {
                let (base, hash_path, filename) = (&caps[1], &caps[2], &caps[3]);
                format!("{base}/thumb/{hash_path}/{filename}/{width}px-{filename}")
            },
        )
}

#[cfg(test)]
mod tests {
    use super::wiki_thumb;

    #[test]
    fn rewrites_commons_originals() {
        assert_eq!(
            wiki_thumb(
                "https://upload.wikimedia.org/wikipedia/commons/a/ab/Alta_Ski.jpg",
                800
            ),
            "https://upload.wikimedia.org/wikipedia/commons/thumb/a/ab/Alta_Ski.jpg/800px-Alta_Ski.jpg"
        );
    }

    #[test]
    fn replaces_existing_thumb_width() {
        assert_eq!(
            wiki_thumb(
                "https://upload.wikimedia.org/wikipedia/en/thumb/3/3f/Taos.jpg/1280px-Taos.jpg",
                400
            ),
            "https://upload.wikimedia.org/wikipedia/en/thumb/3/3f/Taos.jpg/400px-Taos.jpg"
        );
    }

    #[test]
    fn leaves_other_urls_alone() {
        let url = "https://example.com/a/ab/photo.jpg";
        assert_eq!(wiki_thumb(url, 800), url);
        let odd = "https://upload.wikimedia.org/wikipedia/commons/photo.jpg";
        assert_eq!(wiki_thumb(odd, 800), odd);
    }
}
