use url::Url;

/// Path prefix under which stored media objects are served.
pub const MEDIA_ROUTE_PREFIX: &str = "/api/v1/media/";

/// Storage key prefix for uploaded media.
pub const MEDIA_KEY_PREFIX: &str = "media/";

/// How a video is played back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Third-party player, rendered in an iframe.
    Embedded(String),
    /// A file we serve, rendered with a native video element.
    Hosted(String),
}

impl VideoSource {
    pub fn new(video_url: &str, embedded: bool) -> Self {
        if embedded {
            VideoSource::Embedded(embed_url(video_url))
        } else {
            VideoSource::Hosted(resolve_media_url(video_url))
        }
    }

    pub fn url(&self) -> &str {
        match self {
            VideoSource::Embedded(url) | VideoSource::Hosted(url) => url,
        }
    }
}

/// Which media a card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSelection {
    /// Image and video side by side.
    Both { image: String, video: VideoSource },
    Image(String),
    Video(VideoSource),
    Nothing,
}

impl MediaSelection {
    pub fn select(image_url: Option<&str>, video: Option<VideoSource>) -> Self {
        let image = image_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(resolve_media_url);
        let video = video.filter(|v| !v.url().is_empty());

        match (image, video) {
            (Some(image), Some(video)) => MediaSelection::Both { image, video },
            (Some(image), None) => MediaSelection::Image(image),
            (None, Some(video)) => MediaSelection::Video(video),
            (None, None) => MediaSelection::Nothing,
        }
    }

    /// Selection for a blog post or feature story.
    pub fn for_story(story: &crate::models::content::Story) -> Self {
        let video = story
            .video_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| VideoSource::new(url, story.video_embedded));
        Self::select(story.image_url.as_deref(), video)
    }
}

/// Turn a stored media reference into a URL the browser can load.
///
/// Absolute URLs pass through; storage keys are served by the media route.
pub fn resolve_media_url(stored: &str) -> String {
    let stored = stored.trim();
    if stored.starts_with("http://") || stored.starts_with("https://") || stored.starts_with('/') {
        return stored.to_string();
    }
    let key = stored.strip_prefix(MEDIA_KEY_PREFIX).unwrap_or(stored);
    format!("{MEDIA_ROUTE_PREFIX}{key}")
}

/// An outbound link safe to put in an `href`: absolute `http` or `https` only.
pub fn external_link(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.into()),
        _ => None,
    }
}

/// Rewrite YouTube watch and short links to their embeddable form.
///
/// Other URLs are returned unchanged.
pub fn embed_url(video_url: &str) -> String {
    let video_url = video_url.trim();
    let Ok(parsed) = Url::parse(video_url) else {
        return video_url.to_string();
    };

    let video_id = match parsed.host_str() {
        Some("youtu.be") => parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string),
        Some("www.youtube.com") | Some("youtube.com") | Some("m.youtube.com") => {
            if parsed.path() == "/watch" {
                parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            } else {
                parsed
                    .path()
                    .strip_prefix("/shorts/")
                    .map(str::to_string)
            }
        }
        _ => None,
    };

    match video_id.filter(|id| !id.is_empty()) {
        Some(id) => format!("https://www.youtube.com/embed/{id}"),
        None => video_url.to_string(),
    }
}
