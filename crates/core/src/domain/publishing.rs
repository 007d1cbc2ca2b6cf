// Short-video publishing: source classification, targets and options

use crate::domain::error::{DomainError, Result};
use crate::domain::short_link::is_http_url;
use crate::domain::social::{Platform, Privacy, SourceType};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// In-memory media payload destined for a pre-signed upload URL
#[derive(Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn expect_kind(&self, expected: &'static str) -> Result<()> {
        if !self.content_type.to_ascii_lowercase().starts_with(expected) {
            return Err(DomainError::InvalidContentType {
                content_type: self.content_type.clone(),
                expected,
            });
        }
        if self.is_empty() {
            return Err(DomainError::Validation(format!(
                "file '{}' is empty",
                self.file_name
            )));
        }
        Ok(())
    }
}

// Payloads can be hundreds of MB; never print them.
impl fmt::Debug for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Where a video comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Binary payload uploaded through a pre-signed URL
    File(MediaFile),
    /// Publicly fetchable video URL
    Url(String),
    /// Existing post on another platform, referenced by its URL
    Repost { url: String, platform: Platform },
}

struct RepostPattern {
    platform: Platform,
    regex: Regex,
}

const REPOST_URLS: &[(Platform, &str)] = &[
    // Facebook reels, watch links and page videos
    (Platform::Facebook, r"^https?://(?:(?:www|m|web)\.)?facebook\.com/reel/\d+"),
    (Platform::Facebook, r"^https?://(?:(?:www|m|web)\.)?facebook\.com/watch/?\?(?:[^#]*&)?v=\d+"),
    (Platform::Facebook, r"^https?://(?:(?:www|m|web)\.)?facebook\.com/watch/\d+"),
    (Platform::Facebook, r"^https?://(?:(?:www|m|web)\.)?facebook\.com/[^/?#]+/videos/(?:[^/?#]+/)?\d+"),
    (Platform::Facebook, r"^https?://fb\.watch/[\w-]+"),
    // TikTok video pages and share links
    (Platform::TikTok, r"^https?://(?:(?:www|m)\.)?tiktok\.com/@[\w.-]+/video/\d+"),
    (Platform::TikTok, r"^https?://(?:vm|vt)\.tiktok\.com/[\w-]+"),
    (Platform::TikTok, r"^https?://(?:(?:www|m)\.)?tiktok\.com/t/[\w-]+"),
    // YouTube Shorts
    (Platform::YouTube, r"^https?://(?:(?:www|m)\.)?youtube\.com/shorts/[\w-]+"),
];

fn repost_patterns() -> &'static [RepostPattern] {
    static PATTERNS: OnceLock<Vec<RepostPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        REPOST_URLS
            .iter()
            .map(|&(platform, pattern)| RepostPattern {
                platform,
                regex: Regex::new(&format!("(?i){pattern}"))
                    .expect("repost URL patterns are valid regexes"),
            })
            .collect()
    })
}

impl VideoSource {
    /// Classify a string source as repost, plain URL, or reject it
    pub fn detect(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DomainError::UnsupportedVideoSource(
                "empty source".to_string(),
            ));
        }

        if let Some(platform) = Self::repost_platform(input) {
            return Ok(VideoSource::Repost {
                url: input.to_string(),
                platform,
            });
        }

        if is_http_url(input) {
            return Ok(VideoSource::Url(input.to_string()));
        }

        Err(DomainError::UnsupportedVideoSource(format!(
            "'{input}' is neither an http(s) URL nor a file"
        )))
    }

    /// Platform of a recognised repost link
    pub fn repost_platform(url: &str) -> Option<Platform> {
        repost_patterns()
            .iter()
            .find(|p| p.regex.is_match(url))
            .map(|p| p.platform)
    }

    pub fn file(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        VideoSource::File(MediaFile::new(file_name, content_type, bytes))
    }

    pub fn source_type(&self) -> SourceType {
        match self {
            VideoSource::File(_) => SourceType::File,
            VideoSource::Url(_) => SourceType::Url,
            VideoSource::Repost { .. } => SourceType::Repost,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            VideoSource::File(file) => file.expect_kind("video/"),
            _ => Ok(()),
        }
    }
}

/// Publishing context of a task or post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    /// Every connected account of the workspace (optionally narrowed by platform)
    Workspace(String),
    /// A single connected account
    Account(String),
}

impl PublishTarget {
    /// `workspace/{id}` or `account/{id}` with the id path-escaped
    pub fn scope_path(&self) -> String {
        match self {
            PublishTarget::Workspace(id) => format!("workspace/{}", urlencoding::encode(id)),
            PublishTarget::Account(id) => format!("account/{}", urlencoding::encode(id)),
        }
    }
}

/// Caller-facing knobs shared by task and post publishing
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub platforms: Vec<Platform>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub thumbnail: Option<MediaFile>,
    pub privacy: Option<Privacy>,
}

impl PublishOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        if !self.platforms.contains(&platform) {
            self.platforms.push(platform);
        }
        self
    }

    pub fn schedule_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    pub fn thumbnail(mut self, thumbnail: MediaFile) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    pub fn privacy(mut self, privacy: Privacy) -> Self {
        self.privacy = Some(privacy);
        self
    }

    pub fn validate(&self, now: DateTime<Utc>) -> Result<()> {
        if let Some(at) = self.scheduled_at {
            if at < now {
                return Err(DomainError::ScheduleInPast(at.to_rfc3339()));
            }
        }
        if let Some(thumbnail) = &self.thumbnail {
            thumbnail.expect_kind("image/")?;
        }
        Ok(())
    }

    pub(crate) fn fields(&self) -> PublishFields<'_> {
        PublishFields {
            title: self.title.as_deref(),
            caption: self.caption.as_deref(),
            platforms: &self.platforms,
            scheduled_at: self.scheduled_at,
            privacy: self.privacy,
        }
    }
}

// ============================================================================
// Wire bodies of the upload-then-register flow
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublishFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<&'a str>,
    #[serde(skip_serializing_if = "no_platforms")]
    pub platforms: &'a [Platform],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<Privacy>,
}

fn no_platforms(platforms: &&[Platform]) -> bool {
    platforms.is_empty()
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadUrlsRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_file_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_content_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_file_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_content_type: Option<&'a str>,
}

/// Pre-signed PUT targets plus the public URLs the objects will have
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrls {
    #[serde(default)]
    pub video_upload_url: Option<String>,
    #[serde(default)]
    pub video_file_url: Option<String>,
    #[serde(default)]
    pub thumbnail_upload_url: Option<String>,
    #[serde(default)]
    pub thumbnail_file_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterByFile<'a> {
    pub video_file_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_file_url: Option<&'a str>,
    #[serde(flatten)]
    pub fields: PublishFields<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterByUrl<'a> {
    pub source_type: SourceType,
    pub video_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_file_url: Option<&'a str>,
    #[serde(flatten)]
    pub fields: PublishFields<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn kind(input: &str) -> SourceType {
        VideoSource::detect(input).unwrap().source_type()
    }

    #[test]
    fn test_every_repost_pattern_compiles() {
        assert_eq!(repost_patterns().len(), REPOST_URLS.len());
        for (platform, pattern) in REPOST_URLS {
            assert!(Regex::new(pattern).is_ok(), "{platform:?}: {pattern}");
        }
    }

    #[test]
    fn test_tiktok_links_are_reposts() {
        assert_eq!(
            kind("https://www.tiktok.com/@chef.anna/video/7301234567890123456"),
            SourceType::Repost
        );
        assert_eq!(kind("https://vm.tiktok.com/ZMabc123/"), SourceType::Repost);
        assert_eq!(kind("https://vt.tiktok.com/ZSxyz/"), SourceType::Repost);
        assert_eq!(kind("https://www.tiktok.com/t/ZTabc/"), SourceType::Repost);
        assert_eq!(
            VideoSource::repost_platform("https://tiktok.com/@a/video/1"),
            Some(Platform::TikTok)
        );
    }

    #[test]
    fn test_facebook_links_are_reposts() {
        for url in [
            "https://www.facebook.com/reel/1234567890",
            "https://facebook.com/watch/?v=1234567890",
            "https://www.facebook.com/watch?ref=x&v=42",
            "https://m.facebook.com/watch/98765",
            "https://www.facebook.com/SomePage/videos/1234567890/",
            "https://www.facebook.com/SomePage/videos/a-title/1234567890",
            "https://fb.watch/abc-DEF/",
        ] {
            assert_eq!(
                VideoSource::repost_platform(url),
                Some(Platform::Facebook),
                "{url}"
            );
        }
    }

    #[test]
    fn test_youtube_shorts_are_reposts() {
        assert_eq!(
            VideoSource::detect("https://youtube.com/shorts/dQw4w9WgXcQ").unwrap(),
            VideoSource::Repost {
                url: "https://youtube.com/shorts/dQw4w9WgXcQ".to_string(),
                platform: Platform::YouTube,
            }
        );
        assert_eq!(kind("HTTPS://WWW.YOUTUBE.COM/shorts/abc_DEF-1"), SourceType::Repost);
    }

    #[test]
    fn test_other_urls_are_plain_urls() {
        assert_eq!(kind("https://cdn.example.com/clip.mp4"), SourceType::Url);
        // regular YouTube watch pages are not shorts
        assert_eq!(kind("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), SourceType::Url);
        assert_eq!(kind("https://www.tiktok.com/@someone"), SourceType::Url);
        assert_eq!(kind("  http://example.org/v.mov  "), SourceType::Url);
    }

    #[test]
    fn test_non_urls_are_rejected() {
        for input in ["", "   ", "clip.mp4", "ftp://example.com/v.mp4"] {
            assert!(matches!(
                VideoSource::detect(input),
                Err(DomainError::UnsupportedVideoSource(_))
            ));
        }
    }

    #[test]
    fn test_binary_is_always_file() {
        let source = VideoSource::file("clip.mp4", "video/mp4", vec![0u8; 8]);
        assert_eq!(source.source_type(), SourceType::File);
        assert!(source.validate().is_ok());

        let wrong = VideoSource::file("clip.mp4", "image/png", vec![0u8; 8]);
        assert!(matches!(
            wrong.validate(),
            Err(DomainError::InvalidContentType { .. })
        ));
    }

    #[test]
    fn test_options_reject_past_schedule() {
        let now = Utc::now();
        let past = PublishOptions::default().schedule_at(now - Duration::minutes(5));
        assert!(matches!(
            past.validate(now),
            Err(DomainError::ScheduleInPast(_))
        ));

        let future = PublishOptions::default().schedule_at(now + Duration::hours(1));
        assert!(future.validate(now).is_ok());
    }

    #[test]
    fn test_scope_path_escapes_ids() {
        assert_eq!(
            PublishTarget::Workspace("ws 1".to_string()).scope_path(),
            "workspace/ws%201"
        );
        assert_eq!(PublishTarget::Account("acc-9".to_string()).scope_path(), "account/acc-9");
    }

    #[test]
    fn test_register_body_flattens_fields() {
        let options = PublishOptions::default()
            .title("Launch")
            .platform(Platform::TikTok);
        let body = serde_json::to_value(RegisterByUrl {
            source_type: SourceType::Repost,
            video_url: "https://vm.tiktok.com/x",
            thumbnail_file_url: None,
            fields: options.fields(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "sourceType": "repost",
                "videoUrl": "https://vm.tiktok.com/x",
                "title": "Launch",
                "platforms": ["tiktok"]
            })
        );
    }
}
