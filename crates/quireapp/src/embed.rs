//! # Embed Classification
//!
//! Turns an attachment into exactly one [`RenderVariant`]. Non-`url` kinds map
//! straight from their kind. `url` attachments are refined by inspecting the URL:
//!
//! 1. Short-video host watch/share/embed URL with an 11-character video token
//!    → [`RenderVariant::VideoEmbed`].
//! 2. Micro-blog status URL with a numeric status id → [`RenderVariant::SocialEmbed`].
//! 3. Anything the URL parser accepts → [`RenderVariant::GenericLink`], carrying the
//!    host for favicon/label fallback.
//! 4. Everything else → [`RenderVariant::BrokenLink`].
//!
//! Classification is total and side-effect free: a malformed URL is a rendered
//! state (a warning card), not a failure.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::model::{Attachment, AttachmentKind};

static VIDEO_HOST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?(?:www\.|m\.|music\.)?(?:youtube\.com/(?:watch\?(?:[^#\s]*&)?v=|embed/|shorts/|live/|v/)|youtube-nocookie\.com/embed/|youtu\.be/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
    )
    .expect("video host regex is valid")
});

static STATUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?(?:www\.|mobile\.)?(?:twitter\.com|x\.com)/(?:[A-Za-z0-9_]{1,15}|i/web)/status(?:es)?/(\d+)(?:[^0-9]|$)",
    )
    .expect("status regex is valid")
});

/// How an attachment is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum RenderVariant {
    Audio,
    Video,
    Image { width: Option<u32> },
    Document,
    VideoEmbed { video_id: String },
    SocialEmbed { status_id: String },
    GenericLink { host: Option<String> },
    BrokenLink,
}

impl RenderVariant {
    pub fn label(&self) -> &'static str {
        match self {
            RenderVariant::Audio => "audio",
            RenderVariant::Video => "video",
            RenderVariant::Image { .. } => "image",
            RenderVariant::Document => "document",
            RenderVariant::VideoEmbed { .. } => "video-embed",
            RenderVariant::SocialEmbed { .. } => "social-embed",
            RenderVariant::GenericLink { .. } => "generic-link",
            RenderVariant::BrokenLink => "broken-link",
        }
    }
}

pub fn classify(attachment: &Attachment) -> RenderVariant {
    match attachment.kind {
        AttachmentKind::Audio => RenderVariant::Audio,
        AttachmentKind::Video => RenderVariant::Video,
        AttachmentKind::Image => RenderVariant::Image {
            width: attachment.width,
        },
        AttachmentKind::Document => RenderVariant::Document,
        AttachmentKind::Url => classify_url(&attachment.url),
    }
}

/// Refine a URL into one of the four link variants.
pub fn classify_url(raw: &str) -> RenderVariant {
    let candidate = raw.trim();

    if let Some(video_id) = video_token(candidate) {
        return RenderVariant::VideoEmbed { video_id };
    }
    if let Some(status_id) = status_id(candidate) {
        return RenderVariant::SocialEmbed { status_id };
    }
    match Url::parse(candidate) {
        Ok(url) => RenderVariant::GenericLink {
            host: url.host_str().map(str::to_string),
        },
        Err(_) => RenderVariant::BrokenLink,
    }
}

pub fn video_token(url: &str) -> Option<String> {
    VIDEO_HOST_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

pub fn status_id(url: &str) -> Option<String> {
    STATUS_RE.captures(url).map(|caps| caps[1].to_string())
}
