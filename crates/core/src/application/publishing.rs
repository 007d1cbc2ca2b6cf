// Short-video publishing pipeline (shared by tasks and posts)
//
// File sources:   upload-urls -> PUT video (+ thumbnail) -> register by-file
// URL / repost:   [upload-urls -> PUT thumbnail] -> register by-url
//
// No compensation: a failed upload leaves earlier backend state untouched.

use crate::application::api_call::fetch;
use crate::domain::publishing::{RegisterByFile, RegisterByUrl, UploadUrlsRequest};
use crate::domain::{MediaFile, PublishOptions, PublishTarget, UploadUrls, VideoSource};
use crate::error::{Result, SdkError};
use crate::port::{ApiRequest, HttpTransport, ObjectUpload, TimeProvider};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};

pub(crate) struct VideoPublisher {
    transport: Arc<dyn HttpTransport>,
    time_provider: Arc<dyn TimeProvider>,
    base_path: &'static str,
}

impl VideoPublisher {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        time_provider: Arc<dyn TimeProvider>,
        base_path: &'static str,
    ) -> Self {
        Self {
            transport,
            time_provider,
            base_path,
        }
    }

    /// Run the pipeline and decode the registration result
    pub async fn publish<T: DeserializeOwned>(
        &self,
        target: &PublishTarget,
        source: VideoSource,
        mut options: PublishOptions,
    ) -> Result<T> {
        source.validate()?;
        options.validate(self.time_provider.now())?;

        let thumbnail = options.thumbnail.take();
        let source_type = source.source_type();
        info!(
            base = self.base_path,
            scope = %target.scope_path(),
            source_type = %source_type,
            scheduled = options.scheduled_at.is_some(),
            "Publishing video"
        );

        match source {
            VideoSource::File(video) => {
                let urls = self
                    .request_upload_urls(Some(&video), thumbnail.as_ref())
                    .await?;
                let video_upload_url = urls
                    .video_upload_url
                    .clone()
                    .ok_or_else(|| missing("video upload URL"))?;
                let video_file_url = urls
                    .video_file_url
                    .clone()
                    .ok_or_else(|| missing("video file URL"))?;

                self.put(video_upload_url, video).await?;
                let thumbnail_file_url = self.put_thumbnail(&urls, thumbnail).await?;

                let body = RegisterByFile {
                    video_file_url: &video_file_url,
                    thumbnail_file_url: thumbnail_file_url.as_deref(),
                    fields: options.fields(),
                };
                let call = ApiRequest::post(self.endpoint(target, "by-file")).json(&body)?;
                fetch(self.transport.as_ref(), call).await
            }
            VideoSource::Url(url) | VideoSource::Repost { url, .. } => {
                let thumbnail_file_url = match thumbnail {
                    Some(thumbnail) => {
                        let urls = self.request_upload_urls(None, Some(&thumbnail)).await?;
                        self.put_thumbnail(&urls, Some(thumbnail)).await?
                    }
                    None => None,
                };

                let body = RegisterByUrl {
                    source_type,
                    video_url: &url,
                    thumbnail_file_url: thumbnail_file_url.as_deref(),
                    fields: options.fields(),
                };
                let call = ApiRequest::post(self.endpoint(target, "by-url")).json(&body)?;
                fetch(self.transport.as_ref(), call).await
            }
        }
    }

    fn endpoint(&self, target: &PublishTarget, variant: &str) -> String {
        format!("{}/{}/{}", self.base_path, target.scope_path(), variant)
    }

    async fn request_upload_urls(
        &self,
        video: Option<&MediaFile>,
        thumbnail: Option<&MediaFile>,
    ) -> Result<UploadUrls> {
        let body = UploadUrlsRequest {
            video_file_name: video.map(|v| v.file_name.as_str()),
            video_content_type: video.map(|v| v.content_type.as_str()),
            thumbnail_file_name: thumbnail.map(|t| t.file_name.as_str()),
            thumbnail_content_type: thumbnail.map(|t| t.content_type.as_str()),
        };
        let call = ApiRequest::post(format!("{}/upload-urls", self.base_path)).json(&body)?;
        fetch(self.transport.as_ref(), call).await
    }

    async fn put_thumbnail(
        &self,
        urls: &UploadUrls,
        thumbnail: Option<MediaFile>,
    ) -> Result<Option<String>> {
        let Some(thumbnail) = thumbnail else {
            return Ok(None);
        };
        let upload_url = urls
            .thumbnail_upload_url
            .clone()
            .ok_or_else(|| missing("thumbnail upload URL"))?;
        let file_url = urls
            .thumbnail_file_url
            .clone()
            .ok_or_else(|| missing("thumbnail file URL"))?;

        self.put(upload_url, thumbnail).await?;
        Ok(Some(file_url))
    }

    async fn put(&self, upload_url: String, file: MediaFile) -> Result<()> {
        debug!(file = %file.file_name, bytes = file.len(), "Uploading to storage");
        self.transport
            .upload(ObjectUpload {
                upload_url,
                content_type: file.content_type,
                bytes: file.bytes,
            })
            .await
    }
}

fn missing(what: &str) -> SdkError {
    SdkError::Unsuccessful {
        message: format!("backend did not issue a {what}"),
        exception: None,
    }
}
