//! Publishing — uploads a rendered card to a Facebook Page and publishes it.
//!
//! Two Graph API calls per post: an unpublished photo upload that returns a
//! media id, then a feed post attaching that media. No retries here; a failed
//! publish is an upstream failure that the orchestrator retries as a whole.
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com/v18.0";
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Graph API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Graph API response for {step} had no id")]
    MissingId { step: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub id: String,
    pub name: String,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publishes the image with the caption and returns the public post id.
    async fn publish(&self, image_path: &Path, caption: &str) -> Result<String, PublishError>;

    /// Fetches the page's name and id to confirm the credentials work.
    async fn test_connection(&self) -> Result<PageInfo, PublishError>;
}

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct FacebookClient {
    client: Client,
    page_id: String,
    access_token: String,
    base_url: String,
}

impl FacebookClient {
    pub fn new(page_id: String, access_token: String) -> Result<Self, PublishError> {
        Ok(Self {
            client: Client::builder().timeout(UPLOAD_TIMEOUT).build()?,
            page_id,
            access_token,
            base_url: DEFAULT_GRAPH_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn upload_photo(&self, image_path: &Path, caption: &str) -> Result<String, PublishError> {
        let bytes = tokio::fs::read(image_path)
            .await
            .map_err(|source| PublishError::Image {
                path: image_path.display().to_string(),
                source,
            })?;
        let file_name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "quote.png".to_string());

        let form = Form::new()
            .part("source", Part::bytes(bytes).file_name(file_name).mime_str("image/png")?)
            .text("caption", caption.to_string())
            .text("published", "false")
            .text("access_token", self.access_token.clone());

        let response = self
            .client
            .post(format!("{}/{}/photos", self.base_url, self.page_id))
            .multipart(form)
            .send()
            .await?;

        let id = read_id(response, "photo upload").await?;
        info!("Photo uploaded: {id}");
        Ok(id)
    }

    async fn publish_photo(&self, media_id: &str) -> Result<String, PublishError> {
        let response = self
            .client
            .post(format!("{}/{}/feed", self.base_url, self.page_id))
            .json(&json!({
                "attached_media": [{ "media_fbid": media_id }],
                "access_token": self.access_token,
            }))
            .send()
            .await?;

        read_id(response, "feed publish").await
    }
}

async fn check_status(response: Response) -> Result<Response, PublishError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GraphError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    Err(PublishError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn read_id(response: Response, step: &'static str) -> Result<String, PublishError> {
    let body: IdResponse = check_status(response).await?.json().await?;
    body.id
        .filter(|id| !id.is_empty())
        .ok_or(PublishError::MissingId { step })
}

#[async_trait]
impl Publisher for FacebookClient {
    async fn publish(&self, image_path: &Path, caption: &str) -> Result<String, PublishError> {
        info!("Publishing post to Facebook...");
        let result = async {
            let media_id = self.upload_photo(image_path, caption).await?;
            self.publish_photo(&media_id).await
        }
        .await;

        match &result {
            Ok(post_id) => info!("Post published successfully: {post_id}"),
            Err(e) => error!("Failed to publish Facebook post: {e}"),
        }
        result
    }

    async fn test_connection(&self) -> Result<PageInfo, PublishError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, self.page_id))
            .query(&[("fields", "name,id"), ("access_token", self.access_token.as_str())])
            .send()
            .await?;

        let page: PageInfo = check_status(response).await?.json().await?;
        info!("Connected to Facebook Page: {}", page.name);
        Ok(page)
    }
}
