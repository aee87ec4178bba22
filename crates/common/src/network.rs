use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::models::{SubmissionRequest, SubmissionResponse};

pub const LOCAL_SERVER: &str = "http://127.0.0.1:5000";

const DATA_ENDPOINT: &str = "/scopus/data";
const DOWNLOAD_SEGMENTS: [&str; 2] = ["scopus", "download"];

/// The backend the submission form talks to.
#[async_trait]
pub trait ScopusBackend: Send + Sync {
    /// Posts the form parameters. Non-2xx statuses and undecodable bodies are errors.
    async fn submit_data(&self, request: &SubmissionRequest) -> Result<SubmissionResponse>;

    fn download_url(&self, filename: &str) -> Result<Url>;
}

#[derive(Debug, Clone)]
pub struct NetworkClient {
    client: Client,
    base_url: Url,
}

impl NetworkClient {
    pub fn new(base_url: Url) -> Result<Self> {
        // No timeout: a submission waits as long as the backend takes to build the file.
        let client = Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    pub fn local_client() -> Result<Self> {
        Self::new(Url::parse(LOCAL_SERVER)?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches a generated file into `dest_dir`, returning the written path.
    pub async fn download(&self, filename: &str, dest_dir: &Path) -> Result<PathBuf> {
        let local_name = Path::new(filename)
            .file_name()
            .ok_or(anyhow!("Invalid file name: {:?}", filename))?;
        let url = self.download_url(filename)?;
        debug!("Downloading {}", url);

        let bytes = self
            .client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let path = dest_dir.join(local_name);
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

#[async_trait]
impl ScopusBackend for NetworkClient {
    async fn submit_data(&self, request: &SubmissionRequest) -> Result<SubmissionResponse> {
        let url = self.base_url.join(DATA_ENDPOINT)?;
        debug!("Posting {:?} to {}", request, url);
        let resp = self
            .client
            .post(url.as_str())
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<SubmissionResponse>()
            .await?;
        Ok(resp)
    }

    /// `/scopus/download/{filename}`, with the filename kept as one encoded
    /// path segment so dot segments and slashes in it cannot leave the endpoint.
    fn download_url(&self, filename: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| anyhow!("{} cannot be a base url", self.base_url))?
            .clear()
            .extend(DOWNLOAD_SEGMENTS)
            .push(filename);
        Ok(url)
    }
}
