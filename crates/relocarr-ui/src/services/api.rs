//! HTTP client for the backend REST API.
//!
//! # Design
//! - Every request rides the session cookie (`credentials: include`); there
//!   are no auth headers to attach.
//! - A rejected login surfaces the response body text verbatim.
//! - Other failures propagate as `anyhow` errors for the caller to toast.

use anyhow::{Result, anyhow};
use gloo_net::http::Request;
use relocarr_api_models::{
    ConfigView, FixMetadataRequest, LoginRequest, MigrateRequest, TaskAccepted, Torrent,
    TorrentList,
};
use web_sys::RequestCredentials;

/// Thin client over the backend REST endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiClient;

impl ApiClient {
    /// Authenticate and establish the session cookie.
    ///
    /// # Errors
    /// Returns the backend's error text when the credentials are rejected.
    pub async fn login(self, username: &str, password: &str) -> Result<()> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = Request::post("/api/auth/login")
            .credentials(RequestCredentials::Include)
            .json(&body)?
            .send()
            .await?;
        if resp.ok() {
            Ok(())
        } else {
            let detail = resp.text().await.unwrap_or_default();
            if detail.is_empty() {
                Err(anyhow!("login failed"))
            } else {
                Err(anyhow!(detail))
            }
        }
    }

    /// Tear down the session cookie.
    ///
    /// # Errors
    /// Returns an error when the request cannot be sent.
    pub async fn logout(self) -> Result<()> {
        Request::post("/api/auth/logout")
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        Ok(())
    }

    /// Fetch the redacted config; success doubles as the session probe.
    ///
    /// # Errors
    /// Any non-2xx response means the session is not authenticated.
    pub async fn fetch_config(self) -> Result<ConfigView> {
        let resp = Request::get("/api/config")
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        if !resp.ok() {
            return Err(anyhow!("Auth required"));
        }
        Ok(resp.json().await?)
    }

    /// Fetch the full torrent snapshot.
    ///
    /// # Errors
    /// Propagates network and decode failures; the caller keeps its prior
    /// snapshot on error.
    pub async fn fetch_torrents(self) -> Result<Vec<Torrent>> {
        let resp = Request::get("/api/torrents")
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        if !resp.ok() {
            return Err(anyhow!("Failed to load torrents"));
        }
        Ok(resp.json::<TorrentList>().await?.items)
    }

    /// Start a migrate job for the given hashes.
    ///
    /// # Errors
    /// Returns an error when the backend refuses to start the task.
    pub async fn migrate(
        self,
        hashes: Vec<String>,
        dry_run: bool,
        delete_old: bool,
    ) -> Result<TaskAccepted> {
        let body = MigrateRequest {
            hashes,
            dry_run,
            delete_old,
        };
        let resp = Request::post("/api/actions/migrate")
            .credentials(RequestCredentials::Include)
            .json(&body)?
            .send()
            .await?;
        if !resp.ok() {
            return Err(anyhow!("Failed to start migrate task"));
        }
        Ok(resp.json().await?)
    }

    /// Ask the backend to nudge metadata for the given hashes.
    ///
    /// # Errors
    /// Returns an error when the backend rejects the request.
    pub async fn fix_metadata(self, hashes: Vec<String>) -> Result<()> {
        let body = FixMetadataRequest { hashes };
        let resp = Request::post("/api/actions/fix-metadata")
            .credentials(RequestCredentials::Include)
            .json(&body)?
            .send()
            .await?;
        if !resp.ok() {
            return Err(anyhow!("Failed to send fix-metadata"));
        }
        Ok(())
    }
}
