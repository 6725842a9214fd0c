//! Discord REST channel client.
//!
//! Minimal [`ChannelApi`] implementation over the two endpoints the timer
//! needs: channel lookup and channel rename. Requests carry a bounded timeout
//! so one stuck edit cannot stall a whole poll sweep.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use waitmark_core::{ChannelApiError, ChannelId, ChannelInfo};

use crate::api::ChannelApi;
use crate::config::TimerSettings;

#[derive(Clone)]
pub struct DiscordClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ChannelPayload {
    name: String,
}

impl DiscordClient {
    pub fn new(settings: &TimerSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.rename_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: settings.api_base.clone(),
            token: settings.bot_token.clone(),
        })
    }

    fn channel_url(&self, id: ChannelId) -> String {
        format!("{}/channels/{}", self.base_url, id)
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }
}

impl ChannelApi for DiscordClient {
    async fn resolve(&self, id: ChannelId) -> Result<ChannelInfo, ChannelApiError> {
        let response = self
            .http
            .get(self.channel_url(id))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelApiError::http_status(status.as_u16(), &body));
        }

        let payload: ChannelPayload = response
            .json()
            .await
            .map_err(|_| ChannelApiError::other("Failed to decode channel payload"))?;
        Ok(ChannelInfo {
            id,
            name: payload.name,
        })
    }

    async fn rename(&self, id: ChannelId, name: &str) -> Result<(), ChannelApiError> {
        let response = self
            .http
            .patch(self.channel_url(id))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&json!({ "name": name }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelApiError::http_status(status.as_u16(), &body));
        }
        tracing::debug!(channel = %id, name, "renamed channel");
        Ok(())
    }
}

fn map_transport_error(err: reqwest::Error) -> ChannelApiError {
    if err.is_timeout() {
        ChannelApiError::transient("Channel API request timed out")
    } else if err.is_connect() {
        ChannelApiError::transient(format!("Channel API connection failed: {err}"))
    } else {
        ChannelApiError::other(format!("Channel API request failed: {err}"))
    }
}
