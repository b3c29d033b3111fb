use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::util::{Error, Result};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientConfig {
  user_agent: Option<String>,
  accept: Option<String>,
  #[serde(default = "default_timeout")]
  #[serde(deserialize_with = "duration_str::deserialize_duration")]
  timeout: Duration,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      user_agent: None,
      accept: None,
      timeout: default_timeout(),
    }
  }
}

impl ClientConfig {
  fn to_builder(&self) -> reqwest::ClientBuilder {
    let mut builder = reqwest::Client::builder();

    if let Some(user_agent) = &self.user_agent {
      builder = builder.user_agent(user_agent);
    } else {
      builder = builder.user_agent(crate::util::USER_AGENT);
    }

    let mut header_map = HeaderMap::new();
    if let Some(accept) = &self.accept {
      header_map
        .append("Accept", accept.try_into().expect("invalid Accept value"));
    }

    if !header_map.is_empty() {
      builder = builder.default_headers(header_map);
    }

    builder = builder.timeout(self.timeout);

    builder
  }

  pub fn build(&self) -> Result<Client> {
    let client = self.to_builder().build()?;
    Ok(Client { client })
  }
}

pub struct Client {
  client: reqwest::Client,
}

impl Client {
  /// GET `url` and decode the JSON body. Non-2xx responses surface as
  /// `Error::HttpStatus` instead of a decode failure.
  pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
    debug!("fetching {}", url);
    let resp = self.client.get(url.clone()).send().await?;

    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
      return Err(Error::HttpStatus(status, url.clone()));
    }

    Ok(resp.json().await?)
  }
}

fn default_timeout() -> Duration {
  Duration::from_secs(10)
}
