mod web;

use std::sync::Arc;

use axum::{Extension, routing::get};
use clap::Parser;
use http::StatusCode;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::cli::{RootConfig, SiteConfig};
use crate::provider::Provider;
use crate::util::Result;

#[derive(Parser)]
pub struct ServerConfig {
  #[clap(long, short, default_value = "127.0.0.1:4080")]
  bind: String,
}

/// Shared handler state: the site settings and the content provider.
#[derive(Clone)]
pub struct BlogService {
  inner: Arc<Inner>,
}

struct Inner {
  site: SiteConfig,
  provider: Provider,
}

impl BlogService {
  pub fn try_from(config: RootConfig) -> Result<Self> {
    let client = config.client.build()?;
    let provider = Provider::new(config.provider, client);

    Ok(Self {
      inner: Arc::new(Inner {
        site: config.site,
        provider,
      }),
    })
  }

  pub fn site(&self) -> &SiteConfig {
    &self.inner.site
  }

  pub fn provider(&self) -> &Provider {
    &self.inner.provider
  }
}

pub async fn serve(
  server_config: ServerConfig,
  config: RootConfig,
) -> Result<()> {
  info!("listening on {}", server_config.bind);
  let listener = tokio::net::TcpListener::bind(&server_config.bind).await?;

  let service = BlogService::try_from(config)?;

  let app = web::router()
    .route("/health", get(|| async { "ok" }))
    .fallback(get(|| async { (StatusCode::NOT_FOUND, "Page not found") }))
    .layer(Extension(service))
    .layer(CompressionLayer::new().gzip(true));

  info!("starting server");
  Ok(axum::serve(listener, app).await?)
}
