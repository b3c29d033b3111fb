use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::client::ClientConfig;
use crate::listing::PaginatedListing;
use crate::post::AdjacentPosts;
use crate::provider::{Provider, ProviderConfig};
use crate::server::{self, ServerConfig};
use crate::util::{ConfigError, Result};
use crate::{readtime, richtext};

#[derive(Parser)]
pub struct Cli {
  #[clap(subcommand)]
  subcmd: SubCommand,

  /// Path to the site configuration file
  #[clap(long, short, env = "BLOGPORT_CONFIG")]
  config: PathBuf,
}

#[derive(Parser)]
enum SubCommand {
  /// Serve the blog
  Server(ServerConfig),
  // boxed because of the clippy::large_enum_variant warning
  /// Fetch a single post and print it to stdout
  Show(Box<ShowConfig>),
}

#[derive(Parser)]
pub struct ShowConfig {
  /// The uid of the post to fetch
  uid: String,
  /// Also print the flattened plain text of the post body
  #[clap(long, short)]
  text: bool,
  /// Also resolve and print the chronological neighbors of the post
  #[clap(long, short)]
  neighbors: bool,
  /// Words-per-minute used for the reading time estimate
  #[clap(long, default_value_t = readtime::WORDS_PER_MINUTE)]
  words_per_minute: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RootConfig {
  #[serde(default)]
  pub site: SiteConfig,
  pub provider: ProviderConfig,
  #[serde(default)]
  pub client: ClientConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SiteConfig {
  /// Title shown in the page header
  pub title: String,
  /// Show the "edited on" note on posts whose publication dates differ
  pub show_edited_date: bool,
  /// Words-per-minute used for the reading time badge
  pub words_per_minute: u32,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      title: env!("CARGO_PKG_NAME").to_owned(),
      show_edited_date: true,
      words_per_minute: readtime::WORDS_PER_MINUTE,
    }
  }
}

impl RootConfig {
  pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
    let f = std::fs::File::open(path)?;
    let config = serde_yaml::from_reader(f)?;
    Ok(config)
  }
}

impl Cli {
  pub async fn run(self) -> Result<()> {
    let config = RootConfig::load_from_file(&self.config)?;

    match self.subcmd {
      SubCommand::Server(server_config) => {
        server::serve(server_config, config).await
      }
      SubCommand::Show(show_config) => show_post(config, &show_config).await,
    }
  }
}

async fn show_post(config: RootConfig, show: &ShowConfig) -> Result<()> {
  let client = config.client.build()?;
  let provider = Provider::new(config.provider, client);

  let post = provider.get_by_uid(&show.uid).await?;
  let minutes = readtime::estimate_at(&post, show.words_per_minute);

  println!("{} ({} min read)", post.title, minutes);
  if show.text {
    for section in &post.sections {
      if let Some(heading) = &section.heading {
        println!("\n# {heading}");
      }
      println!("{}", richtext::as_text(&section.body));
    }
  }

  if show.neighbors {
    let adjacent = resolve_neighbors(&provider, &post.uid).await?;
    match &adjacent.previous {
      Some(previous) => println!("previous: {} ({})", previous.title, previous.uid),
      None => println!("previous: none"),
    }
    match &adjacent.next {
      Some(next) => println!("next: {} ({})", next.title, next.uid),
      None => println!("next: none"),
    }
  }

  Ok(())
}

// Walks the whole listing so the lookup sees every post, then resolves
// the neighbors locally.
async fn resolve_neighbors(
  provider: &Provider,
  uid: &str,
) -> Result<AdjacentPosts> {
  let mut listing = PaginatedListing::initialize(provider.first_page().await?);
  while listing.has_more() {
    listing
      .load_next(|token| async move { provider.page_at(&token).await })
      .await?;
  }

  Ok(AdjacentPosts::resolve(uid, listing.items()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_root_config_defaults() {
    const YAML_CONFIG: &str = r#"
provider:
  api_url: "https://blog.cdn.example.io/api/v2"
"#;

    let config: RootConfig = serde_yaml::from_str(YAML_CONFIG).unwrap();
    assert_eq!(config.site.title, "blogport");
    assert!(config.site.show_edited_date);
    assert_eq!(config.site.words_per_minute, 200);
    assert_eq!(config.provider.document_type, "posts");
    assert_eq!(config.provider.page_size, 20);
  }

  #[test]
  fn test_root_config_overrides() {
    const YAML_CONFIG: &str = r#"
site:
  title: spacetraveling
  show_edited_date: false
provider:
  api_url: "https://blog.cdn.example.io/api/v2"
  document_type: articles
  page_size: 5
client:
  timeout: 30s
"#;

    let config: RootConfig = serde_yaml::from_str(YAML_CONFIG).unwrap();
    assert_eq!(config.site.title, "spacetraveling");
    assert!(!config.site.show_edited_date);
    assert_eq!(config.provider.document_type, "articles");
    assert_eq!(config.provider.page_size, 5);
  }
}
