pub mod date;

pub const USER_AGENT: &str =
  concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("IO error")]
  Io(#[from] std::io::Error),

  #[error("YAML parse error")]
  Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("IO error")]
  Io(#[from] std::io::Error),

  #[error("Invalid URL {0}")]
  InvalidUrl(#[from] url::ParseError),

  #[error("Reqwest client error {0:?}")]
  Fetch(#[from] reqwest::Error),

  #[error("HTTP status error {0} (url: {1})")]
  HttpStatus(reqwest::StatusCode, url::Url),

  #[error("no more pages to load")]
  NoMorePages,

  #[error("post not found: {0}")]
  PostNotFound(String),

  #[error("Malformed document {0:?}")]
  MalformedDocument(&'static str),

  #[error("Config error {0:?}")]
  Config(#[from] ConfigError),

  #[error("{0}")]
  Message(String),
}
