//! Query interface to the headless content API and adaptation of its
//! raw response shapes into the crate's own model.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::Client;
use crate::listing::Page;
use crate::post::{AdjacentPosts, PostDocument, PostSummary, Section};
use crate::richtext::RichTextBlock;
use crate::util::{self, Error, Result};

const ORDER_NEWEST_FIRST: &str = "[document.first_publication_date desc]";
const ORDER_OLDEST_FIRST: &str = "[document.first_publication_date]";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProviderConfig {
  /// Base URL of the content API, e.g.
  /// "https://my-repo.cdn.example.io/api/v2".
  pub api_url: Url,

  /// Document type queried for posts.
  #[serde(default = "default_document_type")]
  pub document_type: String,

  /// Number of summaries per listing page.
  #[serde(default = "default_page_size")]
  pub page_size: u32,
}

fn default_document_type() -> String {
  "posts".to_owned()
}

fn default_page_size() -> u32 {
  20
}

pub struct Provider {
  config: ProviderConfig,
  client: Client,
}

struct SearchQuery<'a> {
  predicate: String,
  page_size: u32,
  after: Option<&'a str>,
  orderings: Option<&'a str>,
}

impl Provider {
  pub fn new(config: ProviderConfig, client: Client) -> Self {
    Self { config, client }
  }

  /// The first listing page, newest posts first.
  pub async fn first_page(&self) -> Result<Page> {
    let query = SearchQuery {
      predicate: self.type_predicate(),
      page_size: self.config.page_size,
      after: None,
      orderings: Some(ORDER_NEWEST_FIRST),
    };
    Ok(self.search(&query).await?.into_page())
  }

  /// A listing page referenced by an opaque `next_page` token.
  pub async fn page_at(&self, token: &str) -> Result<Page> {
    let url = Url::parse(token)?;
    let resp: RawQueryResponse = self.client.get_json(&url).await?;
    Ok(resp.into_page())
  }

  /// The full document of the post with the given uid.
  pub async fn get_by_uid(&self, uid: &str) -> Result<PostDocument> {
    let query = SearchQuery {
      predicate: self.uid_predicate(uid),
      page_size: 1,
      after: None,
      orderings: None,
    };

    let resp = self.search(&query).await?;
    let doc = resp
      .results
      .into_iter()
      .next()
      .ok_or_else(|| Error::PostNotFound(uid.to_owned()))?;
    doc.into_document()
  }

  /// The chronological neighbors of the post with the given document
  /// id, resolved with two bounded queries of one result each.
  pub async fn adjacent_of(&self, id: &str) -> Result<AdjacentPosts> {
    let previous = self.neighbor(id, ORDER_NEWEST_FIRST).await?;
    let next = self.neighbor(id, ORDER_OLDEST_FIRST).await?;
    Ok(AdjacentPosts { previous, next })
  }

  async fn neighbor(
    &self,
    id: &str,
    orderings: &str,
  ) -> Result<Option<PostSummary>> {
    let query = SearchQuery {
      predicate: self.type_predicate(),
      page_size: 1,
      after: Some(id),
      orderings: Some(orderings),
    };

    let resp = self.search(&query).await?;
    Ok(resp.results.into_iter().next().map(RawDocument::into_summary))
  }

  async fn search(&self, query: &SearchQuery<'_>) -> Result<RawQueryResponse> {
    let url = self.search_url(query)?;
    self.client.get_json(&url).await
  }

  fn search_url(&self, query: &SearchQuery<'_>) -> Result<Url> {
    let mut url = self.config.api_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| Error::Message("provider api_url cannot be a base".into()))?
      .pop_if_empty()
      .extend(["documents", "search"]);

    {
      let mut pairs = url.query_pairs_mut();
      pairs.append_pair("q", &query.predicate);
      pairs.append_pair("pageSize", &query.page_size.to_string());
      if let Some(after) = query.after {
        pairs.append_pair("after", after);
      }
      if let Some(orderings) = query.orderings {
        pairs.append_pair("orderings", orderings);
      }
    }

    Ok(url)
  }

  fn type_predicate(&self) -> String {
    format!("[[at(document.type,\"{}\")]]", self.config.document_type)
  }

  fn uid_predicate(&self, uid: &str) -> String {
    format!("[[at(my.{}.uid,\"{}\")]]", self.config.document_type, uid)
  }
}

#[derive(Deserialize, Debug)]
pub struct RawQueryResponse {
  pub results: Vec<RawDocument>,
  #[serde(default)]
  pub next_page: Option<String>,
}

impl RawQueryResponse {
  fn into_page(self) -> Page {
    Page {
      results: self
        .results
        .into_iter()
        .map(RawDocument::into_summary)
        .collect(),
      next_page: self.next_page,
    }
  }
}

#[derive(Deserialize, Debug)]
pub struct RawDocument {
  pub id: String,
  #[serde(default)]
  pub uid: Option<String>,
  #[serde(default)]
  pub first_publication_date: Option<String>,
  #[serde(default)]
  pub last_publication_date: Option<String>,
  #[serde(default)]
  pub data: RawData,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawData {
  pub title: Option<String>,
  pub subtitle: Option<String>,
  pub author: Option<String>,
  pub banner: Option<RawBanner>,
  pub content: Vec<RawSection>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawBanner {
  #[serde(default)]
  pub url: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawSection {
  #[serde(default)]
  pub heading: Option<String>,
  #[serde(default)]
  pub body: Vec<RichTextBlock>,
}

impl RawDocument {
  // Some document types have no uid; fall back to the document id so
  // the summary still has a stable identifier.
  fn into_summary(self) -> PostSummary {
    let date = self.first_publication_date.and_then(util::date::parse_date);
    PostSummary {
      uid: self.uid.unwrap_or(self.id),
      publication_date: date,
      title: self.data.title.unwrap_or_default(),
      subtitle: self.data.subtitle.unwrap_or_default(),
      author: self.data.author.unwrap_or_default(),
    }
  }

  fn into_document(self) -> Result<PostDocument> {
    let uid = self.uid.ok_or(Error::MalformedDocument("missing uid"))?;

    let sections = self
      .data
      .content
      .into_iter()
      .map(|section| Section {
        heading: section.heading.filter(|h| !h.trim().is_empty()),
        body: section.body,
      })
      .collect();

    Ok(PostDocument {
      id: self.id,
      uid,
      first_publication_date: self
        .first_publication_date
        .and_then(util::date::parse_date),
      last_publication_date: self
        .last_publication_date
        .and_then(util::date::parse_date),
      title: self.data.title.unwrap_or_default(),
      author: self.data.author.unwrap_or_default(),
      banner_url: self.data.banner.and_then(|banner| banner.url),
      sections,
    })
  }
}
