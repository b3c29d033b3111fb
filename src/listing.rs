use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::post::PostSummary;
use crate::util::{Error, Result};

/// One page of listing results as consumed from the content provider.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Page {
  pub results: Vec<PostSummary>,
  pub next_page: Option<String>,
}

/// Post summaries accumulated across successive pages, plus the cursor
/// to the next one. Items only grow and keep provider order; the cursor
/// is `None` exactly when pagination is exhausted.
#[derive(Clone, Debug, Default)]
pub struct PaginatedListing {
  items: Vec<PostSummary>,
  next_page: Option<String>,
}

impl PaginatedListing {
  pub fn initialize(first_page: Page) -> Self {
    Self {
      items: first_page.results,
      next_page: first_page.next_page,
    }
  }

  pub fn items(&self) -> &[PostSummary] {
    &self.items
  }

  pub fn has_more(&self) -> bool {
    self.next_page.is_some()
  }

  /// Fetch the page behind the current cursor and append its results.
  ///
  /// Fails with `Error::NoMorePages` without calling `fetch` when the
  /// listing is exhausted. A failed fetch propagates and leaves the
  /// listing unmodified. The provider never repeats an item across
  /// pages, so no de-duplication happens here.
  pub async fn load_next<F, Fut>(&mut self, fetch: F) -> Result<()>
  where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<Page>>,
  {
    let token = self.next_page.clone().ok_or(Error::NoMorePages)?;
    let page = fetch(token).await?;

    self.items.extend(page.results);
    self.next_page = page.next_page;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn summary(uid: &str) -> PostSummary {
    PostSummary {
      uid: uid.to_owned(),
      publication_date: None,
      title: format!("Post {uid}"),
      subtitle: String::new(),
      author: "ada".to_owned(),
    }
  }

  fn page(uids: &[&str], next_page: Option<&str>) -> Page {
    Page {
      results: uids.iter().map(|uid| summary(uid)).collect(),
      next_page: next_page.map(str::to_owned),
    }
  }

  #[test]
  fn test_has_more_tracks_cursor() {
    let listing = PaginatedListing::initialize(page(&["a"], Some("page2")));
    assert!(listing.has_more());

    let listing = PaginatedListing::initialize(page(&["a"], None));
    assert!(!listing.has_more());
  }

  #[tokio::test]
  async fn test_load_next_appends_in_order() {
    let mut listing =
      PaginatedListing::initialize(page(&["a", "b"], Some("page2")));

    listing
      .load_next(|token| async move {
        assert_eq!(token, "page2");
        Ok(page(&["c", "d"], Some("page3")))
      })
      .await
      .unwrap();

    let uids: Vec<_> =
      listing.items().iter().map(|p| p.uid.as_str()).collect();
    assert_eq!(uids, ["a", "b", "c", "d"]);
    assert!(listing.has_more());
  }

  #[tokio::test]
  async fn test_load_next_when_exhausted_never_fetches() {
    let mut listing = PaginatedListing::initialize(page(&["a"], None));

    let result = listing
      .load_next(|_token| async move {
        panic!("fetch must not be called on an exhausted listing")
      })
      .await;

    assert!(matches!(result, Err(Error::NoMorePages)));
  }

  #[tokio::test]
  async fn test_failed_fetch_leaves_listing_unmodified() {
    let mut listing = PaginatedListing::initialize(page(&["a"], Some("page2")));

    let result = listing
      .load_next(|_token| async move {
        Err(Error::Message("provider unreachable".to_owned()))
      })
      .await;

    assert!(result.is_err());
    assert_eq!(listing.items().len(), 1);
    assert!(listing.has_more());
  }

  #[tokio::test]
  async fn test_exhaustion_end_to_end() {
    let mut listing = PaginatedListing::initialize(page(&["a"], Some("page2")));

    listing
      .load_next(|_token| async move { Ok(page(&["b"], None)) })
      .await
      .unwrap();

    assert_eq!(listing.items().len(), 2);
    assert!(!listing.has_more());
  }
}
