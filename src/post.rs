use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::richtext::RichTextBlock;

/// One entry of the listing page. Field order mirrors the provider's
/// `data` object after adaptation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PostSummary {
  pub uid: String,
  pub publication_date: Option<DateTime<FixedOffset>>,
  pub title: String,
  pub subtitle: String,
  pub author: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Section {
  pub heading: Option<String>,
  pub body: Vec<RichTextBlock>,
}

/// The full detail view of one post.
///
/// `id` is the provider-internal document identifier; it is distinct
/// from `uid` and only used as the `after` cursor of adjacent-post
/// queries.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PostDocument {
  pub id: String,
  pub uid: String,
  pub first_publication_date: Option<DateTime<FixedOffset>>,
  pub last_publication_date: Option<DateTime<FixedOffset>>,
  pub title: String,
  pub author: String,
  pub banner_url: Option<String>,
  pub sections: Vec<Section>,
}

impl PostDocument {
  /// The last edit date, or `None` if the post was never edited. The
  /// provider reports equal publication timestamps for unedited posts.
  pub fn edited_date(&self) -> Option<&DateTime<FixedOffset>> {
    match (&self.first_publication_date, &self.last_publication_date) {
      (Some(first), Some(last)) if last != first => Some(last),
      (None, Some(last)) => Some(last),
      _ => None,
    }
  }
}

/// Chronological neighbors of a post. `previous` is the nearest post
/// published before it, `next` the nearest published after.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AdjacentPosts {
  pub previous: Option<PostSummary>,
  pub next: Option<PostSummary>,
}

impl AdjacentPosts {
  /// Resolve both neighbors of `uid` in a list ordered newest first.
  /// Unknown uids resolve to no neighbors at all.
  pub fn resolve(uid: &str, posts_newest_first: &[PostSummary]) -> Self {
    let Some(pos) = posts_newest_first.iter().position(|p| p.uid == uid)
    else {
      return Self::default();
    };

    Self {
      next: pos.checked_sub(1).map(|i| posts_newest_first[i].clone()),
      previous: posts_newest_first.get(pos + 1).cloned(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::date::parse_date;

  fn summary(uid: &str, date: &str) -> PostSummary {
    PostSummary {
      uid: uid.to_owned(),
      publication_date: parse_date(date),
      title: format!("Post {uid}"),
      subtitle: String::new(),
      author: "ada".to_owned(),
    }
  }

  fn newest_first() -> Vec<PostSummary> {
    vec![
      summary("c", "2021-03-03"),
      summary("b", "2021-02-02"),
      summary("a", "2021-01-01"),
    ]
  }

  #[test]
  fn test_resolve_adjacent_middle() {
    let posts = newest_first();
    let adjacent = AdjacentPosts::resolve("b", &posts);

    let previous = adjacent.previous.unwrap();
    let next = adjacent.next.unwrap();
    assert_eq!(previous.uid, "a");
    assert_eq!(next.uid, "c");
    assert!(previous.publication_date < posts[1].publication_date);
    assert!(next.publication_date > posts[1].publication_date);
  }

  #[test]
  fn test_resolve_adjacent_newest_has_no_next() {
    let adjacent = AdjacentPosts::resolve("c", &newest_first());
    assert!(adjacent.next.is_none());
    assert_eq!(adjacent.previous.unwrap().uid, "b");
  }

  #[test]
  fn test_resolve_adjacent_oldest_has_no_previous() {
    let adjacent = AdjacentPosts::resolve("a", &newest_first());
    assert!(adjacent.previous.is_none());
    assert_eq!(adjacent.next.unwrap().uid, "b");
  }

  #[test]
  fn test_resolve_adjacent_unknown_uid() {
    let adjacent = AdjacentPosts::resolve("nope", &newest_first());
    assert_eq!(adjacent, AdjacentPosts::default());
  }

  #[test]
  fn test_edited_date() {
    let mut post = PostDocument {
      id: "X1".to_owned(),
      uid: "a".to_owned(),
      first_publication_date: parse_date("2021-01-01"),
      last_publication_date: parse_date("2021-01-01"),
      title: "A".to_owned(),
      author: "ada".to_owned(),
      banner_url: None,
      sections: vec![],
    };
    assert!(post.edited_date().is_none());

    post.last_publication_date = parse_date("2021-02-02");
    assert_eq!(post.edited_date(), post.last_publication_date.as_ref());
  }
}
