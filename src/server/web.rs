mod home;
mod post;

use axum::{
  Extension, Router,
  extract::{Path, Query},
  response::{IntoResponse, Response},
  routing,
};
use chrono::{DateTime, FixedOffset};
use http::StatusCode;
use maud::{DOCTYPE, Markup, html};
use serde::Deserialize;

use crate::listing::PaginatedListing;
use crate::readtime;
use crate::server::BlogService;
use crate::util::{Error, date};

// Bound on the provider round trips a single request may trigger.
const MAX_LISTING_PAGES: usize = 50;

pub fn router() -> Router {
  Router::new()
    .route("/", routing::get(handle_home))
    .route("/post/:uid", routing::get(handle_post))
}

#[derive(Deserialize)]
struct HomeQuery {
  /// Number of listing pages loaded so far; the "load more" link points
  /// back here with one more.
  #[serde(default = "default_pages")]
  pages: usize,
}

fn default_pages() -> usize {
  1
}

async fn handle_home(
  Query(query): Query<HomeQuery>,
  Extension(service): Extension<BlogService>,
) -> Result<Markup, Response> {
  let provider = service.provider();
  let wanted = query.pages.clamp(1, MAX_LISTING_PAGES);

  let first = provider.first_page().await.map_err(into_response)?;
  let mut listing = PaginatedListing::initialize(first);

  let mut loaded = 1;
  while loaded < wanted && listing.has_more() {
    listing
      .load_next(|token| async move { provider.page_at(&token).await })
      .await
      .map_err(into_response)?;
    loaded += 1;
  }

  Ok(home::render_home_page(service.site(), &listing, loaded))
}

async fn handle_post(
  Path(uid): Path<String>,
  Extension(service): Extension<BlogService>,
) -> Result<Markup, Response> {
  let provider = service.provider();
  let site = service.site();

  let post = provider.get_by_uid(&uid).await.map_err(into_response)?;
  let adjacent =
    provider.adjacent_of(&post.id).await.map_err(into_response)?;
  let minutes = readtime::estimate_at(&post, site.words_per_minute);

  Ok(post::render_post_page(site, &post, &adjacent, minutes))
}

fn into_response(error: Error) -> Response {
  match error {
    Error::PostNotFound(uid) => {
      (StatusCode::NOT_FOUND, format!("Post {uid} not found"))
        .into_response()
    }
    error => {
      (StatusCode::INTERNAL_SERVER_ERROR, format!("{error:?}"))
        .into_response()
    }
  }
}

fn page_shell(title: &str, site_title: &str, body: Markup) -> Markup {
  html! {
    (DOCTYPE)
    html {
      head {
        title { (title) }
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1";
      }
      body {
        header {
          a href="/" { h1 { (site_title) } }
        }
        (body)
      }
    }
  }
}

fn date_fragment(date: Option<&DateTime<FixedOffset>>) -> Markup {
  html! {
    @if let Some(date) = date {
      time datetime=(date.to_rfc3339()) { (date::format_display(date)) }
    }
  }
}
