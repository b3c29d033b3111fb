use maud::{Markup, html};

use crate::cli::SiteConfig;
use crate::listing::PaginatedListing;
use crate::post::PostSummary;

pub fn render_home_page(
  site: &SiteConfig,
  listing: &PaginatedListing,
  loaded_pages: usize,
) -> Markup {
  let body = html! {
    main {
      @for post in listing.items() {
        (summary_fragment(post))
      }

      @if listing.has_more() {
        a .more-posts href={ "/?pages=" (loaded_pages + 1) } {
          "Load more posts"
        }
      }
    }
  };

  super::page_shell(&site.title, &site.title, body)
}

fn summary_fragment(post: &PostSummary) -> Markup {
  html! {
    article {
      a href={ "/post/" (post.uid) } {
        strong { (post.title) }
        p { (post.subtitle) }
      }
      div {
        (super::date_fragment(post.publication_date.as_ref()))
        span { (post.author) }
      }
    }
  }
}
