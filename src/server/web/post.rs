use maud::{Markup, PreEscaped, html};

use crate::cli::SiteConfig;
use crate::post::{AdjacentPosts, PostDocument};
use crate::richtext;
use crate::util::date;

pub fn render_post_page(
  site: &SiteConfig,
  post: &PostDocument,
  adjacent: &AdjacentPosts,
  minutes: u32,
) -> Markup {
  let body = html! {
    @if let Some(banner) = &post.banner_url {
      img .banner src=(banner) alt=(post.title);
    }

    article {
      strong { (post.title) }
      div .info {
        (super::date_fragment(post.first_publication_date.as_ref()))
        span { (post.author) }
        span { (minutes) " min" }
      }

      @if site.show_edited_date {
        @if let Some(edited) = post.edited_date() {
          p .edited { "* edited on " (date::format_display(edited)) }
        }
      }

      @for section in &post.sections {
        section {
          @if let Some(heading) = &section.heading {
            h2 { (heading) }
          }
          (PreEscaped(richtext::as_html(&section.body)))
        }
      }

      nav {
        @if let Some(previous) = &adjacent.previous {
          a .prev href={ "/post/" (previous.uid) } {
            (previous.title) " " span { "Previous post" }
          }
        }
        @if let Some(next) = &adjacent.next {
          a .next href={ "/post/" (next.uid) } {
            (next.title) " " span { "Next post" }
          }
        }
      }
    }
  };

  let title = format!("{} | {}", post.title, site.title);
  super::page_shell(&title, &site.title, body)
}
