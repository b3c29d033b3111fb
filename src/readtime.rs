//! Whole-minute reading time estimation for a post.

use crate::post::PostDocument;
use crate::richtext;

pub const WORDS_PER_MINUTE: u32 = 200;

/// Estimate how many minutes `post` takes to read at the given speed.
///
/// Counts whitespace-separated words in the title, the section headings
/// and the flattened section bodies, then rounds the quotient up. An
/// empty post yields 0; clamping the display to a minimum is left to
/// the caller.
pub fn estimate_at(post: &PostDocument, words_per_minute: u32) -> u32 {
  let title_words = word_count(&post.title);

  let body_words: usize = post
    .sections
    .iter()
    .map(|section| {
      let heading_words = section.heading.as_deref().map_or(0, word_count);
      heading_words + word_count(&richtext::as_text(&section.body))
    })
    .sum();

  let total_words = (title_words + body_words) as u32;
  total_words.div_ceil(words_per_minute)
}

fn word_count(text: &str) -> usize {
  text.split_whitespace().count()
}
