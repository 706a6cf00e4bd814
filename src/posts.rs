/*!
 * Post listing.
 *
 * Walks a locale's post tree, keeps the documents that carry a title and a
 * parseable publish date, attaches view counts from an external store and
 * sorts newest first.
 */

use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::document::PostMetadata;
use crate::file_utils::FileManager;

/// A listed post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub metadata: PostMetadata,
    pub views: u64,
    /// Views with thousands separators, e.g. "12,345"
    pub views_formatted: String,
}

impl Post {
    pub fn id(&self) -> &str {
        &self.metadata.id
    }
}

/// Load every listable post under `root`, newest first.
///
/// `views` maps post ids to view counts; posts without an entry have 0 views.
pub fn load_posts<P: AsRef<Path>>(root: P, document_name: &str, views: &HashMap<String, u64>) -> Vec<Post> {
    let mut posts: Vec<Post> = FileManager::find_post_documents(root, document_name)
        .into_iter()
        .filter_map(|document| {
            let text = match FileManager::read_to_string(&document.path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping post '{}': {}", document.slug, e);
                    return None;
                }
            };

            let Some(metadata) = PostMetadata::from_document(&document.slug, &text) else {
                debug!("Skipping post '{}': missing title or publish date", document.slug);
                return None;
            };

            let views = views.get(&metadata.id).copied().unwrap_or(0);
            Some(Post {
                metadata,
                views,
                views_formatted: format_views(views),
            })
        })
        .collect();

    posts.sort_by(|a, b| b.metadata.published_at.cmp(&a.metadata.published_at));
    posts
}

/// Group digits in threes with commas
pub fn format_views(views: u64) -> String {
    let digits = views.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}
