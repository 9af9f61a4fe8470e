// src/corpus.rs
// Raw content collected for one account, in arrival order (newest first).

/// A single piece of collected user content.
///
/// Posts carry a title and a self-text body; comments only a body.
/// Ordering is platform-defined recency and is preserved through staging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    Post { title: String, body: String },
    Comment { body: String },
}

/// The collected content for one pipeline run.
///
/// Created by the fetcher, persisted once by the store, read once by the
/// synthesizer. Never mutated after staging.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    items: Vec<ContentItem>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ContentItem) {
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Posts only, in arrival order.
    pub fn posts(&self) -> impl Iterator<Item = &ContentItem> {
        self.items
            .iter()
            .filter(|item| matches!(item, ContentItem::Post { .. }))
    }

    /// Comments only, in arrival order.
    pub fn comments(&self) -> impl Iterator<Item = &ContentItem> {
        self.items
            .iter()
            .filter(|item| matches!(item, ContentItem::Comment { .. }))
    }

    pub fn post_count(&self) -> usize {
        self.posts().count()
    }

    pub fn comment_count(&self) -> usize {
        self.comments().count()
    }
}
