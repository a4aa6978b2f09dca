//! Link Service - Backlink Resolver
//!
//! Maintains the wiki-link graph. On every content save the source note's
//! outbound link set is rebuilt from scratch: extract candidate titles from
//! the raw content, resolve each against the store's title index, and hand
//! the store the full replacement set. Titles that resolve to no note are
//! silently dropped - a dangling wiki-reference is not an error, it simply
//! produces no link row until a note with that title exists.
//!
//! Trashed notes keep their links (only a hard delete cascades), so the read
//! operations take an explicit `include_trashed` policy rather than hiding
//! that decision here.

use crate::config::CoreConfig;
use crate::db::NoteStore;
use crate::links::extract_wiki_links;
use crate::models::NoteLink;
use crate::services::error::NoteServiceError;
use std::collections::HashMap;
use std::sync::Arc;

pub struct LinkService {
    store: Arc<dyn NoteStore>,
    config: CoreConfig,
}

impl LinkService {
    pub fn new(store: Arc<dyn NoteStore>, config: CoreConfig) -> Self {
        Self { store, config }
    }

    /// Rebuild the outbound link set for `source_note_id` from `content`.
    ///
    /// The replacement is atomic at the store: concurrent readers observe the
    /// pre-edit set or the post-edit set, never a partially-deleted state.
    /// Returns the link rows that were written.
    pub async fn resync_links(
        &self,
        source_note_id: &str,
        content: &str,
    ) -> Result<Vec<NoteLink>, NoteServiceError> {
        let titles = extract_wiki_links(content);

        let mut links = Vec::with_capacity(titles.len());
        for title in &titles {
            match self
                .store
                .find_note_by_title(title, self.config.title_match)
                .await?
            {
                Some(target_id) => {
                    links.push(NoteLink::create(source_note_id, target_id, title.clone()));
                }
                None => {
                    tracing::debug!("unresolved wiki-link '{}' from {}", title, source_note_id);
                }
            }
        }

        tracing::debug!(
            "resync links for {}: {} candidate titles, {} resolved",
            source_note_id,
            titles.len(),
            links.len()
        );
        self.store
            .replace_links_for_note(source_note_id, links.clone())
            .await?;
        Ok(links)
    }

    /// Outbound links of a note, most recently created first.
    pub async fn forward_links(
        &self,
        note_id: &str,
        include_trashed: bool,
    ) -> Result<Vec<NoteLink>, NoteServiceError> {
        let links = self.store.links_from(note_id).await?;
        self.filter_trashed(links, include_trashed, Endpoint::Target)
            .await
    }

    /// Inbound links of a note (its backlinks), most recently created first.
    pub async fn backlinks(
        &self,
        note_id: &str,
        include_trashed: bool,
    ) -> Result<Vec<NoteLink>, NoteServiceError> {
        let links = self.store.links_to(note_id).await?;
        self.filter_trashed(links, include_trashed, Endpoint::Source)
            .await
    }

    /// Most-referenced notes: link rows aggregated by target, ordered by
    /// descending reference count. Ties break by ascending target note id so
    /// the ranking is deterministic.
    pub async fn most_linked_notes(
        &self,
        limit: usize,
    ) -> Result<Vec<(String, usize)>, NoteServiceError> {
        let links = self.store.all_links().await?;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for link in links {
            *counts.entry(link.target_note_id).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        Ok(ranked)
    }

    async fn filter_trashed(
        &self,
        links: Vec<NoteLink>,
        include_trashed: bool,
        endpoint: Endpoint,
    ) -> Result<Vec<NoteLink>, NoteServiceError> {
        if include_trashed {
            return Ok(links);
        }

        let mut kept = Vec::with_capacity(links.len());
        for link in links {
            let other_id = match endpoint {
                Endpoint::Target => &link.target_note_id,
                Endpoint::Source => &link.source_note_id,
            };
            // A link row whose counterpart vanished would be a cascade bug;
            // treat it as filtered rather than invent an error
            let trashed = self
                .store
                .get_note(other_id)
                .await?
                .map(|note| note.is_trashed)
                .unwrap_or(true);
            if !trashed {
                kept.push(link);
            }
        }
        Ok(kept)
    }
}

/// Which end of the link the trash filter inspects.
#[derive(Clone, Copy)]
enum Endpoint {
    Source,
    Target,
}
