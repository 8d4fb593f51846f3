//! Identifier → `SearchDescriptor`.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::descriptor::SearchDescriptor;
use super::fallback_titles::lookup_fallback_title;
use super::normalize::{normalize_without_year, parse_year_token};
use super::patterns::{is_sports_title, strip_qualifiers};
use super::variations::{episode_token, VariationGenerator};
use crate::metadata::{MetadataClient, MetadataKind, TitleMetadata};
use crate::pipeline::ResolveError;
use crate::searcher::ContentKind;

static SIMPLE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^tt\d+$").unwrap());
static XL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bXL\b").unwrap());

/// The three identifier forms the resolver understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierShape<'a> {
    /// `tt0944947`
    SimpleId(&'a str),
    /// `tt0944947:1:1`. Season/episode are kept raw; parsing may still fail.
    SeriesId {
        id: &'a str,
        season: &'a str,
        episode: Option<&'a str>,
    },
    /// Anything else, e.g. `search:WWE.WrestleMania.40:2024` or a bare title.
    Freeform { title: &'a str, tokens: Vec<&'a str> },
}

impl<'a> IdentifierShape<'a> {
    pub fn parse(id: &'a str) -> Self {
        let id = id.trim();
        let parts: Vec<&str> = id.split(':').collect();

        match parts.as_slice() {
            [single] if SIMPLE_ID_RE.is_match(single) => IdentifierShape::SimpleId(*single),
            [first, season, rest @ ..] if SIMPLE_ID_RE.is_match(first) => {
                IdentifierShape::SeriesId {
                    id: *first,
                    season: *season,
                    episode: rest.first().copied(),
                }
            }
            [_, title, tokens @ ..] => IdentifierShape::Freeform {
                title: *title,
                tokens: tokens.to_vec(),
            },
            _ => IdentifierShape::Freeform {
                title: id,
                tokens: Vec::new(),
            },
        }
    }
}

/// Turns identifiers into search descriptors, enriching them through an
/// optional metadata client.
///
/// Every failure degrades to the next fallback. The last resort is an empty
/// descriptor, never an error.
pub struct IdentifierResolver {
    metadata: Option<Arc<dyn MetadataClient>>,
    timeout: Duration,
    generator: VariationGenerator,
}

impl IdentifierResolver {
    pub fn new(metadata: Option<Arc<dyn MetadataClient>>, timeout: Duration) -> Self {
        Self {
            metadata,
            timeout,
            generator: VariationGenerator::new(),
        }
    }

    pub fn with_generator(mut self, generator: VariationGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub async fn resolve(&self, id: &str, kind_hint: ContentKind) -> SearchDescriptor {
        let shape = IdentifierShape::parse(id);
        debug!(id, shape = ?shape, "Resolving identifier");

        let descriptor = match shape {
            IdentifierShape::SimpleId(external_id) => {
                self.resolve_simple(external_id, kind_hint).await
            }
            IdentifierShape::SeriesId {
                id: external_id,
                season,
                episode,
            } => self.resolve_series(external_id, season, episode).await,
            IdentifierShape::Freeform { title, tokens } => {
                self.resolve_freeform(title, &tokens, kind_hint)
            }
        };

        if !descriptor.is_resolvable() {
            info!(error = %ResolveError::UnresolvableIdentifier(id.to_string()), "No search query");
        }
        descriptor
    }

    async fn resolve_simple(&self, external_id: &str, kind_hint: ContentKind) -> SearchDescriptor {
        match self.lookup(external_id).await {
            Ok(metadata) => self.descriptor_from_metadata(&metadata, kind_hint),
            Err(e) => {
                warn!(id = external_id, error = %e, "Metadata lookup failed, trying fallback table");
                match lookup_fallback_title(external_id) {
                    Some(entry) => self.build(&entry.title, kind_hint, entry.year, None, None),
                    None => SearchDescriptor::empty(kind_hint),
                }
            }
        }
    }

    async fn resolve_series(
        &self,
        external_id: &str,
        season_raw: &str,
        episode_raw: Option<&str>,
    ) -> SearchDescriptor {
        let season = season_raw.trim().parse::<u32>().ok();
        let episode = episode_raw.and_then(|e| e.trim().parse::<u32>().ok());

        let (Some(s), Some(e)) = (season, episode) else {
            warn!(
                id = external_id,
                season = season_raw,
                episode = ?episode_raw,
                "Malformed season/episode, searching by episode token only"
            );
            let token = match (season, episode) {
                (Some(s), None) => format!("S{:02}", s),
                (None, Some(e)) => format!("E{:02}", e),
                _ => String::new(),
            };
            return SearchDescriptor::new(vec![token], ContentKind::Episodic, None, season, episode);
        };

        match self.lookup(external_id).await {
            Ok(metadata) => {
                self.build(&metadata.title, ContentKind::Episodic, metadata.year, Some(s), Some(e))
            }
            Err(err) => {
                warn!(id = external_id, error = %err, "Series metadata lookup failed");
                match lookup_fallback_title(external_id) {
                    Some(entry) => {
                        self.build(&entry.title, ContentKind::Episodic, entry.year, Some(s), Some(e))
                    }
                    None => SearchDescriptor::new(
                        vec![episode_token(s, e)],
                        ContentKind::Episodic,
                        None,
                        Some(s),
                        Some(e),
                    ),
                }
            }
        }
    }

    fn resolve_freeform(
        &self,
        raw_title: &str,
        tokens: &[&str],
        kind_hint: ContentKind,
    ) -> SearchDescriptor {
        let (title, mut year) = normalize_without_year(raw_title);
        let mut season = None;
        let mut episode = None;

        for token in tokens.iter().map(|t| t.trim()) {
            if let Some(y) = parse_year_token(token) {
                year = Some(y);
            } else if let Some(rest) = token.strip_prefix(['s', 'S']) {
                season = rest.parse().ok().or(season);
            } else if let Some(rest) = token.strip_prefix(['e', 'E']) {
                episode = rest.parse().ok().or(episode);
            }
        }

        if title.is_empty() {
            return SearchDescriptor::empty(kind_hint);
        }

        if is_sports_title(&title) {
            return self.build(&title, ContentKind::SportsEvent, year, None, None);
        }

        let kind = if season.is_some() || episode.is_some() {
            ContentKind::Episodic
        } else {
            kind_hint
        };
        self.build(&title, kind, year, season, episode)
    }

    fn descriptor_from_metadata(
        &self,
        metadata: &TitleMetadata,
        kind_hint: ContentKind,
    ) -> SearchDescriptor {
        if is_sports_title(&metadata.title) {
            let simplified = XL_RE.replace_all(&strip_qualifiers(&metadata.title), "40").into_owned();
            debug!(title = %metadata.title, simplified = %simplified, "Sports title detected");
            return self.build(&simplified, ContentKind::SportsEvent, metadata.year, None, None);
        }

        let kind = match metadata.kind {
            MetadataKind::Movie => ContentKind::Movie,
            MetadataKind::Series | MetadataKind::Episode => ContentKind::Episodic,
            MetadataKind::Other => kind_hint,
        };
        self.build(&metadata.title, kind, metadata.year, None, None)
    }

    fn build(
        &self,
        title: &str,
        kind: ContentKind,
        year: Option<u32>,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> SearchDescriptor {
        let variations = self.generator.generate(title, kind, year, season, episode);
        SearchDescriptor::new(variations, kind, year, season, episode)
    }

    async fn lookup(&self, external_id: &str) -> Result<TitleMetadata, ResolveError> {
        let Some(client) = &self.metadata else {
            return Err(ResolveError::CollaboratorError {
                collaborator: "metadata".to_string(),
                message: "no metadata client configured".to_string(),
            });
        };

        match tokio::time::timeout(self.timeout, client.lookup_by_external_id(external_id)).await {
            Ok(Ok(metadata)) => {
                debug!(id = external_id, title = %metadata.title, year = ?metadata.year, "Metadata found");
                Ok(metadata)
            }
            Ok(Err(e)) => Err(ResolveError::CollaboratorError {
                collaborator: client.name().to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(ResolveError::CollaboratorTimeout {
                collaborator: client.name().to_string(),
                timeout: self.timeout,
            }),
        }
    }
}
