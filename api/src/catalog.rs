use crate::ingest::{IngestError, IngestErrorKind, ingest_event, value_label};
use crate::wire::EventsPayload;
use crate::{StatusInfo, Tournament};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Recommended events beyond this many fall back into the general list.
pub const FEATURED_LIMIT: usize = 5;

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error, String),
    Parsing(serde_json::Error, String),
    NotFound(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e, path) => write!(f, "Could not read {path}: {e}"),
            CatalogError::Parsing(e, source) => write!(f, "Parse error for {source}: {e}"),
            CatalogError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e, _) => Some(e),
            CatalogError::Parsing(e, _) => Some(e),
            CatalogError::NotFound(_) => None,
        }
    }
}

/// Normalized snapshot of the events listing.
///
/// Everything past this point works on canonical `Tournament`s; events that
/// failed ingestion are kept aside in `rejected` so the UI can report them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tournaments: Vec<Tournament>,
    rejected: Vec<IngestError>,
}

/// Dashboard ordering: the featured strip, then everything else.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    pub featured: Vec<&'a Tournament>,
    pub others: Vec<&'a Tournament>,
}

impl Listing<'_> {
    pub fn len(&self) -> usize {
        self.featured.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row `index` across both sections, featured first.
    pub fn get(&self, index: usize) -> Option<&Tournament> {
        self.featured
            .iter()
            .chain(self.others.iter())
            .nth(index)
            .copied()
    }
}

impl Catalog {
    pub fn new(tournaments: Vec<Tournament>) -> Self {
        Self { tournaments, rejected: Vec::new() }
    }

    /// Load an events snapshot (bare array or `{ "content": [...] }` page) from disk.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e, display.clone()))?;
        Self::parse(&content, &display)
    }

    pub fn from_json(json: &str) -> CatalogResult<Self> {
        Self::parse(json, "events payload")
    }

    fn parse(json: &str, source: &str) -> CatalogResult<Self> {
        let payload: EventsPayload = serde_json::from_str(json)
            .map_err(|e| CatalogError::Parsing(e, source.to_owned()))?;

        let mut catalog = Catalog::default();
        let mut seen = HashSet::new();
        for value in payload.into_events() {
            let label = value_label(&value);
            match ingest_event(value) {
                Ok(t) if !seen.insert(t.id) => {
                    let err = IngestError {
                        event: label,
                        kind: IngestErrorKind::DuplicateId(t.id),
                    };
                    warn!("skipping event from {source}: {err}");
                    catalog.rejected.push(err);
                }
                Ok(t) => catalog.tournaments.push(t),
                Err(err) => {
                    warn!("skipping event from {source}: {err}");
                    catalog.rejected.push(err);
                }
            }
        }

        debug!(
            "loaded {} tournaments from {source} ({} rejected)",
            catalog.tournaments.len(),
            catalog.rejected.len()
        );
        Ok(catalog)
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn rejected(&self) -> &[IngestError] {
        &self.rejected
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    pub fn find(&self, id: u64) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    pub fn get(&self, id: u64) -> CatalogResult<&Tournament> {
        self.find(id)
            .ok_or_else(|| CatalogError::NotFound(format!("tournament #{id}")))
    }

    /// Featured = first `FEATURED_LIMIT` recommended events in payload order.
    /// Others = the rest, shuffled by `seed`; the same seed always gives the same order.
    pub fn listing(&self, seed: u64) -> Listing<'_> {
        let featured: Vec<&Tournament> = self
            .tournaments
            .iter()
            .filter(|t| t.recommended)
            .take(FEATURED_LIMIT)
            .collect();
        let featured_ids: HashSet<u64> = featured.iter().map(|t| t.id).collect();

        let mut others: Vec<&Tournament> = self
            .tournaments
            .iter()
            .filter(|t| !featured_ids.contains(&t.id))
            .collect();
        let mut rng = StdRng::seed_from_u64(seed);
        others.shuffle(&mut rng);

        Listing { featured, others }
    }

    /// Resolve every badge against one snapshot of `now`.
    pub fn statuses(&self, now: DateTime<Utc>) -> HashMap<u64, StatusInfo> {
        self.tournaments
            .iter()
            .map(|t| (t.id, t.status(now)))
            .collect()
    }
}
