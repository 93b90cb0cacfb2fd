//! Connection pager - cuts Relay pages out of an ordered collection.
//!
//! The pager works on a complete, already-ordered snapshot and never
//! reorders or mutates it. Cursors identify records by key, so a cursor
//! stays valid as long as its record is still part of the collection.

use tracing::{debug, trace};

use crate::error::{DomainError, DomainResult};
use crate::metrics::{record_connection_page, record_invalid_cursor};
use crate::models::RegisteredAsset;
use crate::ports::{Connection, Cursor, Edge, PageInfo, Pagination};
use crate::relay::{decode_cursor, encode_cursor};

// =============================================================================
// Configuration
// =============================================================================

/// What to do when both `first` and `last` are supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Forward pagination wins; `last` is ignored.
    #[default]
    PreferFirst,
    /// Fail with [`DomainError::ConflictingArguments`].
    Reject,
}

/// Configuration for the connection pager.
#[derive(Debug, Clone, Default)]
pub struct PagerConfig {
    /// Upper bound applied to `first`/`last`. `None` means unbounded.
    pub max_page_size: Option<usize>,
    /// Policy for requests carrying both `first` and `last`.
    pub conflict_policy: ConflictPolicy,
}

// =============================================================================
// Keys
// =============================================================================

/// Records that can be addressed by a cursor.
pub trait CursorKey {
    /// Stable key, unique within the collection.
    fn cursor_key(&self) -> &str;
}

impl CursorKey for RegisteredAsset {
    fn cursor_key(&self) -> &str {
        &self.handle
    }
}

// =============================================================================
// ConnectionPager
// =============================================================================

/// Page size requested after argument validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Limit {
    First(usize),
    Last(usize),
    Unbounded,
}

/// Cursor pager for one collection.
///
/// # Algorithm
///
/// 1. `after` drops every record up to and including the one it names,
///    `before` drops the record it names and everything after it
/// 2. `first` keeps the leading records of that window, `last` the trailing ones
/// 3. `hasPreviousPage`/`hasNextPage` are computed against the full collection
#[derive(Debug, Clone)]
pub struct ConnectionPager {
    tag: &'static str,
    config: PagerConfig,
}

impl ConnectionPager {
    /// Create a pager for the collection tagged `tag` (used in cursors).
    pub fn new(tag: &'static str, config: PagerConfig) -> Self {
        Self { tag, config }
    }

    /// Collection tag this pager encodes into cursors.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Cursor of a record in this collection.
    pub fn cursor_for<T: CursorKey>(&self, record: &T) -> Cursor {
        encode_cursor(self.tag, record.cursor_key())
    }

    /// Paginate `records` according to `pagination`.
    pub fn paginate<T>(&self, records: &[T], pagination: &Pagination) -> DomainResult<Connection<T>>
    where
        T: CursorKey + Clone,
    {
        let limit = self.resolve_limit(pagination)?;
        let len = records.len();

        let mut start = 0;
        let mut end = len;

        if let Some(after) = &pagination.after {
            start = self.position(records, after)? + 1;
        }
        if let Some(before) = &pagination.before {
            end = self.position(records, before)?;
        }
        if end < start {
            // `before` sits at or before `after`: empty window at `start`
            end = start;
        }

        match limit {
            Limit::First(n) => end = end.min(start.saturating_add(n)),
            Limit::Last(n) => start = start.max(end.saturating_sub(n)),
            Limit::Unbounded => {}
        }

        let edges: Vec<Edge<T>> = records[start..end]
            .iter()
            .map(|record| Edge {
                cursor: self.cursor_for(record),
                node: record.clone(),
            })
            .collect();

        let page_info = PageInfo {
            has_next_page: end < len,
            has_previous_page: start > 0,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        trace!(
            collection = self.tag,
            start,
            end,
            total = len,
            "Page computed"
        );
        record_connection_page(self.tag, edges.len());

        Ok(Connection {
            edges,
            page_info,
            total_count: Some(len as i64),
        })
    }

    /// Validate `first`/`last` and apply the conflict policy and size cap.
    fn resolve_limit(&self, pagination: &Pagination) -> DomainResult<Limit> {
        let first = pagination.first.map(|n| positive("first", n)).transpose()?;
        let last = pagination.last.map(|n| positive("last", n)).transpose()?;

        let limit = match (first, last) {
            (Some(first), Some(last)) => match self.config.conflict_policy {
                ConflictPolicy::PreferFirst => {
                    debug!(
                        collection = self.tag,
                        first, last, "Both first and last supplied, using first"
                    );
                    Limit::First(first)
                }
                ConflictPolicy::Reject => return Err(DomainError::ConflictingArguments),
            },
            (Some(first), None) => Limit::First(first),
            (None, Some(last)) => Limit::Last(last),
            (None, None) => Limit::Unbounded,
        };

        Ok(match (limit, self.config.max_page_size) {
            (Limit::First(n), Some(max)) if n > max => {
                debug!(collection = self.tag, requested = n, max, "Clamping first");
                Limit::First(max)
            }
            (Limit::Last(n), Some(max)) if n > max => {
                debug!(collection = self.tag, requested = n, max, "Clamping last");
                Limit::Last(max)
            }
            // A lone `before` pages backward from the cursor
            (Limit::Unbounded, Some(max))
                if pagination.before.is_some() && pagination.after.is_none() =>
            {
                Limit::Last(max)
            }
            (Limit::Unbounded, Some(max)) => Limit::First(max),
            (limit, _) => limit,
        })
    }

    /// Index of the record a cursor names.
    fn position<T: CursorKey>(&self, records: &[T], cursor: &Cursor) -> DomainResult<usize> {
        let found = decode_cursor(self.tag, cursor).and_then(|key| {
            records
                .iter()
                .position(|r| r.cursor_key() == key)
                .ok_or_else(|| DomainError::InvalidCursor {
                    collection: self.tag.to_string(),
                    cursor: cursor.value.clone(),
                })
        });

        if found.is_err() {
            debug!(collection = self.tag, cursor = %cursor.value, "Rejected cursor");
            record_invalid_cursor(self.tag);
        }
        found
    }
}

/// Check a page size argument is a positive integer.
fn positive(name: &'static str, value: i32) -> DomainResult<usize> {
    if value < 1 {
        return Err(DomainError::InvalidArgument {
            name,
            reason: format!("must be a positive integer, got {value}"),
        });
    }
    Ok(value as usize)
}
