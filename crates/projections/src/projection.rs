//! Core projection trait.

use common::{EntityId, EntityKind};
use console::{CacheEntry, CacheSnapshot};

/// A dashboard table built from one kind of cached record.
///
/// Rows come out in backend order; projections never sort.
pub trait Projection {
    /// Name of this projection, for logs.
    const NAME: &'static str;

    /// Kind of record this projection reads.
    const KIND: EntityKind;

    /// One rendered row.
    type Row;

    /// Projects a single entry. `None` skips entries that cannot render.
    fn row(id: &EntityId, entry: &CacheEntry) -> Option<Self::Row>;

    /// Projects every entry of [`Self::KIND`].
    fn rows(snapshot: &CacheSnapshot) -> Vec<Self::Row> {
        let rows: Vec<_> = snapshot
            .of_kind(Self::KIND)
            .filter_map(|(id, entry)| Self::row(id, entry))
            .collect();
        tracing::trace!(projection = Self::NAME, rows = rows.len(), "projected");
        rows
    }
}
