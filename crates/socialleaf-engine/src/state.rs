use socialleaf_core::snapshot::{InstagramSnapshot, YoutubeSnapshot};
use socialleaf_core::ConnectionMap;

/// One platform's fetch slot.
///
/// `generation` advances every time a fetch is issued for the slot; a
/// completion only lands when it still carries the current generation, so a
/// superseded in-flight request can never overwrite newer data.
#[derive(Debug, Default)]
pub(crate) struct Slot<T> {
    pub snapshot: Option<T>,
    pub loading: bool,
    generation: u64,
}

impl<T> Slot<T> {
    /// Marks the slot loading and returns the generation stamp for this fetch.
    pub fn begin(&mut self) -> u64 {
        self.loading = true;
        self.generation += 1;
        self.generation
    }

    /// Completes a fetch. `Some` replaces the snapshot wholesale; `None`
    /// (a failed fetch) leaves the previous snapshot untouched. Returns
    /// `false` when the stamp is stale, in which case nothing changes —
    /// including the loading flag, which the newer fetch now owns.
    pub fn finish(&mut self, generation: u64, snapshot: Option<T>) -> bool {
        if self.generation != generation {
            return false;
        }
        self.loading = false;
        if let Some(snapshot) = snapshot {
            self.snapshot = Some(snapshot);
        }
        true
    }
}

#[derive(Debug, Default)]
pub(crate) struct EngineState {
    pub youtube: Slot<YoutubeSnapshot>,
    pub instagram: Slot<InstagramSnapshot>,
    pub connections: ConnectionMap,
    pub loading: bool,
    /// Completion time of the last refresh, epoch milliseconds.
    pub last_fetch: Option<i64>,
}

impl EngineState {
    pub fn initial() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }
}
