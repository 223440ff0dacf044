/// Byte counter for a streamed download.
///
/// With a known total, [`LoadProgress::advance`] yields the rounded percent
/// each time it changes, so a caller logs at most once per percent however
/// the body is chunked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadProgress {
    total: Option<u64>,
    loaded: u64,
    last_percent: Option<u32>,
}

impl LoadProgress {
    /// `total` is the advertised body size; zero counts as unknown.
    pub fn new(total: Option<u64>) -> Self {
        Self {
            total: total.filter(|t| *t > 0),
            loaded: 0,
            last_percent: None,
        }
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn loaded(&self) -> u64 {
        self.loaded
    }

    /// Rounded percent loaded, capped at 100. `None` without a total.
    pub fn percent(&self) -> Option<u32> {
        let total = self.total?;
        let pct = (self.loaded as f64 / total as f64 * 100.0).round().min(100.0);
        Some(pct as u32)
    }

    /// Count `chunk` more bytes. Returns the percent when it differs from the
    /// last one reported.
    pub fn advance(&mut self, chunk: u64) -> Option<u32> {
        self.loaded = self.loaded.saturating_add(chunk);
        self.report()
    }

    /// The current percent if it has not been reported yet.
    pub fn report(&mut self) -> Option<u32> {
        let pct = self.percent()?;
        if self.last_percent == Some(pct) {
            return None;
        }
        self.last_percent = Some(pct);
        Some(pct)
    }
}
