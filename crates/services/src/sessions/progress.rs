/// Aggregated view of session progress, for progress bars and prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Share of the session already answered, in whole percent.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = self.answered.saturating_mul(100) / self.total;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }
}
