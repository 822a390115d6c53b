pub const GREETING_COOLDOWN_MS: i64 = 20_000;

/// Admission control for the rate limited trigger.
#[derive(Debug, Clone)]
pub struct CooldownGate {
    window_ms: i64,
    last_fired_at: Option<i64>,
}

impl CooldownGate {
    pub fn new(window_ms: i64) -> Self {
        CooldownGate { window_ms, last_fired_at: None }
    }

    /// Inclusive: a firing exactly `window_ms` ago still counts.
    pub fn is_on_cooldown(&self, now_ms: i64) -> bool {
        match self.last_fired_at {
            Some(last) => now_ms - last <= self.window_ms,
            None => false,
        }
    }

    pub fn mark_fired(&mut self, now_ms: i64) {
        self.last_fired_at = Some(now_ms);
    }

    pub fn last_fired_at(&self) -> Option<i64> {
        self.last_fired_at
    }
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self::new(GREETING_COOLDOWN_MS)
    }
}
