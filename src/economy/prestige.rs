// ============================================================================
// Prestige
// Cubit growth table and the modifiers cubits grant
// ============================================================================

use super::config::EconomyConfig;
use crate::numeric::ScaledDecimal;

/// Cubits awarded per stage.
///
/// `t[0] = t[1] = 1`, `t[i] = (t[i-1] + t[i-2]) × slow_growth`: a damped
/// Fibonacci sequence.
#[derive(Debug, Clone)]
pub struct CubitTable {
    levels: Vec<ScaledDecimal>,
}

impl CubitTable {
    pub fn new(slow_growth: f32, len: usize) -> Self {
        let len = len.max(2);
        let mut levels: Vec<ScaledDecimal> = Vec::with_capacity(len);
        levels.push(ScaledDecimal::new(1.0));
        levels.push(ScaledDecimal::new(1.0));

        for i in 2..len {
            let mut next = levels[i - 1].clone();
            next.add(&levels[i - 2]).multiply_f32(slow_growth);
            levels.push(next);
        }

        Self { levels }
    }

    pub fn from_config(config: &EconomyConfig) -> Self {
        Self::new(config.prestige_slow_growth, config.prestige_table_len)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: usize) -> Option<&ScaledDecimal> {
        self.levels.get(index)
    }

    /// Cubits earned by prestiging at `stage`.
    ///
    /// Stage 1 (or below) earns nothing; otherwise the first `stage` table
    /// entries are summed. Stages past the table end are clamped.
    pub fn increment_for_stage(&self, stage: usize) -> ScaledDecimal {
        if stage <= 1 {
            return ScaledDecimal::zero();
        }

        let stage = stage.min(self.levels.len());
        self.levels[..stage].iter().sum()
    }
}

/// Cubit balance and the modifiers derived from it
#[derive(Debug, Clone)]
pub struct PrestigeLedger {
    table: CubitTable,
    cubits: ScaledDecimal,
}

impl PrestigeLedger {
    pub fn new(config: &EconomyConfig) -> Self {
        Self::with_cubits(config, ScaledDecimal::zero())
    }

    /// Ledger holding cubits restored from a save
    pub fn with_cubits(config: &EconomyConfig, cubits: ScaledDecimal) -> Self {
        Self {
            table: CubitTable::from_config(config),
            cubits,
        }
    }

    pub fn cubits(&self) -> &ScaledDecimal {
        &self.cubits
    }

    pub fn table(&self) -> &CubitTable {
        &self.table
    }

    /// Cubits a prestige at `stage` would award, for preview
    pub fn preview(&self, stage: usize) -> ScaledDecimal {
        self.table.increment_for_stage(stage)
    }

    /// Prestige at `stage` and return the cubits awarded
    pub fn prestige(&mut self, stage: usize) -> ScaledDecimal {
        let increment = self.table.increment_for_stage(stage);
        self.cubits.add(&increment);

        tracing::debug!(stage, awarded = %increment, total = %self.cubits, "Prestige");
        increment
    }

    /// Money multiplier: `cubits / 100 + 1`
    pub fn cash_modifier(&self) -> ScaledDecimal {
        self.percent_modifier()
    }

    /// Soldier health multiplier: `cubits / 100 + 1`
    pub fn health_modifier(&self) -> ScaledDecimal {
        self.percent_modifier()
    }

    /// Drop all cubits
    pub fn reset(&mut self) {
        self.cubits.reset_to_zero();
    }

    fn percent_modifier(&self) -> ScaledDecimal {
        let mut modifier = self.cubits.clone();
        modifier.multiply_f32(0.01).add_f32(1.0);
        modifier
    }
}
