use crate::trial::{Outcome, TrialRow};
use serde::Serialize;

/// Hit/miss totals over a set of trial rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeSummary {
    pub hit_count: usize,
    pub miss_count: usize,
    /// Percent of Hit among Hit+Miss rows; 0.0 when there are none.
    pub hit_pct: f64,
    pub miss_pct: f64,
    pub hit_trials: Vec<String>,
    pub hit_blocks: Vec<String>,
    pub miss_trials: Vec<String>,
    pub miss_blocks: Vec<String>,
}

/// Acertos/erros for one trial type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipoTally {
    pub tipo: String,
    pub acertos: usize,
    pub erros: usize,
}

/// Per-tipo tallies in first-seen order.
pub type TipoSummary = Vec<TipoTally>;

pub fn summarize(rows: &[TrialRow]) -> OutcomeSummary {
    let mut summary = OutcomeSummary {
        hit_count: 0,
        miss_count: 0,
        hit_pct: 0.0,
        miss_pct: 0.0,
        hit_trials: Vec::new(),
        hit_blocks: Vec::new(),
        miss_trials: Vec::new(),
        miss_blocks: Vec::new(),
    };
    for row in rows {
        match row.outcome() {
            Outcome::Hit => {
                summary.hit_count += 1;
                summary.hit_trials.push(row.trial.clone());
                summary.hit_blocks.push(row.block.clone());
            }
            Outcome::Miss => {
                summary.miss_count += 1;
                summary.miss_trials.push(row.trial.clone());
                summary.miss_blocks.push(row.block.clone());
            }
            Outcome::Other => {}
        }
    }
    let total = summary.hit_count + summary.miss_count;
    if total > 0 {
        summary.hit_pct = 100.0 * summary.hit_count as f64 / total as f64;
        summary.miss_pct = 100.0 * summary.miss_count as f64 / total as f64;
    }
    summary
}

/// Tally Hit/Miss per tipo. Tipos with only other results are left out.
pub fn tipo_summary(rows: &[TrialRow]) -> TipoSummary {
    let mut tallies: TipoSummary = Vec::new();
    for row in rows {
        let outcome = row.outcome();
        if outcome == Outcome::Other {
            continue;
        }
        let idx = match tallies.iter().position(|t| t.tipo == row.tipo) {
            Some(idx) => idx,
            None => {
                tallies.push(TipoTally {
                    tipo: row.tipo.clone(),
                    acertos: 0,
                    erros: 0,
                });
                tallies.len() - 1
            }
        };
        match outcome {
            Outcome::Hit => tallies[idx].acertos += 1,
            Outcome::Miss => tallies[idx].erros += 1,
            Outcome::Other => {}
        }
    }
    tallies
}
