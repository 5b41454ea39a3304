//! ABC Classifier - Pareto tiers by cumulative inventory value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ordering::value_descending_order;
use crate::domain::foundation::ValidationError;
use crate::domain::inventory::NormalizedRecord;

/// Slack for cumulative fractions that land on a threshold after rounding.
const CUMULATIVE_EPSILON: f64 = 1e-9;

/// ABC value class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl AbcClass {
    pub const ALL: [AbcClass; 3] = [AbcClass::A, AbcClass::B, AbcClass::C];
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbcClass::A => "A",
            AbcClass::B => "B",
            AbcClass::C => "C",
        };
        write!(f, "{}", s)
    }
}

/// Cumulative-value cut-offs for classes A and B, as fractions of total value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbcThresholds {
    a: f64,
    b: f64,
}

impl AbcThresholds {
    /// Creates thresholds, requiring `0 < a <= b <= 1`.
    pub fn new(a: f64, b: f64) -> Result<Self, ValidationError> {
        if !(a > 0.0 && a <= 1.0) {
            return Err(ValidationError::out_of_range("abc_a_threshold", 0.0, 1.0, a));
        }
        if !(b >= a && b <= 1.0) {
            return Err(ValidationError::out_of_range("abc_b_threshold", a, 1.0, b));
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Class for a cumulative fraction of total value.
    pub fn class_for(&self, cumulative: f64) -> AbcClass {
        if cumulative <= self.a + CUMULATIVE_EPSILON {
            AbcClass::A
        } else if cumulative <= self.b + CUMULATIVE_EPSILON {
            AbcClass::B
        } else {
            AbcClass::C
        }
    }
}

impl Default for AbcThresholds {
    fn default() -> Self {
        Self { a: 0.80, b: 0.95 }
    }
}

/// Aggregate for one class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassSummary {
    pub count: usize,
    pub total_valor: f64,
    /// Share of total capital, 0-100.
    pub pct_capital: f64,
}

/// A record annotated with its class for this run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcEntry {
    #[serde(flatten)]
    pub record: NormalizedRecord,
    /// Share of total value, 0-1.
    pub participacion: f64,
    /// Cumulative share in value-descending order, 0-1.
    pub participacion_acum: f64,
    pub clase: AbcClass,
}

/// Result of one classification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcClassification {
    /// Always contains A, B and C, even when a class is empty.
    pub clases: BTreeMap<AbcClass, ClassSummary>,
    pub total_valor: f64,
    /// Records in value-descending order.
    pub detalle: Vec<AbcEntry>,
}

impl AbcClassification {
    pub fn summary(&self, class: AbcClass) -> ClassSummary {
        self.clases.get(&class).copied().unwrap_or_default()
    }

    /// Entries of one class, in ranking order.
    pub fn entries(&self, class: AbcClass) -> impl Iterator<Item = &AbcEntry> {
        self.detalle.iter().filter(move |e| e.clase == class)
    }
}

/// Classifies records into A/B/C tiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbcClassifier {
    thresholds: AbcThresholds,
}

impl AbcClassifier {
    pub fn new(thresholds: AbcThresholds) -> Self {
        Self { thresholds }
    }

    /// Ranks records by value and assigns each exactly one class.
    ///
    /// # Edge Cases
    /// - Empty records: empty detail, zeroed classes
    /// - Total value of 0: every record is C and every share is 0
    pub fn classify(&self, records: &[NormalizedRecord]) -> AbcClassification {
        let order = value_descending_order(records);
        let total_valor: f64 = order.iter().map(|&i| records[i].valor_total).sum();

        let mut clases: BTreeMap<AbcClass, ClassSummary> = AbcClass::ALL
            .iter()
            .map(|class| (*class, ClassSummary::default()))
            .collect();
        let mut detalle = Vec::with_capacity(records.len());
        let mut running = 0.0;

        for index in order {
            let record = &records[index];
            running += record.valor_total;

            let (participacion, participacion_acum, clase) = if total_valor > 0.0 {
                let acum = running / total_valor;
                (
                    record.valor_total / total_valor,
                    acum,
                    self.thresholds.class_for(acum),
                )
            } else {
                (0.0, 0.0, AbcClass::C)
            };

            let summary = clases.entry(clase).or_default();
            summary.count += 1;
            summary.total_valor += record.valor_total;

            detalle.push(AbcEntry {
                record: record.clone(),
                participacion,
                participacion_acum,
                clase,
            });
        }

        if total_valor > 0.0 {
            for summary in clases.values_mut() {
                summary.pct_capital = summary.total_valor / total_valor * 100.0;
            }
        }

        AbcClassification {
            clases,
            total_valor,
            detalle,
        }
    }
}
