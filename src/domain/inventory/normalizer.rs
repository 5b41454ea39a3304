//! Normalizer - Total cleaning pass from raw rows to normalized records.
//!
//! Every row yields exactly one record. Bad cells are coerced to documented
//! defaults instead of rejecting the row, so totals downstream always
//! reconcile with the uploaded row count.

use serde::Serialize;
use serde_json::Value;

use super::numeric::NumericField;
use super::raw_row::{Field, RawRow, ResolvedRow, ROTATION_COLUMNS};
use super::record::{NormalizedRecord, RotationSignal, DEFAULT_CATEGORY, DEFAULT_NAME};
use crate::domain::foundation::ValidationError;

/// Relative disagreement (0.01%) above which an imported total is replaced.
pub const DEFAULT_VALUE_TOLERANCE: f64 = 0.0001;

/// Largest quantity, price or rotation accepted from a cell. Anything above
/// is coerced to zero so `cantidad * precio` and dataset totals stay finite.
pub const MAX_CELL_VALUE: f64 = 1e15;

/// Counters describing what the normalizer had to repair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub rows: usize,
    pub synthesized_codes: usize,
    pub default_names: usize,
    pub default_categories: usize,
    pub coerced_numbers: usize,
    pub recomputed_totals: usize,
}

/// Output of one normalization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedDataset {
    pub records: Vec<NormalizedRecord>,
    pub rotation: RotationSignal,
    pub report: NormalizationReport,
}

/// Cleans raw rows into [`NormalizedRecord`]s.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    value_tolerance: f64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_VALUE_TOLERANCE)
    }
}

impl Normalizer {
    /// Creates a normalizer with the given relative tolerance for imported totals.
    pub fn new(value_tolerance: f64) -> Self {
        let value_tolerance = if value_tolerance.is_finite() && value_tolerance >= 0.0 {
            value_tolerance
        } else {
            DEFAULT_VALUE_TOLERANCE
        };
        Self { value_tolerance }
    }

    /// Validates the payload shape and normalizes it.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` when the payload is not an
    /// array of objects. This is the only failure; cell-level problems are
    /// always repaired.
    pub fn normalize_payload(&self, payload: &Value) -> Result<NormalizedDataset, ValidationError> {
        let items = payload
            .as_array()
            .ok_or_else(|| ValidationError::invalid_format("rows", "expected an array of rows"))?;

        let rows = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_object().cloned().ok_or_else(|| {
                    ValidationError::invalid_format(
                        format!("rows[{}]", index),
                        "expected an object keyed by column name",
                    )
                })
            })
            .collect::<Result<Vec<RawRow>, _>>()?;

        Ok(self.normalize(&rows))
    }

    /// Normalizes rows one-to-one. Never fails.
    pub fn normalize(&self, rows: &[RawRow]) -> NormalizedDataset {
        let resolved: Vec<ResolvedRow<'_>> = rows.iter().map(ResolvedRow::new).collect();
        let rotation = detect_rotation(&resolved);
        let mut report = NormalizationReport {
            rows: rows.len(),
            ..Default::default()
        };

        let records = resolved
            .iter()
            .enumerate()
            .map(|(index, row)| self.normalize_row(index, row, &rotation, &mut report))
            .collect();

        NormalizedDataset {
            records,
            rotation,
            report,
        }
    }

    fn normalize_row(
        &self,
        index: usize,
        row: &ResolvedRow<'_>,
        rotation: &RotationSignal,
        report: &mut NormalizationReport,
    ) -> NormalizedRecord {
        let codigo = match text(row.field(Field::Codigo)).and_then(|c| canonical_code(&c)) {
            Some(code) => code,
            None => {
                report.synthesized_codes += 1;
                format!("ROW-{:05}", index + 1)
            }
        };

        let nombre = text(row.field(Field::Nombre)).unwrap_or_else(|| {
            report.default_names += 1;
            DEFAULT_NAME.to_string()
        });

        let categoria = text(row.field(Field::Categoria)).unwrap_or_else(|| {
            report.default_categories += 1;
            DEFAULT_CATEGORY.to_string()
        });

        let ubicacion = text(row.field(Field::Ubicacion)).unwrap_or_default();

        let cantidad = non_negative(NumericField::from_value(row.field(Field::Cantidad)), report);
        let cantidad = cantidad.round() as u64;
        let precio = non_negative(NumericField::from_value(row.field(Field::Precio)), report);

        let computed = cantidad as f64 * precio;
        let (valor_total, recalculado) =
            match NumericField::from_value(row.field(Field::ValorTotal)) {
                NumericField::Present(source)
                    if source >= 0.0 && self.agrees(source, computed) =>
                {
                    (source, false)
                }
                _ => (computed, true),
            };
        if recalculado {
            report.recomputed_totals += 1;
        }

        let rotacion = match rotation {
            RotationSignal::Column { name } => {
                Some(non_negative(NumericField::from_value(row.column(name)), report))
            }
            RotationSignal::AssumedZero => None,
        };

        NormalizedRecord {
            codigo,
            nombre,
            categoria,
            ubicacion,
            cantidad,
            precio,
            valor_total,
            rotacion,
            valor_total_recalculado: recalculado,
        }
    }

    fn agrees(&self, source: f64, computed: f64) -> bool {
        (source - computed).abs() <= self.value_tolerance * computed.abs()
    }
}

/// Picks the first rotation column present in any row.
fn detect_rotation(rows: &[ResolvedRow<'_>]) -> RotationSignal {
    ROTATION_COLUMNS
        .iter()
        .find(|column| rows.iter().any(|row| row.has_column(column)))
        .map(|column| RotationSignal::Column {
            name: (*column).to_string(),
        })
        .unwrap_or(RotationSignal::AssumedZero)
}

/// Trimmed text for a cell; blank cells are `None`.
fn text(value: Option<&Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Reads a number, counting invalid, negative or oversized cells as coerced to zero.
fn non_negative(field: NumericField, report: &mut NormalizationReport) -> f64 {
    match field {
        NumericField::Present(v) if (0.0..=MAX_CELL_VALUE).contains(&v) => v,
        NumericField::Present(_) | NumericField::Invalid => {
            report.coerced_numbers += 1;
            0.0
        }
        NumericField::Missing => 0.0,
    }
}

/// Upper-cases a product code and canonicalizes `P`/`PR` + 3-4 digit forms.
///
/// `"pr 123"`, `"P0456"` and `"PR123"` become `"PR123"`, `"PR0456"`, `"PR123"`.
/// Anything else is kept upper-cased as written.
fn canonical_code(raw: &str) -> Option<String> {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }

    let rest = match upper.strip_prefix("PR") {
        Some(rest) => rest,
        None => match upper.strip_prefix('P') {
            Some(rest) => rest,
            None => return Some(upper),
        },
    };
    let digits = rest.strip_prefix(' ').unwrap_or(rest);
    if (3..=4).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        Some(format!("PR{}", digits))
    } else {
        Some(upper)
    }
}
