//! Normalized inventory record.

use serde::{Deserialize, Serialize};

/// Placeholder for rows without a product name.
pub const DEFAULT_NAME: &str = "Sin nombre";

/// Sentinel category for rows without one.
pub const DEFAULT_CATEGORY: &str = "Sin categoría";

/// Turnover assumed when the dataset carries no rotation column.
///
/// Zero is the worst case: every item is treated as not moving, which is
/// what makes material stock show up as dead capital.
pub const ROTATION_FALLBACK: f64 = 0.0;

/// One cleaned inventory line. Immutable once produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub codigo: String,
    pub nombre: String,
    pub categoria: String,
    pub ubicacion: String,
    pub cantidad: u64,
    pub precio: f64,
    pub valor_total: f64,
    /// `None` when the dataset has no rotation column at all.
    pub rotacion: Option<f64>,
    /// Set when the imported total was missing or disagreed with `cantidad * precio`.
    #[serde(default)]
    pub valor_total_recalculado: bool,
}

impl NormalizedRecord {
    /// Rotation used by the analytics, falling back to [`ROTATION_FALLBACK`].
    pub fn rotacion_efectiva(&self) -> f64 {
        self.rotacion.unwrap_or(ROTATION_FALLBACK)
    }

    /// Quantity as a float for value arithmetic.
    pub fn cantidad_f64(&self) -> f64 {
        self.cantidad as f64
    }
}

/// Where the dataset's turnover signal comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RotationSignal {
    /// Read from the named column.
    Column { name: String },
    /// No rotation column; every record uses [`ROTATION_FALLBACK`].
    AssumedZero,
}

impl RotationSignal {
    /// Human-readable explanation reported next to dead-capital alerts.
    pub fn note(&self) -> String {
        match self {
            RotationSignal::Column { name } => {
                format!("Rotacion estimada usando columna '{}'.", name)
            }
            RotationSignal::AssumedZero => "Sin columna de ventas/rotacion; se asume 0 unidades \
                 vendidas recientes para detectar capital inmovilizado (supuesto conservador)."
                .to_string(),
        }
    }

    pub fn is_assumed(&self) -> bool {
        matches!(self, RotationSignal::AssumedZero)
    }
}
