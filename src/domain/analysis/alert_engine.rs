//! Alert Engine - Rule-based alerts ranked by economic impact.
//!
//! Three independent rule families run over every record:
//!
//! | Kind             | Trigger                                              | Impact                         |
//! |------------------|------------------------------------------------------|--------------------------------|
//! | `SOBRE_STOCK`    | `cantidad > overstock_multiple * category median`    | `(cantidad - median) * precio` |
//! | `RIESGO_QUIEBRE` | `cantidad < stockout_fraction * expected level`      | `(expected - cantidad) * precio` |
//! | `CAPITAL_MUERTO` | rotation 0 and `valor_total > dead_capital_min_value` | `valor_total`                 |

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ordering::median;
use crate::domain::foundation::ValidationError;
use crate::domain::inventory::{NormalizedRecord, RotationSignal};

/// Rule family that raised an alert. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    SobreStock,
    RiesgoQuiebre,
    CapitalMuerto,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertKind::SobreStock => "SOBRE_STOCK",
            AlertKind::RiesgoQuiebre => "RIESGO_QUIEBRE",
            AlertKind::CapitalMuerto => "CAPITAL_MUERTO",
        };
        write!(f, "{}", s)
    }
}

/// Alert severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Alta,
    Media,
    Baja,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Alta => "Alta",
            Severity::Media => "Media",
            Severity::Baja => "Baja",
        };
        write!(f, "{}", s)
    }
}

/// Tunable parameters for the three rule families.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertRules {
    /// Quantity above this multiple of the category median is overstock.
    pub overstock_multiple: f64,
    /// Quantity below this fraction of the expected level is a stockout risk.
    pub stockout_fraction: f64,
    /// Minimum value for a non-rotating item to count as dead capital.
    pub dead_capital_min_value: f64,
    /// Share of total value (0-1) at which dead capital is `Alta`.
    pub high_share: f64,
    /// Share of total value (0-1) at which dead capital is `Media`.
    pub medium_share: f64,
}

impl Default for AlertRules {
    fn default() -> Self {
        Self {
            overstock_multiple: 2.0,
            stockout_fraction: 0.25,
            dead_capital_min_value: 100.0,
            high_share: 0.05,
            medium_share: 0.02,
        }
    }
}

impl AlertRules {
    /// Checks that every parameter is in its meaningful range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.overstock_multiple.is_finite() && self.overstock_multiple > 1.0) {
            return Err(ValidationError::out_of_range(
                "overstock_multiple",
                1.0,
                f64::MAX,
                self.overstock_multiple,
            ));
        }
        if !(self.stockout_fraction > 0.0 && self.stockout_fraction <= 1.0) {
            return Err(ValidationError::out_of_range(
                "stockout_fraction",
                0.0,
                1.0,
                self.stockout_fraction,
            ));
        }
        if !(self.dead_capital_min_value.is_finite() && self.dead_capital_min_value >= 0.0) {
            return Err(ValidationError::out_of_range(
                "dead_capital_min_value",
                0.0,
                f64::MAX,
                self.dead_capital_min_value,
            ));
        }
        if !(self.medium_share >= 0.0 && self.medium_share <= 1.0) {
            return Err(ValidationError::out_of_range(
                "medium_share",
                0.0,
                1.0,
                self.medium_share,
            ));
        }
        if !(self.high_share >= self.medium_share && self.high_share <= 1.0) {
            return Err(ValidationError::out_of_range(
                "high_share",
                self.medium_share,
                1.0,
                self.high_share,
            ));
        }
        Ok(())
    }
}

/// One actionable finding about a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub codigo: String,
    pub nombre: String,
    pub categoria: String,
    pub cantidad: u64,
    pub valor_total: f64,
    pub kind: AlertKind,
    pub severity: Severity,
    pub impact_value: f64,
    /// `impact_value` as a share (0-1) of total inventory value.
    pub impacto_relativo: f64,
    pub detalle: String,
    pub recommendation: String,
}

/// Thresholds actually applied in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    #[serde(flatten)]
    pub rules: AlertRules,
    pub medianas_por_categoria: BTreeMap<String, f64>,
}

/// Output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertReport {
    pub alertas: Vec<Alert>,
    /// Alerts found before truncation to `top`.
    pub total_alertas: usize,
    pub umbrales: AlertThresholds,
    pub supuesto_capital_muerto: String,
    pub total_valor: f64,
}

impl AlertReport {
    /// Sum of impact over the returned alerts.
    pub fn total_impact(&self) -> f64 {
        self.alertas.iter().map(|a| a.impact_value).sum()
    }
}

/// Evaluates alert rules over a record set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertEngine {
    rules: AlertRules,
}

impl AlertEngine {
    pub fn new(rules: AlertRules) -> Self {
        Self { rules }
    }

    /// Runs every rule and returns alerts sorted by impact, highest first.
    ///
    /// Ties keep input order, then kind order. `top` keeps a prefix of the
    /// sorted list; `Some(0)` and `None` both mean no limit.
    pub fn evaluate(
        &self,
        records: &[NormalizedRecord],
        rotation: &RotationSignal,
        top: Option<usize>,
    ) -> AlertReport {
        let total_valor: f64 = records.iter().map(|r| r.valor_total).sum();
        let medians = category_medians(records);

        let mut alertas = Vec::new();
        for record in records {
            let median = medians.get(&record.categoria).copied().unwrap_or(0.0);
            if let Some(alert) = self.overstock(record, median, total_valor) {
                alertas.push(alert);
            }
            if let Some(alert) = self.stockout(record, median, total_valor) {
                alertas.push(alert);
            }
            if let Some(alert) = self.dead_capital(record, rotation, total_valor) {
                alertas.push(alert);
            }
        }

        alertas.sort_by(|a, b| {
            b.impact_value
                .partial_cmp(&a.impact_value)
                .unwrap_or(Ordering::Equal)
        });

        let total_alertas = alertas.len();
        if let Some(n) = top.filter(|n| *n > 0) {
            alertas.truncate(n);
        }

        AlertReport {
            alertas,
            total_alertas,
            umbrales: AlertThresholds {
                rules: self.rules,
                medianas_por_categoria: medians,
            },
            supuesto_capital_muerto: rotation.note(),
            total_valor,
        }
    }

    fn overstock(&self, record: &NormalizedRecord, median: f64, total: f64) -> Option<Alert> {
        if median <= 0.0 {
            return None;
        }
        let cantidad = record.cantidad_f64();
        let multiple = self.rules.overstock_multiple;
        if cantidad <= multiple * median {
            return None;
        }

        let ratio = cantidad / median;
        let severity = if ratio >= 2.0 * multiple {
            Severity::Alta
        } else if ratio >= 1.5 * multiple {
            Severity::Media
        } else {
            Severity::Baja
        };
        let impact = (cantidad - median) * record.precio;
        let detalle = format!(
            "Stock {} supera {:.1}x la mediana de la categoria ({:.1}).",
            record.cantidad, multiple, median
        );
        Some(build_alert(record, AlertKind::SobreStock, severity, impact, total, detalle))
    }

    fn stockout(&self, record: &NormalizedRecord, median: f64, total: f64) -> Option<Alert> {
        let rotacion = record.rotacion_efectiva();
        let expected = if rotacion > 0.0 { rotacion } else { median };
        let low = self.rules.stockout_fraction * expected;
        let cantidad = record.cantidad_f64();
        if expected <= 0.0 || cantidad >= low {
            return None;
        }

        let severity = if record.cantidad == 0 {
            Severity::Alta
        } else if cantidad <= low / 2.0 {
            Severity::Media
        } else {
            Severity::Baja
        };
        let impact = (expected - cantidad) * record.precio;
        let detalle = format!(
            "Stock {} < {:.1} ({:.0}% del nivel esperado {:.1}).",
            record.cantidad,
            low,
            self.rules.stockout_fraction * 100.0,
            expected
        );
        Some(build_alert(record, AlertKind::RiesgoQuiebre, severity, impact, total, detalle))
    }

    fn dead_capital(
        &self,
        record: &NormalizedRecord,
        rotation: &RotationSignal,
        total: f64,
    ) -> Option<Alert> {
        if record.rotacion_efectiva() > 0.0
            || record.valor_total <= self.rules.dead_capital_min_value
        {
            return None;
        }

        let share = share_of(record.valor_total, total);
        let severity = if share >= self.rules.high_share {
            Severity::Alta
        } else if share >= self.rules.medium_share {
            Severity::Media
        } else {
            Severity::Baja
        };
        let detalle = format!(
            "Valor {:.2} sin rotacion (minimo {:.2}). {}",
            record.valor_total,
            self.rules.dead_capital_min_value,
            rotation.note()
        );
        Some(build_alert(
            record,
            AlertKind::CapitalMuerto,
            severity,
            record.valor_total,
            total,
            detalle,
        ))
    }
}

/// Median quantity per category.
fn category_medians(records: &[NormalizedRecord]) -> BTreeMap<String, f64> {
    let mut quantities: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for record in records {
        quantities
            .entry(record.categoria.clone())
            .or_default()
            .push(record.cantidad_f64());
    }
    quantities
        .into_iter()
        .map(|(categoria, values)| (categoria, median(&values)))
        .collect()
}

fn share_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total
    } else {
        0.0
    }
}

fn build_alert(
    record: &NormalizedRecord,
    kind: AlertKind,
    severity: Severity,
    impact_value: f64,
    total: f64,
    detalle: String,
) -> Alert {
    Alert {
        codigo: record.codigo.clone(),
        nombre: record.nombre.clone(),
        categoria: record.categoria.clone(),
        cantidad: record.cantidad,
        valor_total: record.valor_total,
        kind,
        severity,
        impact_value,
        impacto_relativo: share_of(impact_value, total),
        detalle,
        recommendation: recommendation(kind, severity).to_string(),
    }
}

/// Recommended action for a kind and severity tier.
pub fn recommendation(kind: AlertKind, severity: Severity) -> &'static str {
    match (kind, severity) {
        (AlertKind::SobreStock, Severity::Alta) => {
            "Suspender compras y liquidar excedente con promociones o devolucion a proveedor."
        }
        (AlertKind::SobreStock, Severity::Media) => {
            "Reducir el proximo pedido y redistribuir stock entre ubicaciones."
        }
        (AlertKind::SobreStock, Severity::Baja) => {
            "Monitorear ventas y ajustar el punto de pedido."
        }
        (AlertKind::RiesgoQuiebre, Severity::Alta) => {
            "Reponer de inmediato; el producto esta sin stock."
        }
        (AlertKind::RiesgoQuiebre, Severity::Media) => {
            "Generar orden de compra prioritaria antes del proximo ciclo."
        }
        (AlertKind::RiesgoQuiebre, Severity::Baja) => {
            "Incluir en el proximo pedido regular y revisar stock de seguridad."
        }
        (AlertKind::CapitalMuerto, Severity::Alta) => {
            "Liquidar o reubicar el inventario inmovilizado; revisar la politica de compra."
        }
        (AlertKind::CapitalMuerto, Severity::Media) => {
            "Reducir stock gradualmente y evaluar descuentos por volumen."
        }
        (AlertKind::CapitalMuerto, Severity::Baja) => {
            "Revisar rotacion segun contexto antes de reponer."
        }
    }
}
