//! What-If Simulator - Capital released by a hypothetical stock reduction.

use serde::{Deserialize, Serialize};

use super::ordering::value_descending_order;
use crate::domain::foundation::ReductionPercentage;
use crate::domain::inventory::NormalizedRecord;

/// Message returned when no record matches the requested category.
pub const CATEGORY_NOT_FOUND: &str = "Categoria no encontrada en el inventario.";

/// Parameters of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfRequest {
    pub categoria: String,
    pub porcentaje_reduccion: ReductionPercentage,
    /// Only the N most valuable items of the category. `None` or 0 means all.
    pub top_n: Option<usize>,
}

impl WhatIfRequest {
    /// Builds a request, clamping the percentage into 0-100.
    pub fn new(categoria: impl Into<String>, porcentaje_reduccion: f64, top_n: Option<usize>) -> Self {
        Self {
            categoria: categoria.into(),
            porcentaje_reduccion: ReductionPercentage::new(porcentaje_reduccion),
            top_n,
        }
    }
}

/// Projection for one item of the simulated subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedItem {
    pub codigo: String,
    pub nombre: String,
    pub valor_total: f64,
    pub capital_liberado: f64,
    pub valor_estimado_post: f64,
}

/// Outcome of a simulation. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    pub categoria: String,
    pub porcentaje_reduccion: ReductionPercentage,
    pub top_n: Option<usize>,
    pub capital_liberado: f64,
    pub items_considered: usize,
    /// Value of the whole category, not just the simulated subset.
    pub valor_actual_categoria: f64,
    pub valor_estimado_post: f64,
    pub detalle: Vec<SimulatedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
}

/// Read-only capital release projections.
pub struct WhatIfSimulator;

impl WhatIfSimulator {
    /// Projects the capital released by reducing a category's stock.
    ///
    /// Category matching ignores case and surrounding whitespace. An unknown
    /// category yields a zero-impact result carrying [`CATEGORY_NOT_FOUND`].
    pub fn simulate(records: &[NormalizedRecord], request: &WhatIfRequest) -> WhatIfResult {
        let wanted = request.categoria.trim().to_lowercase();
        let fraction = request.porcentaje_reduccion.as_fraction();
        let cap = request.top_n.filter(|n| *n > 0);

        let in_category: Vec<&NormalizedRecord> = value_descending_order(records)
            .into_iter()
            .map(|i| &records[i])
            .filter(|r| !wanted.is_empty() && r.categoria.trim().to_lowercase() == wanted)
            .collect();

        let Some(first) = in_category.first() else {
            return WhatIfResult {
                categoria: request.categoria.trim().to_string(),
                porcentaje_reduccion: request.porcentaje_reduccion,
                top_n: request.top_n,
                capital_liberado: 0.0,
                items_considered: 0,
                valor_actual_categoria: 0.0,
                valor_estimado_post: 0.0,
                detalle: Vec::new(),
                mensaje: Some(CATEGORY_NOT_FOUND.to_string()),
            };
        };
        let categoria = first.categoria.clone();

        let valor_actual_categoria: f64 = in_category.iter().map(|r| r.valor_total).sum();
        let subset = &in_category[..cap.map_or(in_category.len(), |n| n.min(in_category.len()))];

        let detalle: Vec<SimulatedItem> = subset
            .iter()
            .map(|r| {
                let liberado = r.valor_total * fraction;
                SimulatedItem {
                    codigo: r.codigo.clone(),
                    nombre: r.nombre.clone(),
                    valor_total: r.valor_total,
                    capital_liberado: liberado,
                    valor_estimado_post: r.valor_total - liberado,
                }
            })
            .collect();
        let capital_liberado: f64 = detalle.iter().map(|item| item.capital_liberado).sum();

        WhatIfResult {
            categoria,
            porcentaje_reduccion: request.porcentaje_reduccion,
            top_n: request.top_n,
            capital_liberado,
            items_considered: detalle.len(),
            valor_actual_categoria,
            valor_estimado_post: valor_actual_categoria - capital_liberado,
            detalle,
            mensaje: None,
        }
    }
}
