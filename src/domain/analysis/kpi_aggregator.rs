//! KPI Aggregator - Summary metrics over a normalized record set.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::inventory::NormalizedRecord;

/// Number of products listed in `productos_mas_costosos`.
pub const TOP_PRICED_PRODUCTS: usize = 5;

/// A product identified by its unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedProduct {
    pub codigo: String,
    pub nombre: String,
    pub precio: f64,
}

impl From<&NormalizedRecord> for PricedProduct {
    fn from(record: &NormalizedRecord) -> Self {
        Self {
            codigo: record.codigo.clone(),
            nombre: record.nombre.clone(),
            precio: record.precio,
        }
    }
}

/// Headline inventory figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryKpis {
    pub total_valor: f64,
    pub total_items: usize,
    pub total_unidades: u64,
    pub valor_promedio_item: f64,
    pub categorias: usize,
    pub stock_promedio: f64,
    pub productos_sin_stock: usize,
    /// Summed value per category, ordered by category name.
    pub valor_por_categoria: BTreeMap<String, f64>,
    /// Mean quantity per category, ordered by category name.
    pub unidades_promedio_por_categoria: BTreeMap<String, f64>,
    /// Highest unit prices first; ties keep input order.
    pub productos_mas_costosos: Vec<PricedProduct>,
    /// Cheapest product (first one on ties).
    pub producto_min_precio: Option<PricedProduct>,
    /// Most expensive product (first one on ties).
    pub producto_max_precio: Option<PricedProduct>,
}

/// Calculator for inventory KPIs.
pub struct KpiAggregator;

impl KpiAggregator {
    /// Computes KPIs for the given records.
    ///
    /// # Edge Cases
    /// - Empty records: every figure is zero and the maps are empty
    pub fn compute(records: &[NormalizedRecord]) -> InventoryKpis {
        if records.is_empty() {
            return InventoryKpis::default();
        }

        let mut valor_por_categoria: BTreeMap<String, f64> = BTreeMap::new();
        let mut unidades: BTreeMap<String, (u64, usize)> = BTreeMap::new();
        let mut total_valor = 0.0;
        let mut total_unidades: u64 = 0;
        let mut productos_sin_stock = 0;

        for record in records {
            total_valor += record.valor_total;
            total_unidades = total_unidades.saturating_add(record.cantidad);
            if record.cantidad == 0 {
                productos_sin_stock += 1;
            }
            *valor_por_categoria
                .entry(record.categoria.clone())
                .or_insert(0.0) += record.valor_total;
            let entry = unidades.entry(record.categoria.clone()).or_insert((0, 0));
            entry.0 = entry.0.saturating_add(record.cantidad);
            entry.1 += 1;
        }

        let total_items = records.len();
        let unidades_promedio_por_categoria = unidades
            .into_iter()
            .map(|(categoria, (sum, count))| (categoria, sum as f64 / count as f64))
            .collect();

        let mut by_price: Vec<&NormalizedRecord> = records.iter().collect();
        by_price.sort_by(|a, b| b.precio.partial_cmp(&a.precio).unwrap_or(Ordering::Equal));
        let productos_mas_costosos = by_price
            .iter()
            .take(TOP_PRICED_PRODUCTS)
            .map(|r| PricedProduct::from(*r))
            .collect();

        // Strict comparisons keep the first record on ties
        let mut cheapest = &records[0];
        let mut priciest = &records[0];
        for record in &records[1..] {
            if record.precio < cheapest.precio {
                cheapest = record;
            }
            if record.precio > priciest.precio {
                priciest = record;
            }
        }

        InventoryKpis {
            total_valor,
            total_items,
            total_unidades,
            valor_promedio_item: total_valor / total_items as f64,
            categorias: valor_por_categoria.len(),
            stock_promedio: total_unidades as f64 / total_items as f64,
            productos_sin_stock,
            valor_por_categoria,
            unidades_promedio_por_categoria,
            productos_mas_costosos,
            producto_min_precio: Some(cheapest.into()),
            producto_max_precio: Some(priciest.into()),
        }
    }
}
