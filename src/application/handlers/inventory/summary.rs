//! Run summary derivation.
//!
//! The "capital en riesgo" figure lives here rather than in the analytics:
//! it combines two analyses into a dashboard headline.

use chrono::Utc;

use super::settings::AnalyticsSettings;
use crate::domain::analysis::{AbcClass, AlertReport, KpiAggregator};
use crate::domain::inventory::InventorySnapshot;
use crate::ports::RunSummary;

/// Sum of alert impact as a percent of total inventory value.
///
/// Zero when the inventory has no value.
pub fn capital_en_riesgo_pct(report: &AlertReport) -> f64 {
    if report.total_valor > 0.0 {
        report.total_impact() / report.total_valor * 100.0
    } else {
        0.0
    }
}

/// Runs every analysis over a snapshot and condenses the headline figures.
pub fn summarize(snapshot: &InventorySnapshot, settings: &AnalyticsSettings) -> RunSummary {
    let records = snapshot.records();
    let kpis = KpiAggregator::compute(records);
    let abc = settings.classifier.classify(records);
    let alerts = settings
        .alert_engine
        .evaluate(records, snapshot.rotation(), None);

    RunSummary {
        dataset_id: snapshot.id,
        source_name: snapshot.source_name.clone(),
        generated_at: Utc::now(),
        rows: records.len(),
        kpis,
        pct_capital_abc: AbcClass::ALL
            .iter()
            .map(|class| (*class, abc.summary(*class).pct_capital))
            .collect(),
        total_alertas: alerts.total_alertas,
        capital_en_riesgo_pct: capital_en_riesgo_pct(&alerts),
        rotation_note: snapshot.rotation().note(),
    }
}
