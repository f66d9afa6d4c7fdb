use log::{debug, info};
use rolling_average::{smooth, SmoothParams};
use serde::{Deserialize, Serialize};
use variants_common::types::{DateRange, SmoothedRecord, VariantRecord, VariantSelection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothingRequest {
    pub range: DateRange,
    #[serde(default)]
    pub selection: VariantSelection,
    #[serde(default)]
    pub params: SmoothParams,
}

impl SmoothingRequest {
    pub fn new(range: DateRange, selection: VariantSelection, params: SmoothParams) -> Self {
        SmoothingRequest { range, selection, params }
    }
}

/// Variant table in caller order. Row order inside a variant defines adjacency for smoothing.
#[derive(Debug, Clone, Default)]
pub struct VariantFrame {
    records: Vec<VariantRecord>,
}

impl VariantFrame {
    pub fn new(records: Vec<VariantRecord>) -> Self {
        VariantFrame { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }

    /// Distinct variant names, first appearance first.
    pub fn variants(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for r in &self.records {
            if !seen.contains(&r.variant_name.as_str()) {
                seen.push(&r.variant_name);
            }
        }
        seen
    }

    pub fn filter(&self, range: &DateRange, selection: &VariantSelection) -> Vec<&VariantRecord> {
        self.records
            .iter()
            .filter(|r| range.contains(r.date) && selection.includes(&r.variant_name))
            .collect()
    }

    pub fn series_for(&self, variant: &str, range: &DateRange) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.variant_name == variant && range.contains(r.date))
            .map(|r| r.specimens)
            .collect()
    }

    /// Filter, group by variant, and attach a rolling average to every kept row.
    ///
    /// Groups come out in first-appearance order. In raw mode rows keep their filtered order and
    /// `rolling_avg` equals `specimens`.
    pub fn smoothed(&self, req: &SmoothingRequest) -> Vec<SmoothedRecord> {
        let rows = self.filter(&req.range, &req.selection);
        if req.params.is_raw() {
            debug!("raw mode, {} rows passed through", rows.len());
            return rows
                .into_iter()
                .map(|r| SmoothedRecord::from_record(r, r.specimens))
                .collect();
        }

        let mut groups: Vec<(&str, Vec<&VariantRecord>)> = Vec::new();
        for r in rows {
            match groups.iter_mut().find(|(name, _)| *name == r.variant_name) {
                Some((_, g)) => g.push(r),
                None => groups.push((r.variant_name.as_str(), vec![r])),
            }
        }

        let mut out = Vec::new();
        for (name, group) in &groups {
            let series: Vec<f64> = group.iter().map(|r| r.specimens).collect();
            let avg = smooth(&series, req.params.half_window);
            debug!("variant {}: {} rows smoothed", name, series.len());
            out.extend(group.iter().zip(avg).map(|(r, a)| SmoothedRecord::from_record(r, a)));
        }
        info!(
            "smoothed {} rows across {} variants (half window {})",
            out.len(),
            groups.len(),
            req.params.half_window
        );
        out
    }
}
