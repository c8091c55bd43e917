//! Emission aggregation and insights
//!
//! Multiplies sanitized activity quantities by their emission factors, sums
//! them into the three report categories, and derives the insight sentence
//! naming the dominant category. Pure arithmetic: no error conditions.

use serde::Serialize;

use crate::factors::{ActivityKind, Category, EmissionFactors};

/// Sanitized activity quantities for one report, all defaulting to 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivityInputs {
    pub electricity_kwh: f64,
    pub gas_kwh: f64,
    pub car_km: f64,
    pub bus_km: f64,
    pub train_km: f64,
    pub flight_km: f64,
    pub waste_landfill_kg: f64,
    pub waste_recycle_kg: f64,
}

impl ActivityInputs {
    pub fn get(&self, kind: ActivityKind) -> f64 {
        match kind {
            ActivityKind::Electricity => self.electricity_kwh,
            ActivityKind::Gas => self.gas_kwh,
            ActivityKind::Car => self.car_km,
            ActivityKind::Bus => self.bus_km,
            ActivityKind::Train => self.train_km,
            ActivityKind::Flight => self.flight_km,
            ActivityKind::WasteLandfill => self.waste_landfill_kg,
            ActivityKind::WasteRecycle => self.waste_recycle_kg,
        }
    }
}

/// Per-category emission subtotals, kg CO2e.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub energy: f64,
    pub transport: f64,
    pub waste: f64,
}

impl CategoryTotals {
    /// Sum each activity's quantity x factor into its category.
    pub fn compute(inputs: &ActivityInputs, factors: &EmissionFactors) -> Self {
        let mut totals = CategoryTotals::default();
        for kind in ActivityKind::ALL {
            let emissions = inputs.get(kind) * factors.get(kind);
            match kind.category() {
                Category::Energy => totals.energy += emissions,
                Category::Transport => totals.transport += emissions,
                Category::Waste => totals.waste += emissions,
            }
        }
        totals
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Energy => self.energy,
            Category::Transport => self.transport,
            Category::Waste => self.waste,
        }
    }

    pub fn total(&self) -> f64 {
        self.energy + self.transport + self.waste
    }

    /// Highest-emission category. Ties resolve to the first entry in
    /// `Category::ALL`, so all-zero totals report Energy.
    pub fn dominant(&self) -> Category {
        let mut best = Category::Energy;
        for category in [Category::Transport, Category::Waste] {
            if self.get(category) > self.get(best) {
                best = category;
            }
        }
        best
    }
}

/// Round to 2 decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One row of the report's category table.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRecord {
    #[serde(rename = "Category")]
    pub category: &'static str,
    #[serde(rename = "Emissions (kg CO2e)")]
    pub emissions: f64,
}

/// A computed emission report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub totals: CategoryTotals,
    /// Grand total rounded to 2 decimals.
    pub total: f64,
    pub insights: String,
}

impl Report {
    pub fn compute(inputs: &ActivityInputs, factors: &EmissionFactors) -> Self {
        let totals = CategoryTotals::compute(inputs, factors);
        let dominant = totals.dominant().name_lower();
        let insights = format!(
            "Your highest emissions come from {dominant}. \
             Consider improving your {dominant} habits for a greener lifestyle."
        );
        Report {
            total: round2(totals.total()),
            totals,
            insights,
        }
    }

    /// Category table rows, in declared order.
    pub fn records(&self) -> Vec<CategoryRecord> {
        Category::ALL
            .iter()
            .map(|&category| CategoryRecord {
                category: category.name(),
                emissions: self.totals.get(category),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn energy_subtotal() {
        let inputs = ActivityInputs {
            electricity_kwh: 10.0,
            gas_kwh: 5.0,
            ..Default::default()
        };
        let totals = CategoryTotals::compute(&inputs, &EmissionFactors::default());
        assert!(close(totals.energy, 5.675));
        assert_eq!(totals.transport, 0.0);
        assert_eq!(totals.waste, 0.0);
    }

    #[test]
    fn transport_subtotal() {
        let inputs = ActivityInputs {
            car_km: 100.0,
            bus_km: 50.0,
            train_km: 20.0,
            flight_km: 10.0,
            ..Default::default()
        };
        let totals = CategoryTotals::compute(&inputs, &EmissionFactors::default());
        assert!(close(totals.transport, 19.47));
    }

    #[test]
    fn waste_subtotal() {
        let inputs = ActivityInputs {
            waste_landfill_kg: 10.0,
            waste_recycle_kg: 20.0,
            ..Default::default()
        };
        let totals = CategoryTotals::compute(&inputs, &EmissionFactors::default());
        assert!(close(totals.waste, 21.0));
    }

    #[test]
    fn total_is_rounded_sum_of_categories() {
        let inputs = ActivityInputs {
            electricity_kwh: 10.0,
            gas_kwh: 5.0,
            car_km: 100.0,
            bus_km: 50.0,
            train_km: 20.0,
            flight_km: 10.0,
            waste_landfill_kg: 10.0,
            waste_recycle_kg: 20.0,
        };
        let report = Report::compute(&inputs, &EmissionFactors::default());
        let t = report.totals;
        assert_eq!(report.total, round2(t.energy + t.transport + t.waste));
        assert!(report.total >= 0.0);
    }

    #[test]
    fn live_factor_only_changes_energy() {
        let inputs = ActivityInputs {
            electricity_kwh: 10.0,
            car_km: 10.0,
            ..Default::default()
        };
        let factors = EmissionFactors::default().with_electricity(1.0);
        let totals = CategoryTotals::compute(&inputs, &factors);
        assert!(close(totals.energy, 10.0));
        assert!(close(totals.transport, 1.2));
    }

    #[test]
    fn dominant_prefers_declared_order_on_ties() {
        let tied = CategoryTotals {
            energy: 5.0,
            transport: 5.0,
            waste: 5.0,
        };
        assert_eq!(tied.dominant(), Category::Energy);

        let transport_waste_tie = CategoryTotals {
            energy: 1.0,
            transport: 5.0,
            waste: 5.0,
        };
        assert_eq!(transport_waste_tie.dominant(), Category::Transport);
    }

    #[test]
    fn dominant_picks_strict_maximum() {
        let totals = CategoryTotals {
            energy: 1.0,
            transport: 3.0,
            waste: 2.0,
        };
        assert_eq!(totals.dominant(), Category::Transport);

        let waste_heavy = CategoryTotals {
            energy: 1.0,
            transport: 3.0,
            waste: 21.0,
        };
        assert_eq!(waste_heavy.dominant(), Category::Waste);
    }

    #[test]
    fn all_zero_inputs_report_energy() {
        let report = Report::compute(&ActivityInputs::default(), &EmissionFactors::default());
        assert_eq!(report.total, 0.0);
        assert!(report.insights.contains("come from energy"));
    }

    #[test]
    fn insight_names_dominant_category_lowercase() {
        let inputs = ActivityInputs {
            flight_km: 1000.0,
            ..Default::default()
        };
        let report = Report::compute(&inputs, &EmissionFactors::default());
        assert_eq!(
            report.insights,
            "Your highest emissions come from transport. \
             Consider improving your transport habits for a greener lifestyle."
        );
    }

    #[test]
    fn records_follow_declared_order() {
        let report = Report::compute(&ActivityInputs::default(), &EmissionFactors::default());
        let records = report.records();
        let names: Vec<_> = records.iter().map(|r| r.category).collect();
        assert_eq!(names, vec!["Energy", "Transport", "Waste"]);
    }
}
