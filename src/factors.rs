//! Emission factors
//!
//! Static emission factors (kg CO2e per unit of activity) and the mapping
//! from each activity kind to its top-level report category. The electricity
//! entry is the only one that can differ between requests: it may be replaced
//! by a live grid reading before a report is computed.

/// Static default for grid electricity, kg CO2e per kWh.
///
/// Also the fallback when the live carbon-intensity lookup fails.
pub const DEFAULT_ELECTRICITY_FACTOR: f64 = 0.475;

/// One of the eight activities a report accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Electricity,
    Gas,
    Car,
    Bus,
    Train,
    Flight,
    WasteLandfill,
    WasteRecycle,
}

impl ActivityKind {
    /// Declared order; also the order the form renders fields in.
    pub const ALL: [ActivityKind; 8] = [
        ActivityKind::Electricity,
        ActivityKind::Gas,
        ActivityKind::Car,
        ActivityKind::Bus,
        ActivityKind::Train,
        ActivityKind::Flight,
        ActivityKind::WasteLandfill,
        ActivityKind::WasteRecycle,
    ];

    /// Report category this activity aggregates into.
    pub fn category(self) -> Category {
        match self {
            ActivityKind::Electricity | ActivityKind::Gas => Category::Energy,
            ActivityKind::Car | ActivityKind::Bus | ActivityKind::Train | ActivityKind::Flight => {
                Category::Transport
            }
            ActivityKind::WasteLandfill | ActivityKind::WasteRecycle => Category::Waste,
        }
    }

    /// Form field name, as submitted by the report page.
    pub fn field_name(self) -> &'static str {
        match self {
            ActivityKind::Electricity => "electricity",
            ActivityKind::Gas => "gas",
            ActivityKind::Car => "car",
            ActivityKind::Bus => "bus",
            ActivityKind::Train => "train",
            ActivityKind::Flight => "flight",
            ActivityKind::WasteLandfill => "waste_landfill",
            ActivityKind::WasteRecycle => "waste_recycle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Electricity => "Electricity use",
            ActivityKind::Gas => "Natural gas use",
            ActivityKind::Car => "Car travel",
            ActivityKind::Bus => "Bus travel",
            ActivityKind::Train => "Train travel",
            ActivityKind::Flight => "Flights",
            ActivityKind::WasteLandfill => "Landfill waste",
            ActivityKind::WasteRecycle => "Recycled waste",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ActivityKind::Electricity | ActivityKind::Gas => "kWh",
            ActivityKind::Car | ActivityKind::Bus | ActivityKind::Train | ActivityKind::Flight => {
                "km"
            }
            ActivityKind::WasteLandfill | ActivityKind::WasteRecycle => "kg",
        }
    }
}

/// Top-level emission grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Energy,
    Transport,
    Waste,
}

impl Category {
    /// Declared order. Ties between category totals resolve to the first
    /// entry here, so the order is part of the insight contract.
    pub const ALL: [Category; 3] = [Category::Energy, Category::Transport, Category::Waste];

    pub fn name(self) -> &'static str {
        match self {
            Category::Energy => "Energy",
            Category::Transport => "Transport",
            Category::Waste => "Waste",
        }
    }

    pub fn name_lower(self) -> &'static str {
        match self {
            Category::Energy => "energy",
            Category::Transport => "transport",
            Category::Waste => "waste",
        }
    }
}

/// Emission factor table, kg CO2e per unit of each activity.
///
/// Not shared mutable state: each report takes its own copy, optionally with
/// the electricity entry swapped for a live grid reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionFactors {
    pub electricity_kwh: f64,
    pub natural_gas_kwh: f64,
    pub car_km: f64,
    pub bus_km: f64,
    pub train_km: f64,
    pub flight_km: f64,
    pub waste_landfill_kg: f64,
    pub waste_recycle_kg: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            electricity_kwh: DEFAULT_ELECTRICITY_FACTOR,
            natural_gas_kwh: 0.185,
            car_km: 0.120,
            bus_km: 0.082,
            train_km: 0.041,
            flight_km: 0.255,
            waste_landfill_kg: 1.9,
            waste_recycle_kg: 0.1,
        }
    }
}

impl EmissionFactors {
    /// Same table with the electricity factor replaced.
    pub fn with_electricity(mut self, factor: f64) -> Self {
        self.electricity_kwh = factor;
        self
    }

    pub fn get(&self, kind: ActivityKind) -> f64 {
        match kind {
            ActivityKind::Electricity => self.electricity_kwh,
            ActivityKind::Gas => self.natural_gas_kwh,
            ActivityKind::Car => self.car_km,
            ActivityKind::Bus => self.bus_km,
            ActivityKind::Train => self.train_km,
            ActivityKind::Flight => self.flight_km,
            ActivityKind::WasteLandfill => self.waste_landfill_kg,
            ActivityKind::WasteRecycle => self.waste_recycle_kg,
        }
    }
}
