//! HTTP surface
//!
//! Three routes: the input form, the rendered report, and a JSON variant of
//! the report for programmatic use. Pages are rendered inline; the report
//! pipeline (sanitize, resolve factor, aggregate) cannot fail, so handlers
//! are infallible and every submission produces a report.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::factors::{ActivityKind, Category, EmissionFactors};
use crate::intensity::{ElectricityFactor, IntensityClient};
use crate::report::{ActivityInputs, CategoryRecord, Report};
use crate::sanitize::parse_quantity;

#[derive(Clone)]
pub struct AppState {
    pub intensity: Arc<IntensityClient>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            intensity: Arc::new(IntensityClient::new(
                config.intensity_url.clone(),
                config.intensity_timeout,
            )),
        }
    }
}

/// Raw form fields as submitted; every field optional free text.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ReportForm {
    pub electricity: Option<String>,
    pub gas: Option<String>,
    pub car: Option<String>,
    pub bus: Option<String>,
    pub train: Option<String>,
    pub flight: Option<String>,
    pub waste_landfill: Option<String>,
    pub waste_recycle: Option<String>,
}

impl ReportForm {
    fn raw(&self, kind: ActivityKind) -> &str {
        let field = match kind {
            ActivityKind::Electricity => &self.electricity,
            ActivityKind::Gas => &self.gas,
            ActivityKind::Car => &self.car,
            ActivityKind::Bus => &self.bus,
            ActivityKind::Train => &self.train,
            ActivityKind::Flight => &self.flight,
            ActivityKind::WasteLandfill => &self.waste_landfill,
            ActivityKind::WasteRecycle => &self.waste_recycle,
        };
        field.as_deref().unwrap_or("")
    }

    /// Sanitize every field into a quantity; bad input becomes 0.0.
    pub fn sanitized(&self) -> ActivityInputs {
        ActivityInputs {
            electricity_kwh: parse_quantity(self.electricity.as_deref()),
            gas_kwh: parse_quantity(self.gas.as_deref()),
            car_km: parse_quantity(self.car.as_deref()),
            bus_km: parse_quantity(self.bus.as_deref()),
            train_km: parse_quantity(self.train.as_deref()),
            flight_km: parse_quantity(self.flight.as_deref()),
            waste_landfill_kg: parse_quantity(self.waste_landfill.as_deref()),
            waste_recycle_kg: parse_quantity(self.waste_recycle.as_deref()),
        }
    }
}

/// JSON body returned by `POST /api/report`.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub total: f64,
    pub data: Vec<CategoryRecord>,
    pub insights: String,
    pub electricity_factor: f64,
    pub factor_source: &'static str,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/report", post(report_page))
        .route("/api/report", post(report_api))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Carbon report server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index() -> Html<String> {
    Html(render_form_page(&ReportForm::default()))
}

async fn report_page(
    State(state): State<AppState>,
    Form(form): Form<ReportForm>,
) -> Html<String> {
    let (report, factor) = build_report(&state, &form).await;
    Html(render_report_page(&report, factor, &form))
}

async fn report_api(
    State(state): State<AppState>,
    Form(form): Form<ReportForm>,
) -> Json<ReportResponse> {
    let (report, factor) = build_report(&state, &form).await;
    Json(ReportResponse {
        total: report.total,
        data: report.records(),
        insights: report.insights,
        electricity_factor: factor.value(),
        factor_source: if factor.is_live() { "live" } else { "default" },
    })
}

async fn build_report(state: &AppState, form: &ReportForm) -> (Report, ElectricityFactor) {
    let inputs = form.sanitized();
    let factor = state.intensity.resolve_electricity_factor().await;
    let factors = EmissionFactors::default().with_electricity(factor.value());
    (Report::compute(&inputs, &factors), factor)
}

// --- Inline page rendering ---

fn render_input_fields(form: &ReportForm) -> String {
    let mut fields = String::new();
    for category in Category::ALL {
        fields.push_str(&format!("<fieldset><legend>{}</legend>\n", category.name()));
        for kind in ActivityKind::ALL {
            if kind.category() != category {
                continue;
            }
            let value = html_escape::encode_double_quoted_attribute(form.raw(kind));
            fields.push_str(&format!(
                "<label>{label} ({unit})\
                 <input type=\"text\" name=\"{name}\" value=\"{value}\" placeholder=\"0\"></label>\n",
                label = kind.label(),
                unit = kind.unit(),
                name = kind.field_name(),
            ));
        }
        fields.push_str("</fieldset>\n");
    }
    fields
}

fn render_form_page(form: &ReportForm) -> String {
    format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Carbonscope | Footprint Calculator</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, sans-serif; max-width: 640px; margin: 40px auto; color: #222; }}
        fieldset {{ border: 1px solid #cdd; border-radius: 6px; margin-bottom: 15px; }}
        legend {{ font-weight: 600; color: #276749; }}
        label {{ display: block; margin: 8px 0; }}
        input {{ float: right; width: 120px; padding: 4px; }}
        button {{ background: #276749; color: #fff; border: none; padding: 10px 24px; border-radius: 6px; cursor: pointer; }}
    </style>
</head>
<body>
    <h1>🌍 Carbon Footprint Calculator</h1>
    <p>Enter your activity for the period. Blank fields count as zero.</p>
    <form method="post" action="/report">
{fields}
        <button type="submit">Calculate report</button>
    </form>
</body>
</html>"####,
        fields = render_input_fields(form)
    )
}

fn render_report_page(report: &Report, factor: ElectricityFactor, form: &ReportForm) -> String {
    let rows: String = report
        .records()
        .iter()
        .map(|record| {
            format!(
                "<tr><td>{}</td><td>{:.2}</td></tr>\n",
                record.category, record.emissions
            )
        })
        .collect();

    let factor_note = if factor.is_live() {
        format!(
            "Electricity factor from live grid intensity: {:.3} kg CO2e/kWh.",
            factor.value()
        )
    } else {
        format!(
            "Electricity factor: static default {:.3} kg CO2e/kWh (live intensity unavailable).",
            factor.value()
        )
    };

    format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Carbonscope | Your Report</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, sans-serif; max-width: 640px; margin: 40px auto; color: #222; }}
        table {{ border-collapse: collapse; width: 100%; margin: 20px 0; }}
        th, td {{ border: 1px solid #cdd; padding: 8px; text-align: left; }}
        th {{ background: #eef5f0; }}
        .total {{ font-size: 28px; color: #276749; }}
        .insight {{ background: #eef5f0; border-left: 3px solid #276749; padding: 12px; }}
        .note {{ color: #777; font-size: 13px; }}
        fieldset {{ border: 1px solid #cdd; border-radius: 6px; margin-bottom: 15px; }}
        legend {{ font-weight: 600; color: #276749; }}
        label {{ display: block; margin: 8px 0; }}
        input {{ float: right; width: 120px; padding: 4px; }}
        button {{ background: #276749; color: #fff; border: none; padding: 10px 24px; border-radius: 6px; cursor: pointer; }}
    </style>
</head>
<body>
    <h1>Your Carbon Report</h1>
    <p class="total">{total:.2} kg CO2e</p>
    <table>
        <tr><th>Category</th><th>Emissions (kg CO2e)</th></tr>
{rows}    </table>
    <p class="insight">{insights}</p>
    <p class="note">{factor_note}</p>
    <h2>Adjust and recalculate</h2>
    <form method="post" action="/report">
{fields}
        <button type="submit">Recalculate</button>
    </form>
</body>
</html>"####,
        total = report.total,
        insights = report.insights,
        fields = render_input_fields(form),
    )
}
