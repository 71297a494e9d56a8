//! HTML rendering for the dashboard. View models are plain strings assembled
//! from query results, so presentation stays out of the query layer.

use crate::services::dashboard::DashboardData;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One entry in the recent-readings list, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingRow {
    pub entry_time: String,
    pub temperature: String,
}

/// Display-ready index page content.
#[derive(Debug, Clone)]
pub struct DashboardView {
    /// "21.5" or "N/A".
    pub current_temperature: String,
    /// "2025-07-25 12:00:00" or "N/A".
    pub current_time: String,
    /// Rounded average, or "N/A" when there are no readings.
    pub average: String,
    /// How many readings the average covers (0..=50).
    pub average_count: usize,
    pub recent: Vec<ReadingRow>,
}

impl DashboardView {
    pub fn from_data(data: &DashboardData) -> Self {
        let (current_temperature, current_time) = match &data.latest {
            Some(r) => (
                r.temperature_celsius.to_string(),
                r.entry_time.format(TIME_FORMAT).to_string(),
            ),
            None => ("N/A".to_string(), "N/A".to_string()),
        };

        let average = match data.average() {
            Some(avg) => avg.to_string(),
            None => "N/A".to_string(),
        };

        let recent = data
            .recent
            .iter()
            .map(|r| ReadingRow {
                entry_time: r.entry_time.format(TIME_FORMAT).to_string(),
                temperature: r.temperature_celsius.to_string(),
            })
            .collect();

        DashboardView {
            current_temperature,
            current_time,
            average,
            average_count: data.window.len(),
            recent,
        }
    }

    pub fn render(&self) -> String {
        let readings_list = if self.recent.is_empty() {
            "                <li>No historical data available. Run the data collection script!</li>\n".to_string()
        } else {
            self.recent
                .iter()
                .map(|row| {
                    format!(
                        "                <li><span class=\"temp\">{}°C</span> <span class=\"timestamp\">{} (UTC)</span></li>\n",
                        row.temperature, row.entry_time
                    )
                })
                .collect()
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Weather Dashboard</title>
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; background-color: #f4f4f4; color: #333; }}
        .container {{ max-width: 800px; margin: auto; background: #fff; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        h1 {{ color: #0056b3; text-align: center; margin-bottom: 30px; }}
        h2 {{ color: #0056b3; border-bottom: 1px solid #eee; padding-bottom: 5px; margin-top: 25px; }}
        .current-temp-section {{ text-align: center; margin-bottom: 25px; }}
        .current-temp {{ font-size: 3em; color: #dc3545; font-weight: bold; }}
        .timestamp {{ font-size: 0.9em; color: #6c757d; display: block; margin-top: 5px; }}
        .analysis {{ font-size: 1.2em; color: #28a745; margin-top: 15px; text-align: center; border: 1px solid #e9ecef; padding: 10px; border-radius: 5px; background-color: #eafbea; }}
        ul {{ list-style-type: none; padding: 0; }}
        li {{ margin-bottom: 8px; padding: 10px; border: 1px solid #e9ecef; background-color: #f8f9fa; border-radius: 4px; display: flex; justify-content: space-between; align-items: center; }}
        li span.temp {{ font-weight: bold; color: #007bff; }}
        .health-link {{ margin-top: 25px; display: block; text-align: center; color: #007bff; text-decoration: none; }}
        .health-link:hover {{ text-decoration: underline; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Simple Weather Dashboard</h1>

        <div class="current-temp-section">
            <h2>Current Temperature:</h2>
            <p class="current-temp">{current_temperature}°C</p>
            <p class="timestamp">As of: {current_time} (UTC)</p>
        </div>

        <div class="analysis">
            <h2>Analysis:</h2>
            <p>Average of last {average_count} recorded temperatures: {average}°C</p>
        </div>

        <div>
            <h2>Recent Readings:</h2>
            <ul>
{readings_list}            </ul>
        </div>

        <a class="health-link" href="/health">Check Application Health</a>
    </div>
</body>
</html>
"#,
            current_temperature = self.current_temperature,
            current_time = self.current_time,
            average_count = self.average_count,
            average = self.average,
            readings_list = readings_list,
        )
    }
}

pub fn render_health_ok() -> String {
    "<h1>Application Status: Healthy</h1><p>Database: OK</p>".to_string()
}

/// The raw error text ends up in the response body on purpose, as a
/// debugging convenience for an app with no other observability surface.
pub fn render_health_error(message: &str) -> String {
    format!("<h1>Application Status: Unhealthy</h1><p>Database: Inactive ({})</p>", message)
}
