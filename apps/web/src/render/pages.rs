use crate::dashboard::aggregation::DashboardView;
use crate::inference::{Label, Verdict};
use crate::models::prediction::{LabelCounts, PredictionRow};
use crate::models::retrain::RetrainLogRow;
use crate::render::{escape, layout, script_json};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn predict_form(description: &str) -> String {
    format!(
        r#"<form method="post" action="/predict">
<label for="job_description">Job description</label>
<textarea id="job_description" name="job_description" required>{}</textarea>
<button type="submit">Check posting</button>
</form>"#,
        escape(description)
    )
}

fn counts_block(counts: LabelCounts) -> String {
    format!(
        r#"<p class="stats"><span class="fake">Fake jobs detected: {}</span><span class="real">Real jobs detected: {}</span></p>"#,
        counts.fake, counts.real
    )
}

fn label_class(label: &str) -> &'static str {
    if label == Label::Fake.as_str() {
        "fake"
    } else {
        "real"
    }
}

/// Public landing page.
pub fn home_page() -> String {
    let body = format!(
        r#"<h1>Fake job posting detector</h1>
<p>Paste a job description to check whether it looks like a fraudulent posting.
Predictions are available to signed-in administrators; <a href="/admin_login">sign in</a> first.</p>
{}"#,
        predict_form("")
    );
    layout("Home", &body)
}

/// The prediction form, optionally with an inline error and the submitted text.
pub fn predict_form_page(error: Option<&str>, description: &str, counts: LabelCounts) -> String {
    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    let body = format!(
        "<h1>Check a job posting</h1>\n{error}\n{}\n{}",
        predict_form(description),
        counts_block(counts)
    );
    layout("Check a job posting", &body)
}

pub fn result_page(verdict: &Verdict, description: &str, counts: LabelCounts) -> String {
    let body = format!(
        r#"<h1>Result</h1>
<p class="{class}"><strong>{label}</strong> with {confidence:.2}% confidence</p>
<h2>Submitted description</h2>
<blockquote>{description}</blockquote>
{counts}
<h2>Check another</h2>
{form}"#,
        class = label_class(verdict.label.as_str()),
        label = verdict.label,
        confidence = verdict.confidence,
        description = escape(description),
        counts = counts_block(counts),
        form = predict_form(""),
    );
    layout("Result", &body)
}

pub fn history_page(records: &[PredictionRow]) -> String {
    let rows: String = records
        .iter()
        .map(|r| {
            format!(
                r#"<tr><td>{}</td><td class="{}">{}</td><td>{:.2}%</td><td>{}</td></tr>
"#,
                escape(&r.job_description),
                label_class(&r.prediction),
                escape(&r.prediction),
                r.confidence,
                r.timestamp.format(TIMESTAMP_FORMAT)
            )
        })
        .collect();

    let body = if records.is_empty() {
        "<h1>Prediction history</h1>\n<p>No predictions yet.</p>".to_string()
    } else {
        format!(
            r#"<h1>Prediction history</h1>
<table>
<thead><tr><th>Job description</th><th>Prediction</th><th>Confidence</th><th>Time (UTC)</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
        )
    };
    layout("History", &body)
}

pub fn login_page(error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<h1>Admin login</h1>
{error}
<form method="post" action="/admin_login">
<p><label>Username <input name="username" autocomplete="username" required></label></p>
<p><label>Password <input name="password" type="password" autocomplete="current-password" required></label></p>
<button type="submit">Log in</button>
</form>"#
    );
    layout("Admin login", &body)
}

const RETRAIN_SCRIPT: &str = r#"
document.getElementById('retrain-form').addEventListener('submit', async (event) => {
  event.preventDefault();
  if (!confirm('Start a (simulated) retraining run?')) return;
  const out = document.getElementById('retrain-result');
  const response = await fetch('/retrain', { method: 'POST', body: new FormData(event.target) });
  const data = await response.json();
  out.textContent = data.success
    ? `Logged ${data.accuracy}% at ${data.timestamp} (${data.training_source}, simulated)`
    : `Retrain failed: ${data.error}`;
});
"#;

pub fn dashboard_page(view: &DashboardView) -> String {
    let last_retrain = match &view.last_retrain {
        Some(log) => format!(
            "<p>Last retrain: {:.2}% accuracy on {} at {} (simulated)</p>",
            log.accuracy,
            escape(&log.training_source),
            log.timestamp.format(TIMESTAMP_FORMAT)
        ),
        None => "<p>No retraining recorded yet.</p>".to_string(),
    };

    let body = format!(
        r#"<h1>Admin dashboard</h1>
<p class="stats"><span>Total predictions: {total}</span><span class="fake">Fake: {fake}</span><span class="real">Real: {real}</span></p>
<canvas id="daily-chart" height="120"></canvas>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
<script>
const dates = {dates};
const counts = {counts};
if (dates.length > 0) {{
  new Chart(document.getElementById('daily-chart'), {{
    type: 'line',
    data: {{ labels: dates, datasets: [{{ label: 'Predictions per day', data: counts }}] }}
  }});
}}
</script>
<h2>Model</h2>
{last_retrain}
<form id="retrain-form" enctype="multipart/form-data">
<input type="file" name="dataset">
<button type="submit">Retrain model</button>
</form>
<p id="retrain-result"></p>
<p><a href="/retrain_logs">View all retrain logs</a></p>
<script>{RETRAIN_SCRIPT}</script>"#,
        total = view.counts.total(),
        fake = view.counts.fake,
        real = view.counts.real,
        dates = script_json(&view.series.dates),
        counts = script_json(&view.series.counts),
    );
    layout("Dashboard", &body)
}

pub fn retrain_logs_page(logs: &[RetrainLogRow]) -> String {
    let rows: String = logs
        .iter()
        .map(|log| {
            format!(
                "<tr><td>{}</td><td>{:.2}%</td><td>{}</td><td>{}</td></tr>\n",
                log.id,
                log.accuracy,
                escape(&log.training_source),
                log.timestamp.format(TIMESTAMP_FORMAT)
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Retrain logs</h1>
<p>Retraining is simulated; accuracies below are not measured.</p>
<table>
<thead><tr><th>#</th><th>Accuracy</th><th>Training source</th><th>Time (UTC)</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
    );
    layout("Retrain logs", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::aggregation::DailySeries;
    use chrono::NaiveDate;

    fn ts() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_form_page_keeps_text_and_escapes_it() {
        let page = predict_form_page(
            Some("Please enter ≥5 words."),
            "<b>hi</b>",
            LabelCounts { fake: 3, real: 4 },
        );
        assert!(page.contains(r#"<p class="error">Please enter ≥5 words.</p>"#));
        assert!(page.contains("&lt;b&gt;hi&lt;/b&gt;</textarea>"));
        assert!(page.contains("Fake jobs detected: 3"));
        assert!(page.contains("Real jobs detected: 4"));
    }

    #[test]
    fn test_result_page_shows_label_and_confidence() {
        let verdict = Verdict {
            label: Label::Fake,
            confidence: 97.5,
        };
        let page = result_page(&verdict, "wire money", LabelCounts { fake: 1, real: 0 });
        assert!(page.contains("<strong>Fake Job</strong> with 97.50% confidence"));
        assert!(page.contains("<blockquote>wire money</blockquote>"));
    }

    #[test]
    fn test_history_page_rows_in_given_order() {
        let rows = vec![
            PredictionRow {
                id: 2,
                job_description: "second".to_string(),
                prediction: "Real Job".to_string(),
                confidence: 66.6,
                timestamp: ts(),
            },
            PredictionRow {
                id: 1,
                job_description: "first".to_string(),
                prediction: "Fake Job".to_string(),
                confidence: 88.0,
                timestamp: ts(),
            },
        ];
        let page = history_page(&rows);
        let second = page.find("second").unwrap();
        let first = page.find("first").unwrap();
        assert!(second < first);
        assert!(page.contains("2024-05-02 09:30:00"));
    }

    #[test]
    fn test_history_page_empty() {
        assert!(history_page(&[]).contains("No predictions yet."));
    }

    #[test]
    fn test_dashboard_embeds_series_as_json() {
        let view = DashboardView {
            counts: LabelCounts { fake: 2, real: 1 },
            series: DailySeries {
                dates: vec!["2024-05-01".to_string(), "2024-05-02".to_string()],
                counts: vec![0, 3],
            },
            last_retrain: Some(RetrainLogRow {
                id: 1,
                accuracy: 95.25,
                timestamp: ts(),
                training_source: "jobs.csv".to_string(),
            }),
        };
        let page = dashboard_page(&view);
        assert!(page.contains(r#"const dates = ["2024-05-01","2024-05-02"];"#));
        assert!(page.contains("const counts = [0,3];"));
        assert!(page.contains("Total predictions: 3"));
        assert!(page.contains("95.25% accuracy on jobs.csv"));
    }

    #[test]
    fn test_login_page_error_is_optional() {
        assert!(!login_page(None).contains("class=\"error\""));
        assert!(login_page(Some("Invalid username or password.")).contains("Invalid username or password."));
    }
}
