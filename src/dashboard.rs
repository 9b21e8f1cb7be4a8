//! Live activity dashboard.
//!
//! One view, rebuilt from the log on every request: read, normalize,
//! filter, render the most recent window. Staleness is bounded only by the
//! client-side page refresh.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use tracing::{info, warn};

use crate::error::Result;
use crate::event::{Event, EventKind};
use crate::filter::NoiseFilter;
use crate::journal;

/// Presentation attributes derived from one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub timestamp: String,
    pub kind: EventKind,
    pub icon: &'static str,
    pub type_class: &'static str,
    pub type_chip: &'static str,
    pub vendor: String,
    pub mac: String,
    pub client_ip: String,
    pub info: String,
    pub category: String,
    pub category_slug: String,
}

impl Row {
    fn from_event(event: &Event) -> Self {
        let (icon, type_class, type_chip) = match event.kind {
            EventKind::Dns => ("\u{1f310}", "event-dns", "chip-dns"),
            EventKind::Dhcp => ("\u{1f4e1}", "event-dhcp", "chip-dhcp"),
        };

        Self {
            timestamp: event.timestamp.clone(),
            kind: event.kind,
            icon,
            type_class,
            type_chip,
            vendor: event.vendor.clone(),
            mac: event.mac.clone(),
            client_ip: event.client_ip.clone(),
            info: event.info.clone(),
            category: event.category.clone(),
            category_slug: category_slug(&event.category),
        }
    }
}

/// Slugify a category for use in CSS class names: lowercase, with spaces,
/// slashes and dots replaced by dashes.
pub fn category_slug(category: &str) -> String {
    category
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '.' => '-',
            other => other,
        })
        .collect()
}

/// Derive presentation rows for the most recent `window` events,
/// preserving chronological order.
pub fn build_rows(events: &[Event], window: usize) -> Vec<Row> {
    let start = events.len().saturating_sub(window);
    events[start..].iter().map(Row::from_event).collect()
}

/// Everything the request handler needs, shared across requests.
#[derive(Clone)]
pub struct DashboardState {
    pub log_path: PathBuf,
    pub filter: Arc<NoiseFilter>,
    pub window_size: usize,
    pub refresh_secs: u64,
}

/// Build the dashboard router.
pub fn router(state: DashboardState) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

/// Serve the dashboard until externally terminated.
pub async fn serve(state: DashboardState, listen: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!("Dashboard listening on http://{listen}/");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index(State(state): State<DashboardState>) -> Html<String> {
    let events = match journal::read_events(&state.log_path) {
        Ok(events) => events,
        Err(err) => {
            warn!("Failed to read activity log: {err}");
            Vec::new()
        }
    };

    let filtered = state.filter.apply(events);
    let rows = build_rows(&filtered, state.window_size);
    Html(render(&rows, state.refresh_secs))
}

/// Render the full page for the given rows.
pub fn render(rows: &[Row], refresh_secs: u64) -> String {
    let mut body = String::with_capacity(4096 + rows.len() * 512);

    body.push_str("<!doctype html>\n<html>\n<head>\n");
    body.push_str("    <title>Wi-Fi Honeypot Activity</title>\n");
    body.push_str(&format!(
        "    <meta http-equiv=\"refresh\" content=\"{refresh_secs}\">\n"
    ));
    body.push_str("    <style>\n");
    body.push_str(STYLESHEET);
    body.push_str("    </style>\n</head>\n\n<body>\n\n");

    body.push_str("<h1>Wi-Fi Honeypot Activity</h1>\n");
    body.push_str(
        "<p>\n  This dashboard shows a live view of traffic from devices connected to the \
         fake Wi-Fi.\n  We log both <strong>DNS</strong> requests (services a device is \
         trying to reach)\n  and <strong>DHCP</strong> events (identity information like \
         hostname/vendor class).\n</p>\n",
    );
    body.push_str(&format!(
        "<p class=\"hint\">Page auto-refreshes every {refresh_secs} seconds.</p>\n\n"
    ));

    body.push_str("<table>\n  <thead>\n    <tr>\n");
    for column in [
        "Timestamp",
        "Type",
        "Device (Vendor + MAC)",
        "Client IP",
        "Info",
        "Category",
    ] {
        body.push_str(&format!("      <th>{column}</th>\n"));
    }
    body.push_str("    </tr>\n  </thead>\n\n  <tbody>\n");

    for row in rows {
        render_row(&mut body, row);
    }

    body.push_str("  </tbody>\n</table>\n");

    if rows.is_empty() {
        body.push_str(
            "\n<p class=\"hint\">No events yet. Connect a device and browse a few sites.</p>\n",
        );
    }

    body.push_str("\n</body>\n</html>\n");
    body
}

fn render_row(body: &mut String, row: &Row) {
    body.push_str(&format!(
        "  <tr class=\"{} category-{}\">\n",
        row.type_class, row.category_slug
    ));
    body.push_str(&format!(
        "    <td class=\"timestamp-cell\">{}</td>\n",
        escape(&row.timestamp)
    ));
    body.push_str(&format!(
        "    <td><span class=\"type-chip {}\"><span class=\"type-icon\">{}</span> {}</span></td>\n",
        row.type_chip, row.icon, row.kind
    ));
    body.push_str(&format!(
        "    <td><span class=\"tag\">{}</span><br><span class=\"mac\">{}</span></td>\n",
        escape(&row.vendor),
        escape(&row.mac)
    ));
    body.push_str(&format!("    <td>{}</td>\n", escape(&row.client_ip)));
    body.push_str(&format!(
        "    <td class=\"info-cell\">{}</td>\n",
        escape(&row.info)
    ));
    body.push_str(&format!(
        "    <td><span class=\"category-pill\"><span class=\"category-dot\"></span> {}</span></td>\n",
        escape(&row.category)
    ));
    body.push_str("  </tr>\n");
}

/// Minimal HTML escaping for untrusted log fields.
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const STYLESHEET: &str = r#"
        html, body {
            margin: 0;
            padding: 0;
        }

        body {
            font-family: system-ui, -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
            background: radial-gradient(circle at top left, #1d2240, #020617 55%);
            color: #e5e7eb;
            padding: 24px;
        }

        h1 {
            color: #fbbf24;
            margin-bottom: 0.25rem;
            letter-spacing: 0.05em;
        }

        p {
            color: #cbd5f5;
            max-width: 900px;
            line-height: 1.5;
        }

        .hint {
            font-size: 0.8rem;
            color: #9ca3af;
            margin-top: 8px;
        }

        table {
            width: 100%;
            border-collapse: collapse;
            margin-top: 20px;
            background: rgba(15, 23, 42, 0.9);
            border-radius: 12px;
            overflow: hidden;
            box-shadow: 0 18px 45px rgba(0, 0, 0, 0.55);
        }

        thead {
            background: linear-gradient(to right, #020617, #0b1120);
        }

        th, td {
            padding: 10px 12px;
            border-bottom: 1px solid #1e293b;
            font-size: 0.9rem;
        }

        th {
            text-align: left;
            color: #9ca3af;
            font-weight: 600;
            text-transform: uppercase;
            letter-spacing: 0.06em;
            font-size: 0.75rem;
        }

        tbody tr:nth-child(even) {
            background: rgba(15, 23, 42, 0.85);
        }
        tbody tr:nth-child(odd) {
            background: rgba(12, 20, 38, 0.9);
        }
        tbody tr:hover {
            background: #111827;
            transition: background 120ms ease-out;
        }

        .event-dns td {
            border-left: 3px solid rgba(56, 189, 248, 0.5);
        }
        .event-dhcp td {
            border-left: 3px solid rgba(250, 204, 21, 0.8);
        }

        .tag {
            display: inline-block;
            padding: 2px 8px;
            border-radius: 999px;
            background: rgba(30, 64, 175, 0.2);
            border: 1px solid rgba(129, 140, 248, 0.5);
            font-size: 0.75rem;
            color: #c7d2fe;
            margin-bottom: 2px;
        }

        .mac {
            font-size: 0.8rem;
            color: #9ca3af;
        }

        .type-chip {
            display: inline-flex;
            align-items: center;
            gap: 6px;
            font-size: 0.78rem;
            padding: 3px 9px;
            border-radius: 999px;
            font-weight: 500;
        }
        .type-icon { font-size: 0.9rem; }

        .chip-dns {
            background: rgba(56, 189, 248, 0.15);
            color: #e0f2fe;
            border: 1px solid rgba(56, 189, 248, 0.7);
        }
        .chip-dhcp {
            background: rgba(250, 204, 21, 0.16);
            color: #fef9c3;
            border: 1px solid rgba(250, 204, 21, 0.8);
        }

        .category-pill {
            display: inline-flex;
            align-items: center;
            gap: 6px;
            padding: 2px 10px;
            border-radius: 999px;
            font-size: 0.78rem;
            background: rgba(148, 163, 184, 0.15);
            color: #e5e7eb;
        }
        .category-dot {
            width: 8px;
            height: 8px;
            border-radius: 999px;
        }

        .category-apple       .category-dot { background: #f97316; }
        .category-google      .category-dot { background: #22c55e; }
        .category-dns-service .category-dot { background: #38bdf8; }
        .category-dhcp        .category-dot { background: #eab308; }
        .category-unknown     .category-dot { background: #a855f7; }

        .info-cell {
            font-family: ui-monospace, Menlo, Monaco, Consolas, monospace;
            font-size: 0.82rem;
        }

        .timestamp-cell {
            font-size: 0.82rem;
            white-space: nowrap;
        }
"#;
