//! HTTP handlers for API endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Json},
};
use serde_json::json;

use crate::telemetry::cache::TieredCache;
use crate::telemetry::data::Snapshot;

/// Shared state handed to every request.
pub struct AppState {
    /// The tiered cache in front of the telemetry sources
    pub cache: TieredCache,
}

/// Get the merged telemetry snapshot as JSON.
///
/// Always `200 OK`: stale tiers are refreshed on the way through and
/// failed sources arrive as degraded records inside the body.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.cache.snapshot().await)
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "rigwatch",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Serve the embedded dashboard HTML page.
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// The dashboard page, embedded so the binary serves a full UI with no
/// static files on disk.
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>rigwatch - Hardware Monitor</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        :root {
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --accent: #58a6ff;
            --success: #3fb950;
            --warning: #d29922;
            --danger: #f85149;
            --text-main: #e6edf3;
            --text-dim: #8b949e;
        }

        body {
            font-family: 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            background: var(--bg);
            color: var(--text-main);
            min-height: 100vh;
            padding: 20px;
        }

        .container {
            max-width: 1100px;
            margin: 0 auto;
        }

        .header {
            display: flex;
            flex-wrap: wrap;
            justify-content: space-between;
            align-items: baseline;
            margin-bottom: 24px;
            gap: 12px;
        }

        .header h1 {
            font-size: 1.8rem;
        }

        .header .sub {
            color: var(--text-dim);
            font-size: 0.9rem;
        }

        .clock-box {
            display: flex;
            align-items: center;
            gap: 10px;
            font-variant-numeric: tabular-nums;
        }

        .pulse {
            width: 10px;
            height: 10px;
            border-radius: 50%;
            background: var(--success);
            animation: pulse 2s ease infinite;
        }

        .pulse.offline {
            background: var(--danger);
            animation: none;
        }

        @keyframes pulse {
            0% { opacity: 1; }
            50% { opacity: 0.3; }
            100% { opacity: 1; }
        }

        #status-text {
            color: var(--text-dim);
            font-size: 0.85rem;
            text-transform: uppercase;
            letter-spacing: 0.08em;
        }

        #live-clock {
            color: var(--accent);
            font-size: 0.95rem;
        }

        .dashboard {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
            gap: 16px;
        }

        .card {
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 10px;
            padding: 18px 20px;
        }

        .card.wide {
            grid-column: 1 / -1;
        }

        .card h3 {
            color: var(--accent);
            font-size: 0.85rem;
            text-transform: uppercase;
            letter-spacing: 0.1em;
            margin-bottom: 14px;
        }

        .metric {
            display: flex;
            justify-content: space-between;
            align-items: center;
            padding: 7px 0;
            border-bottom: 1px solid var(--border);
        }

        .metric:last-child {
            border-bottom: none;
        }

        .metric-label {
            color: var(--text-dim);
            font-size: 0.9rem;
        }

        .metric-value {
            font-weight: 600;
            font-variant-numeric: tabular-nums;
        }

        .badge {
            font-size: 0.7rem;
            font-weight: 700;
            text-transform: uppercase;
            padding: 2px 8px;
            border-radius: 10px;
            background: var(--border);
            color: var(--text-dim);
            margin-left: 8px;
        }

        .badge.ok { background: rgba(63, 185, 80, 0.15); color: var(--success); }
        .badge.warm { background: rgba(210, 153, 34, 0.15); color: var(--warning); }
        .badge.hot { background: rgba(248, 81, 73, 0.15); color: var(--danger); }

        table {
            width: 100%;
            border-collapse: collapse;
            font-size: 0.9rem;
        }

        th {
            text-align: left;
            color: var(--text-dim);
            font-size: 0.75rem;
            text-transform: uppercase;
            letter-spacing: 0.08em;
            padding: 6px 10px;
            border-bottom: 1px solid var(--border);
        }

        td {
            padding: 8px 10px;
            border-bottom: 1px solid var(--border);
        }

        tr:last-child td {
            border-bottom: none;
        }

        .idle {
            color: var(--text-dim);
            font-style: italic;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div>
                <h1>📡 rigwatch</h1>
                <div class="sub">Hardware and AI workload telemetry</div>
            </div>
            <div class="clock-box">
                <span class="pulse" id="pulse"></span>
                <span id="status-text">Connecting</span>
                <span id="live-clock">--</span>
            </div>
        </div>

        <div class="dashboard">
            <div class="card">
                <h3>GPU</h3>
                <div class="metric">
                    <span class="metric-label">Utilization</span>
                    <span class="metric-value" id="gpu-util">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">Temperature</span>
                    <span class="metric-value" id="gpu-temp">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">Memory</span>
                    <span class="metric-value" id="gpu-mem">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">Power</span>
                    <span class="metric-value" id="gpu-power">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">Fan</span>
                    <span class="metric-value" id="gpu-fan">--</span>
                </div>
            </div>

            <div class="card">
                <h3>System</h3>
                <div class="metric">
                    <span class="metric-label">Load (1 min)</span>
                    <span class="metric-value" id="sys-load">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">Memory</span>
                    <span class="metric-value" id="sys-mem">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">Disk used</span>
                    <span class="metric-value" id="disk-used">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">Disk capacity</span>
                    <span class="metric-value" id="disk-percent">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">Disk free</span>
                    <span class="metric-value" id="disk-avail">--</span>
                </div>
            </div>

            <div class="card">
                <h3>Thermals</h3>
                <div class="metric">
                    <span class="metric-label">CPU</span>
                    <span class="metric-value"><span id="cpu-temp">--</span><span class="badge" id="cpuTemp-badge">--</span></span>
                </div>
                <div class="metric">
                    <span class="metric-label">SSD</span>
                    <span class="metric-value" id="ssd-temp">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">VRM</span>
                    <span class="metric-value" id="vrm-temp">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">Pump</span>
                    <span class="metric-value" id="pump-speed">--</span>
                </div>
                <div class="metric">
                    <span class="metric-label">Case fan</span>
                    <span class="metric-value"><span id="sys-fan-1">--</span><span class="badge" id="fan-badge">--</span></span>
                </div>
            </div>

            <div class="card wide">
                <h3>Loaded Models</h3>
                <table>
                    <thead>
                        <tr><th>Name</th><th>Size</th><th>Processor</th><th>Until</th></tr>
                    </thead>
                    <tbody id="ollama-body">
                        <tr><td colspan="4" class="idle">Waiting for telemetry</td></tr>
                    </tbody>
                </table>
            </div>
        </div>
    </div>

    <script>
        const REFRESH_MS = 1000;

        function setText(id, value) {
            document.getElementById(id).textContent = value;
        }

        function setBadge(id, label, cls) {
            const badge = document.getElementById(id);
            badge.textContent = label;
            badge.className = 'badge ' + cls;
        }

        function tempBadge(text) {
            const value = parseFloat(text);
            if (isNaN(value)) return ['N/A', ''];
            if (value < 60) return ['Cool', 'ok'];
            if (value < 78) return ['Warm', 'warm'];
            return ['Hot', 'hot'];
        }

        function updateGpu(nvidia) {
            if (nvidia.error) {
                ['gpu-util', 'gpu-temp', 'gpu-mem', 'gpu-power', 'gpu-fan']
                    .forEach(id => setText(id, 'ERR'));
                return false;
            }
            setText('gpu-util', nvidia.util);
            setText('gpu-temp', nvidia.temp);
            setText('gpu-mem', nvidia.mem);
            setText('gpu-power', nvidia.power);
            setText('gpu-fan', nvidia.fan);
            return true;
        }

        function updateSystem(sys, disk) {
            if (!sys.error) {
                setText('sys-load', sys.load);
                setText('sys-mem', sys.mem_used + ' / ' + sys.mem_total);
            }
            setText('disk-used', disk.used + ' / ' + disk.size);
            setText('disk-percent', disk.percent);
            setText('disk-avail', disk.avail);
        }

        function updateThermals(temps) {
            if (temps.error) return;
            setText('cpu-temp', temps.cpu_temp);
            setText('ssd-temp', temps.ssd_temp);
            setText('vrm-temp', temps.vrm_temp);
            setText('pump-speed', temps.pump_speed);
            setText('sys-fan-1', temps.sys_fan_1);

            const [label, cls] = tempBadge(temps.cpu_temp);
            setBadge('cpuTemp-badge', label, cls);

            const rpm = parseInt(temps.sys_fan_1, 10);
            setBadge('fan-badge', rpm > 0 ? 'Active' : 'Idle', rpm > 0 ? 'ok' : '');
        }

        function updateModels(models) {
            const body = document.getElementById('ollama-body');
            if (!models.length) {
                body.innerHTML = '<tr><td colspan="4" class="idle">No models loaded</td></tr>';
                return;
            }
            body.innerHTML = models.map(model =>
                '<tr><td>' + model.name + '</td><td>' + model.size + '</td><td>' +
                model.processor + '</td><td>' + model.until + '</td></tr>'
            ).join('');
        }

        async function refresh() {
            try {
                const response = await fetch('/api/stats');
                const data = await response.json();

                setText('live-clock', data.server_time);
                const gpuOnline = updateGpu(data.nvidia);
                updateSystem(data.sys, data.disk);
                updateThermals(data.temps);
                updateModels(data.ollama);

                document.getElementById('pulse').className = 'pulse';
                setText('status-text', gpuOnline ? 'Telemetry synced' : 'GPU offline');
            } catch (err) {
                document.getElementById('pulse').className = 'pulse offline';
                setText('status-text', 'Link down');
            }
        }

        refresh();
        setInterval(refresh, REFRESH_MS);
    </script>
</body>
</html>"#;
