//! Service Configuration
//!
//! Env-var driven settings with production defaults. Built once in `main`
//! and handed to the composition root; nothing reads the environment after
//! startup.

use std::path::PathBuf;

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Upstream feed
    pub feed_url: String,
    pub feed_timeout_secs: u64,
    pub cache_ttl_secs: i64,
    pub fetch_attempts: u32,
    pub retry_delay_secs: u64,

    // Worker cadence
    pub alert_interval_secs: u64,
    pub collect_interval_secs: u64,

    // Evaluation
    pub warning_window_hours: i64,
    pub region_radius_km: f64,

    // Alerting
    pub cooldown_secs: i64,
    pub big_quake_gate_secs: i64,

    // Training data collection
    pub retrain_threshold: usize,
    pub history_cap: usize,

    // Notification channels
    pub notify_timeout_secs: u64,
    pub whatsapp_service_url: String,
    pub sms_api_url: String,
    pub sms_auth_token: String,
    pub sms_from_number: String,

    // Persistence
    pub subscriber_file: PathBuf,
    pub artifact_dir: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: env_string(
                "QUAKEWATCH_FEED_URL",
                "https://api.orhanaydogdu.com.tr/deprem/kandilli/live",
            ),
            feed_timeout_secs: env_parse("QUAKEWATCH_FEED_TIMEOUT_SECS", 60),
            cache_ttl_secs: env_parse("QUAKEWATCH_CACHE_TTL_SECS", 300),
            fetch_attempts: env_parse("QUAKEWATCH_FETCH_ATTEMPTS", 2),
            retry_delay_secs: env_parse("QUAKEWATCH_RETRY_DELAY_SECS", 2),

            alert_interval_secs: env_parse("QUAKEWATCH_ALERT_INTERVAL_SECS", 30),
            collect_interval_secs: env_parse("QUAKEWATCH_COLLECT_INTERVAL_SECS", 1800),

            warning_window_hours: env_parse("QUAKEWATCH_WARNING_WINDOW_HOURS", 168),
            region_radius_km: env_parse("QUAKEWATCH_REGION_RADIUS_KM", 200.0),

            cooldown_secs: env_parse("QUAKEWATCH_COOLDOWN_SECS", 3600),
            big_quake_gate_secs: env_parse("QUAKEWATCH_BIG_QUAKE_GATE_SECS", 1800),

            retrain_threshold: env_parse("QUAKEWATCH_RETRAIN_THRESHOLD", 100),
            history_cap: env_parse("QUAKEWATCH_HISTORY_CAP", 10_000),

            notify_timeout_secs: env_parse("QUAKEWATCH_NOTIFY_TIMEOUT_SECS", 10),
            whatsapp_service_url: env_string("QUAKEWATCH_WHATSAPP_URL", "http://localhost:3001"),
            sms_api_url: env_string("QUAKEWATCH_SMS_API_URL", ""),
            sms_auth_token: env_string("QUAKEWATCH_SMS_TOKEN", ""),
            sms_from_number: env_string("QUAKEWATCH_SMS_FROM", ""),

            subscriber_file: PathBuf::from(env_string(
                "QUAKEWATCH_SUBSCRIBER_FILE",
                "user_alerts.json",
            )),
            artifact_dir: std::env::var("QUAKEWATCH_ARTIFACT_DIR").ok().map(PathBuf::from),
            history_file: std::env::var("QUAKEWATCH_HISTORY_FILE").ok().map(PathBuf::from),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
