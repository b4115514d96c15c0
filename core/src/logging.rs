use log::Level;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

/// Emit one structured diagnostic event through the `log` facade.
///
/// Every event carries a fresh id and a UTC unix timestamp so that host-side
/// collectors can correlate entries; `module` doubles as the log target.
pub fn log_event(
    level: Level,
    code: Option<&str>,
    module: &str,
    message: &str,
    explain: Option<&str>,
    data: Option<Value>,
) -> String {
    let id = Uuid::new_v4().to_string();
    let ts = OffsetDateTime::now_utc().unix_timestamp();
    let data_str = data.map(|v| v.to_string()).unwrap_or_default();
    log::log!(
        target: module,
        level,
        "{message} id={id} ts={ts} code={} explain={:?} data={data_str}",
        code.unwrap_or("-"),
        explain.unwrap_or(""),
    );
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_event_gets_a_distinct_id() {
        let a = log_event(Level::Info, Some("AI-0200"), "ai.runtime", "ok", None, None);
        let b = log_event(
            Level::Warn,
            None,
            "ai.runtime",
            "failed",
            Some("explained"),
            Some(serde_json::json!({ "provider": "openai" })),
        );
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
