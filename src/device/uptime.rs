use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeconds {
    Whole(u64),
    Signed(i64),
    Fractional(f64),
}

/// Firmware reports uptime either as an integer or as a cycle-count division.
pub(super) fn deserialize_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawSeconds::deserialize(deserializer)? {
        RawSeconds::Whole(secs) => secs,
        RawSeconds::Signed(secs) => secs.max(0) as u64,
        RawSeconds::Fractional(secs) if secs.is_finite() && secs > 0.0 => secs as u64,
        RawSeconds::Fractional(_) => 0,
    })
}

pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
