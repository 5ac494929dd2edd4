//! JSON report writer.

use std::fs::File;
use std::io::Write;

use crate::analysis::DeepStats;
use crate::error::ChatstatsError;

/// Writes the report to a JSON file.
///
/// # Format
/// ```json
/// {
///   "totalMessages": 3,
///   "maxDaysStreak": 1,
///   "participants": { "Alice": { "msgCount": 2, ... } },
///   ...
/// }
/// ```
pub fn write_json(stats: &DeepStats, output_path: &str) -> Result<(), ChatstatsError> {
    let json = to_json(stats)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the report to a pretty-printed JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(stats: &DeepStats) -> Result<String, ChatstatsError> {
    Ok(serde_json::to_string_pretty(stats)?)
}
