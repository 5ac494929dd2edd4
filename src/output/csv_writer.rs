//! CSV participant table writer.

use std::fs::File;
use std::io::Write;

use crate::analysis::{DeepStats, ParticipantStat};
use crate::error::ChatstatsError;

/// Column names, in order.
pub const CSV_HEADER: [&str; 11] = [
    "Participant",
    "Messages",
    "Words",
    "Media",
    "Edited",
    "Emojis",
    "LongestStreak",
    "TopEmojis",
    "LeastEmojis",
    "MostSaidWord",
    "YapLevel",
];

/// Writes the participant table to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - One row per participant, ordered by message count descending
/// - Emoji lists are space-separated within their cell
/// - Encoding: UTF-8
pub fn write_csv(stats: &DeepStats, output_path: &str) -> Result<(), ChatstatsError> {
    let file = File::create(output_path)?;
    write_participants(stats, file)
}

/// Converts the participant table to a CSV string.
pub fn to_csv(stats: &DeepStats) -> Result<String, ChatstatsError> {
    let mut buffer = Vec::new();
    write_participants(stats, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Writes the participant table to any writer.
pub fn write_participants<W: Write>(stats: &DeepStats, out: W) -> Result<(), ChatstatsError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for (name, stat) in stats.participants_by_activity() {
        writer.write_record(build_record(name, stat))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV record for a single participant.
fn build_record(name: &str, stat: &ParticipantStat) -> Vec<String> {
    vec![
        name.to_string(),
        stat.msg_count.to_string(),
        stat.words.to_string(),
        stat.media.to_string(),
        stat.edited.to_string(),
        stat.emojis.to_string(),
        stat.longest_streak.to_string(),
        stat.top_emojis.join(" "),
        stat.least_emojis.join(" "),
        stat.most_said_word
            .as_ref()
            .map(|w| w.word.clone())
            .unwrap_or_default(),
        stat.yap_level.to_string(),
    ]
}
