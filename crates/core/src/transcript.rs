//! Caption data model and timestamped rendering.
//! The rendered form is the text block the chunker and prompts operate on.

use serde::{Deserialize, Serialize};

/// One timestamped caption line from a video's subtitle track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds, never before `start`.
    pub end: f64,
    /// Spoken-word text for this span.
    pub text: String,
}

/// Format a seconds offset as `HH:MM:SS`, truncating sub-second precision.
/// Hours grow past two digits for very long videos instead of wrapping.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Render caption entries into a single text block, one line per entry,
/// each prefixed with its `[start - end]` bracket. Entries are rendered
/// in input order; an empty slice renders to the empty string.
pub fn render_transcript(entries: &[CaptionEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "[{} - {}] {}",
                format_timestamp(entry.start),
                format_timestamp(entry.end),
                entry.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_offsets() {
        assert_eq!(format_timestamp(0.0), "00:00:00");
        assert_eq!(format_timestamp(3661.0), "01:01:01");
        assert_eq!(format_timestamp(7325.0), "02:02:05");
    }

    /// Sub-second precision is truncated, never rounded up.
    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_timestamp(59.999), "00:00:59");
        assert_eq!(format_timestamp(0.4), "00:00:00");
    }

    /// Videos past 100 hours keep all hour digits instead of wrapping.
    #[test]
    fn hours_are_not_capped_at_two_digits() {
        assert_eq!(format_timestamp(360_061.0), "100:01:01");
    }

    /// Formatting then parsing back reconstructs the whole-second offset.
    #[test]
    fn parse_back_reconstructs_seconds() {
        for s in [0u64, 1, 59, 60, 3599, 3600, 86_399, 360_061] {
            let formatted = format_timestamp(s as f64);
            let parts: Vec<u64> = formatted.split(':').map(|p| p.parse().unwrap()).collect();
            assert_eq!(parts.len(), 3);
            assert_eq!((parts[0] * 60 + parts[1]) * 60 + parts[2], s);
        }
    }

    #[test]
    fn renders_entries_in_order() {
        let entries = vec![
            CaptionEntry {
                start: 0.0,
                end: 2.0,
                text: "Hello".to_string(),
            },
            CaptionEntry {
                start: 2.0,
                end: 5.0,
                text: "world".to_string(),
            },
            CaptionEntry {
                start: 5.0,
                end: 9.0,
                text: "test".to_string(),
            },
        ];
        let rendered = render_transcript(&entries);
        assert_eq!(
            rendered,
            "[00:00:00 - 00:00:02] Hello\n[00:00:02 - 00:00:05] world\n[00:00:05 - 00:00:09] test"
        );
    }

    #[test]
    fn renders_empty_input_to_empty_string() {
        assert_eq!(render_transcript(&[]), "");
    }
}
