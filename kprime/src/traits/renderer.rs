use util::question_bank::question_bank::TextFormat;

/// Converts stored rich text to plain text for summaries and reports.
pub trait TextRenderer: Send + Sync {
    fn to_plain_text(&self, text: &str, format: TextFormat) -> String;
}
