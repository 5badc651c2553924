//! Render search results as text for the model

use super::provider::SearchResultItem;

/// Text returned when the provider finds nothing
pub const NO_RESULTS: &str = "No search results found.";

/// Separator between result blocks
pub const RESULT_SEPARATOR: &str = "\n\n---\n\n";

/// Heading line naming the query
pub fn heading(query: &str) -> String {
    format!("Web search results for \"{query}\":")
}

/// Numbered blocks in provider order, or [`NO_RESULTS`]
///
/// ```text
/// [1] Title
/// Source: media
/// Published: 2024-01-01
/// URL: https://...
/// Content: ...
/// ```
///
/// `Source:` and `Published:` appear only when the provider supplied them.
pub fn format_results(results: &[SearchResultItem]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, item)| format_item(i + 1, item))
        .collect::<Vec<_>>()
        .join(RESULT_SEPARATOR)
}

fn format_item(index: usize, item: &SearchResultItem) -> String {
    let mut lines = vec![format!("[{index}] {}", item.title)];

    if let Some(media) = &item.media {
        lines.push(format!("Source: {media}"));
    }
    if let Some(date) = &item.publish_date {
        lines.push(format!("Published: {date}"));
    }
    lines.push(format!("URL: {}", item.link));
    lines.push(format!("Content: {}", item.content));

    lines.join("\n")
}
