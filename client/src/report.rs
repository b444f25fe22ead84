//! Text reports printed before and after a search.

use narcissus_common::base_codec;
use narcissus_common::{Result, SearchRequest, SearchResults, SearchTarget};

const VALUES_PER_LINE: usize = 5;

/// Render values five to a line as `<digits>(=<decimal>)`.
///
/// # Errors
/// Returns an error if the base is invalid.
pub fn format_values(values: &[i64], base: u32) -> Result<String> {
    let mut lines = Vec::new();
    for row in values.chunks(VALUES_PER_LINE) {
        let entries = row
            .iter()
            .map(|value| Ok(format!("{}(={value})", base_codec::format(*value, base)?)))
            .collect::<Result<Vec<String>>>()?;
        lines.push(format!("    {}", entries.join(", ")));
    }
    Ok(lines.join("\n"))
}

/// Describe what is about to be searched.
///
/// # Errors
/// Returns an error if the base is invalid.
pub fn preamble(request: &SearchRequest) -> Result<String> {
    let mut lines = Vec::new();
    if let SearchTarget::Range { max, chunk_size } = &request.target {
        lines.push(format!("Finding Narcissistic numbers up to: {max}"));
        lines.push(format!("Maximum Numbers per chunk: {chunk_size}"));
    }
    lines.push(format!("Base : {}", request.base));
    if let SearchTarget::List { values } = &request.target {
        lines.push("Checking if the following numbers are Narcissistic:".to_string());
        lines.push(format_values(values, request.base.get())?);
    }
    Ok(lines.join("\n"))
}

/// Summarize the narcissistic numbers found.
///
/// # Errors
/// Returns an error if the base is invalid.
pub fn findings(results: &SearchResults) -> Result<String> {
    let count = results.numbers.len();
    let noun = if count == 1 { "number" } else { "numbers" };
    let mut out = match &results.target {
        SearchTarget::Range { max, .. } => {
            format!("There are {count} Narcissistic {noun} less than {max}.")
        }
        SearchTarget::List { .. } => {
            format!("There are {count} Narcissistic {noun} in the requested list.")
        }
    };
    if !results.numbers.is_empty() {
        out.push('\n');
        out.push_str(&format_values(&results.numbers, results.base.get())?);
    }
    if results.aborted_chunks > 0 {
        out.push_str(&format!(
            "\nWarning: {} of {} chunks stopped early.",
            results.aborted_chunks, results.chunks
        ));
    }
    Ok(out)
}
