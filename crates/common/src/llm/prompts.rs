//! Instructions sent to the research model
//!
//! Each prompt asks for a reply that is directly JSON-parseable into one of
//! four fixed shapes.

pub const SYSTEM_PROMPT: &str =
    "You are a scientific literature assistant. Reply with valid JSON only, \
     without commentary or Markdown.";

/// Extraction object: title, authors, abstract, key_contributions,
/// research_domains, potential_citations
pub fn extraction(text: &str) -> String {
    format!(
        "Extract the following information from this scientific paper text and \
         return it as a single JSON object with exactly these keys:\n\
         - \"title\": string\n\
         - \"authors\": array of strings\n\
         - \"abstract\": string\n\
         - \"key_contributions\": array of strings\n\
         - \"research_domains\": array of strings\n\
         - \"potential_citations\": array of DOI strings\n\n\
         Text:\n{}",
        text
    )
}

/// Search array: `[{title, url, description}]`
pub fn search(query: &str, limit: usize) -> String {
    format!(
        "Find up to {} real, published research papers relevant to the topic \
         \"{}\". Return a JSON array where every element is an object with \
         exactly the keys \"title\", \"url\", and \"description\".",
        limit, query
    )
}

/// Recommendation array: `[{title, rationale, relevance_score}]`
pub fn recommendation(title: &str, content: &str, count: usize) -> String {
    format!(
        "Based on the paper below, recommend {} related research papers a reader \
         should explore next, ordered from most to least relevant. Return a JSON \
         array where every element is an object with exactly the keys \"title\", \
         \"rationale\", and \"relevance_score\" (a number between 0 and 1).\n\n\
         Title: {}\n\nContent:\n{}",
        count, title, content
    )
}

/// Trend object: open-ended, describing emerging domains, momentum, sentiment
pub fn trends(corpus: &str, window_years: u32) -> String {
    format!(
        "The excerpts below come from research papers collected over the last {} \
         year(s). Analyze them and return a JSON object describing the emerging \
         research domains, the research momentum of each domain, and the overall \
         sentiment of the field.\n\nExcerpts:\n{}",
        window_years, corpus
    )
}
