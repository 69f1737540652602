//! Prompt assembly for the generation backend.

use finsolve_vector_store::SearchHit;

/// Join chunk texts with a blank line between them.
pub fn build_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| hit.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the answer prompt for `query` asked by someone in `role`.
pub fn make_prompt(query: &str, role: &str, context: &str) -> String {
    format!(
        "You are an AI assistant at FinSolve Technologies. The user has the role: {role}. \
         Use the context below to answer their question in a friendly, clear, conversational \
         style, like you're explaining it to a colleague. Summarize naturally, avoid just \
         bullet points.\n\nContext:\n{context}\n\nQuestion: {query}\n\nAnswer:"
    )
}
