// Program matching: bag-of-words similarity and catalog search.
// No LLM calls; the agent decides when to search and phrases the results.

pub mod handlers;
pub mod search;
pub mod similarity;
