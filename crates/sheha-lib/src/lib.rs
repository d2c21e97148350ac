pub mod config;
pub mod corpus;
pub mod embedding;
pub mod index;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod runtime;
pub mod session;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;
