use tracing::{debug, warn};

use super::refine::refine;
use super::retrieve::retrieve;
use crate::config::{FALLBACK_RESPONSE, REFINED_LABEL};
use crate::corpus::KnowledgeBase;
use crate::embedding::Embed;
use crate::llm::Generate;
use crate::session::{Message, Session};

/// Answers user turns from a loaded knowledge base.
///
/// The knowledge base is borrowed read-only; the embedder and generator are
/// owned (or borrowed through the `&mut E` / `&G` blanket impls).
pub struct Chatbot<'kb, E, G> {
    knowledge: &'kb KnowledgeBase,
    embedder: E,
    generator: G,
}

impl<'kb, E: Embed, G: Generate> Chatbot<'kb, E, G> {
    pub fn new(knowledge: &'kb KnowledgeBase, embedder: E, generator: G) -> Self {
        Self {
            knowledge,
            embedder,
            generator,
        }
    }

    /// Run one turn: append the user message, then exactly one assistant message.
    ///
    /// Never fails. A retrieval miss yields [`FALLBACK_RESPONSE`]; any error in
    /// the turn yields `"An error occurred: {error}"`.
    pub fn handle_turn<'s>(&mut self, session: &'s mut Session, user_input: &str) -> &'s Message {
        session.push(Message::user(user_input));

        let reply = match self.respond(user_input) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Turn failed");
                format!("An error occurred: {e:#}")
            }
        };

        debug!(turn = session.turns(), reply_len = reply.len(), "Turn complete");
        session.push(Message::assistant(reply))
    }

    fn respond(&mut self, query: &str) -> anyhow::Result<String> {
        match retrieve(&mut self.embedder, query, self.knowledge)? {
            Some(answer) if !answer.is_empty() => {
                let refined = refine(&self.generator, query, answer);
                Ok(format!("{REFINED_LABEL}:\n{refined}"))
            }
            _ => {
                debug!("No answer retrieved, using fallback");
                Ok(FALLBACK_RESPONSE.to_string())
            }
        }
    }
}
