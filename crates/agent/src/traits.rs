//! Reply engine abstraction
//!
//! Both voice-path engines keep per-conversation state and may pick among
//! equally valid replies at random, so they take `&mut self` and an
//! injected random source.

use rand::RngCore;
use yoga_agent_text_processing::MessageAnalysis;

pub trait Responder: Send {
    /// Produce the reply text for one user message
    fn respond(
        &mut self,
        message: &str,
        analysis: &MessageAnalysis,
        rng: &mut dyn RngCore,
    ) -> String;

    /// Short engine name for logs and metrics
    fn name(&self) -> &'static str;
}
