//! Context-driven replies
//!
//! Each message is remembered (bounded) and answered from a per-language
//! rule list, first match wins:
//!
//! 1. greeting phrases, in table order
//! 2. work related (problem variant first)
//! 3. family related
//! 4. problem flag or `stressed`
//! 5. positive flag or `happy`
//! 6. question
//! 7. sharing
//! 8. a random default

use rand::seq::SliceRandom;
use rand::RngCore;
use yoga_agent_core::{ContextFlags, Emotion, Language};
use yoga_agent_text_processing::{keywords::normalize, MessageAnalysis};

use crate::memory::{ConversationMemory, MemoryEntry};
use crate::phrasebook::Localized;
use crate::traits::Responder;

struct ContextualPhrases {
    greetings: &'static [(&'static [&'static str], &'static str)],
    work_problem: &'static str,
    work: &'static str,
    family: &'static str,
    problem: &'static str,
    positive: &'static str,
    question: &'static str,
    sharing: &'static str,
    defaults: &'static [&'static str],
}

const TELUGU: ContextualPhrases = ContextualPhrases {
    greetings: &[
        (
            &["em chestunav", "enti chestunav"],
            "Nuvvu tho matladutunna! Nuvvu ela unnav? Emi interesting jarigindi?",
        ),
        (&["ela unnav"], "Nenu bagunnanu! Nuvvu ela unnav? Day ela undi?"),
    ],
    work_problem: "Office lo problem aa? Emi jarigindi cheppu?",
    work: "Work ela undi? Busy ga unnava?",
    family: "Intlo andaru bagunnara? Emi updates?",
    problem: "Emi problem? Naku cheppu, solution dorukkuntundi",
    positive: "Waah! Chala bagundi! Emi special jarigindi?",
    question: "Hmm, adi interesting question. Nee opinion emi?",
    sharing: "Avunu, inka cheppu. Naku interesting ga undi",
    defaults: &[
        "Hmm, artham aindi. Inka emi?",
        "Avunu, continue cheyyi",
        "Interesting! Inka details cheppu",
        "Okay, inka emi jarigindi?",
    ],
};

const TAMIL: ContextualPhrases = ContextualPhrases {
    greetings: &[(
        &["epdi iruka"],
        "Naan nalla irken! Nee epdi iruka? Enna interesting nadandhuchu?",
    )],
    work_problem: "Office la problem aa? Enna achu sollu?",
    work: "Work epdi pochu? Busy ah iruka?",
    family: "Veetla ellam nalla irukanga? Enna updates?",
    problem: "Enna problem? Enaku sollu, solution kedaikum",
    positive: "Wow! Romba nallairuku! Enna special nadandhuchu?",
    question: "Hmm, adhu interesting question. Unna opinion enna?",
    sharing: "Aama, inka sollu. Enaku interesting ah iruku",
    defaults: &[
        "Hmm, purinjuchu. Inka enna?",
        "Aama, continue pannu",
        "Interesting! Inka details sollu",
        "Okay, inka enna nadandhuchu?",
    ],
};

const HINDI: ContextualPhrases = ContextualPhrases {
    greetings: &[(&["kaise ho"], "Main theek hun! Tum kaise ho? Kya interesting hua?")],
    work_problem: "Office mein problem hai? Kya hua batao?",
    work: "Kaam kaisa chal raha hai? Busy ho?",
    family: "Ghar mein sab theek hai? Kya updates hai?",
    problem: "Kya problem hai? Mujhe batao, solution mil jayega",
    positive: "Wow! Bahut achha! Kya special hua?",
    question: "Hmm, interesting question hai. Tumhara opinion kya hai?",
    sharing: "Haan, aur batao. Mujhe interesting lag raha hai",
    defaults: &[
        "Hmm, samajh gaya. Aur kya?",
        "Haan, continue karo",
        "Interesting! Aur details batao",
        "Okay, aur kya hua?",
    ],
};

const ENGLISH: ContextualPhrases = ContextualPhrases {
    greetings: &[(&["how are you"], "I'm good! How are you? What's been happening?")],
    work_problem: "Work troubles? What's going on?",
    work: "How's work going? Keeping busy?",
    family: "How's the family? Any updates?",
    problem: "What's the problem? Tell me, we can figure it out",
    positive: "That's awesome! What's the good news?",
    question: "Hmm, interesting question. What do you think?",
    sharing: "Yeah, tell me more. Sounds interesting",
    defaults: &[
        "I see, what else?",
        "Right, go on",
        "Interesting! Tell me more",
        "Okay, what happened next?",
    ],
};

const PHRASES: Localized<&ContextualPhrases> = Localized {
    english: &ENGLISH,
    telugu: &TELUGU,
    tamil: &TAMIL,
    hindi: &HINDI,
};

/// Contextual reply engine for one conversation
#[derive(Debug, Clone, Default)]
pub struct ContextualEngine {
    memory: ConversationMemory,
}

impl ContextualEngine {
    pub fn new(memory_size: usize) -> Self {
        Self {
            memory: ConversationMemory::new(memory_size),
        }
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Remember the message and reply to it
    pub fn generate(
        &mut self,
        message: &str,
        context: ContextFlags,
        emotion: Emotion,
        language: Language,
        rng: &mut dyn RngCore,
    ) -> String {
        self.memory.push(MemoryEntry {
            message: message.to_string(),
            context,
            emotion,
        });

        select_reply(&normalize(message), &context, emotion, language, rng).to_string()
    }
}

impl Responder for ContextualEngine {
    fn respond(
        &mut self,
        message: &str,
        analysis: &MessageAnalysis,
        rng: &mut dyn RngCore,
    ) -> String {
        self.generate(
            message,
            analysis.context,
            analysis.emotion.emotion,
            analysis.language,
            rng,
        )
    }

    fn name(&self) -> &'static str {
        "contextual"
    }
}

fn select_reply(
    message: &str,
    context: &ContextFlags,
    emotion: Emotion,
    language: Language,
    rng: &mut dyn RngCore,
) -> &'static str {
    let phrases = PHRASES.get(language);

    for &(patterns, reply) in phrases.greetings {
        if patterns.iter().any(|p| message.contains(p)) {
            return reply;
        }
    }

    if context.is_work_related {
        return if context.is_problem {
            phrases.work_problem
        } else {
            phrases.work
        };
    }
    if context.is_family_related {
        return phrases.family;
    }
    if context.is_problem || emotion == Emotion::Stressed {
        return phrases.problem;
    }
    if context.is_positive || emotion == Emotion::Happy {
        return phrases.positive;
    }
    if context.is_question {
        return phrases.question;
    }
    if context.is_sharing {
        return phrases.sharing;
    }

    phrases.defaults.choose(rng).copied().unwrap_or(phrases.sharing)
}
