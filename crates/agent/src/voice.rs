//! Scripted voice replies
//!
//! A turn counter decides between three kinds of reply:
//!
//! 1. a greeting phrase match resets the counter and returns the mapped
//!    greeting
//! 2. during the first turns, an emotion with a dedicated reply gets it
//! 3. otherwise a random continuation, or the language default when the
//!    language has no continuation list
//!
//! Branches 2 and 3 advance the counter.

use rand::seq::SliceRandom;
use rand::RngCore;
use yoga_agent_core::{Emotion, Language};
use yoga_agent_text_processing::{keywords::normalize, MessageAnalysis};

use crate::phrasebook::Localized;
use crate::traits::Responder;

struct VoicePhrases {
    greetings: &'static [(&'static str, &'static str)],
    emotions: &'static [(Emotion, &'static str)],
    continuations: &'static [&'static str],
    default: &'static str,
}

const TELUGU: VoicePhrases = VoicePhrases {
    greetings: &[
        ("em chestunav", "Nuvvu tho matladutunna! Nuvvu ela unnav?"),
        ("enti chestunav", "Ikkada unnaanu! Nuvvu bagunnava?"),
        ("ela unnav", "Nenu bagunnanu! Nuvvu ela unnav?"),
        ("namaste", "Namaste! Ela unnav?"),
        ("hello", "Hello! Evala ela undi?"),
    ],
    emotions: &[
        (Emotion::Anxious, "Tension ekkuva ga undi anipistundi. Emi jarigindi?"),
        (Emotion::Stressed, "Stress ga unnav. Emi problem?"),
        (Emotion::Sad, "Konchem sad ga unnav. Emi aindi?"),
        (Emotion::Happy, "Happy ga unnav! Emi good news?"),
        (Emotion::Angry, "Kopam ga unnav. Emi jarigindi?"),
        (Emotion::Tired, "Tired ga unnav. Ekkuva work aa?"),
    ],
    continuations: &[
        "Hmm, inka cheppu",
        "Avunu, continue cheyyi",
        "Artham aindi, inka emi?",
        "Bagundi, inka details cheppu",
        "Okay, proceed cheyyi",
    ],
    default: "Hmm, inka cheppu",
};

const TAMIL: VoicePhrases = VoicePhrases {
    greetings: &[
        ("epdi iruka", "Naan nalla irken! Nee epdi iruka?"),
        ("enna panra", "Unna kooda pesitu irken! Nee epdi?"),
        ("vanakkam", "Vanakkam! Epdi iruka?"),
        ("hello", "Hello! Inniki epdi?"),
    ],
    emotions: &[
        (Emotion::Anxious, "Tension ah iruka. Enna problem?"),
        (Emotion::Stressed, "Stress ah iruka. Enna achu?"),
        (Emotion::Sad, "Sad ah iruka. Enna nadandhuchu?"),
        (Emotion::Happy, "Happy ah iruka! Enna good news?"),
        (Emotion::Angry, "Angry ah iruka. Enna achu?"),
        (Emotion::Tired, "Tired ah iruka. Romba work aa?"),
    ],
    continuations: &[
        "Hmm, inka sollu",
        "Aama, continue pannu",
        "Purinjuchu, inka enna?",
        "Nallairuku, details sollu",
        "Okay, proceed pannu",
    ],
    default: "Hmm, inka sollu",
};

const HINDI: VoicePhrases = VoicePhrases {
    greetings: &[
        ("kaise ho", "Main theek hun! Tum kaise ho?"),
        ("kya kar rahe ho", "Tumse baat kar raha hun! Tum kaise ho?"),
        ("namaste", "Namaste! Kaise ho?"),
        ("hello", "Hello! Aaj kaise ho?"),
    ],
    emotions: &[
        (Emotion::Anxious, "Tension lag raha hai. Kya problem hai?"),
        (Emotion::Stressed, "Stress mein ho. Kya hua?"),
        (Emotion::Sad, "Sad lag rahe ho. Kya baat hai?"),
        (Emotion::Happy, "Happy lag rahe ho! Kya good news hai?"),
        (Emotion::Angry, "Gussa lag rahe ho. Kya hua?"),
        (Emotion::Tired, "Thake hue ho. Zyada kaam hai?"),
    ],
    continuations: &[
        "Hmm, aur batao",
        "Haan, continue karo",
        "Samajh gaya, aur kya?",
        "Achha hai, details batao",
        "Okay, aage bolo",
    ],
    default: "Hmm, aur batao",
};

const ENGLISH: VoicePhrases = VoicePhrases {
    greetings: &[
        ("how are you", "I'm good! How are you?"),
        ("what are you doing", "Just chatting with you! How are you?"),
        ("hello", "Hello! How are you today?"),
        ("hi", "Hi! How's it going?"),
    ],
    emotions: &[
        (Emotion::Anxious, "You seem anxious. What's wrong?"),
        (Emotion::Stressed, "You sound stressed. What happened?"),
        (Emotion::Sad, "You seem down. What's up?"),
        (Emotion::Happy, "You sound happy! What's the good news?"),
        (Emotion::Angry, "You seem upset. What happened?"),
        (Emotion::Tired, "You sound tired. Long day?"),
    ],
    continuations: &[
        "I see, go on",
        "Right, continue",
        "Got it, what else?",
        "Interesting, tell me more",
        "Okay, keep going",
    ],
    default: "I see, go on",
};

const PHRASES: Localized<&VoicePhrases> = Localized {
    english: &ENGLISH,
    telugu: &TELUGU,
    tamil: &TAMIL,
    hindi: &HINDI,
};

/// Turn-counter voice reply engine for one conversation
#[derive(Debug, Clone)]
pub struct VoiceResponseEngine {
    turns: u32,
    emotion_turns: u32,
}

impl VoiceResponseEngine {
    /// `emotion_turns` is how many turns prefer an emotion reply
    pub fn new(emotion_turns: u32) -> Self {
        Self {
            turns: 0,
            emotion_turns,
        }
    }

    /// Current value of the turn counter
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn reply(
        &mut self,
        message: &str,
        emotion: Emotion,
        language: Language,
        rng: &mut dyn RngCore,
    ) -> String {
        let message = normalize(message);
        let phrases = PHRASES.get(language);

        if let Some(&(pattern, reply)) = phrases
            .greetings
            .iter()
            .find(|(pattern, _)| message.contains(pattern))
        {
            tracing::debug!(pattern, language = %language, "Voice greeting matched");
            self.turns = 0;
            return reply.to_string();
        }

        if self.turns < self.emotion_turns {
            if let Some(&(_, reply)) = phrases.emotions.iter().find(|(e, _)| *e == emotion) {
                self.turns += 1;
                return reply.to_string();
            }
        }

        self.turns += 1;
        phrases
            .continuations
            .choose(rng)
            .copied()
            .unwrap_or(phrases.default)
            .to_string()
    }
}

impl Default for VoiceResponseEngine {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Responder for VoiceResponseEngine {
    fn respond(
        &mut self,
        message: &str,
        analysis: &MessageAnalysis,
        rng: &mut dyn RngCore,
    ) -> String {
        self.reply(message, analysis.emotion.emotion, analysis.language, rng)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
