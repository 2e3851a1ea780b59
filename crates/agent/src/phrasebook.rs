//! Canned chat-path phrases
//!
//! Every table is total over `Language`, so a missing translation is a
//! compile error rather than a silent fallback to English.

use yoga_agent_core::{ContextBucket, Language};

/// One value per supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized<T> {
    pub english: T,
    pub telugu: T,
    pub tamil: T,
    pub hindi: T,
}

impl<T: Copy> Localized<T> {
    pub fn get(&self, language: Language) -> T {
        match language {
            Language::English => self.english,
            Language::Telugu => self.telugu,
            Language::Tamil => self.tamil,
            Language::Hindi => self.hindi,
        }
    }
}

pub type Phrase = Localized<&'static str>;
pub type PhraseList = Localized<&'static [&'static str]>;

/// Placeholder replaced with the emotion name
pub const EMOTION_PLACEHOLDER: &str = "{emotion}";

/// Greeting mixed with stress
pub const STRESSED_GREETING: Phrase = Localized {
    english: "I can hear you're feeling stressed. What's been going on?",
    telugu: "Nuvvu tension lo unnav anipistundi. Emi jarigindi cheppu?",
    tamil: "Nee tension ah irukura madhiri theriyudhu. Enna nadandhuchu?",
    hindi: "Lagta hai tum tension mein ho. Kya hua hai?",
};

/// Small talk without any emotion word
pub const SMALL_TALK: Phrase = Localized {
    english: "Just here to chat and help! What's up with you?",
    telugu: "Ikkada unna nuvvu tho matladataniki! Nuvvu enti chestunnav?",
    tamil: "Inga irken unna kooda pesa! Nee enna panra?",
    hindi: "Yahan hun tumse baat karne! Tum kya kar rahe ho?",
};

const SIMPLE_GREETING: Phrase = Localized {
    english: "Hey! How's it going?",
    telugu: "Enti ra! Ela unnav?",
    tamil: "Vanakkam! Epdi iruka?",
    hindi: "Namaste! Kaise ho?",
};

const SUPPORTIVE_RESPONSE: Phrase = Localized {
    english: "I can sense you're feeling {emotion}. Want to talk about it?",
    telugu: "Nuvvu {emotion} ga unnav anipistundi. Matladamantava?",
    tamil: "Nee {emotion} ah irukura madhiri theriyudhu. Pesalama?",
    hindi: "Lagta hai tum {emotion} feel kar rahe ho. Baat karna hai?",
};

const HAPPY_RESPONSE: Phrase = Localized {
    english: "That's awesome! You sound really happy!",
    telugu: "Waah! Chala happy ga unnav!",
    tamil: "Super! Romba happy ah iruka!",
    hindi: "Bahut achha! Tum bahut khush lag rahe ho!",
};

const COPING_RESPONSE: Phrase = Localized {
    english: "That's great! Those things really help.",
    telugu: "Adi bagundi! Vaati valla help avtundi.",
    tamil: "Adhu nalladu! Avai romba help aagum.",
    hindi: "Yeh achhi baat hai! Yeh cheezein help karti hain.",
};

const GENERAL_CHAT: Phrase = Localized {
    english: "Tell me more about what's going on.",
    telugu: "Inka cheppu emi jarigindi.",
    tamil: "Inka enna nadakudhu sollu.",
    hindi: "Aur batao kya chal raha hai.",
};

/// Reply template for a response bucket
pub fn bucket_template(bucket: ContextBucket) -> &'static Phrase {
    match bucket {
        ContextBucket::SimpleGreeting => &SIMPLE_GREETING,
        ContextBucket::SupportiveResponse => &SUPPORTIVE_RESPONSE,
        ContextBucket::HappyResponse => &HAPPY_RESPONSE,
        ContextBucket::CopingResponse => &COPING_RESPONSE,
        ContextBucket::GeneralChat => &GENERAL_CHAT,
    }
}

pub const FOLLOW_UPS_SMALL_TALK: PhraseList = Localized {
    english: &["Just here chatting with you!", "What about you? How's your day?"],
    telugu: &["Nuvvu tho matladutunna!", "Nuvvu ela unnav? Day ela undi?"],
    tamil: &["Unna kooda pesitu irken!", "Nee epdi iruka? Day epdi pochu?"],
    hindi: &["Tumse baat kar raha hun!", "Tum kaise ho? Din kaisa gaya?"],
};

pub const FOLLOW_UPS_HAPPY: PhraseList = Localized {
    english: &["That's great to hear!", "What made your day so good?"],
    telugu: &["Adi vinataniki bagundi!", "Enti jarigindi antha bagundi?"],
    tamil: &["Adhu kekka nallairuku!", "Enna nadandhuchu ivlo nallairuku?"],
    hindi: &["Yeh sunke achha laga!", "Kya hua itna achha?"],
};

pub const FOLLOW_UPS_DEFAULT: PhraseList = Localized {
    english: &["Want to talk about it?", "How are you feeling?"],
    telugu: &["Matladamantava?", "Ela feel avutunnav?"],
    tamil: &["Pesanum ah?", "Epdi feel panra?"],
    hindi: &["Baat karna hai?", "Kaise feel kar rahe ho?"],
};

pub const YOGA_INVITATION: Phrase = Localized {
    english: "Want to try some yoga? It might help.",
    telugu: "Yoga try cheyyamantava? Help avtundi.",
    tamil: "Yoga try pannalama? Help aagum.",
    hindi: "Yoga try karna hai? Help karega.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_lookup() {
        assert_eq!(SIMPLE_GREETING.get(Language::Hindi), "Namaste! Kaise ho?");
        assert_eq!(
            YOGA_INVITATION.get(Language::English),
            "Want to try some yoga? It might help."
        );
        assert_eq!(FOLLOW_UPS_HAPPY.get(Language::Tamil).len(), 2);
    }

    #[test]
    fn test_supportive_templates_take_emotion() {
        for language in Language::all() {
            assert!(bucket_template(ContextBucket::SupportiveResponse)
                .get(*language)
                .contains(EMOTION_PLACEHOLDER));
        }
    }
}
