use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::value_objects::enums::languages::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Funny,
    Cringe,
    Romantic,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Funny, Tone::Cringe, Tone::Romantic];
}

fn templates(tone: Tone, language: Language) -> [&'static str; 3] {
    match (language, tone) {
        (Language::En, Tone::Funny) => [
            "Did you even open {service} today? 😏",
            "Was {service} lonely without you? 🤣",
            "{service} is crying in the corner. Did you visit? 😭",
        ],
        (Language::En, Tone::Cringe) => [
            "{service} asked: \"Am I nothing to you?\" 🥺",
            "How much love did you give {service} today? 💕",
            "{service} says: \"Notice me senpai!\" 😬",
        ],
        (Language::En, Tone::Romantic) => [
            "How much quality time with {service} today, darling? 💖",
            "{service} and you, today's love story? 🌹",
            "Tell me about your romance with {service} today 😘",
        ],
        (Language::Hi, Tone::Funny) => [
            "बाबू, आज {service} खोला भी? 😏",
            "{service} ने आज तुम्हें देखा क्या? 🤣",
            "{service} आज बोर हो रहा तुम्हारे बिना! 😴",
        ],
        (Language::Hi, Tone::Cringe) => [
            "{service} ने पूछा, \"मैं तुम्हारे लिए कुछ हूँ?\" 🥺",
            "आज {service} को कितना प्यार दिया? 💕",
            "{service} बोला: \"notice me senpai!\" 😬",
        ],
        (Language::Hi, Tone::Romantic) => [
            "आज {service} के साथ कितना वक्त बिताया, जानू? 💖",
            "{service} और तुम, आज की love story? 🌹",
            "बताओ, {service} के साथ आज romance हुआ? 😘",
        ],
    }
}

pub fn question_for(service: &str, tone: Tone, language: Language, variant: usize) -> String {
    let options = templates(tone, language);
    options[variant % options.len()].replace("{service}", service)
}

/// Picks a tone and a template at random.
pub fn random_question<R: Rng + ?Sized>(service: &str, language: Language, rng: &mut R) -> String {
    let tone = Tone::ALL.choose(rng).copied().unwrap_or(Tone::Funny);
    let variant = rng.gen_range(0..3);
    question_for(service, tone, language, variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_mentions_the_service() {
        for language in [Language::En, Language::Hi] {
            for tone in Tone::ALL {
                for variant in 0..3 {
                    let question = question_for("Netflix", tone, language, variant);
                    assert!(question.contains("Netflix"), "{question}");
                    assert!(!question.contains("{service}"));
                }
            }
        }
    }

    #[test]
    fn random_question_uses_service_name() {
        let mut rng = rand::thread_rng();
        let question = random_question("Spotify", Language::En, &mut rng);
        assert!(question.contains("Spotify"));
    }
}
