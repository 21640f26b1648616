use super::classifier::Classification;
use crate::session::{Message, RiskLevel, Sentiment};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Empathetic openers for high-risk exchanges. The follow-up menu is
/// appended to whichever one is drawn.
pub const HIGH_RISK_RESPONSES: &[&str] = &[
    "I hear that you're going through a really difficult time. These feelings are valid, and it's important that you reached out. Based on what you've shared, I'd strongly recommend connecting with one of our counselors who can provide more personalized support. In the meantime, let's work on some immediate coping strategies.",
    "Thank you for trusting me with these difficult feelings. When we're experiencing intense emotional pain, it can feel overwhelming. Let's break this down together - can you tell me about one small thing that brought you even a moment of peace recently?",
    "I can sense you're struggling deeply right now. That takes courage to share. Many students experience these intense feelings, especially during challenging times. Let's focus on getting you connected with additional support while we talk through some coping techniques.",
];

pub const FOLLOW_UP_MENU: &str = "\n\nWould you like me to:\n• Guide you through a breathing exercise\n• Help you schedule a counseling session\n• Connect you with our crisis support team\n• Explore coping strategies that have helped others";

pub const ACADEMIC_FOLLOW_UP_RESPONSE: &str = "I see we've been talking about academic stress. Let's build on what we discussed. Here are some specific strategies that many students find helpful:\n\n• **Time blocking**: Break study time into focused 25-minute chunks\n• **Active recall**: Test yourself instead of just re-reading\n• **Sleep hygiene**: Aim for 7-8 hours - your brain consolidates learning during sleep\n• **Perspective taking**: Remember that one exam doesn't define your worth or future\n\nWhich of these resonates most with your current situation?";

pub const ACADEMIC_FIRST_TIME_RESPONSE: &str = "Academic pressure can feel really intense, especially when exams are approaching. You're not alone in feeling this way - it's one of the most common concerns I hear about.\n\nLet's start with your breathing. Take a moment to breathe in for 4 counts, hold for 4, and exhale for 6. This activates your parasympathetic nervous system and helps reduce cortisol levels.\n\nWhat specific aspect of your academic situation is weighing on you most right now?";

pub const SLEEP_RESPONSE: &str = "Sleep challenges can really impact everything else - your mood, concentration, and overall wellbeing. Let's work on some evidence-based sleep strategies:\n\n🌙 **Sleep Hygiene Tips:**\n• Keep a consistent sleep schedule (even on weekends)\n• Create a wind-down routine 1 hour before bed\n• Limit screens 30 minutes before sleep (blue light disrupts melatonin)\n• Keep your room cool (around 65-68°F)\n• Try progressive muscle relaxation\n\nWhat's your current bedtime routine like? Understanding your habits helps me give more personalized suggestions.";

pub const ANXIETY_RESPONSE: &str = "Anxiety can feel overwhelming, but there are effective techniques to help manage it. Let's try the **5-4-3-2-1 grounding technique**:\n\n• **5** things you can see around you\n• **4** things you can physically touch\n• **3** things you can hear\n• **2** things you can smell\n• **1** thing you can taste\n\nThis helps anchor you in the present moment. Anxiety often comes from our mind racing to future scenarios.\n\nCan you try this technique now and let me know how it feels? Also, is this a new feeling for you, or something you've experienced before?";

pub const LONELINESS_RESPONSE: &str = "Feeling lonely, especially as a student, is more common than you might think. Many people struggle with this, particularly in new environments or during stressful times.\n\n**Some ways to build connections:**\n• Join study groups in your classes\n• Participate in campus clubs related to your interests\n• Consider our peer support forums - many students find meaningful connections there\n• Volunteer for causes you care about\n• Attend campus events, even if it feels uncomfortable at first\n\nSometimes we feel lonely even when surrounded by people. Can you tell me more about what loneliness feels like for you specifically?";

pub const POSITIVE_RESPONSES: &[&str] = &[
    "I'm so glad to hear you're feeling good! It's wonderful when we can recognize and appreciate these positive moments. What do you think has contributed to feeling this way?",
    "That's fantastic! Positive emotions are just as important to explore as difficult ones. What strategies or activities have been helping you maintain this positive state?",
    "It's great to hear some positivity in your message! These good feelings can be really valuable - they often give us insights into what works well for our mental health.",
];

pub const POSITIVE_SUFFIX: &str = "\n\nWould you like to talk about what's going well, or is there something else on your mind?";

pub const SUPPORTIVE_RESPONSES: &[&str] = &[
    "Thank you for sharing that with me. It takes courage to reach out and express what you're feeling. I'm here to listen and support you through this.",
    "I appreciate you opening up about this. Your feelings and experiences are valid, and I want to help you work through whatever you're facing.",
    "I can hear that you're going through something challenging right now. It's completely normal to have difficult times, and seeking support shows real strength.",
    "It sounds like you have a lot on your mind. Sometimes just talking through our thoughts and feelings can help us gain clarity and feel less overwhelmed.",
];

pub const SUPPORTIVE_SUFFIX: &str = "\n\nCan you tell me more about what's been on your mind lately? I'm here to listen and help however I can.";

const ACADEMIC_TOPIC: &[&str] = &["exam", "test", "academic"];
const SLEEP_TOPIC: &[&str] = &["sleep", "insomnia", "tired"];
const ANXIETY_TOPIC: &[&str] = &["anxious", "anxiety", "panic"];
const LONELINESS_TOPIC: &[&str] = &["lonely", "alone", "friends"];

/// How many trailing messages the selector looks at for topic repetition.
const RECENT_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub content: String,
    pub risk_level: RiskLevel,
}

/// Selects a canned reply for a classified user message.
///
/// Same-tier template choice is uniformly random, so the selector owns an
/// RNG. `seeded` pins it for deterministic tests; the crisis path never
/// randomizes.
pub struct Responder {
    crisis_response: String,
    rng: StdRng,
}

impl Responder {
    pub fn new(crisis_hotline: &str) -> Self {
        Self::with_rng(crisis_hotline, StdRng::from_entropy())
    }

    pub fn seeded(crisis_hotline: &str, seed: u64) -> Self {
        Self::with_rng(crisis_hotline, StdRng::seed_from_u64(seed))
    }

    fn with_rng(crisis_hotline: &str, rng: StdRng) -> Self {
        Self {
            crisis_response: crisis_response(crisis_hotline),
            rng,
        }
    }

    /// The exact text the crisis tier always returns.
    pub fn crisis_response(&self) -> &str {
        &self.crisis_response
    }

    /// Decision order: crisis, high-risk, topic rules (academic, sleep,
    /// anxiety, loneliness), positive, generic support. First match wins.
    /// `recent` is the conversation as it stood before the triggering user
    /// message was appended; only its last 3 entries are consulted.
    pub fn select(
        &mut self,
        input: &str,
        classification: Classification,
        recent: &[Message],
    ) -> Reply {
        let lower = input.to_lowercase();
        let negative = classification.sentiment == Sentiment::Negative;

        if classification.sentiment == Sentiment::Critical {
            return Reply {
                content: self.crisis_response.clone(),
                risk_level: RiskLevel::Crisis,
            };
        }

        if negative && classification.confidence > 0.7 {
            let opener = self.pick(HIGH_RISK_RESPONSES);
            return Reply {
                content: format!("{opener}{FOLLOW_UP_MENU}"),
                risk_level: RiskLevel::High,
            };
        }

        if matches_topic(&lower, ACADEMIC_TOPIC) {
            let window = &recent[recent.len().saturating_sub(RECENT_WINDOW)..];
            let discussed = window.iter().any(|msg| {
                let content = msg.content.to_lowercase();
                content.contains("exam") || content.contains("academic")
            });
            return if discussed {
                Reply {
                    content: ACADEMIC_FOLLOW_UP_RESPONSE.to_string(),
                    risk_level: if negative {
                        RiskLevel::Medium
                    } else {
                        RiskLevel::Low
                    },
                }
            } else {
                Reply {
                    content: ACADEMIC_FIRST_TIME_RESPONSE.to_string(),
                    risk_level: RiskLevel::Medium,
                }
            };
        }

        if matches_topic(&lower, SLEEP_TOPIC) {
            return Reply {
                content: SLEEP_RESPONSE.to_string(),
                risk_level: RiskLevel::Low,
            };
        }

        if matches_topic(&lower, ANXIETY_TOPIC) {
            return Reply {
                content: ANXIETY_RESPONSE.to_string(),
                risk_level: RiskLevel::Medium,
            };
        }

        if matches_topic(&lower, LONELINESS_TOPIC) {
            return Reply {
                content: LONELINESS_RESPONSE.to_string(),
                risk_level: if negative {
                    RiskLevel::Medium
                } else {
                    RiskLevel::Low
                },
            };
        }

        if classification.sentiment == Sentiment::Positive {
            let opener = self.pick(POSITIVE_RESPONSES);
            return Reply {
                content: format!("{opener}{POSITIVE_SUFFIX}"),
                risk_level: RiskLevel::Low,
            };
        }

        let opener = self.pick(SUPPORTIVE_RESPONSES);
        Reply {
            content: format!("{opener}{SUPPORTIVE_SUFFIX}"),
            risk_level: if negative {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            },
        }
    }

    fn pick<'a>(&mut self, templates: &[&'a str]) -> &'a str {
        templates[self.rng.gen_range(0..templates.len())]
    }
}

fn matches_topic(lower_input: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|word| lower_input.contains(word))
}

fn crisis_response(hotline: &str) -> String {
    format!(
        "I'm very concerned about what you've shared. Your safety is the most important thing right now. Please reach out to our crisis helpline immediately at {hotline} or contact emergency services. You don't have to go through this alone - there are people who want to help you right now. Can I help you connect with a crisis counselor?"
    )
}
