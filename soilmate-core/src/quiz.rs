//! Quiz questions and answer types
//!
//! The quiz asks five questions in a fixed order. Answers travel as a
//! mapping from question index (0-4) to the selected option id, which is
//! what a browser front end naturally produces. [`QuizAnswers::parse`]
//! turns that loose mapping into a typed [`AnswerSet`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of questions in the quiz
pub const QUESTION_COUNT: usize = 5;

/// Identifies one of the five quiz questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Lifestyle,
    HomeFrequency,
    CareLevel,
    SpaceLight,
    Reminder,
}

impl QuestionKind {
    /// All questions in the order they are asked
    pub const ALL: [QuestionKind; QUESTION_COUNT] = [
        QuestionKind::Lifestyle,
        QuestionKind::HomeFrequency,
        QuestionKind::CareLevel,
        QuestionKind::SpaceLight,
        QuestionKind::Reminder,
    ];

    /// Position of this question in the quiz (0-based)
    pub fn index(self) -> usize {
        match self {
            Self::Lifestyle => 0,
            Self::HomeFrequency => 1,
            Self::CareLevel => 2,
            Self::SpaceLight => 3,
            Self::Reminder => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lifestyle => "lifestyle",
            Self::HomeFrequency => "home_frequency",
            Self::CareLevel => "care_level",
            Self::SpaceLight => "space_light",
            Self::Reminder => "reminder",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares a closed set of answer values with their wire spelling.
macro_rules! answer_enum {
    (
        $(#[$meta:meta])*
        $name:ident for $question:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in the order the options are shown
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(Error::UnknownAnswer {
                        question: QuestionKind::$question,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

answer_enum! {
    /// Answer to "What's your lifestyle like?"
    Lifestyle for Lifestyle {
        Busy => "busy",
        Relaxed => "relaxed",
        Adventurous => "adventurous",
    }
}

answer_enum! {
    /// Answer to "How often are you home?"
    HomeFrequency for HomeFrequency {
        Daily => "daily",
        FewTimes => "few-times",
        Rarely => "rarely",
    }
}

answer_enum! {
    /// Care a visitor is ready to give, and care a plant needs
    CareLevel for CareLevel {
        Minimal => "minimal",
        Little => "little",
        LoveIt => "love-it",
    }
}

answer_enum! {
    /// Light available in a space, and light a plant needs
    LightNeeds for SpaceLight {
        Sunny => "sunny",
        Shady => "shady",
        Mixed => "mixed",
    }
}

answer_enum! {
    /// Answer to "What do you want your plant to remind you of?"
    Reminder for Reminder {
        SlowDown => "slow-down",
        Gratitude => "gratitude",
        Responsibility => "responsibility",
    }
}

/// A selectable option for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    /// Value sent back when this option is chosen
    pub id: &'static str,
    pub text: &'static str,
    pub emoji: &'static str,
}

/// A quiz question as presented to the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// 1-based question number
    pub id: u8,
    pub kind: QuestionKind,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

const fn option(id: &'static str, text: &'static str, emoji: &'static str) -> AnswerOption {
    AnswerOption { id, text, emoji }
}

static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        id: 1,
        kind: QuestionKind::Lifestyle,
        prompt: "What's your lifestyle like?",
        options: &[
            option("busy", "Busy", "🏃"),
            option("relaxed", "Relaxed", "🛋️"),
            option("adventurous", "Adventurous", "🌍"),
        ],
    },
    Question {
        id: 2,
        kind: QuestionKind::HomeFrequency,
        prompt: "How often are you home?",
        options: &[
            option("daily", "Daily", "🏠"),
            option("few-times", "Few times a week", "🚗"),
            option("rarely", "Rarely", "✈️"),
        ],
    },
    Question {
        id: 3,
        kind: QuestionKind::CareLevel,
        prompt: "How much care are you ready for?",
        options: &[
            option("minimal", "Minimal", "💤"),
            option("little", "A little", "🪴"),
            option("love-it", "I love it", "❤️"),
        ],
    },
    Question {
        id: 4,
        kind: QuestionKind::SpaceLight,
        prompt: "What's your space like?",
        options: &[
            option("sunny", "Sunny", "🌞"),
            option("shady", "Shady", "🌙"),
            option("mixed", "Mixed", "⛅"),
        ],
    },
    Question {
        id: 5,
        kind: QuestionKind::Reminder,
        prompt: "What do you want your plant to remind you of?",
        options: &[
            option("slow-down", "Slow down", "⏳"),
            option("gratitude", "Gratitude", "🙏"),
            option("responsibility", "Responsibility", "🤲"),
        ],
    },
];

/// The quiz questions in the order they are asked
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

/// Raw answers keyed by question index
///
/// Serializes as a JSON object such as `{"0": "busy", "1": "daily", ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizAnswers(BTreeMap<usize, String>);

impl QuizAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build answers from values given in question order
    pub fn from_ordered<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            values
                .into_iter()
                .take(QUESTION_COUNT)
                .enumerate()
                .map(|(index, value)| (index, value.into()))
                .collect(),
        )
    }

    /// Record the answer for a question, replacing any previous one
    pub fn insert(&mut self, question: QuestionKind, value: impl Into<String>) {
        self.0.insert(question.index(), value.into());
    }

    pub fn with(mut self, question: QuestionKind, value: impl Into<String>) -> Self {
        self.insert(question, value);
        self
    }

    pub fn get(&self, question: QuestionKind) -> Option<&str> {
        self.0.get(&question.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every question has a recognized answer
    pub fn is_complete(&self) -> bool {
        self.parse().is_ok()
    }

    /// Interpret the raw answers as a typed answer set
    pub fn parse(&self) -> Result<AnswerSet> {
        Ok(AnswerSet {
            lifestyle: self.typed(QuestionKind::Lifestyle)?,
            home_frequency: self.typed(QuestionKind::HomeFrequency)?,
            care_level: self.typed(QuestionKind::CareLevel)?,
            space_light: self.typed(QuestionKind::SpaceLight)?,
            reminder: self.typed(QuestionKind::Reminder)?,
        })
    }

    fn typed<T: FromStr<Err = Error>>(&self, question: QuestionKind) -> Result<T> {
        self.get(question)
            .ok_or(Error::MissingAnswer(question))?
            .parse()
    }
}

/// A complete, typed set of quiz answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerSet {
    pub lifestyle: Lifestyle,
    pub home_frequency: HomeFrequency,
    pub care_level: CareLevel,
    pub space_light: LightNeeds,
    pub reminder: Reminder,
}

impl AnswerSet {
    /// Every possible answer combination, in option order
    pub fn all() -> impl Iterator<Item = AnswerSet> {
        Lifestyle::ALL.iter().flat_map(|&lifestyle| {
            HomeFrequency::ALL.iter().flat_map(move |&home_frequency| {
                CareLevel::ALL.iter().flat_map(move |&care_level| {
                    LightNeeds::ALL.iter().flat_map(move |&space_light| {
                        Reminder::ALL.iter().map(move |&reminder| AnswerSet {
                            lifestyle,
                            home_frequency,
                            care_level,
                            space_light,
                            reminder,
                        })
                    })
                })
            })
        })
    }
}

impl From<AnswerSet> for QuizAnswers {
    fn from(set: AnswerSet) -> Self {
        QuizAnswers::from_ordered([
            set.lifestyle.as_str(),
            set.home_frequency.as_str(),
            set.care_level.as_str(),
            set.space_light.as_str(),
            set.reminder.as_str(),
        ])
    }
}
