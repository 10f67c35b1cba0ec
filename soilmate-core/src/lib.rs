//! soilmate-core: plant matching and visit attribution for the Soilmate quiz
//!
//! - **Quiz** - [`quiz::questions`] and the typed answers in [`quiz`]
//! - **Catalog** - the six-plant [`Catalog`] the quiz matches against
//! - **Matching** - [`Matcher`] turns five answers into exactly one [`Plant`]
//! - **Attribution** - [`attribution::track_visit`] keeps campaign, referrer
//!   and landing page context in site-wide storage
//! - **Leads and email** - [`Lead`] validation and the [`EmailMessage`] sent
//!   with a match
//!
//! # Quick Start
//!
//! ```
//! use soilmate_core::{Matcher, QuizAnswers};
//!
//! let answers = QuizAnswers::from_ordered(["busy", "daily", "little", "mixed", "slow-down"]);
//! let matcher = Matcher::default();
//! let plant = matcher.compute_match(&answers);
//! assert_eq!(plant.id, "snake-plant");
//! ```

pub mod attribution;
pub mod catalog;
pub mod email;
pub mod error;
pub mod lead;
pub mod matcher;
pub mod quiz;

pub use attribution::{
    ATTRIBUTION_MAX_AGE, AttributionField, AttributionRecord, AttributionStore, AttributionUpdate,
    CookieJar, MemoryStore, Visit, track_visit, update_attribution,
};
pub use catalog::{Catalog, Plant, SHOP_URL};
pub use email::{EmailMessage, PlantEmail};
pub use error::{Error, Result};
pub use lead::{Lead, is_valid_email};
pub use matcher::{Match, MatchReason, Matcher, compute_match};
pub use quiz::{
    AnswerSet, CareLevel, HomeFrequency, LightNeeds, Lifestyle, QuestionKind, QuizAnswers,
    Reminder,
};
