//! `soilmate match` - match answers given on the command line

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use serde_json::json;
use soilmate_core::{Match, MatchReason, Matcher, QuizAnswers};

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Answers in question order: lifestyle, home frequency, care level,
    /// space light, reminder (e.g. busy daily little mixed slow-down)
    #[arg(num_args = 0..=5)]
    pub answers: Vec<String>,

    /// Print the match as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: MatchArgs) -> Result<()> {
    let answers = QuizAnswers::from_ordered(args.answers);
    let matcher = Matcher::default();
    let found = matcher.explain(&answers);

    let mut out = io::stdout().lock();
    if args.json {
        let value = json!({
            "plant": found.plant,
            "adoptUrl": found.plant.adopt_url(),
            "reason": found.reason,
            "complete": answers.parse().is_ok(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        print_match_to(&mut out, &found)?;
    }
    Ok(())
}

/// Describe why a plant was chosen
pub fn describe_reason(reason: MatchReason) -> String {
    match reason {
        MatchReason::LowLightOverride => {
            "you need a plant that copes with low light or long absences".to_string()
        }
        MatchReason::Preference(question) => format!(
            "your {} answer tipped the balance",
            question.as_str().replace('_', " ")
        ),
        MatchReason::FirstCandidate => "it was the first plant to suit your answers".to_string(),
        MatchReason::NoCandidates => "no plant fit every answer, so here is our favourite".to_string(),
        MatchReason::IncompleteAnswers => {
            "not every question was answered, so here is our favourite".to_string()
        }
    }
}

/// Print a match to a writer
pub fn print_match_to<W: Write>(w: &mut W, found: &Match<'_>) -> io::Result<()> {
    let plant = found.plant;
    writeln!(w, "{} Your Soilmate is {}", plant.emoji, plant.name)?;
    if !plant.description.is_empty() {
        writeln!(w, "   {}", plant.description)?;
    }
    if !plant.personality.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", plant.personality)?;
    }
    writeln!(w)?;
    writeln!(w, "Why: {}", describe_reason(found.reason))?;
    writeln!(w, "Adopt: {}", plant.adopt_url())?;
    Ok(())
}
