//! `soilmate quiz` - take the quiz interactively

use anyhow::Result;
use clap::Args;
use dialoguer::{Select, theme::ColorfulTheme};
use soilmate_core::{Matcher, QuestionKind, QuizAnswers, quiz::Question};

use super::matching::print_match_to;

#[derive(Debug, Args)]
pub struct QuizArgs {}

/// Menu labels for a question's options
fn option_labels(question: &Question) -> Vec<String> {
    question
        .options
        .iter()
        .map(|option| format!("{} {}", option.emoji, option.text))
        .collect()
}

pub fn run(_args: QuizArgs) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut answers = QuizAnswers::new();

    for (question, kind) in soilmate_core::quiz::questions()
        .iter()
        .zip(QuestionKind::ALL)
    {
        let selection = Select::with_theme(&theme)
            .with_prompt(format!(
                "{}/{} {}",
                question.id,
                QuestionKind::ALL.len(),
                question.prompt
            ))
            .items(&option_labels(question))
            .default(0)
            .interact()?;
        answers.insert(kind, question.options[selection].id);
    }

    let matcher = Matcher::default();
    let found = matcher.explain(&answers);
    println!();
    print_match_to(&mut std::io::stdout().lock(), &found)?;
    Ok(())
}
