use clap::Parser;
use rand::{Rng, rngs::ThreadRng};
use std::fs;
use vejviser::prelude::{
    AuthoringError, Flow, Operator, PostCondition, Question, QuestionKind, export_flow,
};

/// A CLI tool to generate random branching flows for exercising the navigator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated flow JSON to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// The number of pages to generate
    #[arg(long, default_value_t = 5)]
    pages: usize,

    /// The maximum number of branching rules per page
    #[arg(long, default_value_t = 2)]
    rules: usize,
}

const COLORS: [&str; 4] = ["Red", "Green", "Blue", "Yellow"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.pages == 0 {
        eprintln!("Error: --pages must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating a flow with {} page(s) and up to {} rule(s) per page...",
        cli.pages, cli.rules
    );

    let mut flow = Flow::new("Generated flow", "Randomly generated branching flow")?;
    for _ in 0..cli.pages {
        flow.add_page();
    }

    let page_ids: Vec<String> = flow.pages.iter().map(|page| page.id.clone()).collect();
    for ordinal in 0..flow.page_count() {
        let answerable = add_questions(&mut flow, ordinal, &mut rng)?;
        let count = rng.random_range(0..=cli.rules);
        for _ in 0..count {
            let question = answerable[rng.random_range(0..answerable.len())];
            let kind = &flow.pages[ordinal].questions[question].kind;
            let target = &page_ids[rng.random_range(0..page_ids.len())];
            let rule = random_rule(kind, question, target, &mut rng);
            flow.add_post_condition(ordinal, rule)?;
        }
        println!(
            "-> Page {}: {} question(s), {} rule(s)",
            ordinal + 1,
            flow.pages[ordinal].questions.len(),
            count
        );
    }

    let json_output = export_flow(&flow)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved flow to '{}'", cli.output);

    Ok(())
}

/// Adds a few questions to a page and returns the ordinals that can carry rules.
fn add_questions(
    flow: &mut Flow,
    page: usize,
    rng: &mut ThreadRng,
) -> Result<Vec<usize>, AuthoringError> {
    let mut answerable = vec![flow.add_question(page, Question::number("How many?"))?];
    if rng.random_bool(0.5) {
        answerable.push(flow.add_question(
            page,
            Question::checkbox("Pick colors", COLORS, true),
        )?);
    }
    if rng.random_bool(0.3) {
        flow.add_question(page, Question::tekst_block("Note", "Generated annotation"))?;
    }
    Ok(answerable)
}

fn random_rule(
    kind: &QuestionKind,
    question: usize,
    target: &str,
    rng: &mut ThreadRng,
) -> PostCondition {
    match kind {
        QuestionKind::Checkbox { .. } => {
            let color = COLORS[rng.random_range(0..COLORS.len())];
            PostCondition::new(question, Operator::Equal, color, target)
        }
        _ => {
            let operators = [">", "<", ">=", "<=", "="];
            let operator = operators[rng.random_range(0..operators.len())];
            let value = rng.random_range(0..100) as f64;
            PostCondition::new(question, operator, value, target)
        }
    }
}
