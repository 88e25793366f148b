use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vejviser::document::export_file_name;
use vejviser::graph;
use vejviser::prelude::*;

/// Validate, visualize and walk through branching questionnaire flows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a flow document and report its structure and dangling rules
    Validate {
        /// Path to the flow JSON file
        flow_path: PathBuf,
    },
    /// Print the flow's node/edge graph as JSON
    Graph {
        /// Path to the flow JSON file
        flow_path: PathBuf,
        /// Optional layout file with saved node positions
        #[arg(short, long)]
        layout: Option<PathBuf>,
    },
    /// Answer the flow as a respondent; it ends when no rule matches
    Play {
        /// Path to the flow JSON file
        flow_path: PathBuf,
    },
    /// Walk the flow as an author; unmatched pages continue in order
    Preview {
        /// Path to the flow JSON file
        flow_path: PathBuf,
    },
    /// Re-export a flow document in canonical form
    Export {
        /// Path to the flow JSON file
        flow_path: PathBuf,
        /// Where to write the export. Defaults to `<flow name>.json`
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { flow_path } => run_validate(&flow_path),
        Command::Graph { flow_path, layout } => run_graph(&flow_path, layout.as_deref()),
        Command::Play { flow_path } => run_session(&flow_path, NavigationMode::Play),
        Command::Preview { flow_path } => run_session(&flow_path, NavigationMode::Preview),
        Command::Export { flow_path, out } => run_export(&flow_path, out),
    }
}

/// Reads `RUST_LOG`, defaulting to `warn`. Logs go to stderr so they never
/// mix with graph or export output.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).compact())
        .init();
}

fn load_flow(path: &Path) -> Flow {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read flow file '{}': {}",
            path.display(),
            e
        ))
    });
    import_flow(&json).unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)))
}

fn run_validate(path: &Path) {
    let flow = load_flow(path);

    println!("Flow '{}' ({} page(s))", flow.name, flow.page_count());
    if !flow.description.is_empty() {
        println!("  {}", flow.description);
    }

    let mut dangling = 0;
    for (ordinal, page) in flow.pages.iter().enumerate() {
        println!(
            "\n[{}] {} (id: {}): {} question(s), {} rule(s)",
            ordinal + 1,
            page.name,
            page.id,
            page.questions.len(),
            page.post_conditions.len()
        );
        for (index, rule) in page.post_conditions.iter().enumerate() {
            let status = if flow.page_ordinal(&rule.next_page_id).is_some() {
                "ok"
            } else {
                dangling += 1;
                "DANGLING"
            };
            println!(
                "    rule {}: {} -> {} [{}]",
                index + 1,
                RuleFormatter::label(rule),
                rule.next_page_id,
                status
            );
            if rule.question_index >= page.questions.len() {
                println!("      warning: question {} does not exist", rule.question_index + 1);
            }
        }
    }

    println!("\n--- Summary ---");
    for page_id in flow.duplicate_page_ids() {
        println!("Page id '{}' is used by more than one page.", page_id);
    }
    if dangling == 0 {
        println!("All rule targets resolve.");
    } else {
        println!(
            "{} rule(s) point at missing pages and will never branch.",
            dangling
        );
    }
}

fn run_graph(path: &Path, layout_path: Option<&Path>) {
    let flow = load_flow(path);
    let layout = match layout_path {
        Some(layout_path) => LayoutStore::from_file(layout_path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load layout: {}", e))),
        None => LayoutStore::new(),
    };

    let graph = graph::build(&flow, &layout);
    let json = serde_json::to_string_pretty(&graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode graph: {}", e)));
    println!("{}", json);
}

fn run_export(path: &Path, out: Option<PathBuf>) {
    let flow = load_flow(path);
    let out = out.unwrap_or_else(|| PathBuf::from(export_file_name(&flow)));
    let json = export_flow(&flow)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode flow: {}", e)));
    fs::write(&out, json).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to write '{}': {}", out.display(), e))
    });
    println!("Exported '{}' to '{}'", flow.name, out.display());
}

/// Runs an interactive session on stdin until the flow ends or the user quits.
fn run_session(path: &Path, mode: NavigationMode) {
    let flow = load_flow(path);
    let mut navigator = Navigator::builder(&flow, mode)
        .build()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    println!("--- {} ({:?}) ---", flow.name, mode);
    if !flow.description.is_empty() {
        println!("{}", flow.description);
    }

    while let Some(ordinal) = navigator.current_ordinal() {
        let Some(page) = navigator.current_page() else {
            break;
        };
        println!("\n== [{}/{}] {} ==", ordinal + 1, flow.page_count(), page.name);

        for (index, question) in page.questions.iter().enumerate() {
            if !ask_question(&mut navigator, ordinal, index, question) {
                return;
            }
        }

        let hint = match mode {
            NavigationMode::Play => "[enter] next, [b]ack, [r]estart, [q]uit",
            NavigationMode::Preview => "[enter] next, [b]ack, [j <n>] jump, [r]estart, [q]uit",
        };
        let Some(command) = prompt_for_input(hint) else {
            return;
        };

        match command.as_str() {
            "q" => return,
            "b" => {
                if navigator.retreat() == Transition::Unchanged {
                    println!("Already at the first visited page.");
                }
            }
            "r" => navigator.reset(),
            other if other.starts_with('j') => {
                let target = other[1..].trim().parse::<usize>().ok();
                match target {
                    Some(n) if n > 0 => {
                        if let Err(e) = navigator.jump_to(n - 1) {
                            println!("{}", e);
                        }
                    }
                    _ => println!("Usage: j <page number>"),
                }
            }
            _ => {
                let transition = navigator.advance();
                if let Some(reason) = navigator.explain(&transition) {
                    println!("-> {}", reason);
                }
                if let Transition::Stayed { .. } = transition {
                    println!("This is the last page.");
                }
            }
        }
    }

    println!("\n--- Thank you! ---");
    print!("{}", navigator.summary());
}

/// Prompts for one question until the input is accepted or skipped. Returns
/// false when stdin is closed.
fn ask_question(
    navigator: &mut Navigator<'_>,
    page: usize,
    index: usize,
    question: &Question,
) -> bool {
    if let QuestionKind::TekstBlock { body } = &question.kind {
        println!("{}\n  {}", question.text, body);
        return true;
    }

    let current = navigator
        .answers()
        .lookup(page, index)
        .map(|answer| format!(" [current: {}]", answer))
        .unwrap_or_default();
    let options = question
        .kind
        .choices()
        .map(|choices| format!(" ({})", choices.join(" / ")))
        .unwrap_or_default();

    loop {
        let Some(raw) = prompt_for_input(&format!("{}{}{}", question.text, options, current))
        else {
            return false;
        };
        if raw.is_empty() {
            return true;
        }
        match navigator.record_input(page, index, &raw) {
            Ok(_) => return true,
            Err(e) => println!("{}", e),
        }
    }
}

/// Prints a prompt and reads one trimmed line. `None` on EOF or a read error.
fn prompt_for_input(prompt_text: &str) -> Option<String> {
    print!("> {}: ", prompt_text);
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
