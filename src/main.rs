use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use scent_quiz::classifier::Classifier;
use scent_quiz::config::ClassifierConfig;
use scent_quiz::graph::{Edges, Node, fragrance_graph};
use scent_quiz::orchestrator::{AnswerInput, Orchestrator, Outcome};

fn render(node: &Node) {
    println!("\n{}", node.prompt);
    if let Edges::Choices { options } = &node.edges {
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option.caption);
        }
    }
    eprint!("> ");
}

/// Turn a line of input into an answer for the current node. Choice nodes
/// accept an option number or an option id; everything else is free text.
fn parse_input(node: &Node, line: &str) -> Option<AnswerInput> {
    let Edges::Choices { options } = &node.edges else {
        return Some(AnswerInput::Text(line.to_string()));
    };
    if let Ok(n) = line.parse::<usize>() {
        let option = options.get(n.checked_sub(1)?)?;
        return Some(AnswerInput::Choice {
            choice_id: option.id.clone(),
        });
    }
    options
        .iter()
        .find(|o| o.id == line)
        .map(|o| AnswerInput::Choice {
            choice_id: o.id.clone(),
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ClassifierConfig::from_env()?;

    eprintln!("🌸 Scent Quiz v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   Classification: {}",
        if config.has_credential() {
            format!("remote ({}) with local fallback", config.model)
        } else {
            "local keyword routing (no OPENAI_API_KEY set)".to_string()
        }
    );
    eprintln!("   Commands: /back, /restart, /quit\n");

    let graph = Arc::new(fragrance_graph()?);
    let classifier = Classifier::from_config(&config);
    let mut quiz = Orchestrator::new(graph, classifier);

    render(quiz.current_node()?);

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        match line.as_str() {
            "/quit" => break,
            "/restart" => {
                let entry = quiz.reset().clone();
                render(&entry);
            }
            "/back" => {
                if quiz.session().can_go_back() {
                    let node = quiz.go_back()?;
                    render(&node);
                } else {
                    println!("Nothing to go back to.");
                    eprint!("> ");
                }
            }
            _ => {
                let node = quiz.current_node()?.clone();
                let Some(input) = parse_input(&node, &line) else {
                    if let Edges::Choices { options } = &node.edges {
                        println!("Please pick an option (1-{}).", options.len());
                    }
                    eprint!("> ");
                    continue;
                };
                match quiz.submit_answer(input).await? {
                    Outcome::Advanced { node } => render(&node),
                    Outcome::Finished {
                        profile,
                        transcript,
                    } => {
                        println!("\n✨ Your fragrance profile: {}", profile.profile);
                        println!("   {}", profile.character);
                        println!("\nYour journey ({} answers):", transcript.len());
                        for entry in &transcript {
                            println!("  Q: {}", entry.question);
                            println!("  A: {}", entry.answer);
                        }
                        println!("\nType /restart to take the quiz again, or /quit.");
                        eprint!("> ");
                    }
                }
            }
        }
    }

    Ok(())
}
