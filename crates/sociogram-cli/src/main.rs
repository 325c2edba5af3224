use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sociogram_common::config::AppConfig;
use sociogram_core::engine::community_display_name;
use sociogram_core::{
    load_graph_from_csv, walkthrough, AnalysisEngine, CommunityDetector, DetectionConfig,
    LinkPredictor, SocialGraph,
};

#[derive(Parser)]
#[command(name = "sociogram")]
#[command(about = "Sociogram - social network analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pipeline over a CSV edge list
    Analyze {
        /// CSV file: source,target[,weight] with a header row
        file: PathBuf,
    },

    /// Detect communities only
    Communities {
        /// CSV file: source,target[,weight] with a header row
        file: PathBuf,

        /// Detection algorithm (greedy, lpa, weighted-lpa, louvain)
        #[arg(short, long)]
        algorithm: Option<String>,
    },

    /// Predict likely missing links only
    Predict {
        /// CSV file: source,target[,weight] with a header row
        file: PathBuf,

        /// Number of candidates to report
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Print the fixed four-node walkthrough
    Demo,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load()?;
    tracing::debug!(algorithm = %config.community.algorithm, "configuration loaded");

    match &cli.command {
        Commands::Analyze { file } => {
            let graph = load_graph_from_csv(file)?;
            let report = AnalysisEngine::new(config).analyze(&graph)?;
            match cli.output {
                OutputFormat::Text => print!("{}", report.render_text()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }

        Commands::Communities { file, algorithm } => {
            let graph = load_graph_from_csv(file)?;
            let mut community_config = config.community.clone();
            if let Some(algorithm) = algorithm {
                community_config.algorithm = algorithm.clone();
            }
            let result = CommunityDetector::new(DetectionConfig::from_app(&community_config)?)
                .detect(&graph)?;

            match cli.output {
                OutputFormat::Text => {
                    print_assignments(&graph, &result.node_to_community);
                    println!(
                        "Communities: {}  Modularity: {:.4}",
                        result.num_communities, result.modularity
                    );
                }
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "communities": result.node_to_community,
                        "community_count": result.num_communities,
                        "modularity": result.modularity,
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
            }
        }

        Commands::Predict { file, top } => {
            let graph = load_graph_from_csv(file)?;
            let mut prediction_config = config.prediction.clone();
            if let Some(top) = top {
                prediction_config.top_k = *top;
            }
            let predictions = LinkPredictor::from_app(&prediction_config)?.predict(&graph);

            match cli.output {
                OutputFormat::Text => {
                    if predictions.is_empty() {
                        println!("No link candidates.");
                    }
                    for link in &predictions {
                        println!(
                            "Potential link: {}-{} ({:.2}%)",
                            link.source, link.target, link.probability
                        );
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&predictions)?);
                }
            }
        }

        Commands::Demo => {
            print!("{}", walkthrough::render());
        }
    }

    Ok(())
}

fn print_assignments(
    graph: &SocialGraph,
    assignments: &std::collections::HashMap<String, usize>,
) {
    for node in graph.nodes() {
        if let Some(&community) = assignments.get(&node) {
            println!("Node {}: {}", node, community_display_name(community));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_demo_matches_console_contract() {
        assert_eq!(
            walkthrough::render(),
            "Node 1: Community A\n\
             Node 2: Community B\n\
             Node 3: Community A\n\
             Node 4: Community B\n\
             Potential link: 1-3\n"
        );
    }
}
