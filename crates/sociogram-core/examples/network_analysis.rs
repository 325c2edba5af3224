use anyhow::Result;
use sociogram_core::{AnalysisEngine, Edge, SocialGraph};

fn main() -> Result<()> {
    println!("--- Sociogram Network Analysis ---");
    println!("Goal: analyze a small friendship network");

    // 1. Build the graph
    // Two friend groups connected through dana
    let connections = vec![
        ("alice", "bob"),
        ("bob", "carol"),
        ("carol", "alice"),
        ("dana", "erin"),
        ("erin", "frank"),
        ("frank", "dana"),
        ("carol", "dana"),
    ];

    let mut graph = SocialGraph::new();
    println!("\nBuilding edges...");
    for (a, b) in connections {
        graph.add_edge(&Edge::new(a, b));
    }
    println!(
        "   {} members, {} connections",
        graph.node_count(),
        graph.edge_count()
    );

    // 2. Run the full pipeline
    let report = AnalysisEngine::with_defaults().analyze(&graph)?;

    println!("\nCommunities ({}):", report.community_count);
    for node in &report.nodes {
        println!("   {} -> community {}", node, report.communities[node]);
    }

    println!("\nLikely future connections:");
    for link in &report.predictions {
        println!(
            "   {} - {} ({:.2}%)",
            link.source, link.target, link.probability
        );
    }

    println!("\nHeadline members:");
    println!("   Most central:        {}", report.most_central);
    println!("   Highest betweenness: {}", report.highest_betweenness);
    println!("   Highest closeness:   {}", report.highest_closeness);

    Ok(())
}
