//! CLI entry point for the Mythos test-data generator.
//!
//! Creates a small shared ability set plus `--amount` characters, each
//! linked to every ability, all through the DAO inside one transaction.
//! Without `--commit` the transaction is rolled back, which makes dry runs
//! safe against a shared database.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use mythos_core::config::GraphSettings;
use mythos_core::types::{Ability, AbilityInput, Character, CharacterInput, Gender};
use mythos_graph::edge::create_relationship;
use mythos_graph::{GraphClient, GraphConfig, NodeDao};

const ABILITIES: &[(&str, &str)] = &[
    ("fireball", "Hurl a ball of fire at a single target"),
    ("frostbolt", "Slow a target with a bolt of frost"),
    ("heal", "Restore health to an ally"),
];

#[derive(Parser)]
#[command(name = "mythos-seed")]
#[command(about = "Test-data generator for the Mythos graph")]
struct Cli {
    /// Number of characters to create.
    #[arg(short, long, default_value_t = 10)]
    amount: u32,

    /// Commit the generated data (default: dry run, rolled back).
    #[arg(long)]
    commit: bool,

    /// Config file prefix (default: mythos).
    #[arg(short, long, default_value = "mythos")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let graph_config: GraphConfig = load_graph_settings(&cli.config)?.into();
    let client = GraphClient::connect(&graph_config).await?;

    let characters = NodeDao::<Character>::new();
    let abilities = NodeDao::<Ability>::new();

    let mut txn = client.start_txn().await?;

    let mut ability_ids = Vec::with_capacity(ABILITIES.len());
    for (name, description) in ABILITIES {
        let input = AbilityInput {
            name: (*name).to_string(),
            description: Some((*description).to_string()),
        };
        input.validate()?;

        // Reuse an existing ability of the same name instead of duplicating.
        let id = match abilities.get_by_properties(&mut txn, &input).await? {
            Some(existing) => existing
                .id
                .ok_or_else(|| anyhow::anyhow!("hydrated ability is missing an id"))?,
            None => abilities.create(&mut txn, &input).await?,
        };
        ability_ids.push(id);
    }

    for n in 0..cli.amount {
        let gender = if n % 2 == 0 {
            Gender::Female
        } else {
            Gender::Male
        };
        let input = CharacterInput::new(format!("hero-{}", Uuid::new_v4()), gender);
        input.validate()?;

        let character_id = characters.create(&mut txn, &input).await?;
        for ability_id in &ability_ids {
            create_relationship(&mut txn, character_id, *ability_id, "HAS_ABILITY").await?;
        }
    }

    if cli.commit {
        txn.commit().await?;
        tracing::info!(amount = cli.amount, "Seeded characters");
    } else {
        txn.rollback().await?;
        tracing::info!(amount = cli.amount, "Dry run complete, rolled back");
    }

    Ok(())
}

fn load_graph_settings(file_prefix: &str) -> anyhow::Result<GraphSettings> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("MYTHOS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    match cfg.get::<GraphSettings>("neo4j") {
        Ok(settings) => Ok(settings),
        Err(_) => Ok(GraphSettings::default()),
    }
}
