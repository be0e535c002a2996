use anyhow::Result;
use clap::Parser;
use detective_quest::events::ConsoleRenderer;
use detective_quest::evidence::DEFAULT_BUCKETS;
use detective_quest::input::ConsoleInput;
use detective_quest::verdict::DEFAULT_THRESHOLD;
use detective_quest::{HashStrategy, Scenario, SessionConfig, VerdictRules, run_session};

#[derive(Parser, Debug)]
#[command(name = "detective-quest")]
#[command(about = "Explore the mansion, collect clues and accuse a suspect", long_about = None)]
struct Args {
    /// Which mansion to play
    #[arg(short, long, value_enum, default_value_t = Scenario::Master)]
    scenario: Scenario,

    /// Hash function of the evidence table
    #[arg(long, value_enum, default_value_t = HashStrategy::Djb2)]
    hasher: HashStrategy,

    /// Bucket count of the evidence table
    #[arg(long, default_value_t = DEFAULT_BUCKETS)]
    buckets: usize,

    /// Matching clues needed to uphold an accusation
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: usize,

    /// Print the session report as JSON once the game is over
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = SessionConfig {
        scenario: args.scenario,
        hash: args.hasher,
        buckets: args.buckets,
        rules: VerdictRules {
            threshold: args.threshold,
        },
    };

    let mut input = ConsoleInput::new(std::io::stdin().lock());
    let mut renderer = ConsoleRenderer::new(std::io::stdout().lock());
    let report = run_session(&config, &mut input, &mut renderer)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
