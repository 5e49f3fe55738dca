use super::super::args::{RunArgs, StrategyArg};
use crate::exit_codes::{PARTIAL, SUCCESS};
use anyhow::Context;
use bidcheck_core::model::QuestionPack;
use bidcheck_core::providers::qa::graph_rag::DEFAULT_ENDPOINT;
use bidcheck_core::providers::qa::GraphRagClient;
use bidcheck_core::report::console::render_run;
use bidcheck_core::report::progress::stderr_progress_sink;
use bidcheck_core::storage::Store;
use bidcheck_core::{Runner, ScoreStrategy};
use std::sync::Arc;
use std::time::Duration;

pub(crate) async fn run(args: RunArgs) -> anyhow::Result<i32> {
    let pack = load_pack(&args.pack)?;
    let project_name = args.project_name.as_deref().unwrap_or(&args.project);

    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let client = Arc::new(GraphRagClient::new(endpoint));

    let mut runner = Runner::new(client)
        .with_timeout(Duration::from_secs(args.timeout_seconds))
        .with_strategy(match args.strategy {
            StrategyArg::Bid => ScoreStrategy::BidAboveThreshold,
            StrategyArg::Pass => ScoreStrategy::PassAboveThreshold,
        });

    if !args.no_save {
        let store = Store::open(&args.db)
            .with_context(|| format!("open history db {}", args.db.display()))?;
        store.init_schema()?;
        runner = runner.with_history(Arc::new(store));
    }

    let progress = stderr_progress_sink(pack.questions.len());
    let outcome = runner
        .run_pack(&pack, &args.project, project_name, progress)
        .await
        .map_err(|e| anyhow::anyhow!("run failed before any question: {}", e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.run)?);
    } else {
        print!("{}", render_run(&outcome.run));
    }

    if let Some(err) = outcome.save_error {
        eprintln!("warning: run completed but could not be saved: {}", err);
        return Ok(PARTIAL);
    }
    Ok(SUCCESS)
}

fn load_pack(path: &std::path::Path) -> anyhow::Result<QuestionPack> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read pack file {}", path.display()))?;
    let pack: QuestionPack =
        serde_yaml::from_str(&raw).with_context(|| format!("parse pack {}", path.display()))?;
    Ok(pack)
}
