use super::super::args::{HistoryArgs, HistorySub};
use crate::exit_codes::{PARTIAL, SUCCESS};
use anyhow::Context;
use bidcheck_core::model::SavedTestResult;
use bidcheck_core::report::console::render_run;
use bidcheck_core::storage::Store;

pub(crate) async fn run(args: HistoryArgs) -> anyhow::Result<i32> {
    let store =
        Store::open(&args.db).with_context(|| format!("open history db {}", args.db.display()))?;
    store.init_schema()?;

    match args.cmd {
        HistorySub::List { pack, project } => {
            let results = match (pack, project) {
                (Some(pack_id), _) => store.list_for_pack(&pack_id)?,
                (None, Some(project_id)) => store.list_for_project(&project_id)?,
                (None, None) => store.list_all()?,
            };
            if results.is_empty() {
                eprintln!("no saved results");
            }
            for saved in &results {
                println!("{}", list_line(saved));
            }
            Ok(SUCCESS)
        }
        HistorySub::Show {
            pack,
            project,
            json,
        } => match store.get(&pack, &project)? {
            Some(saved) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&saved)?);
                } else {
                    println!(
                        "{} vs {} (saved {})",
                        saved.pack_name,
                        saved.project_name,
                        saved.created_at.format("%Y-%m-%d %H:%M:%S")
                    );
                    print!("{}", render_run(&saved.test_run));
                }
                Ok(SUCCESS)
            }
            None => {
                eprintln!("no saved result for pack={} project={}", pack, project);
                Ok(PARTIAL)
            }
        },
        HistorySub::Delete { id } => {
            if store.delete(&id)? {
                eprintln!("deleted: {}", id);
                Ok(SUCCESS)
            } else {
                eprintln!("not found: {}", id);
                Ok(PARTIAL)
            }
        }
        HistorySub::Clear => {
            let n = store.clear_all()?;
            eprintln!("cleared {} saved result(s)", n);
            Ok(SUCCESS)
        }
    }
}

fn list_line(saved: &SavedTestResult) -> String {
    format!(
        "{}  {}  {} vs {}  score {}  {}",
        saved.created_at.format("%Y-%m-%d %H:%M:%S"),
        saved.id,
        saved.pack_name,
        saved.project_name,
        saved.test_run.final_score,
        saved.test_run.verdict
    )
}
