use bidcheck_core::model::{
    composite_key, PackFilters, Question, QuestionPack, QuestionType, TestResult, TestRun, Verdict,
};
use bidcheck_core::storage::Store;
use chrono::Utc;

fn sample_pack(id: &str, name: &str) -> QuestionPack {
    QuestionPack {
        id: id.to_string(),
        name: name.to_string(),
        trades: vec!["plumbing".to_string()],
        questions: vec![Question {
            id: "q1".to_string(),
            key: "custom".to_string(),
            text: "Is a backflow preventer specified?".to_string(),
            qtype: QuestionType::Boolean,
            threshold: None,
            comparator: None,
            expected_boolean: Some(true),
            expected_enum: None,
            critical: false,
            weight: 5,
        }],
        filters: PackFilters::default(),
        created_at: Utc::now(),
    }
}

fn sample_run(pack_id: &str, project_id: &str, final_score: u32) -> TestRun {
    TestRun {
        id: format!("run-{}-{}", pack_id, final_score),
        pack_id: pack_id.to_string(),
        project_id: project_id.to_string(),
        results: vec![TestResult {
            question_id: "q1".to_string(),
            question: "Is a backflow preventer specified?".to_string(),
            answer: "Yes - per Division 22".to_string(),
            raw_response: "Yes - per Division 22".to_string(),
            passed: true,
            sources: vec![],
            critical: false,
            weight: 5,
        }],
        base_score: final_score,
        final_score,
        has_critical_fail: false,
        verdict: Verdict::Bid,
        completed_at: Utc::now(),
    }
}

#[test]
fn saving_twice_for_one_pair_keeps_exactly_one_entry_with_the_newer_data() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.init_schema()?;
    let pack = sample_pack("pack-a", "Plumbing Pack");

    store.save(&sample_run("pack-a", "itb-1", 40), &pack, "Plant A")?;
    store.save(&sample_run("pack-a", "itb-1", 90), &pack, "Plant A")?;

    let all = store.list_all()?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, composite_key("pack-a", "itb-1"));
    assert_eq!(all[0].test_run.final_score, 90);
    Ok(())
}

#[test]
fn rerun_promotes_the_pair_to_the_front_of_recency_order() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.init_schema()?;
    let pack_a = sample_pack("pack-a", "Pack A");
    let pack_b = sample_pack("pack-b", "Pack B");

    // Timestamps have second precision; force distinct ordering via explicit
    // created_at updates rather than sleeping through a second boundary.
    store.save(&sample_run("pack-a", "itb-1", 10), &pack_a, "Plant A")?;
    store.save(&sample_run("pack-b", "itb-1", 20), &pack_b, "Plant A")?;
    {
        let conn = store.conn.lock().unwrap();
        conn.execute(
            "UPDATE test_history SET created_at = '2026-01-01T00:00:00Z' WHERE pack_id = 'pack-a'",
            [],
        )?;
        conn.execute(
            "UPDATE test_history SET created_at = '2026-01-02T00:00:00Z' WHERE pack_id = 'pack-b'",
            [],
        )?;
    }
    let all = store.list_all()?;
    assert_eq!(all[0].pack_id, "pack-b");

    // Rerunning pack-a replaces its row with a fresh timestamp.
    store.save(&sample_run("pack-a", "itb-1", 95), &pack_a, "Plant A")?;
    let all = store.list_all()?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].pack_id, "pack-a");
    assert_eq!(all[0].test_run.final_score, 95);
    Ok(())
}

#[test]
fn get_and_delete_work_on_the_composite_key() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.init_schema()?;
    let pack = sample_pack("pack-a", "Pack A");
    store.save(&sample_run("pack-a", "itb-1", 50), &pack, "Plant A")?;

    let found = store.get("pack-a", "itb-1")?.expect("saved result");
    assert_eq!(found.pack_name, "Pack A");
    assert_eq!(found.project_name, "Plant A");
    assert!(store.get("pack-a", "itb-2")?.is_none());

    assert!(store.delete(&composite_key("pack-a", "itb-1"))?);
    assert!(!store.delete(&composite_key("pack-a", "itb-1"))?);
    assert!(store.get("pack-a", "itb-1")?.is_none());
    Ok(())
}

#[test]
fn pack_and_project_filters_select_the_right_rows() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.init_schema()?;
    let pack_a = sample_pack("pack-a", "Pack A");
    let pack_b = sample_pack("pack-b", "Pack B");

    store.save(&sample_run("pack-a", "itb-1", 10), &pack_a, "Plant A")?;
    store.save(&sample_run("pack-a", "itb-2", 20), &pack_a, "Plant B")?;
    store.save(&sample_run("pack-b", "itb-1", 30), &pack_b, "Plant A")?;

    assert_eq!(store.list_for_pack("pack-a")?.len(), 2);
    assert_eq!(store.list_for_project("itb-1")?.len(), 2);
    assert_eq!(store.list_for_project("itb-2")?.len(), 1);

    assert_eq!(store.clear_all()?, 3);
    assert!(store.list_all()?.is_empty());
    Ok(())
}

#[test]
fn saved_runs_round_trip_every_field() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.init_schema()?;
    let pack = sample_pack("pack-a", "Pack A");
    let mut run = sample_run("pack-a", "itb-1", 75);
    run.results[0].sources = vec![bidcheck_core::model::Source {
        filename: "Specs_22_Plumbing.pdf".to_string(),
        human_readable: "Division 22 - Plumbing Specifications".to_string(),
        page_num: 14,
        sheet_number: 2,
        section: "22 05 00".to_string(),
    }];

    let saved = store.save(&run, &pack, "Plant A")?;
    let loaded = store.get("pack-a", "itb-1")?.expect("saved result");

    assert_eq!(loaded.id, saved.id);
    assert_eq!(loaded.created_at, saved.created_at);
    assert_eq!(loaded.test_run.id, run.id);
    assert_eq!(loaded.test_run.completed_at, run.completed_at);
    assert_eq!(loaded.test_run.results[0].sources, run.results[0].sources);
    assert_eq!(loaded.test_run.verdict, Verdict::Bid);
    Ok(())
}

#[test]
fn history_survives_reopening_the_database() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("history.db");
    let pack = sample_pack("pack-a", "Pack A");

    {
        let store = Store::open(&db_path)?;
        store.init_schema()?;
        store.save(&sample_run("pack-a", "itb-1", 80), &pack, "Plant A")?;
    }

    let store = Store::open(&db_path)?;
    store.init_schema()?;
    let all = store.list_all()?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].test_run.final_score, 80);
    Ok(())
}
