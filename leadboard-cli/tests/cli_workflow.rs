//! End-to-end command flow through the CLI dispatcher

use leadboard_cli::cli::{ColumnAction, Commands, LeadAction, LeadFieldArgs, OrgAction};
use leadboard_cli::{render, OutputFormat, Runner};
use leadboard_config::LeadboardConfig;
use serde_json::Value;
use tempfile::TempDir;

fn runner(temp: &TempDir) -> Runner {
    Runner::new(&LeadboardConfig {
        data_dir: temp.path().join("data"),
        actor: Some("ops@acme.test".into()),
        reject_stale_commits: true,
        ..Default::default()
    })
}

async fn add_lead(runner: &Runner, name: &str) -> Value {
    runner
        .execute(Commands::Lead {
            action: LeadAction::Add {
                org: "acme".into(),
                name: name.into(),
                column: None,
                fields: LeadFieldArgs::default(),
            },
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_board_workflow() {
    let temp = TempDir::new().unwrap();
    let runner = runner(&temp);

    let org = runner
        .execute(Commands::Org {
            action: OrgAction::Init {
                name: "Acme".into(),
                slug: "acme".into(),
            },
        })
        .await
        .unwrap();
    assert_eq!(org["slug"], "acme");

    let won = runner
        .execute(Commands::Column {
            action: ColumnAction::Add {
                org: "acme".into(),
                title: "Closed".into(),
            },
        })
        .await
        .unwrap();

    let ana = add_lead(&runner, "Ana").await;
    add_lead(&runner, "Bruno").await;

    let moved = runner
        .execute(Commands::Lead {
            action: LeadAction::Move {
                org: "acme".into(),
                id: ana["id"].as_str().unwrap().into(),
                column: won["id"].as_str().unwrap().into(),
                position: 1,
                expected_version: Some(ana["version"].as_u64().unwrap()),
            },
        })
        .await
        .unwrap();
    assert_eq!(moved["column_id"], won["id"]);

    let board = runner
        .execute(Commands::Board { org: "acme".into() })
        .await
        .unwrap();
    let rendered = render(&board, OutputFormat::Table).unwrap();
    assert!(rendered.contains("Closed (1)"));
    assert!(rendered.contains("Ana [1]"));
    assert!(rendered.contains("Bruno"));

    // Ana's version moved on, so replaying the old version is stale
    let stale = runner
        .execute(Commands::Lead {
            action: LeadAction::Move {
                org: "acme".into(),
                id: ana["id"].as_str().unwrap().into(),
                column: ana["column_id"].as_str().unwrap().into(),
                position: 0,
                expected_version: Some(ana["version"].as_u64().unwrap()),
            },
        })
        .await;
    assert!(stale.is_err());

    let activity = runner
        .execute(Commands::Activity { limit: Some(10) })
        .await
        .unwrap();
    let entries = activity["entries"].as_array().unwrap();
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e["actor"] == "ops@acme.test"));
}

#[tokio::test]
async fn test_ingest_from_file() {
    let temp = TempDir::new().unwrap();
    let runner = runner(&temp);
    runner
        .execute(Commands::Org {
            action: OrgAction::Init {
                name: "Acme".into(),
                slug: "acme".into(),
            },
        })
        .await
        .unwrap();

    let body = temp.path().join("body.txt");
    std::fs::write(&body, "nome=Carla+Dias&email=carla%40example.com&utm_campaign=spring").unwrap();

    let lead = runner
        .execute(Commands::Ingest {
            org: "acme".into(),
            content_type: Some("application/x-www-form-urlencoded".into()),
            file: Some(body),
        })
        .await
        .unwrap();

    assert_eq!(lead["name"], "Carla Dias");
    assert_eq!(lead["email"], "carla@example.com");
    assert_eq!(lead["campaign_source"], "spring");
    assert_eq!(lead["position"], 0);
}
