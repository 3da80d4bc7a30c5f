//! Integration tests for activity logging

use leadboard_kanban::{
    activity::ListActivity,
    column::{AddColumn, DeleteColumn, ListColumns},
    lead::{AddLead, GetLead, MoveLead},
    organization::InitOrganization,
    KanbanContext, KanbanOperationProcessor, OperationProcessor,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_activity_logging_end_to_end() {
    let temp = TempDir::new().unwrap();
    let ctx = KanbanContext::new(temp.path().join("data"));
    let processor = KanbanOperationProcessor::with_actor("ana@acme.test");

    let org = processor
        .process(&InitOrganization::new("Acme", "acme"), &ctx)
        .await
        .unwrap();
    let org = org["id"].as_str().unwrap().to_string();

    let column = processor
        .process(&AddColumn::new(org.as_str(), "Lost"), &ctx)
        .await
        .unwrap();
    let lead = processor
        .process(&AddLead::new(org.as_str(), "Bruno"), &ctx)
        .await
        .unwrap();
    let lead_id = lead["id"].as_str().unwrap();

    processor
        .process(
            &MoveLead::new(org.as_str(), lead_id, column["id"].as_str().unwrap(), 0),
            &ctx,
        )
        .await
        .unwrap();

    // Reads are not logged
    processor
        .process(&GetLead::new(org.as_str(), lead_id), &ctx)
        .await
        .unwrap();
    processor
        .process(&ListColumns::new(org.as_str()), &ctx)
        .await
        .unwrap();

    let entries = ctx.read_activity(None).await.unwrap();
    let ops: Vec<_> = entries.iter().map(|e| e.op.as_str()).collect();
    assert_eq!(
        ops,
        vec!["move lead", "add lead", "add column", "init organization"]
    );
    assert!(entries
        .iter()
        .all(|e| e.actor.as_deref() == Some("ana@acme.test")));
    assert!(ctx.activity_path().exists());
}

#[tokio::test]
async fn test_rejected_mutations_are_logged() {
    let temp = TempDir::new().unwrap();
    let ctx = KanbanContext::new(temp.path().join("data"));
    let processor = KanbanOperationProcessor::new();

    let org = processor
        .process(&InitOrganization::new("Acme", "acme"), &ctx)
        .await
        .unwrap();
    let inbox = org["columns"][0]["id"].as_str().unwrap();

    let result = processor
        .process(&DeleteColumn::new(org["id"].as_str().unwrap(), inbox), &ctx)
        .await;
    assert!(result.is_err());

    let activity = processor
        .process(&ListActivity::new(), &ctx)
        .await
        .unwrap();
    assert_eq!(activity["count"], 2);
    assert_eq!(activity["entries"][0]["op"], "delete column");
    assert!(activity["entries"][0]["output"]["error"]
        .as_str()
        .unwrap()
        .contains("default column"));
}
