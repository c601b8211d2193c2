//! Tests for graph edits and the submission/commit flow of a project session.
mod common;
use common::*;
use workgraph::prelude::*;

fn bridge_message() -> String {
    let json = serde_json::to_string(&bridge_payload()).unwrap();
    fenced(&json)
}

#[test]
fn test_add_and_connect_a_node() {
    let mut graph = materialize(&bridge_payload(), "Bridge").unwrap();
    let added = graph.add_work_node(Position::new(10.0, 10.0));

    let node = graph.node(&added).unwrap();
    assert_eq!(node.label, "New Node");
    assert_eq!(node.details.status, WorkStatus::Pending);
    assert!(node.details.work_order_id.is_none());

    let edge = graph.connect(&wid("4"), &added).unwrap().clone();
    assert_eq!(edge.source, wid("4"));
    assert_eq!(edge.target, added);
    assert!(graph.dangling_edges().is_empty());
}

#[test]
fn test_added_node_ids_are_unique() {
    let mut graph = Graph::default();
    let first = graph.add_work_node(Position::default());
    let second = graph.add_work_node(Position::default());
    graph.remove_nodes(&[first.as_str()]).unwrap();
    let third = graph.add_work_node(Position::default());

    assert_ne!(first, second);
    assert_ne!(second, third);
    assert_eq!(graph.nodes.len(), 2);
}

#[test]
fn test_connect_rejects_invalid_edges() {
    let mut graph = materialize(&bridge_payload(), "Bridge").unwrap();

    assert_eq!(
        graph.connect(&wid("1"), &wid("1")).unwrap_err(),
        EditError::SelfLoop(wid("1"))
    );
    assert_eq!(
        graph.connect(&wid("1"), "work:missing").unwrap_err(),
        EditError::NodeNotFound("work:missing".to_string())
    );
    assert_eq!(
        graph.connect(&wid("1"), &wid("2")).unwrap_err(),
        EditError::DuplicateEdge {
            source_id: wid("1"),
            target_id: wid("2"),
        }
    );
    assert_eq!(graph.edges.len(), 6);
}

#[test]
fn test_remove_nodes_drops_incident_edges() {
    let mut graph = materialize(&bridge_payload(), "Bridge").unwrap();
    let foundation = wid("2");

    let removed = graph.remove_nodes(&[foundation.as_str()]).unwrap();
    assert_eq!(removed.len(), 1);
    assert!(graph.node(&foundation).is_none());
    assert!(!graph.has_edge(&wid("1"), &foundation));
    assert!(!graph.has_edge(&foundation, &wid("4")));
    assert!(graph.dangling_edges().is_empty());
    assert_eq!(graph.edges.len(), 4);
}

#[test]
fn test_project_node_cannot_be_removed() {
    let mut graph = materialize(&bridge_payload(), "Bridge").unwrap();
    let before = graph.clone();

    let result = graph.remove_nodes(&[wid("3").as_str(), ROOT_NODE_ID]);
    assert_eq!(result.unwrap_err(), EditError::ProtectedNode(ROOT_NODE_ID.to_string()));
    assert_eq!(graph, before);
}

#[test]
fn test_remove_edges() {
    let mut graph = materialize(&bridge_payload(), "Bridge").unwrap();
    let edge_id = graph.edges[1].id.clone();

    let removed = graph.remove_edges(&[edge_id.as_str()]).unwrap();
    assert_eq!(removed[0].id, edge_id);
    assert_eq!(graph.edges.len(), 5);

    assert_eq!(
        graph.remove_edges(&[edge_id.as_str()]).unwrap_err(),
        EditError::EdgeNotFound(edge_id.clone())
    );
}

#[test]
fn test_edge_ids_stay_distinct_when_ids_contain_arrows() {
    let payload = Payload::new(vec![
        WorkOrder::new("a", "A", 1.0, 1.0).with_children(["b->work:c"]),
        WorkOrder::new("a->work:b", "AB", 1.0, 1.0).with_children(["c"]),
        WorkOrder::new("b->work:c", "BC", 1.0, 1.0),
        WorkOrder::new("c", "C", 1.0, 1.0),
    ]);
    let mut graph = materialize(&payload, "Arrows").unwrap();

    let first = graph.edges.iter().find(|e| e.source == wid("a")).unwrap().id.clone();
    let second = graph
        .edges
        .iter()
        .find(|e| e.source == wid("a->work:b"))
        .unwrap()
        .id
        .clone();
    assert_ne!(first, second);

    let removed = graph.remove_edges(&[first.as_str()]).unwrap();
    assert_eq!(removed.len(), 1);
    assert!(graph.has_edge(&wid("a->work:b"), &wid("c")));
}

#[test]
fn test_move_relabel_and_update_details() {
    let mut graph = materialize(&bridge_payload(), "Bridge").unwrap();
    let permits = wid("3");

    graph.move_node(&permits, Position::new(42.0, 7.0)).unwrap();
    graph.set_label(&permits, "Permits and inspections").unwrap();
    let mut details = graph.node(&permits).unwrap().details.clone();
    details.status = WorkStatus::Completed;
    graph.update_details(&permits, details).unwrap();

    let node = graph.node(&permits).unwrap();
    assert_eq!(node.position, Position::new(42.0, 7.0));
    assert_eq!(node.label, "Permits and inspections");
    assert_eq!(node.details.status, WorkStatus::Completed);

    assert_eq!(
        graph.set_label("work:nope", "x").unwrap_err(),
        EditError::NodeNotFound("work:nope".to_string())
    );
}

#[test]
fn test_session_installs_the_latest_submission() {
    let mut session = ProjectSession::new(Materializer::default());
    assert!(!session.is_busy());

    let ticket = session.begin_submission();
    assert!(session.is_busy());

    let graph = session.complete(ticket, &bridge_message(), "Bridge").unwrap();
    assert_eq!(graph.nodes.len(), 7);
    assert!(!session.is_busy());
    assert_eq!(session.revision(), 1);
}

#[test]
fn test_stale_submission_is_discarded() {
    let mut session = ProjectSession::new(Materializer::default());
    let first = session.begin_submission();
    let second = session.begin_submission();

    let stale = session.complete(first, &bridge_message(), "Old bridge");
    assert_eq!(
        stale.unwrap_err(),
        SessionError::StaleSubmission {
            ticket: first.number(),
            latest: second.number(),
        }
    );
    assert!(session.graph().is_none());
    assert!(session.is_busy());

    session.complete(second, &bridge_message(), "New bridge").unwrap();
    assert_eq!(session.graph().unwrap().root().unwrap().label, "New bridge");
}

#[test]
fn test_completing_twice_is_rejected() {
    let mut session = ProjectSession::new(Materializer::default());
    let ticket = session.begin_submission();
    session
        .complete_with_payload(ticket, &bridge_payload(), "Bridge")
        .unwrap();

    assert_eq!(
        session
            .complete_with_payload(ticket, &bridge_payload(), "Bridge")
            .unwrap_err(),
        SessionError::NoSubmissionInFlight
    );
}

#[test]
fn test_failed_submission_keeps_previous_graph() {
    let mut session = ProjectSession::new(Materializer::default());
    let ticket = session.begin_submission();
    session.complete(ticket, &bridge_message(), "Bridge").unwrap();

    let retry = session.begin_submission();
    let result = session.complete(retry, &fenced("{}"), "Broken");
    assert!(matches!(result, Err(SessionError::Envelope(_))));
    assert!(!session.is_busy());
    assert_eq!(session.graph().unwrap().root().unwrap().label, "Bridge");
    assert_eq!(session.revision(), 1);

    let abandoned = session.begin_submission();
    session.abandon(abandoned).unwrap();
    assert!(!session.is_busy());
}

#[test]
fn test_commit_publishes_edits() {
    let mut session = ProjectSession::new(Materializer::default());
    assert_eq!(session.checkout().unwrap_err(), SessionError::NothingToCommit);

    let ticket = session.begin_submission();
    session.complete(ticket, &bridge_message(), "Bridge").unwrap();

    let mut copy = session.checkout().unwrap();
    let added = copy.graph_mut().add_work_node(Position::default());
    copy.graph_mut().connect(ROOT_NODE_ID, &added).unwrap();

    let revision = session.commit(copy).unwrap();
    assert_eq!(revision, 2);
    assert!(session.graph().unwrap().contains_node(&added));
}

#[test]
fn test_commit_against_outdated_revision_conflicts() {
    let mut session = ProjectSession::new(Materializer::default());
    let ticket = session.begin_submission();
    session.complete(ticket, &bridge_message(), "Bridge").unwrap();

    let mut copy = session.checkout().unwrap();
    copy.graph_mut().add_work_node(Position::default());

    let newer = session.begin_submission();
    session.complete(newer, &bridge_message(), "Bridge v2").unwrap();

    assert_eq!(
        session.commit(copy).unwrap_err(),
        SessionError::RevisionConflict {
            expected: 2,
            found: 1,
        }
    );
    assert_eq!(session.graph().unwrap().nodes.len(), 7);
}
