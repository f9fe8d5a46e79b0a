//! End-to-end scenarios for the node view analytics.

use nodescope::{
    AnalyticsEngine, Dataset, GoalBook, MemoryStore, Money, Node, NodeId, Participant, Project,
    ProjectParticipation, UNKNOWN_NODE,
};

use crate::common::{FailingStore, Query, intern, network, production};

fn engine(dataset: Dataset) -> AnalyticsEngine<MemoryStore> {
    AnalyticsEngine::new(MemoryStore::new(dataset))
}

#[tokio::test]
async fn test_two_node_project_is_cross_node() {
    let analytics = engine(network())
        .compute_node_analytics(&NodeId::new("N1"))
        .await
        .expect("analytics should compute");

    let collaboration = &analytics.collaboration;
    assert_eq!(collaboration.count(), 1);

    let radio = &collaboration.projects()[0];
    assert_eq!(radio.project_id.as_str(), "P1");
    assert_eq!(radio.title, "Community Radio");
    assert_eq!(radio.description, "Weekly show");
    assert_eq!(radio.node_count, 2);
    assert_eq!(radio.node_names, vec!["Casa Norte", "Casa Sul"]);
    assert_eq!(radio.participant_names, vec!["Ana", "Bruno"]);
}

#[tokio::test]
async fn test_single_node_project_is_not_cross_node() {
    let dataset = Dataset::new()
        .with_node(Node::new("N1", "Casa Norte"))
        .with_participant(Participant::new("u1", "N1", "Ana"))
        .with_participant(Participant::new("u3", "N1", "Carla"))
        .with_project(Project::new("P2", "N1", "Print Shop"))
        .with_participation(ProjectParticipation::new("P2", "u1"))
        .with_participation(ProjectParticipation::new("P2", "u3"));

    let analytics = engine(dataset)
        .compute_node_analytics(&NodeId::new("N1"))
        .await
        .unwrap();

    assert_eq!(analytics.collaboration.count(), 0);
    assert!(analytics.collaboration.projects().is_empty());
}

#[tokio::test]
async fn test_revenue_against_goal() {
    let dataset = Dataset::new()
        .with_node(Node::new("N1", "Casa Norte"))
        .with_revenue(intern("N1", 3_000))
        .with_revenue(production("N1", 2_000));
    let engine = engine(dataset)
        .with_goals(GoalBook::new().with_node_goal("N1", Money::from_major(10_000)));

    let productivity = engine
        .compute_node_analytics(&NodeId::new("N1"))
        .await
        .unwrap()
        .productivity;

    assert_eq!(productivity.total, Money::from_major(5_000));
    assert_eq!(productivity.goal, Money::from_major(10_000));
    assert_eq!(productivity.percentage, 50);
    assert_eq!(productivity.category_totals["intern"], Money::from_major(3_000));
    assert_eq!(productivity.category_totals["production"], Money::from_major(2_000));
}

#[tokio::test]
async fn test_zero_goal_scores_zero() {
    let dataset = Dataset::new()
        .with_revenue(intern("N1", 3_000))
        .with_revenue(production("N1", 2_000));
    let engine = engine(dataset).with_goals(GoalBook::new().with_default(Money::ZERO));

    let productivity = engine
        .compute_node_analytics(&NodeId::new("N1"))
        .await
        .unwrap()
        .productivity;

    assert_eq!(productivity.total, Money::from_major(5_000));
    assert_eq!(productivity.percentage, 0);
}

#[tokio::test]
async fn test_ghost_participant_does_not_fail() {
    let dataset = Dataset::new()
        .with_node(Node::new("N1", "Casa Norte"))
        .with_participant(Participant::new("u1", "N1", "Ana"))
        .with_project(Project::new("P3", "N1", "Oral Histories"))
        .with_participation(ProjectParticipation::new("P3", "u1"))
        .with_participation(ProjectParticipation::new("P3", "ghost"));

    let report = engine(dataset)
        .node_report(&NodeId::new("N1"))
        .await
        .expect("ghost participants must not fail the computation");

    assert_eq!(report.analytics.collaboration.count(), 0);
    assert_eq!(report.build_stats.participations_linked, 1);
    assert_eq!(report.build_stats.dangling_refs.len(), 1);
    assert!(report.build_stats.dangling_refs[0].contains("ghost"));
}

#[tokio::test]
async fn test_transport_failure_is_an_error_not_a_zero_result() {
    for query in [
        Query::Projects,
        Query::Participations,
        Query::Participants,
        Query::Nodes,
        Query::Revenue,
        Query::Counts,
    ] {
        let engine = AnalyticsEngine::new(FailingStore::new(network(), query));
        let err = engine
            .compute_node_analytics(&NodeId::new("N1"))
            .await
            .expect_err("a store failure must surface as an error");

        assert!(err.is_transport(), "{query:?}: {err}");
        assert!(err.is_retryable());
    }
}

#[tokio::test]
async fn test_missing_participant_node_is_unknown() {
    let dataset = Dataset::new()
        .with_node(Node::new("N1", "Casa Norte"))
        .with_participant(Participant::new("u1", "N1", "Ana"))
        .with_participant(Participant::new("u9", "N9", "Iris"))
        .with_project(Project::new("P1", "N1", "Community Radio"))
        .with_participation(ProjectParticipation::new("P1", "u1"))
        .with_participation(ProjectParticipation::new("P1", "u9"));

    let report = engine(dataset).node_report(&NodeId::new("N1")).await.unwrap();

    let radio = &report.analytics.collaboration.projects()[0];
    assert_eq!(radio.node_names, vec!["Casa Norte", UNKNOWN_NODE]);
    assert_eq!(report.build_stats.unresolved_nodes, vec![NodeId::new("N9")]);
    assert_eq!(report.partners[0].node_name, UNKNOWN_NODE);
}

#[tokio::test]
async fn test_full_report_for_network() {
    let report = engine(network()).node_report(&NodeId::new("N1")).await.unwrap();

    assert_eq!(report.node_name.as_deref(), Some("Casa Norte"));
    assert_eq!(report.analytics.collaboration.count(), 1);
    assert_eq!(report.analytics.productivity.percentage, 10);

    assert_eq!(report.partners.len(), 1);
    assert_eq!(report.partners[0].node_id, NodeId::new("N2"));
    assert_eq!(report.partners[0].shared_projects, 1);

    let counts = report.counts.expect("counts are tracked for N1");
    assert_eq!(counts.governance_members, 7);
}

#[tokio::test]
async fn test_unknown_node_yields_empty_analytics() {
    let report = engine(network()).node_report(&NodeId::new("N404")).await.unwrap();

    assert!(report.node_name.is_none());
    assert_eq!(report.analytics.collaboration.count(), 0);
    assert_eq!(report.analytics.productivity.total, Money::ZERO);
    assert!(report.counts.is_none());
}
