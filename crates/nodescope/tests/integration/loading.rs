//! Store access patterns of a computation.

use nodescope::{AnalyticsEngine, NodeId};
use std::sync::Arc;

use crate::common::{CountingStore, Query, network};

#[tokio::test]
async fn test_each_query_is_one_batch() {
    let store = Arc::new(CountingStore::new(network()));
    let engine = AnalyticsEngine::new(Arc::clone(&store));

    engine
        .compute_node_analytics(&NodeId::new("N1"))
        .await
        .unwrap();

    for query in [
        Query::Projects,
        Query::Participations,
        Query::Participants,
        Query::Nodes,
        Query::Revenue,
        Query::Counts,
    ] {
        assert_eq!(store.count(query), 1, "{query:?} should be called once");
    }

    // four projects; u1, u2, u3 and the ghost; N1 and N2
    assert_eq!(store.batch_size(Query::Participations), Some(4));
    assert_eq!(store.batch_size(Query::Participants), Some(4));
    assert_eq!(store.batch_size(Query::Nodes), Some(2));
}

#[tokio::test]
async fn test_node_without_projects_skips_dependent_queries() {
    let store = Arc::new(CountingStore::new(network()));
    let engine = AnalyticsEngine::new(Arc::clone(&store));

    let analytics = engine
        .compute_node_analytics(&NodeId::new("N3"))
        .await
        .unwrap();

    assert_eq!(analytics.collaboration.count(), 0);
    assert_eq!(store.count(Query::Projects), 1);
    assert_eq!(store.count(Query::Participations), 0);
    assert_eq!(store.count(Query::Participants), 0);
    // only the focal node, for its name
    assert_eq!(store.batch_size(Query::Nodes), Some(1));
    assert_eq!(store.count(Query::Revenue), 1);
}

#[tokio::test]
async fn test_nothing_is_cached_between_computations() {
    let store = Arc::new(CountingStore::new(network()));
    let engine = AnalyticsEngine::new(Arc::clone(&store));
    let n1 = NodeId::new("N1");

    let first = engine.compute_node_analytics(&n1).await.unwrap();
    let second = engine.compute_node_analytics(&n1).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.count(Query::Projects), 2);
    assert_eq!(store.count(Query::Revenue), 2);
}

#[tokio::test]
async fn test_blank_node_id_is_rejected_before_any_query() {
    let store = Arc::new(CountingStore::new(network()));
    let engine = AnalyticsEngine::new(Arc::clone(&store));

    let err = engine
        .compute_node_analytics(&NodeId::new(" "))
        .await
        .unwrap_err();

    assert!(!err.is_retryable());
    assert!(store.calls().is_empty());
}
