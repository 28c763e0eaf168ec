//! Tests for routing table lookup and atomic replacement

use agentgate::routing::{Category, RoutingTable, SharedRoutingTable};
use std::sync::Arc;

fn table(generation: &str) -> RoutingTable {
    RoutingTable::new(
        vec![(
            format!("mcp-{}", generation),
            format!("http://localhost:1000/{}", generation),
        )],
        vec![(
            format!("a2a-{}", generation),
            format!("http://localhost:2000/{}", generation),
        )],
    )
}

#[test]
fn resolve_is_exact_match_only() {
    let table = RoutingTable::new(
        vec![
            ("echo".to_string(), "https://echo.example.com".to_string()),
            ("echo2".to_string(), "https://echo2.example.com".to_string()),
        ],
        vec![],
    );

    assert_eq!(
        table.resolve(Category::Mcp, "echo"),
        Some("https://echo.example.com")
    );
    assert_eq!(table.resolve(Category::Mcp, "ECHO"), None);
    assert_eq!(table.resolve(Category::Mcp, "ech"), None);
    assert_eq!(table.resolve(Category::Mcp, "echo "), None);
    // Categories are disjoint namespaces
    assert_eq!(table.resolve(Category::A2a, "echo"), None);
}

#[test]
fn names_follow_configuration_order_not_sorted_order() {
    let table = RoutingTable::new(
        vec![
            ("zulu".to_string(), "http://localhost:1".to_string()),
            ("alpha".to_string(), "http://localhost:2".to_string()),
            ("mike".to_string(), "http://localhost:3".to_string()),
        ],
        vec![],
    );
    assert_eq!(table.names(Category::Mcp), vec!["zulu", "alpha", "mike"]);
}

#[test]
fn pinned_snapshot_survives_replacement() {
    let shared = SharedRoutingTable::new(table("old"));
    let pinned = shared.snapshot();

    shared.replace(table("new"));

    assert_eq!(
        pinned.resolve(Category::Mcp, "mcp-old"),
        Some("http://localhost:1000/old")
    );
    assert_eq!(pinned.resolve(Category::Mcp, "mcp-new"), None);

    let fresh = shared.snapshot();
    assert_eq!(fresh.resolve(Category::Mcp, "mcp-old"), None);
    assert_eq!(
        fresh.resolve(Category::Mcp, "mcp-new"),
        Some("http://localhost:1000/new")
    );
}

/// 100 concurrent readers racing reloads must each observe one coherent
/// generation: the MCP and A2A halves of a snapshot always match.
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_readers_see_consistent_generations() {
    let shared = Arc::new(SharedRoutingTable::new(table("g0")));

    let writer = {
        let shared = Arc::clone(&shared);
        tokio::spawn(async move {
            for i in 1..=50 {
                shared.replace(table(&format!("g{}", i)));
                tokio::task::yield_now().await;
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..100 {
        let shared = Arc::clone(&shared);
        readers.push(tokio::spawn(async move {
            for _ in 0..20 {
                let snapshot = shared.snapshot();
                let mcp = snapshot.names(Category::Mcp);
                let a2a = snapshot.names(Category::A2a);
                assert_eq!(mcp.len(), 1);
                assert_eq!(a2a.len(), 1);
                // Both halves carry the same generation suffix
                let mcp_gen = mcp[0].trim_start_matches("mcp-").to_string();
                let a2a_gen = a2a[0].trim_start_matches("a2a-").to_string();
                assert_eq!(mcp_gen, a2a_gen);
                tokio::task::yield_now().await;
            }
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }

    let final_table = shared.snapshot();
    assert_eq!(final_table.names(Category::Mcp), vec!["mcp-g50"]);
}
