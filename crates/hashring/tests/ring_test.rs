//! Tests for the hash ring.
//!
//! # Test Strategy
//!
//! 1. **Basic functionality**: Empty ring, add/lookup, remove
//! 2. **Reference vectors**: Known owners for the ten-node reference ring
//! 3. **Replica lookup**: `get_nodes` ordering and clamping
//! 4. **Dispersion**: Key counts track weights
//! 5. **Thread safety**: Concurrent readers and a writer

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use hashring::{Error, HashRing, RingBuilder};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// `192.168.1.1` .. `192.168.1.10` with weights 1..=10.
fn reference_nodes() -> HashMap<String, i64> {
    (1..=10).map(|i| (format!("192.168.1.{}", i), i)).collect()
}

fn reference_ring() -> HashRing {
    let ring = HashRing::new();
    ring.add_nodes(reference_nodes());
    ring
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_ring_lookup() {
    let ring = HashRing::new();
    assert_eq!(ring.get_node("key1"), Err(Error::EmptyRing));
    assert_eq!(ring.get_nodes("key1", 3), Ok(Vec::new()));
    assert!(ring.members().is_empty());
}

#[test]
fn test_add_node_and_lookup() {
    init_tracing();
    let ring = HashRing::new();
    ring.add_node("192.168.1.10", 1);

    assert_eq!(ring.node_count(), 1);
    assert_eq!(ring.cube_count(), 128);
    assert_eq!(ring.get_node("test-key").unwrap(), "192.168.1.10");
}

#[test]
fn test_add_nodes() {
    let ring = reference_ring();
    assert_eq!(ring.cube_count(), 128 * 55);
    assert_eq!(ring.members().len(), 10);
}

#[test]
fn test_remove_node() {
    init_tracing();
    let ring = HashRing::new();
    ring.add_node("192.168.1.10", 1);
    ring.remove_node("192.168.1.10");
    assert_eq!(ring.cube_count(), 0);
    assert_eq!(ring.get_node("key"), Err(Error::EmptyRing));

    ring.add_nodes(reference_nodes());
    assert_eq!(ring.cube_count(), 7040);
    ring.remove_node("192.168.1.10");
    assert_eq!(ring.cube_count(), 5760);
    assert!(!ring.contains("192.168.1.10"));
    assert_eq!(ring.weight("192.168.1.10"), None);
}

#[test]
fn test_remove_unknown_node_is_noop() {
    let ring = reference_ring();
    let before: Vec<String> = (0..500).map(|i| ring.get_node(format!("key{}", i)).unwrap()).collect();
    let members = ring.members();
    let nodes = ring.nodes();

    ring.remove_node("10.0.0.99");

    let after: Vec<String> = (0..500).map(|i| ring.get_node(format!("key{}", i)).unwrap()).collect();
    assert_eq!(before, after);
    assert_eq!(ring.members(), members);
    assert_eq!(ring.nodes(), nodes);
    assert_eq!(ring.cube_count(), 7040);
}

#[test]
fn test_set_cube_count_guard() {
    let ring = HashRing::new();
    ring.set_cube_count(40).unwrap();
    ring.add_node("192.168.1.10", 1);
    assert_eq!(ring.cube_count(), 40);

    assert_eq!(ring.set_cube_count(64), Err(Error::RingNotEmpty { members: 1 }));
    assert_eq!(ring.cubes_per_weight(), 40);
}

// ============================================================================
// Reference Vectors
// ============================================================================

#[test]
fn test_get_node_reference() {
    let ring = reference_ring();
    let expected = [
        ("key1", "192.168.1.3"),
        ("key2", "192.168.1.7"),
        ("key3", "192.168.1.7"),
        ("key4", "192.168.1.9"),
        ("key5", "192.168.1.10"),
    ];
    for (key, node) in expected {
        assert_eq!(ring.get_node(key).unwrap(), node, "owner of {}", key);
    }

    ring.remove_node("192.168.1.10");
    let expected = [
        ("key1", "192.168.1.3"),
        ("key2", "192.168.1.7"),
        ("key3", "192.168.1.7"),
        ("key4", "192.168.1.9"),
        ("key5", "192.168.1.3"),
    ];
    for (key, node) in expected {
        assert_eq!(ring.get_node(key).unwrap(), node, "owner of {} after removal", key);
    }
}

#[test]
fn test_lookup_independent_of_insertion_order() {
    let forward = HashRing::new();
    let reverse = HashRing::new();
    for i in 1..=10 {
        forward.add_node(format!("192.168.1.{}", i), i);
        reverse.add_node(format!("192.168.1.{}", 11 - i), 11 - i);
    }
    for i in 0..2_000 {
        let key = format!("key{}", i);
        assert_eq!(forward.get_node(&key), reverse.get_node(&key));
    }
}

#[test]
fn test_removal_only_moves_removed_nodes_keys() {
    let ring = reference_ring();
    let keys: Vec<String> = (0..10_000).map(|i| format!("key{}", i)).collect();
    let before: Vec<String> = keys.iter().map(|k| ring.get_node(k).unwrap()).collect();

    ring.remove_node("192.168.1.10");

    let mut moved = 0;
    for (key, old_owner) in keys.iter().zip(&before) {
        let new_owner = ring.get_node(key).unwrap();
        if old_owner == "192.168.1.10" {
            assert_ne!(new_owner, "192.168.1.10");
            assert!(ring.contains(&new_owner));
            moved += 1;
        } else {
            assert_eq!(&new_owner, old_owner, "{} moved without cause", key);
        }
    }
    assert!(moved > 0);
}

// ============================================================================
// Replica Lookup Tests
// ============================================================================

#[test]
fn test_get_nodes_reference() {
    let ring = reference_ring();
    assert_eq!(
        ring.get_nodes("key1", 3).unwrap(),
        vec!["192.168.1.3", "192.168.1.5", "192.168.1.7"]
    );

    ring.remove_node("192.168.1.3");
    assert_eq!(
        ring.get_nodes("key1", 3).unwrap(),
        vec!["192.168.1.5", "192.168.1.7", "192.168.1.8"]
    );
}

#[test]
fn test_get_nodes_distinct_and_primary_first() {
    let ring = reference_ring();
    for i in 0..200 {
        let key = format!("key{}", i);
        let nodes = ring.get_nodes(&key, 4).unwrap();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0], ring.get_node(&key).unwrap());

        let mut unique = nodes.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4, "duplicates for {}: {:?}", key, nodes);
    }
}

#[test]
fn test_get_nodes_clamps_to_members() {
    let ring = RingBuilder::new()
        .add_node("a", 1)
        .add_node("b", 1)
        .build()
        .unwrap();

    let nodes = ring.get_nodes("key", 5).unwrap();
    assert_eq!(nodes.len(), 2);
    assert!(nodes.contains(&"a".to_string()));
    assert!(nodes.contains(&"b".to_string()));
    assert!(ring.get_nodes("key", 0).unwrap().is_empty());
}

// ============================================================================
// Dispersion Tests
// ============================================================================

#[test]
fn test_dispersion_reference() {
    let ring = reference_ring();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for i in 0..10_000 {
        *counts.entry(ring.get_node(format!("key{}", i)).unwrap()).or_default() += 1;
    }

    let expected = [
        ("192.168.1.1", 130),
        ("192.168.1.2", 366),
        ("192.168.1.3", 463),
        ("192.168.1.4", 623),
        ("192.168.1.5", 987),
        ("192.168.1.6", 1009),
        ("192.168.1.7", 1465),
        ("192.168.1.8", 1333),
        ("192.168.1.9", 1578),
        ("192.168.1.10", 2046),
    ];
    for (node, count) in expected {
        assert_eq!(counts.get(node).copied(), Some(count), "keys on {}", node);
    }
}

#[test]
fn test_dispersion_tracks_weight() {
    let ring = reference_ring();
    let total = 10_000usize;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for i in 0..total {
        *counts.entry(ring.get_node(format!("key{}", i)).unwrap()).or_default() += 1;
    }

    for (node, weight) in reference_nodes() {
        let expected = total as f64 * weight as f64 / 55.0;
        let observed = counts.get(&node).copied().unwrap_or(0) as f64;
        let deviation = (observed / expected - 1.0).abs();
        assert!(deviation < 0.35, "{}: {} keys, expected ~{:.0}", node, observed, expected);
    }
}

#[test]
fn test_ownership_sums_to_one() {
    let ring = reference_ring();
    let shares = ring.ownership();
    assert_eq!(shares.len(), 10);

    let total: f64 = shares.values().sum();
    assert!((total - 1.0).abs() < 1e-9, "total ownership {}", total);
    assert!(shares["192.168.1.10"] > shares["192.168.1.1"]);

    let single = HashRing::new();
    single.add_node("only", 1);
    assert_eq!(single.ownership()["only"], 1.0);
    assert!(HashRing::new().ownership().is_empty());
}

// ============================================================================
// Thread Safety Tests
// ============================================================================

#[test]
fn test_ring_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HashRing>();
}

#[test]
fn test_concurrent_readers_and_writer() {
    init_tracing();
    let ring = reference_ring();
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let mut i = 0u64;
                while !done.load(Ordering::Relaxed) {
                    let key = format!("key{}", i);
                    let owner = ring.get_node(&key).unwrap();
                    assert!(owner.starts_with("192.168.1.") || owner == "10.0.0.1");

                    let replicas = ring.get_nodes(&key, 3).unwrap();
                    assert_eq!(replicas.len(), 3);
                    i += 1;
                }
            });
        }

        s.spawn(|| {
            for _ in 0..50 {
                ring.add_node("10.0.0.1", 2);
                ring.remove_node("10.0.0.1");
            }
            done.store(true, Ordering::Relaxed);
        });
    });

    assert_eq!(ring.cube_count(), 7040);
    assert!(!ring.contains("10.0.0.1"));
}
