use super::*;
use crate::model::NodeKind;

fn nodes(ids: &[(&str, NodeKind)]) -> Vec<Node> {
    ids.iter()
        .map(|(id, kind)| {
            let mut n = Node::new(*id, *kind, 0, None);
            n.hidden = false;
            n
        })
        .collect()
}

fn tools(ids: &[&str]) -> Vec<Node> {
    nodes(&ids.iter().map(|id| (*id, NodeKind::Tool)).collect::<Vec<_>>())
}

fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs.iter().map(|(a, b)| Edge::between(a, b)).collect()
}

fn run(ns: &[Node], es: &[Edge], config: &LayoutConfig) -> Vec<LayoutNode> {
    let node_refs: Vec<&Node> = ns.iter().collect();
    let edge_refs: Vec<&Edge> = es.iter().collect();
    SugiyamaLayout::default().layout(&node_refs, &edge_refs, config)
}

fn find<'a>(out: &'a [LayoutNode], id: &str) -> &'a LayoutNode {
    out.iter().find(|n| n.id == id).unwrap()
}

fn assert_no_overlaps(out: &[LayoutNode]) {
    for i in 0..out.len() {
        for j in (i + 1)..out.len() {
            assert!(
                !out[i].overlaps(&out[j]),
                "{} overlaps {}",
                out[i].id,
                out[j].id
            );
        }
    }
}

// ── Rank Assignment ──────────────────────────────────────────────────────

#[test]
fn test_ranks_single_node() {
    assert_eq!(assign_ranks(1, &[]), vec![0]);
}

#[test]
fn test_ranks_chain() {
    assert_eq!(assign_ranks(3, &[(0, 1), (1, 2)]), vec![0, 1, 2]);
}

#[test]
fn test_ranks_longest_path() {
    // 0 -> 1 -> 2 and 0 -> 2: node 2 sits below node 1.
    assert_eq!(assign_ranks(3, &[(0, 1), (1, 2), (0, 2)]), vec![0, 1, 2]);
}

#[test]
fn test_ranks_trigger_feeds_use_case() {
    // trigger -> use case -> agent -> tool
    assert_eq!(assign_ranks(4, &[(0, 1), (1, 2), (2, 3)]), vec![0, 1, 2, 3]);
}

// ── Working graph & cycle removal ────────────────────────────────────────

#[test]
fn test_work_graph_drops_dangling_self_and_duplicate_edges() {
    let ns = tools(&["A", "B"]);
    let es = edges(&[("A", "B"), ("A", "B"), ("A", "A"), ("A", "ghost")]);
    let node_refs: Vec<&Node> = ns.iter().collect();
    let edge_refs: Vec<&Edge> = es.iter().collect();
    let g = build_work_graph(&node_refs, &edge_refs);
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn test_remove_cycles_breaks_two_cycle() {
    let ns = tools(&["A", "B"]);
    let es = edges(&[("A", "B"), ("B", "A")]);
    let node_refs: Vec<&Node> = ns.iter().collect();
    let edge_refs: Vec<&Edge> = es.iter().collect();
    let dag = remove_cycles(&build_work_graph(&node_refs, &edge_refs));
    assert_eq!(dag, vec![(0, 1)]);
}

#[test]
fn test_remove_cycles_keeps_dag() {
    let ns = tools(&["A", "B", "C"]);
    let es = edges(&[("A", "B"), ("B", "C"), ("A", "C")]);
    let node_refs: Vec<&Node> = ns.iter().collect();
    let edge_refs: Vec<&Edge> = es.iter().collect();
    let mut dag = remove_cycles(&build_work_graph(&node_refs, &edge_refs));
    dag.sort();
    assert_eq!(dag, vec![(0, 1), (0, 2), (1, 2)]);
}

// ── Dummy Node Insertion ─────────────────────────────────────────────────

#[test]
fn test_no_dummies_for_adjacent_ranks() {
    let aug = insert_dummy_nodes(vec![0, 1], &[(0, 1)]);
    assert_eq!(aug.ranks.len(), 2);
    assert_eq!(aug.unit_edges, vec![(0, 1)]);
    assert_eq!(aug.rank_count, 2);
}

#[test]
fn test_dummies_for_long_edge() {
    let aug = insert_dummy_nodes(vec![0, 1, 2, 3], &[(0, 3)]);
    assert_eq!(aug.ranks.len(), 6);
    assert!(aug.is_dummy(4) && aug.is_dummy(5));
    assert_eq!(aug.ranks[4], 1);
    assert_eq!(aug.ranks[5], 2);
    assert_eq!(aug.unit_edges, vec![(0, 4), (4, 5), (5, 3)]);
}

// ── Crossing Minimisation ────────────────────────────────────────────────

#[test]
fn test_count_crossings() {
    // Layer 0: [0, 1]; layer 1: [2, 3]; edges 0->3 and 1->2 cross once.
    let successors = vec![vec![3], vec![2], vec![], vec![]];
    assert_eq!(count_crossings(&[vec![0, 1], vec![2, 3]], &successors), 1);
    assert_eq!(count_crossings(&[vec![0, 1], vec![3, 2]], &successors), 0);
}

#[test]
fn test_minimise_crossings_untangles() {
    let aug = insert_dummy_nodes(vec![0, 0, 1, 1], &[(0, 3), (1, 2)]);
    let ordering = minimise_crossings(&aug, 24);
    let successors = vec![vec![3], vec![2], vec![], vec![]];
    assert_eq!(count_crossings(&ordering, &successors), 0);
}

// ── Full layout ──────────────────────────────────────────────────────────

#[test]
fn test_empty_input() {
    assert!(run(&[], &[], &LayoutConfig::default()).is_empty());
}

#[test]
fn test_horizontal_ranks_run_left_to_right() {
    let ns = tools(&["A", "B", "C"]);
    let out = run(&ns, &edges(&[("A", "B"), ("B", "C")]), &LayoutConfig::default());
    let (a, b, c) = (find(&out, "A"), find(&out, "B"), find(&out, "C"));
    assert!(a.position.x < b.position.x && b.position.x < c.position.x);
    assert!(b.position.x >= a.right() + LayoutConfig::default().rank_spacing);
}

#[test]
fn test_vertical_ranks_run_top_to_bottom() {
    let ns = tools(&["A", "B"]);
    let config = LayoutConfig::default().with_direction(Direction::Vertical);
    let out = run(&ns, &edges(&[("A", "B")]), &config);
    let (a, b) = (find(&out, "A"), find(&out, "B"));
    assert!(a.position.y < b.position.y);
    assert!(b.position.y >= a.bottom() + config.rank_spacing);
}

#[test]
fn test_isolated_nodes_do_not_overlap() {
    let ns = tools(&["A", "B", "C", "D"]);
    let config = LayoutConfig::default();
    let out = run(&ns, &[], &config);
    assert_eq!(out.len(), 4);
    assert!(out.iter().all(|n| n.rank == 0));
    assert_no_overlaps(&out);
    let mut ys: Vec<f64> = out.iter().map(|n| n.position.y).collect();
    ys.sort_by(f64::total_cmp);
    for pair in ys.windows(2) {
        assert!(pair[1] - pair[0] >= config.footprints.tool.height + config.node_spacing);
    }
}

#[test]
fn test_forest_with_mixed_kinds_does_not_overlap() {
    let ns = nodes(&[
        ("U1", NodeKind::UseCase),
        ("T1", NodeKind::Trigger),
        ("A1", NodeKind::Agent),
        ("A2", NodeKind::Agent),
        ("X1", NodeKind::Tool),
        ("X2", NodeKind::Tool),
        ("U2", NodeKind::UseCase),
        ("A3", NodeKind::Agent),
    ]);
    let es = edges(&[
        ("T1", "U1"),
        ("U1", "A1"),
        ("U1", "A2"),
        ("A1", "X1"),
        ("A2", "X2"),
        ("U2", "A3"),
    ]);
    for direction in [Direction::Horizontal, Direction::Vertical] {
        let out = run(&ns, &es, &LayoutConfig::default().with_direction(direction));
        assert_eq!(out.len(), ns.len());
        assert_no_overlaps(&out);
    }
}

#[test]
fn test_footprint_follows_kind() {
    let ns = nodes(&[("U", NodeKind::UseCase), ("A", NodeKind::Agent)]);
    let config = LayoutConfig::default();
    let out = run(&ns, &edges(&[("U", "A")]), &config);
    assert_eq!(find(&out, "U").width, config.footprints.use_case.width);
    assert_eq!(find(&out, "A").height, config.footprints.agent.height);
}

#[test]
fn test_dangling_edge_ignored() {
    let ns = tools(&["A"]);
    let out = run(&ns, &edges(&[("A", "hidden")]), &LayoutConfig::default());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].rank, 0);
}

#[test]
fn test_cycle_still_lays_out() {
    let ns = tools(&["A", "B", "C"]);
    let out = run(
        &ns,
        &edges(&[("A", "B"), ("B", "C"), ("C", "A")]),
        &LayoutConfig::default(),
    );
    assert_eq!(out.len(), 3);
    assert_no_overlaps(&out);
}

#[test]
fn test_layout_is_deterministic() {
    let ns = tools(&["A", "B", "C", "D", "E"]);
    let es = edges(&[("A", "C"), ("B", "C"), ("A", "D"), ("C", "E"), ("B", "E")]);
    let config = LayoutConfig::default();
    let first = run(&ns, &es, &config);
    for _ in 0..5 {
        assert_eq!(run(&ns, &es, &config), first);
    }
}

#[test]
fn test_output_follows_input_order() {
    let ns = tools(&["C", "A", "B"]);
    let out = run(&ns, &edges(&[("C", "A")]), &LayoutConfig::default());
    let ids: Vec<&str> = out.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["C", "A", "B"]);
}
