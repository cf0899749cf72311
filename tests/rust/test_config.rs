use super::*;
use serde_json::json;

#[test]
fn test_layout_config_defaults() {
    let c = LayoutConfig::new();
    assert_eq!(c.direction, Direction::Horizontal);
    assert_eq!(c.node_spacing, 50.0);
    assert_eq!(c.rank_spacing, 120.0);
}

#[test]
fn test_use_case_is_widest() {
    let t = FootprintTable::default();
    let uc = t.for_kind(NodeKind::UseCase);
    for kind in [NodeKind::Trigger, NodeKind::Agent, NodeKind::Tool] {
        assert!(uc.width > t.for_kind(kind).width);
    }
}

#[test]
fn test_agent_grows_with_instructions() {
    let t = FootprintTable::default();
    let plain = Node::new("A", NodeKind::Agent, 1, Some("R"));
    let long = plain
        .clone()
        .with_payload(json!({ "instructions": "x".repeat(t.instruction_chars_per_line * 3) }));
    assert_eq!(t.for_node(&plain), t.agent);
    let fp = t.for_node(&long);
    assert_eq!(fp.width, t.agent.width);
    assert_eq!(fp.height, t.agent.height + 3.0 * t.instruction_line_height);
}

#[test]
fn test_agent_height_capped() {
    let t = FootprintTable::default();
    let huge = Node::new("A", NodeKind::Agent, 1, Some("R"))
        .with_payload(json!({ "instructions": "y".repeat(100_000) }));
    assert_eq!(t.for_node(&huge).height, t.max_agent_height);
}

#[test]
fn test_instructions_ignored_for_other_kinds() {
    let t = FootprintTable::default();
    let tool = Node::new("T", NodeKind::Tool, 2, Some("A"))
        .with_payload(json!({ "instructions": "z".repeat(500) }));
    assert_eq!(t.for_node(&tool), t.tool);
}

#[test]
fn test_partial_engine_config_from_json() {
    let c = EngineConfig::from_json(r#"{ "layout": { "direction": "vertical", "nodeSpacing": 10 } }"#)
        .unwrap();
    assert_eq!(c.layout.direction, Direction::Vertical);
    assert_eq!(c.layout.node_spacing, 10.0);
    assert_eq!(c.layout.rank_spacing, 120.0);
    assert_eq!(c.layout.footprints, FootprintTable::default());
}

#[test]
fn test_empty_engine_config_is_default() {
    assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
}
