use super::*;

#[test]
fn test_layout_node_new() {
    let n = LayoutNode::new("A", 2, 1, 100.0, 40.0);
    assert_eq!(n.id, "A");
    assert_eq!(n.rank, 2);
    assert_eq!(n.order, 1);
    assert_eq!(n.width, 100.0);
    assert_eq!(n.height, 40.0);
    assert_eq!(n.position, Position::default());
}

#[test]
fn test_layout_node_overlap() {
    let mut a = LayoutNode::new("A", 0, 0, 10.0, 10.0);
    let mut b = LayoutNode::new("B", 0, 1, 10.0, 10.0);
    b.position = Position::new(5.0, 5.0);
    assert!(a.overlaps(&b));
    a.position = Position::new(-10.0, 0.0);
    // Touching edges do not overlap.
    b.position = Position::new(0.0, 0.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn test_direction_parse_aliases() {
    assert_eq!("horizontal".parse::<Direction>().unwrap(), Direction::Horizontal);
    assert_eq!("LR".parse::<Direction>().unwrap(), Direction::Horizontal);
    assert_eq!("Vertical".parse::<Direction>().unwrap(), Direction::Vertical);
    assert_eq!("tb".parse::<Direction>().unwrap(), Direction::Vertical);
    assert_eq!("TD".parse::<Direction>().unwrap(), Direction::Vertical);
    assert!("diagonal".parse::<Direction>().is_err());
}

#[test]
fn test_direction_default_and_display() {
    assert_eq!(Direction::default(), Direction::Horizontal);
    assert_eq!(Direction::Vertical.to_string(), "vertical");
    assert_eq!(serde_json::to_string(&Direction::Horizontal).unwrap(), "\"horizontal\"");
}
