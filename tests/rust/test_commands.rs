use super::*;

#[test]
fn test_parse_toggle() {
    assert_eq!(
        parse_command("toggle uc-1").unwrap(),
        Action::Apply(Command::ToggleNode("uc-1".into()))
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(
        parse_command("  TOGGLE Agent-7 ").unwrap(),
        Action::Apply(Command::ToggleNode("Agent-7".into()))
    );
    assert_eq!(
        parse_command("Expand-All").unwrap(),
        Action::Apply(Command::ExpandAll)
    );
}

#[test]
fn test_parse_select() {
    assert_eq!(
        parse_command("select ag-1").unwrap(),
        Action::Select(Some("ag-1".into()))
    );
    assert_eq!(parse_command("select none").unwrap(), Action::Select(None));
    assert_eq!(parse_command("select NONE").unwrap(), Action::Select(None));
}

#[test]
fn test_parse_direction() {
    assert_eq!(
        parse_command("direction vertical").unwrap(),
        Action::Apply(Command::SetDirection(Direction::Vertical))
    );
    assert_eq!(
        parse_command("direction LR").unwrap(),
        Action::Apply(Command::SetDirection(Direction::Horizontal))
    );
    assert!(parse_command("direction sideways").is_err());
}

#[test]
fn test_parse_bulk_commands() {
    assert_eq!(
        parse_command("collapse-all").unwrap(),
        Action::Apply(Command::CollapseAll)
    );
    let err = parse_command("expand-all now").unwrap_err();
    assert!(err.contains("takes no argument"), "{err}");
}

#[test]
fn test_parse_errors() {
    assert!(parse_command("toggle").unwrap_err().contains("needs an argument"));
    assert!(parse_command("toggle a b").unwrap_err().contains("unrecognised"));
    assert!(parse_command("zoom 2").unwrap_err().contains("unrecognised"));
}

#[test]
fn test_parse_script_skips_comments_and_blanks() {
    let script = "# drill down\n\ntoggle uc-1   # open\n  \nselect ag-2\n";
    let actions = parse_script(script).unwrap();
    assert_eq!(
        actions,
        vec![
            Action::Apply(Command::ToggleNode("uc-1".into())),
            Action::Select(Some("ag-2".into())),
        ]
    );
}

#[test]
fn test_parse_script_reports_line() {
    let err = parse_script("toggle a\n\nfrobnicate b\n").unwrap_err();
    assert_eq!(err.line, 3);
    assert!(err.to_string().starts_with("line 3: "));
}

#[test]
fn test_parse_empty_script() {
    assert!(parse_script("").unwrap().is_empty());
}
