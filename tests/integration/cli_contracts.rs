use std::fs;
use tempfile::TempDir;
use vdrive::config::VdriveConfig;
use vdrive::error::ApiError;
use vdrive::tooling::cli::{CliContext, Commands};

fn context() -> CliContext {
    CliContext::new(VdriveConfig::default()).unwrap()
}

fn ls_json(path: Option<&str>, sort: Option<&str>, desc: bool) -> Commands {
    Commands::Ls {
        path: path.map(str::to_string),
        search: None,
        sort: sort.map(str::to_string),
        desc,
        format: "json".to_string(),
    }
}

#[test]
fn ls_json_contract_has_required_fields() {
    let mut cli = context();
    let output = cli.execute(&ls_json(Some("/Documents/Work"), None, false)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["directory"], "/Documents/Work");
    assert_eq!(parsed["count"], 2);
    assert_eq!(parsed["sort"]["key"], "name");
    assert_eq!(parsed["sort"]["direction"], "ascending");
    let first = &parsed["nodes"][0];
    assert_eq!(first["name"], "meeting-notes.txt");
    assert_eq!(first["path"], "/Documents/Work/meeting-notes.txt");
    assert_eq!(first["kind"], "text");
    assert_eq!(first["id"].as_str().map(str::len), Some(64));
    assert!(first["parent_id"].is_string());
}

#[test]
fn ls_sort_by_size_descending_keeps_folders_first() {
    let mut cli = context();
    let output = cli.execute(&ls_json(Some("/Images"), Some("size"), true)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let nodes = parsed["nodes"].as_array().unwrap();
    assert_eq!(nodes[0]["name"], "Screenshots");
    assert!(nodes[1]["size"].as_u64() >= nodes[2]["size"].as_u64());
}

#[test]
fn ls_unknown_directory_fails() {
    let mut cli = context();
    assert!(matches!(
        cli.execute(&ls_json(Some("/Missing"), None, false)),
        Err(ApiError::Mutation(_))
    ));
}

#[test]
fn ls_text_renders_table() {
    let mut cli = context();
    let output = cli
        .execute(&Commands::Ls {
            path: None,
            search: Some("read".to_string()),
            sort: None,
            desc: false,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("readme.txt"));
    assert!(output.contains("Search: read"));
    assert!(!output.contains("Documents/"));
}

#[test]
fn run_script_applies_commands_in_order() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("reorg.vd");
    fs::write(
        &script,
        "# reorganize\n\
         mkdir Archive\n\
         mv Documents/Personal Archive\n\
         rename Archive/Personal Old\n\
         cd Archive/Old\n\
         touch draft.txt\n",
    )
    .unwrap();

    let mut cli = context();
    let output = cli
        .execute(&Commands::Run {
            script,
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["directory"], "/Archive/Old");
    let names: Vec<&str> = parsed["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["name"].as_str())
        .collect();
    assert_eq!(names, vec!["draft.txt", "todo.txt"]);
    assert!(cli.session().store().check_invariants().is_empty());
}

#[test]
fn run_script_reports_failing_line() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("bad.vd");
    fs::write(&script, "mkdir A\nmv A A\n").unwrap();

    let mut cli = context();
    let err = cli
        .execute(&Commands::Run {
            script,
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn folders_lists_root_first() {
    let mut cli = context();
    let output = cli.execute(&Commands::Folders).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "/");
    assert!(lines.contains(&"/Projects/website"));
}

#[test]
fn tree_lists_every_node() {
    let mut cli = context();
    let output = cli.execute(&Commands::Tree).unwrap();
    assert_eq!(output.lines().count(), 18);
}
