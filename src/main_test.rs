use canvas::doc::{ElementKind, ElementOverrides};

use super::*;

fn sample_snapshot() -> Snapshot {
    let mut core = EngineCore::new();
    core.add(ElementKind::Button, 10.0, 20.0, ElementOverrides::default());
    core.snapshot()
}

// =============================================================
// Argument parsing
// =============================================================

#[test]
fn replay_defaults_to_json_on_stdout() {
    let cli = Cli::try_parse_from(["sketchpad", "replay", "steps.json"]).unwrap();
    let Command::Replay { script, snapshot, output } = cli.command else {
        panic!("expected replay");
    };
    assert_eq!(script, "steps.json");
    assert!(snapshot.is_none());
    assert_eq!(output.format, Format::Json);
    assert!(output.out.is_none());
}

#[test]
fn render_accepts_format_out_and_global_config() {
    let cli = Cli::try_parse_from([
        "sketchpad",
        "render",
        "-",
        "--format",
        "html",
        "--out",
        "page.html",
        "--config",
        "tuning.json",
    ])
    .unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("tuning.json")));
    let Command::Render { snapshot, output } = cli.command else {
        panic!("expected render");
    };
    assert_eq!(snapshot, "-");
    assert_eq!(output.format, Format::Html);
    assert_eq!(output.out, Some(PathBuf::from("page.html")));
}

#[test]
fn unknown_format_is_rejected() {
    assert!(Cli::try_parse_from(["sketchpad", "render", "a.json", "--format", "svg"]).is_err());
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn render_json_round_trips() {
    let snap = sample_snapshot();
    let out = render(&snap, Format::Json).unwrap();
    assert_eq!(export::from_json(&out).unwrap(), snap);
}

#[test]
fn render_html_contains_elements() {
    let out = render(&sample_snapshot(), Format::Html).unwrap();
    assert!(out.contains("el-button"));
    assert!(out.contains(">Button</div>"));
}

#[test]
fn missing_input_file_names_the_path() {
    let err = read_input("/nonexistent/sketchpad/script.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/sketchpad/script.json"));
}
