// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use std::collections::HashMap;

use indexmap::IndexMap;
use tempfile::TempDir;

fn linux() -> LoadOptions {
    LoadOptions::default().with_platform(Some(Platform::Linux))
}

fn json(text: &str) -> Value {
    Value::from(serde_json::from_str::<serde_json::Value>(text).expect("valid test JSON"))
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write test file");
    path
}

// ===== pipeline =====

#[test]
fn test_full_pipeline() {
    let source = r#"
// build description
{
    jcs_def: {
        out: 'bin',
    },
    base: {
        cflags: ["-Wall"],
        optimize: 2,
        output: "${out}/app",
    },
    debug(base): {
        optimize: 0,
        /* tagged keys */
        linker<Linux>: ld,
        linker<Windows>: link.exe,
    },
}
"#;

    let tree = parse_jsc(source, &linux()).unwrap();

    assert_eq!(
        tree,
        json(
            r#"{
                "base": {"cflags": ["-Wall"], "optimize": 2, "output": "bin/app"},
                "debug": {"optimize": 0, "linker": "ld", "cflags": ["-Wall"], "output": "bin/app"}
            }"#
        )
    );
}

#[test]
fn test_strict_json_passes_through() {
    let source = r#"{"a": [1, 2.5, null, true], "b": {"c": "x y"}}"#;
    let tree = parse_jsc(source, &linux()).unwrap();
    assert_eq!(tree, json(source));
}

#[test]
fn test_resolved_tree_round_trips() {
    let source = "{name: demo, n: 0x10, list: [a, 'b', 1e3],}";
    let tree = parse_jsc(source, &linux()).unwrap();

    let text = serde_json::to_string(&tree).unwrap();
    assert_eq!(parse_jsc(&text, &linux()).unwrap(), tree);
    assert_eq!(tree["n"], Value::Integer(16));
}

#[test]
fn test_empty_document() {
    assert_eq!(parse_jsc("", &linux()).unwrap(), json("{}"));
    assert_eq!(parse_jsc("// only a comment\n", &linux()).unwrap(), json("{}"));
}

#[test]
fn test_variables_can_be_switched_off() {
    let source = "{jcs_def: {x: 1}, y: '${x}'}";
    let tree = parse_jsc(source, &linux().with_variables(false)).unwrap();
    assert_eq!(tree, json(r#"{"jcs_def": {"x": 1}, "y": "${x}"}"#));
}

#[test]
fn test_undefined_variable_fails_whole_document() {
    let err = parse_jsc("{a: ok, b: '${missing}'}", &linux()).unwrap_err();
    match err {
        JscError::UndefinedVariable { name, .. } => assert_eq!(name, "missing"),
        other => panic!("Expected UndefinedVariable, got {:?}", other),
    }
}

#[test]
fn test_unknown_platform_name_drops_tagged_keys() {
    let options = LoadOptions::default().with_platform_name("Plan9");
    assert_eq!(options.platform, None);

    let tree = parse_jsc("{a<Linux>: 1, b: 2}", &options).unwrap();
    assert_eq!(tree, json(r#"{"b": 2}"#));
}

#[test]
fn test_unclosed_groups_stay_in_values() {
    assert_eq!(
        parse_jsc("{a: ${x, b: 1}", &linux()).unwrap(),
        json(r#"{"a": "${x", "b": 1}"#)
    );
    assert_eq!(
        parse_jsc("{msg: sad:(, b: 1}", &linux()).unwrap(),
        json(r#"{"msg": "sad:(", "b": 1}"#)
    );
}

#[test]
fn test_large_integers_stay_numbers() {
    let tree = parse_jsc("{max: 18446744073709551615, mask: 0xFFFFFFFFFFFFFFFF}", &linux()).unwrap();
    assert_eq!(tree, json(r#"{"max": 18446744073709551615, "mask": 18446744073709551615}"#));
}

#[test]
fn test_errors_report_source_lines() {
    match parse_jsc("{\n  a: 1,\n  b: 2,\n  c: [1, 2\n}\n", &linux()) {
        Err(JscError::MalformedArray { line, column, .. }) => {
            assert_eq!(line, 4);
            assert_eq!(column, 2);
        }
        other => panic!("Expected MalformedArray, got {:?}", other),
    }
}

#[test]
fn test_invalid_escape_is_invalid_buffer() {
    match parse_jsc(r#"{a: "C:\sdk"}"#, &linux()) {
        Err(JscError::InvalidBuffer { code, line, .. }) => {
            assert_eq!(code, Some(213));
            assert_eq!(line, 1);
        }
        other => panic!("Expected InvalidBuffer, got {:?}", other),
    }
}

#[test]
fn test_split_imports() {
    let text = "import \"a.jsc\"\n\nimport 'b.jsc'\nimport c.jsc\n{x: 1}\nimport \"late.jsc\"";
    let (paths, body) = split_imports(text);
    assert_eq!(paths, vec!["a.jsc", "b.jsc", "c.jsc"]);
    assert_eq!(body, "{x: 1}\nimport \"late.jsc\"");
}

#[test]
fn test_split_imports_ignores_import_keys() {
    let (paths, body) = split_imports("imports: [a]\n");
    assert!(paths.is_empty());
    assert_eq!(body, "imports: [a]\n");
}

#[test]
fn test_split_imports_body_on_import_line() {
    let (paths, body) = split_imports("import \"a.jsc\" {x: 1}");
    assert_eq!(paths, vec!["a.jsc"]);
    assert_eq!(body, "{x: 1}");

    let (paths, body) = split_imports("import 'a.jsc'\n  import b.jsc{x: 1}\n");
    assert_eq!(paths, vec!["a.jsc", "b.jsc"]);
    assert_eq!(body, "{x: 1}\n");
}

#[test]
fn test_split_imports_keeps_import_key() {
    let (paths, body) = split_imports("import : x\n");
    assert!(paths.is_empty());
    assert_eq!(body, "import : x\n");

    let (paths, _) = split_imports("import \"C:/cfg/a.jsc\"\n{}");
    assert_eq!(paths, vec!["C:/cfg/a.jsc"]);
}

#[test]
fn test_resolve_import_path() {
    let base = Path::new("/etc/jsc");
    assert_eq!(
        resolve_import_path("common.jsc", Some(base)).unwrap(),
        PathBuf::from("/etc/jsc/common.jsc")
    );
    assert_eq!(
        resolve_import_path("/abs/x.jsc", Some(base)).unwrap(),
        PathBuf::from("/abs/x.jsc")
    );
    assert_eq!(
        resolve_import_path("rel.jsc", None).unwrap(),
        PathBuf::from("rel.jsc")
    );
    if let Some(home) = dirs::home_dir() {
        assert_eq!(
            resolve_import_path("~/cfg/x.jsc", Some(base)).unwrap(),
            home.join("cfg/x.jsc")
        );
    }
}

// ===== imports =====

#[test]
fn test_import_merges_under_document() {
    let dir = TempDir::new().unwrap();
    write(&dir, "common.jsc", "{tool: gcc, flags: {warn: all, opt: 1}, shared: yes}");
    write(&dir, "extra.jsc", "{tool: clang, added: 1}");
    let main = write(
        &dir,
        "main.jsc",
        "import \"common.jsc\"\nimport 'extra.jsc'\n{tool: msvc, flags: {opt: 3}}",
    );

    let options = linux().with_import_dir(dir.path());
    let tree = load_jsc(&main, &options).unwrap();

    assert_eq!(
        tree,
        json(
            r#"{
                "tool": "msvc",
                "flags": {"opt": 3, "warn": "all"},
                "shared": "yes",
                "added": 1
            }"#
        )
    );
}

#[test]
fn test_imported_definitions_reach_the_document() {
    let dir = TempDir::new().unwrap();
    write(&dir, "vars.jsc", "{jcs_def: {root: /opt/app}}");
    let main = write(&dir, "main.jsc", "import vars.jsc\n{bin: '${root}/bin'}");

    let tree = load_jsc(&main, &linux().with_import_dir(dir.path())).unwrap();
    assert_eq!(tree, json(r#"{"bin": "/opt/app/bin"}"#));
}

#[test]
fn test_missing_import_names_path() {
    let dir = TempDir::new().unwrap();
    let main = write(&dir, "main.jsc", "import \"nowhere.jsc\"\n{a: 1}");

    match load_jsc(&main, &linux().with_import_dir(dir.path())) {
        Err(JscError::MissingImport { path, .. }) => assert!(path.ends_with("nowhere.jsc")),
        other => panic!("Expected MissingImport, got {:?}", other),
    }
}

#[test]
fn test_import_cycle_is_reported() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.jsc", "import b.jsc\n{a: 1}");
    write(&dir, "b.jsc", "import a.jsc\n{b: 1}");
    let main = dir.path().join("a.jsc");

    match load_jsc(&main, &linux().with_import_dir(dir.path())) {
        Err(JscError::ImportCycle { chain, .. }) => {
            assert_eq!(chain.len(), 3);
            assert!(chain[0].ends_with("a.jsc"));
            assert!(chain[2].ends_with("a.jsc"));
        }
        other => panic!("Expected ImportCycle, got {:?}", other),
    }
}

#[test]
fn test_earlier_import_wins_over_later() {
    let dir = TempDir::new().unwrap();
    write(&dir, "first.jsc", "{shared: first, only_first: 1}");
    write(&dir, "second.jsc", "{shared: second, only_second: 2}");
    let main = write(&dir, "main.jsc", "import first.jsc\nimport second.jsc\n{m: 1}");

    let tree = load_jsc(&main, &linux().with_import_dir(dir.path())).unwrap();
    assert_eq!(tree["shared"], Value::String("first".into()));
    assert_eq!(
        tree,
        json(r#"{"m": 1, "shared": "first", "only_first": 1, "only_second": 2}"#)
    );
}

#[test]
fn test_diamond_imports_are_allowed() {
    let dir = TempDir::new().unwrap();
    write(&dir, "root.jsc", "{r: 1}");
    write(&dir, "left.jsc", "import root.jsc\n{l: 1}");
    write(&dir, "right.jsc", "import root.jsc\n{rt: 1}");
    let main = write(&dir, "main.jsc", "import left.jsc\nimport right.jsc\n{m: 1}");

    let tree = load_jsc(&main, &linux().with_import_dir(dir.path())).unwrap();
    assert_eq!(tree, json(r#"{"m": 1, "l": 1, "r": 1, "rt": 1}"#));
}

#[test]
fn test_missing_file_is_file_error() {
    let dir = TempDir::new().unwrap();
    let err = load_jsc(dir.path().join("absent.jsc"), &linux()).unwrap_err();
    assert!(matches!(err, JscError::FileError { code: Some(301), .. }));
}

// ===== JscConfig =====

fn sample() -> JscConfig {
    JscConfig::from_str_with(
        r#"{
    app_name: demo,
    build: {
        jobs: 8,
        ratio: 0.5,
        release: true,
        sources: [main.c, util.c],
        "max-size": 1024,
        defines: {DEBUG: "0", NAME: demo},
    },
    negative: -3,
    nothing: null,
}"#,
        &linux(),
    )
    .unwrap()
}

#[test]
fn test_typed_access() {
    let config = sample();

    let name: String = config.get("app_name").unwrap();
    let jobs: u32 = config.get("build.jobs").unwrap();
    let ratio: f64 = config.get("build.ratio").unwrap();
    let release: bool = config.get("build.release").unwrap();
    let sources: Vec<String> = config.get("build.sources").unwrap();
    let first: String = config.get("build.sources.0").unwrap();
    let defines: HashMap<String, String> = config.get("build.defines").unwrap();
    let ordered: IndexMap<String, String> = config.get("build.defines").unwrap();

    assert_eq!(name, "demo");
    assert_eq!(jobs, 8);
    assert_eq!(ratio, 0.5);
    assert!(release);
    assert_eq!(sources, vec!["main.c", "util.c"]);
    assert_eq!(first, "main.c");
    assert_eq!(defines.get("NAME").map(String::as_str), Some("demo"));
    assert_eq!(ordered.keys().collect::<Vec<_>>(), vec!["DEBUG", "NAME"]);
}

#[test]
fn test_snake_and_kebab_variants() {
    let config = sample();
    let size: u64 = config.get("build.max_size").unwrap();
    let name: String = config.get("app-name").unwrap();
    assert_eq!(size, 1024);
    assert_eq!(name, "demo");
    assert!(config.has("build.max-size"));
}

#[test]
fn test_optional_and_defaults() {
    let config = sample();
    assert_eq!(config.get_optional::<u32>("build.jobs").unwrap(), Some(8));
    assert_eq!(config.get_optional::<u32>("build.missing").unwrap(), None);
    assert_eq!(config.get::<Option<String>>("nothing").unwrap(), None);
    assert_eq!(config.get_or("build.timeout", 30u64), 30);
    assert!(!config.has("build.missing"));
}

#[test]
fn test_access_errors() {
    let config = sample();

    assert!(matches!(
        config.get::<String>("nope"),
        Err(JscError::PathNotFound { code: Some(404), .. })
    ));
    assert!(matches!(
        config.get::<u32>("negative"),
        Err(JscError::TypeError { code: Some(403), .. })
    ));
    assert!(matches!(
        config.get::<u16>("build.sources"),
        Err(JscError::TypeError { code: Some(402), .. })
    ));
    assert_eq!(config.get::<i32>("negative").unwrap(), -3);
}

#[test]
fn test_type_error_points_at_source_line() {
    let config = sample();
    match config.get::<bool>("build.jobs") {
        Err(JscError::TypeError { message, .. }) => {
            assert!(message.contains("line 4"), "{}", message);
            assert!(message.contains("jobs: 8"));
        }
        other => panic!("Expected TypeError, got {:?}", other),
    }
}

#[test]
fn test_get_keys_and_root() {
    let config = sample();
    assert_eq!(
        config.get_keys("build").unwrap(),
        vec!["jobs", "ratio", "release", "sources", "max-size", "defines"]
    );
    assert!(config.get_keys("build.jobs").is_err());
    assert_eq!(config.get_value("").unwrap(), *config.root());
}

#[test]
fn test_from_file_resolves_imports_next_to_it() {
    let dir = TempDir::new().unwrap();
    write(&dir, "base.jsc", "{port: 8080}");
    let main = write(&dir, "app.jsc", "import base.jsc\n{host: localhost}");

    let config = JscConfig::from_file(&main).unwrap();
    assert_eq!(config.get::<u16>("port").unwrap(), 8080);
    assert_eq!(config.get::<String>("host").unwrap(), "localhost");
    assert_eq!(
        config.into_value(),
        json(r#"{"host": "localhost", "port": 8080}"#)
    );
}
