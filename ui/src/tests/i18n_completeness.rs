//! Cross-checks `t!` call sites against the pt-BR bundle: every key used in
//! `src/` must be defined, and every named argument a call passes must be a
//! `{ $placeholder }` of that message.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const BUNDLE: &str = "i18n/pt-BR/tagvalidator-ui.ftl";

/// Message id -> message body. Terms, comments and section headers are skipped.
fn bundle_messages(ftl: &str) -> BTreeMap<String, String> {
    ftl.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| line.split_once('='))
        .map(|(id, body)| (id.trim(), body.trim()))
        .filter(|(id, _)| !id.is_empty() && id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'))
        .map(|(id, body)| (id.to_string(), body.to_string()))
        .collect()
}

/// A single `t!(<key>, name = value, ...)` call site.
#[derive(Debug)]
struct Usage {
    key: String,
    args: Vec<String>,
    file: PathBuf,
}

fn rust_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            rust_sources(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

fn usages_in(file: &Path, source: &str) -> Vec<Usage> {
    let mut found = Vec::new();
    for (start, _) in source.match_indices("t!(\"") {
        // `format!("` and friends end in `t!("` too.
        let preceded_by_ident = source[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        if preceded_by_ident {
            continue;
        }
        let chunk = &source[start + 4..];
        let Some((key, rest)) = chunk.split_once('"') else { continue };
        if key.is_empty() || !key.chars().all(valid_key_char) {
            continue;
        }
        let call = rest.split(')').next().unwrap_or_default();
        let args = call
            .split(',')
            .filter_map(|part| part.split_once('='))
            .map(|(name, _)| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        found.push(Usage {
            key: key.to_string(),
            args,
            file: file.to_path_buf(),
        });
    }
    found
}

#[test]
fn scanner_skips_other_macros_ending_in_t() {
    let source = r#"let a = format!("dashboard-{}.html", x); let b = t!("nav-export");"#;
    let keys: Vec<String> = usages_in(Path::new("x.rs"), source).into_iter().map(|u| u.key).collect();
    assert_eq!(keys, vec!["nav-export".to_string()]);
}

#[test]
fn every_used_key_is_defined_with_its_placeholders() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let ftl = fs::read_to_string(root.join(BUNDLE)).expect("pt-BR bundle readable");
    let messages = bundle_messages(&ftl);
    assert!(messages.contains_key("dashboard-title"), "bundle parsed to {messages:?}");

    let mut files = Vec::new();
    rust_sources(&root.join("src"), &mut files);
    let usages: Vec<Usage> = files
        .iter()
        .filter_map(|file| fs::read_to_string(file).ok().map(|src| usages_in(file, &src)))
        .flatten()
        .collect();
    assert!(
        usages.iter().any(|usage| usage.key == "nav-overview"),
        "no t!() call sites found; was the macro renamed?"
    );

    let mut problems = Vec::new();
    for usage in &usages {
        let Some(body) = messages.get(&usage.key) else {
            problems.push(format!("{}: `{}` not in bundle", usage.file.display(), usage.key));
            continue;
        };
        for arg in &usage.args {
            if !body.contains(&format!("${arg}")) {
                problems.push(format!("{}: `{}` has no `${arg}`", usage.file.display(), usage.key));
            }
        }
    }
    assert!(problems.is_empty(), "translation problems:\n{}", problems.join("\n"));

    let used: BTreeSet<&str> = usages.iter().map(|usage| usage.key.as_str()).collect();
    let unused: Vec<&str> = messages.keys().map(String::as_str).filter(|key| !used.contains(key)).collect();
    if !unused.is_empty() {
        eprintln!("[i18n] pt-BR keys without a call site: {}", unused.join(", "));
    }
}

#[test]
fn only_the_fixed_locale_is_shipped() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("i18n");
    let locales: Vec<String> = fs::read_dir(&root)
        .expect("i18n dir")
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(locales, vec!["pt-BR".to_string()]);
}
