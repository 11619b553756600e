use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const UNSORTED: &str = "#include <vector>\n#include <iostream>\n\nint main() {}\n";
const SORTED: &str = "#include <iostream>\n#include <vector>\n\nint main() {}\n";

fn write_source(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create source dir");
    }
    fs::write(&path, contents).expect("write source");
    path
}

#[test]
fn prints_arranged_file() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_source(dir.path(), "main.C", UNSORTED);

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg(&file).arg("--root").arg(dir.path());

    cmd.assert().success().stdout(SORTED);
    assert_eq!(fs::read_to_string(&file).unwrap(), UNSORTED);
}

#[test]
fn rewrites_in_place() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_source(dir.path(), "main.C", UNSORTED);

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg("-i").arg(&file).arg("--root").arg(dir.path());

    cmd.assert().success().stdout("");
    assert_eq!(fs::read_to_string(&file).unwrap(), SORTED);
}

#[test]
fn check_reports_diff_and_fails() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_source(dir.path(), "main.C", UNSORTED);

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg("--check").arg(&file).arg("--root").arg(dir.path());

    cmd.assert()
        .code(1)
        .stdout(
            predicate::str::contains("--- a/")
                .and(predicate::str::contains("-#include"))
                .and(predicate::str::contains("+#include")),
        );
    assert_eq!(fs::read_to_string(&file).unwrap(), UNSORTED);
}

#[test]
fn check_passes_on_tidy_file() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_source(dir.path(), "main.C", SORTED);

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg("--check").arg(&file).arg("--root").arg(dir.path());

    cmd.assert().success().stdout("");
}

#[test]
fn reads_stdin() {
    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg("-").write_stdin("#include \"b.H\" // bee\n#include <a>\n");

    cmd.assert()
        .success()
        .stdout("#include <a>\n\n#include \"b.H\" // bee\n");
}

#[test]
fn applies_project_hierarchy() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join(".tidy-includes.toml"),
        "[[hierarchy]]\nchildren = [{ name = \"zeta\" }, { name = \"alpha\" }]\n",
    )
    .expect("write config");
    let file = write_source(
        dir.path(),
        "src/widget.C",
        "#include <alpha/a.H>\n#include <zeta/z.H>\n#include \"widget.H\"\n",
    );

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg(&file).arg("--root").arg(dir.path());

    cmd.assert()
        .success()
        .stdout("#include \"widget.H\"\n\n#include <zeta/z.H>\n\n#include <alpha/a.H>\n");
}

#[test]
fn line_length_option_wraps_comments() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_source(
        dir.path(),
        "main.C",
        "#include <vector> // keeps the elements in one contiguous block\n",
    );

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg(&file).arg("--root").arg(dir.path()).arg("-l").arg("30");

    cmd.assert().success().stdout(
        "// keeps the elements in one\n// contiguous block\n#include <vector>\n",
    );
}

#[test]
fn rejects_tiny_line_length() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_source(dir.path(), "main.C", UNSORTED);

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg(&file).arg("--root").arg(dir.path()).arg("--line-length").arg("5");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("line_length must be at least 20"));
}

#[test]
fn unterminated_comment_leaves_file_alone() {
    let dir = TempDir::new().expect("temp dir");
    let source = "#include <vector>\n#include <iostream>\n/* never closed\n";
    let file = write_source(dir.path(), "main.C", source);

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg("--in-place").arg(&file).arg("--root").arg(dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("never closed"));
    assert_eq!(fs::read_to_string(&file).unwrap(), source);
}

#[test]
fn resolves_quoted_project_includes() {
    let dir = TempDir::new().expect("temp dir");
    write_source(dir.path(), "lib/util.H", "");
    let file = write_source(
        dir.path(),
        "lib/main.C",
        "#include \"util.H\"\n#include \"missing.H\"\n",
    );

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg(&file)
        .arg("--root")
        .arg(dir.path())
        .arg("--resolve-quoted");

    cmd.assert()
        .success()
        .stdout("#include <lib/util.H>\n\n#include \"missing.H\"\n");
}

#[test]
fn refuses_in_place_stdin() {
    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg("-i").arg("-").write_stdin("#include <a>\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("stdin cannot be rewritten"));
}

#[test]
fn check_accepts_tidy_crlf_file() {
    let dir = TempDir::new().expect("temp dir");
    let source = "int x;\r\n#include <iostream>\r\n#include <vector>\r\n\r\nint main() {}\r\n";
    let file = write_source(dir.path(), "main.C", source);

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg("--check").arg(&file).arg("--root").arg(dir.path());

    cmd.assert().success().stdout("");
}

#[test]
fn in_place_keeps_crlf_and_missing_final_newline() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_source(
        dir.path(),
        "main.C",
        "int a;\r\n#include <vector>\r\n#include <iostream>\r\nint main() {}",
    );

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg("-i").arg(&file).arg("--root").arg(dir.path());

    cmd.assert().success();
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "int a;\r\n#include <iostream>\r\n#include <vector>\r\nint main() {}"
    );
}

#[test]
fn check_accepts_file_without_final_newline() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_source(dir.path(), "main.C", "int main() {}");

    let mut cmd = cargo_bin_cmd!("tidy-includes");
    cmd.arg("--check").arg(&file).arg("--root").arg(dir.path());

    cmd.assert().success().stdout("");
}
