use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Inputs {
    tmp: TempDir,
    seq: PathBuf,
    tax: PathBuf,
    out: PathBuf,
}

fn inputs() -> Inputs {
    let tmp = TempDir::new().unwrap();
    let seq = tmp.path().join("a.fasta");
    let tax = tmp.path().join("tax.csv");
    let out = tmp.path().join("out");
    fs::write(&seq, ">p1\nMKVLAAGIVGLLLA\n").unwrap();
    fs::write(&tax, "p1,Eukaryota\n").unwrap();
    fs::create_dir(&out).unwrap();
    Inputs { tmp, seq, tax, out }
}

/// Run the binary with an empty PATH so no container runtime can be reached.
fn subloc(inputs: &Inputs, args: &[&std::ffi::OsStr]) -> Output {
    let bin_dir = inputs.tmp.path().join("bin");
    fs::create_dir_all(&bin_dir).unwrap();
    Command::new(env!("CARGO_BIN_EXE_subloc"))
        .args(args)
        .env("PATH", &bin_dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn os(p: &Path) -> &std::ffi::OsStr {
    p.as_os_str()
}

fn assert_usage_error(output: &Output, arg: &str, hint: &str) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr);
    assert!(stderr.contains(&format!("Missing required argument: {}", arg)));
    assert!(stderr.contains(hint));
    assert!(stderr.contains("Usage: subloc"));
    assert!(stderr.contains("try '--help'"));
}

#[test]
fn missing_seq_prints_guidance_and_exits_2() {
    let i = inputs();
    let output = subloc(&i, &["-t".as_ref(), os(&i.tax), "-r".as_ref(), os(&i.out)]);

    assert_usage_error(&output, "-i/--seq", "protein sequence file");
    assert_eq!(fs::read_dir(&i.out).unwrap().count(), 0);
}

#[test]
fn missing_tax_prints_guidance_and_exits_2() {
    let i = inputs();
    let output = subloc(&i, &["-i".as_ref(), os(&i.seq), "-r".as_ref(), os(&i.out)]);

    assert_usage_error(&output, "-t/--tax", "taxonomy classification file");
    assert_eq!(fs::read_dir(&i.out).unwrap().count(), 0);
}

#[test]
fn missing_outdir_prints_guidance_and_exits_2() {
    let i = inputs();
    let output = subloc(&i, &["-i".as_ref(), os(&i.seq), "-t".as_ref(), os(&i.tax)]);

    assert_usage_error(&output, "-r/--outdir", "results directory");
}

#[test]
fn help_exits_0() {
    let i = inputs();
    let output = subloc(&i, &["-h".as_ref()]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: subloc"));
    assert!(stdout.contains("--seq"));
}

#[test]
fn version_exits_0_even_without_a_runtime() {
    let i = inputs();
    let output = subloc(&i, &["--version".as_ref()]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(&format!("subloc {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn unreachable_runtime_still_cleans_up_and_exits_0() {
    let i = inputs();
    fs::write(i.out.join("notes.txt"), "keep").unwrap();
    let output = subloc(
        &i,
        &[
            "-i".as_ref(),
            os(&i.seq),
            "-t".as_ref(),
            os(&i.tax),
            "-r".as_ref(),
            os(&i.out),
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let left: Vec<_> = fs::read_dir(&i.out)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(left, vec![std::ffi::OsString::from("notes.txt")]);
}
