//! CLI contract tests for `tfidf-ranker`.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const QUERIES: &str = "\
.I 001
.W
supersonic boundary layer
.I 002
.W
heat transfer in
laminar flow
";

const DOCUMENTS: &str = "\
.I 1
.T
boundary layers
.A
someone
.W
the supersonic boundary layer and the boundary layer
at high speed .
.I 2
.T
wings
.W
lift of a wing in a slipstream .
.I 3
.W
heat transfer across laminar flow
";

fn ranker() -> assert_cmd::Command {
    cargo_bin_cmd!("tfidf-ranker")
}

fn write_inputs(root: &Path) -> (String, String) {
    let queries = root.join("queries.qry");
    let documents = root.join("docs.all");
    fs::write(&queries, QUERIES).expect("write queries");
    fs::write(&documents, DOCUMENTS).expect("write documents");
    (
        queries.to_str().unwrap().to_string(),
        documents.to_str().unwrap().to_string(),
    )
}

fn parse_lines(text: &str) -> Vec<(u32, u32, f64)> {
    text.lines()
        .map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            assert_eq!(fields.len(), 3, "line {line:?}");
            (
                fields[0].parse().unwrap(),
                fields[1].parse().unwrap(),
                fields[2].parse().unwrap(),
            )
        })
        .collect()
}

#[test]
fn writes_one_line_per_pair_in_rank_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (queries, documents) = write_inputs(tmp.path());
    let output = tmp.path().join("out.txt");

    ranker()
        .args(["--queries", &queries, "--documents", &documents, "--output", output.to_str().unwrap()])
        .assert()
        .success();

    let lines = parse_lines(&fs::read_to_string(&output).unwrap());
    assert_eq!(lines.len(), 6);

    // query 1 -> document 1 first, the others score 0 and keep id order
    assert_eq!((lines[0].0, lines[0].1), (1, 1));
    assert!(lines[0].2 > 0.0);
    assert_eq!(lines[1], (1, 2, 0.0));
    assert_eq!(lines[2], (1, 3, 0.0));

    // query 2 -> document 3 first
    assert_eq!((lines[3].0, lines[3].1), (2, 3));
    assert!(lines[3].2 > 0.0);
}

#[test]
fn top_limits_documents_per_query() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (queries, documents) = write_inputs(tmp.path());
    let output = tmp.path().join("out.txt");

    ranker()
        .args([
            "--queries",
            &queries,
            "--documents",
            &documents,
            "--output",
            output.to_str().unwrap(),
            "--top",
            "1",
        ])
        .assert()
        .success();

    let lines = parse_lines(&fs::read_to_string(&output).unwrap());
    assert_eq!(lines.iter().map(|l| (l.0, l.1)).collect::<Vec<_>>(), vec![(1, 1), (2, 3)]);
}

#[test]
fn identical_runs_give_identical_output() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (queries, documents) = write_inputs(tmp.path());
    let first = tmp.path().join("a.txt");
    let second = tmp.path().join("b.txt");

    for out in [&first, &second] {
        ranker()
            .args(["--queries", &queries, "--documents", &documents, "--output", out.to_str().unwrap()])
            .assert()
            .success();
    }
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn dump_writes_snapshot() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (queries, documents) = write_inputs(tmp.path());
    let output = tmp.path().join("out.txt");
    let dump = tmp.path().join("tables.cbor");

    ranker()
        .args([
            "--queries",
            &queries,
            "--documents",
            &documents,
            "--output",
            output.to_str().unwrap(),
            "--dump",
            dump.to_str().unwrap(),
        ])
        .assert()
        .success();

    let snapshot = tfidf_ranker::PipelineSnapshot::read(&dump).expect("snapshot");
    assert_eq!(snapshot.into_pipeline().ranking().len(), 6);
}

#[test]
fn missing_input_fails_without_output() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (_, documents) = write_inputs(tmp.path());
    let output = tmp.path().join("out.txt");
    let missing = tmp.path().join("nope.qry");

    ranker()
        .args([
            "--queries",
            missing.to_str().unwrap(),
            "--documents",
            &documents,
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.qry"));

    assert!(!output.exists());
}

#[test]
fn custom_stop_words_change_tokens() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (queries, documents) = write_inputs(tmp.path());
    let stop = tmp.path().join("stop.txt");
    // drop every query term of query 1
    fs::write(&stop, "supersonic\nboundary\nlayer\n").unwrap();
    let output = tmp.path().join("out.txt");

    ranker()
        .args([
            "--queries",
            &queries,
            "--documents",
            &documents,
            "--output",
            output.to_str().unwrap(),
            "--stop-words",
            stop.to_str().unwrap(),
        ])
        .assert()
        .success();

    let lines = parse_lines(&fs::read_to_string(&output).unwrap());
    assert!(lines.iter().filter(|l| l.0 == 1).all(|l| l.2 == 0.0));
}
