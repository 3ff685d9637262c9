use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_stat() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gvt")?;
    let output = cmd.arg("stat").arg("tests/gff/S288c.gff3").output()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.lines().count(), 7);

    // seqids, most populated first
    assert_eq!(stdout.lines().next().unwrap(), "seqid\tI\t8");
    assert!(stdout.contains("seqid\tII\t2"));

    // types, most frequent first
    assert!(stdout.contains("type\tgene\t7"));
    assert!(stdout.contains("type\tmRNA\t1"));
    assert!(stdout.contains("type\tCDS\t1"));
    assert!(stdout.contains("type\tchromosome\t1"));

    // grand total carries the track name
    assert_eq!(stdout.lines().last().unwrap(), "all\tS288c\t10");

    Ok(())
}

#[test]
fn command_stat_gz() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gvt")?;
    let output = cmd
        .arg("stat")
        .arg("tests/gff/S288c.gff3.gz")
        .arg("--name")
        .arg("yeast")
        .output()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("seqid\tI\t8"));
    assert_eq!(stdout.lines().last().unwrap(), "all\tyeast\t10");

    Ok(())
}

#[test]
fn command_stat_outfile() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outfile = temp.path().join("stat.tsv");

    let mut cmd = Command::cargo_bin("gvt")?;
    cmd.arg("stat")
        .arg("tests/gff/S288c.gff3")
        .arg("-o")
        .arg(&outfile)
        .assert()
        .success();

    let content = fs::read_to_string(&outfile)?;
    assert!(content.contains("type\tgene\t7"));

    Ok(())
}

#[test]
fn command_stat_gtf() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("test.gtf");

    fs::write(
        &input,
        "I\tsgd\tgene\t335\t649\t.\t+\t.\tgene_id \"YAL069W\";\n\
         I\tsgd\ttranscript\t335\t649\t.\t+\t.\ttranscript_id \"YAL069W_mRNA\";\n",
    )?;

    let mut cmd = Command::cargo_bin("gvt")?;
    let output = cmd.arg("stat").arg(&input).output()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("seqid\tI\t2"));
    assert!(stdout.contains("type\tgene\t1"));
    assert_eq!(stdout.lines().last().unwrap(), "all\ttest\t2");

    Ok(())
}

#[test]
fn command_stat_bad_format() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("test.bed");
    fs::write(&input, "I\t0\t100\n")?;

    let mut cmd = Command::cargo_bin("gvt")?;
    cmd.arg("stat")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in gtf/gff3 format"));

    Ok(())
}

#[test]
fn command_stat_missing_file() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gvt")?;
    cmd.arg("stat")
        .arg("tests/gff/nonexistent.gff3")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not readable"));

    Ok(())
}
