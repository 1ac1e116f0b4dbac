//! Generated scripts compared against golden files, and bundle archives
//! unpacked back.

use std::fs::File;
use std::io::Read;

use autoseq_codegen::{abcomp, abeqk, equi, AbcompParams, AbeqkParams, EquiParams};
use chrono::NaiveDate;
use zip::ZipArchive;

fn tribonacci_params() -> AbcompParams {
    let mut params = AbcompParams::new(
        "tri",
        "01/02/0",
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    );
    params.from = 1;
    params.to = 2;
    params.fullname = Some("Tribonacci".to_string());
    params
}

// ===========================================================================
// Script generators
// ===========================================================================

#[test]
fn equi_check_script_matches_golden() {
    let script = equi::generate(&EquiParams::new("tri", 1)).unwrap();
    assert_eq!(script, include_str!("fixtures/equi_tri_1.txt"));
}

#[test]
fn equi_step_counts_follow_the_bound() {
    let script = equi::generate(&EquiParams::new("tri", 3)).unwrap();
    let count = |name: &str| {
        script
            .lines()
            .find(|l| l.starts_with(&format!("def {name} ")))
            .map(|l| l.matches(" & ").count())
            .unwrap()
    };
    assert_eq!(count("increase"), 6);
    assert_eq!(count("decrease"), 6);
    assert_eq!(count("constant"), 7);
}

#[test]
fn abeqk_chains_levels() {
    let script = abeqk::generate(&AbeqkParams {
        ns: "tri".to_string(),
        max_k: 4,
        max_value: 2,
    })
    .unwrap();
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[4].starts_with("def abeq4tri \"?msd_tri Eu,v $abeq3tri(n,u) & $diffabeqtri(3,n,v)"));
}

// ===========================================================================
// k-abelian complexity notebook
// ===========================================================================

#[test]
fn notebook_matches_golden() {
    let text = abcomp::notebook(&tribonacci_params()).unwrap();
    assert_eq!(text, include_str!("fixtures/tri_1_2.qmd"));
}

#[test]
fn notebook_is_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tri.qmd");
    let report = abcomp::write_notebook(&tribonacci_params(), &path).unwrap();
    assert_eq!(report.levels, 2);
    assert_eq!(report.files, vec![path.display().to_string()]);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("%SGT comp_tri2 msd_tri Comp_tri2"));
}

#[test]
fn notebook_quotes_substitution_for_python() {
    let mut params = tribonacci_params();
    params.subst = "0'1/0".to_string();
    params.verbose = true;
    let text = abcomp::notebook(&params).unwrap();
    assert!(text.contains("s = subst(\"0'1/0\")"));
    assert!(text.contains("setparams(True, False, "));
}

#[test]
fn later_levels_start_from_block_systems() {
    let mut params = tribonacci_params();
    params.from = 3;
    params.to = 3;
    let text = abcomp::notebook(&params).unwrap();
    assert!(!text.contains("## 1-abelian complexity"));
    assert!(text.contains("s3 = block(s, 3)\nns3 = address(s3, \"trib3\")"));
    assert!(text.contains("$bordercond3(i,j,3,n+2)"));
    assert!(text.contains("for k in range(3,4):"));
}

// ===========================================================================
// Walnut bundle
// ===========================================================================

#[test]
fn bundle_scripts_match_golden() {
    let bundle = abcomp::bundle(&tribonacci_params()).unwrap();
    let file = |path: &str| {
        bundle
            .files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.contents.as_str())
            .unwrap()
    };
    assert_eq!(file("prelim.py"), include_str!("fixtures/tri_1_2_prelim.py"));
    assert_eq!(
        file("Walnut/Command Files/gen_abcomp.txt"),
        include_str!("fixtures/tri_1_2_commands.txt")
    );
    assert!(!file("prelim.py").contains("## "));
}

#[test]
fn bundle_archive_unpacks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tri.zip");
    let mut params = tribonacci_params();
    params.walnut_mem = "8g".to_string();
    let report = abcomp::write_bundle(&params, &path).unwrap();
    assert!(report.files.contains(&"tri/Walnut/Word Automata Library/".to_string()));

    let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    assert!(names.iter().any(|n| n == "tri/prelim.py"));
    assert!(names.iter().any(|n| n.starts_with("tri/Walnut/Result")));

    let mut go = archive.by_name("tri/go").unwrap();
    assert_eq!(go.unix_mode().unwrap() & 0o111, 0o111);
    let mut body = String::new();
    go.read_to_string(&mut body).unwrap();
    assert!(body.contains("export WALNUT_MEM=8g\n"));
    assert!(body.contains("echo \"load gen_abcomp.txt;\""));
}
