//! End-to-end runs against real temporary git repositories.

mod common;

use common::{days_ago, digests, report, Fixture, PROD, STG};

/// Upstream with all three branches, cloned, then `main` moved ahead upstream.
fn three_branch_fixture() -> Fixture {
    let fx = Fixture::new();
    fx.commit_file("ARO_HCP_REPO_REVISION=\"526f70d3d81f\"\n", "2025-09-24T02:55:10-0700");
    fx.switch(PROD, true);
    fx.switch("main", false);
    fx.switch(STG, true);
    fx.commit_file("ARO_HCP_REPO_REVISION = 'stg0000001'\n", "2025-09-25T12:00:00+0200");
    fx.switch("main", false);
    fx.clone_work();
    fx.commit_file("ARO_HCP_REPO_REVISION = \"int0000002\"\n", "2025-09-26T08:30:00+0000");
    fx
}

#[test]
fn reports_remote_tip_for_every_environment() {
    let fx = three_branch_fixture();
    let output = fx.run(&[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report = report(&output);
    assert_eq!(
        report,
        serde_json::json!({
            "int": [{"digest": "int0000002", "commit_date": "2025-09-26 08:30:00 +0000"}],
            "stg": [{"digest": "stg0000001", "commit_date": "2025-09-25 10:00:00 +0000"}],
            "prod": [{"digest": "526f70d3d81f", "commit_date": "2025-09-24 09:55:10 +0000"}],
        })
    );
}

#[test]
fn quick_mode_skips_fetch_and_reset() {
    let fx = three_branch_fixture();
    let output = fx.run(&["--quick", "-e", "int"]);
    assert!(output.status.success());
    assert_eq!(digests(&report(&output), "int"), vec!["526f70d3d81f"]);
}

#[test]
fn environment_filter_limits_keys() {
    let fx = three_branch_fixture();
    let output = fx.run(&["--env", "int,stg"]);
    assert!(output.status.success());

    let report = report(&output);
    let keys: Vec<_> = report.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["int", "stg"]);
}

#[test]
fn tip_date_tracks_the_file_not_head() {
    let fx = Fixture::new();
    fx.commit_file("ARO_HCP_REPO_REVISION = abc\n", "2025-09-24T02:55:10-0700");
    fx.commit_other("2025-09-28T00:00:00+0000");
    fx.clone_work();

    let output = fx.run(&["-e", "int"]);
    let int = &report(&output)["int"][0];
    assert_eq!(int["commit_date"], "2025-09-24 09:55:10 +0000");
}

#[test]
fn missing_branch_fails_alone_and_exit_code_stays_zero() {
    let fx = Fixture::new();
    fx.commit_file("ARO_HCP_REPO_REVISION = main1\n", "2025-09-24T00:00:00+0000");
    fx.switch(PROD, true);
    fx.switch("main", false);
    fx.clone_work();

    let output = fx.run(&[]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(STG), "stderr should name the failed branch: {stderr}");

    let report = report(&output);
    assert_eq!(digests(&report, "int"), vec!["main1"]);
    assert!(digests(&report, "stg").is_empty());
    assert_eq!(digests(&report, "prod"), vec!["main1"]);
}

#[test]
fn window_reports_history_without_duplicate_tip_or_keyless_commits() {
    let fx = Fixture::new();
    fx.commit_file("ARO_HCP_REPO_REVISION = v1\n", &days_ago(3));
    fx.commit_file("LEGACY_REVISION = v2\n", &days_ago(2));
    fx.commit_file("ARO_HCP_REPO_REVISION = v3\n", &days_ago(1));
    fx.clone_work();

    let output = fx.run(&["-e", "int", "--days", "7"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(digests(&report(&output), "int"), vec!["v3", "v1"]);

    let output = fx.run(&["-e", "int", "--days", "0"]);
    assert_eq!(digests(&report(&output), "int"), vec!["v3"]);
}

#[test]
fn single_commit_in_window_is_reported_once() {
    let fx = Fixture::new();
    fx.commit_file("ARO_HCP_REPO_REVISION = only\n", &days_ago(1));
    fx.clone_work();

    let output = fx.run(&["-e", "int", "-d", "7"]);
    assert_eq!(digests(&report(&output), "int"), vec!["only"]);
}

#[test]
fn commits_older_than_window_are_excluded() {
    let fx = Fixture::new();
    fx.commit_file("ARO_HCP_REPO_REVISION = ancient\n", &days_ago(30));
    fx.commit_file("ARO_HCP_REPO_REVISION = recent\n", &days_ago(2));
    fx.commit_file("ARO_HCP_REPO_REVISION = latest\n", &days_ago(1));
    fx.clone_work();

    let output = fx.run(&["-e", "int", "-d", "7"]);
    assert_eq!(digests(&report(&output), "int"), vec!["latest", "recent"]);
}

#[test]
fn key_and_file_can_be_overridden_from_environment() {
    let fx = Fixture::new();
    std::fs::write(fx.upstream.join("versions.env"), "OTHER_REVISION = xyz\n").unwrap();
    common::git(&fx.upstream, &["add", "versions.env"], None);
    common::git(&fx.upstream, &["commit", "-q", "-m", "add"], Some("2025-09-24T00:00:00+0000"));
    fx.clone_work();

    let output = fx.run_with_env(
        &["-e", "int"],
        &[("REPO_REV_FILE", "versions.env"), ("REPO_REV_KEY", "OTHER_REVISION")],
    );
    assert_eq!(digests(&report(&output), "int"), vec!["xyz"]);
}

#[test]
fn largest_day_count_scans_all_history() {
    let fx = Fixture::new();
    fx.commit_file("ARO_HCP_REPO_REVISION = old\n", "2001-01-01T00:00:00+0000");
    fx.commit_file("ARO_HCP_REPO_REVISION = new\n", &days_ago(1));
    fx.clone_work();

    let output = fx.run(&["--quick", "-e", "int", "-d", "4294967295"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(digests(&report(&output), "int"), vec!["new", "old"]);
}
