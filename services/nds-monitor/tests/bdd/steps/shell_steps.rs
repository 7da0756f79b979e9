//! BDD step definitions for the startup banner

use cucumber::{given, then, when};

use nds_monitor::config::BuildInfo;
use nds_monitor::shell::{banner_lines, AppShell};

use crate::world::MonitorWorld;

#[given(expr = "build version {string} from commit {string} dated {string}")]
fn build_info(world: &mut MonitorWorld, version: String, commit: String, date: String) {
    world.build = Some(BuildInfo {
        build_version: version,
        build_commit: commit,
        build_date: date,
    });
}

#[when("the shell starts")]
fn shell_starts(world: &mut MonitorWorld) {
    let build = world.build.clone().expect("build info not set");
    let shell = AppShell::new(build);
    world.banner = banner_lines(shell.build());
}

#[then(expr = "the shell should announce {int} lines")]
fn announced_lines(world: &mut MonitorWorld, count: usize) {
    assert_eq!(world.banner.len(), count, "banner: {:?}", world.banner);
}

#[then(expr = "banner line {int} should be {string}")]
fn banner_line_is(world: &mut MonitorWorld, line: usize, expected: String) {
    assert_eq!(world.banner[line - 1], expected);
}

#[then(expr = "banner line {int} should start with {string}")]
fn banner_line_starts_with(world: &mut MonitorWorld, line: usize, prefix: String) {
    let actual = &world.banner[line - 1];
    assert!(
        actual.starts_with(&prefix),
        "Expected banner line {} to start with '{}', got '{}'",
        line,
        prefix,
        actual
    );
}
