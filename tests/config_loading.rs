#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for platform-gated configuration loading.

mod common;

use sysprefs_cli::config::Config;
use sysprefs_cli::platform::{Os, Platform};
use sysprefs_cli::plist::PlistValue;

/// A repo with every resource kind configured.
fn full_repo() -> common::IntegrationTestContext {
    let repo = common::IntegrationTestContext::new();
    repo.write_conf(
        "plists.toml",
        "[finder]\nfile = \"/tmp/com.apple.finder.plist\"\n[finder.values]\nShowPathbar = true\n",
    );
    repo.write_conf(
        "printers.toml",
        "[office]\nname = \"Office Laser\"\ndriver = \"HP LaserJet 4000 Series PS\"\n",
    );
    repo.write_conf(
        "launch-agents.toml",
        "[cleanup]\nlabel = \"com.example.cleanup\"\nprogram_arguments = [\"/usr/local/bin/cleanup\"]\n",
    );
    repo
}

#[test]
fn macos_loads_plists_and_launch_agents() {
    let repo = full_repo();
    let config = Config::load(repo.root_path(), &Platform { os: Os::Macos }).unwrap();
    assert_eq!(config.plists.len(), 1);
    assert_eq!(config.launch_agents.len(), 1);
    assert!(config.printers.is_empty(), "printers are Windows-only");
}

#[test]
fn windows_loads_printers_only() {
    let repo = full_repo();
    let config = Config::load(repo.root_path(), &Platform { os: Os::Windows }).unwrap();
    assert_eq!(config.printers.len(), 1);
    assert!(config.plists.is_empty());
    assert!(config.launch_agents.is_empty());
}

#[test]
fn linux_loads_no_resources() {
    let repo = full_repo();
    let config = Config::load(repo.root_path(), &Platform { os: Os::Linux }).unwrap();
    assert!(config.plists.is_empty());
    assert!(config.printers.is_empty());
    assert!(config.launch_agents.is_empty());
}

#[test]
fn empty_conf_files_mean_nothing_configured() {
    let repo = common::IntegrationTestContext::new();
    let config = Config::load(repo.root_path(), &Platform { os: Os::Macos }).unwrap();
    assert!(config.plists.is_empty());
    assert!(config.launch_agents.is_empty());
}

#[test]
fn missing_conf_directory_means_nothing_configured() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(dir.path(), &Platform { os: Os::Macos }).unwrap();
    assert!(config.plists.is_empty());
    assert!(config.launch_agents.is_empty());
    // tool paths still resolve to their defaults
    assert_eq!(config.tools.plistbuddy, "/usr/libexec/PlistBuddy");
}

#[test]
fn plist_values_become_typed() {
    let repo = common::IntegrationTestContext::new();
    repo.write_conf(
        "plists.toml",
        "[global]\nfile = \"/tmp/g.plist\"\n[global.values]\nAppleFirstWeekday = { gregorian = 4 }\ntilesize = 48\nname = \"dock\"\n",
    );

    let config = Config::load(repo.root_path(), &Platform { os: Os::Macos }).unwrap();
    assert_eq!(config.plists.len(), 3);

    let weekday = config
        .plists
        .iter()
        .find(|e| e.entry == "AppleFirstWeekday")
        .expect("AppleFirstWeekday entry");
    assert!(matches!(weekday.value, PlistValue::Dict(_)));

    let tilesize = config
        .plists
        .iter()
        .find(|e| e.entry == "tilesize")
        .expect("tilesize entry");
    assert_eq!(tilesize.value, PlistValue::Integer(48));
}

#[test]
fn unknown_plist_encoding_is_fatal_on_macos() {
    let repo = common::IntegrationTestContext::new();
    repo.write_conf(
        "plists.toml",
        "[dock]\nfile = \"/tmp/d.plist\"\nencoding = \"latin-1\"\n[dock.values]\ntilesize = 48\n",
    );

    let err = Config::load(repo.root_path(), &Platform { os: Os::Macos }).unwrap_err();
    assert!(
        format!("{err:#}").contains("latin-1"),
        "error names the encoding: {err:#}"
    );
}

/// The same bad encoding is irrelevant on a platform that never loads
/// plists.toml.
#[test]
fn unknown_plist_encoding_is_ignored_off_macos() {
    let repo = common::IntegrationTestContext::new();
    repo.write_conf(
        "plists.toml",
        "[dock]\nfile = \"/tmp/d.plist\"\nencoding = \"latin-1\"\n[dock.values]\ntilesize = 48\n",
    );

    assert!(Config::load(repo.root_path(), &Platform { os: Os::Windows }).is_ok());
}

#[test]
fn invalid_toml_names_the_file() {
    let repo = common::IntegrationTestContext::new();
    repo.write_conf("plists.toml", "not [ valid");

    let err = Config::load(repo.root_path(), &Platform { os: Os::Macos }).unwrap_err();
    assert!(
        format!("{err:#}").contains("plists.toml"),
        "error names the file: {err:#}"
    );
}

#[test]
fn tools_overrides_apply() {
    let repo = common::IntegrationTestContext::new();
    repo.write_conf(
        "tools.toml",
        "plistbuddy = \"/opt/homebrew/bin/PlistBuddy\"\nlaunchctl = \"/opt/launchctl\"\n",
    );

    let config = Config::load(repo.root_path(), &Platform { os: Os::Macos }).unwrap();
    assert_eq!(config.tools.plistbuddy, "/opt/homebrew/bin/PlistBuddy");
    assert_eq!(config.tools.launchctl, "/opt/launchctl");
    // untouched tools keep their defaults
    assert_eq!(config.tools.plutil, "/usr/bin/plutil");
}
