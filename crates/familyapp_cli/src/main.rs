//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `familyapp_core` linkage without the Flutter/FFI runtime.
//! - Print a read-only summary of a store file.
//!
//! Usage: `familyapp_cli [STORE_PATH]` (defaults to the per-user store).

use familyapp_core::{DataStore, FileBacking};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("familyapp_core ping={}", familyapp_core::ping());
    println!("familyapp_core version={}", familyapp_core::core_version());

    let backing = match std::env::args_os().nth(1) {
        Some(path) => FileBacking::open(path),
        None => FileBacking::open_default(),
    };
    let backing = match backing {
        Ok(backing) => backing,
        Err(err) => {
            eprintln!("store unavailable: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("store path={}", backing.path().display());
    let store = DataStore::open(backing);
    println!(
        "store members={} tasks={} events={}",
        store.members().len(),
        store.tasks().len(),
        store.events().len()
    );

    let dangling = store
        .tasks()
        .iter()
        .filter(|task| task.has_assignee() && store.assignee_of(task).is_none())
        .count();
    if dangling > 0 {
        println!("store tasks_with_missing_assignee={dangling}");
    }
    ExitCode::SUCCESS
}
