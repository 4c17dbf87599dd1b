//! Example 01: Basic Usage
//!
//! This example adds, completes, edits and deletes tasks with a file-backed
//! TaskList, then reopens the list to show what was persisted.
//!
//! Run with: cargo run --example 01_basic_usage

use eyre::Result;
use tasklist::{FileStorage, SequentialIds, TaskFilter, TaskList};

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;
    let data_dir = temp_dir.path().to_path_buf();

    println!("TaskList Basic Usage Example");
    println!("============================\n");
    println!("Data dir: {}\n", data_dir.display());

    let mut list = TaskList::open(FileStorage::open(&data_dir)?, SequentialIds::new());
    println!("List opened with {} tasks.\n", list.len());

    // ADD
    println!("1. ADD - Adding three tasks...");
    let milk = list.add_task("Buy milk").unwrap_or_default();
    let call = list.add_task("  Call the plumber  ").unwrap_or_default();
    let plants = list.add_task("Water plants").unwrap_or_default();
    println!("   Blank text is ignored: {:?}", list.add_task("   "));
    for task in list.tasks() {
        println!("   [{}] {:?}", task.id, task.text);
    }
    println!();

    // TOGGLE
    println!("2. TOGGLE - Completing task {}...", milk);
    list.toggle_complete(milk);
    println!("   Completed: {}\n", list.filtered(TaskFilter::Completed).count());

    // EDIT
    println!("3. EDIT - Renaming task {}...", milk);
    list.begin_edit(milk, "Buy milk");
    list.update_draft("Buy oat milk");
    list.save_edit(milk);
    if let Some(task) = list.get(milk) {
        println!("   Now: {:?} (completed: {})\n", task.text, task.completed);
    }

    // CANCEL
    println!("4. CANCEL - Starting and abandoning an edit of task {}...", call);
    list.begin_edit(call, "Call the plumber");
    list.update_draft("something else");
    list.cancel_edit();
    if let Some(task) = list.get(call) {
        println!("   Unchanged: {:?}\n", task.text);
    }

    // DELETE
    println!("5. DELETE - Removing task {}...", plants);
    list.delete_task(plants);
    println!("   Deleting again is a no-op: {}\n", list.delete_task(plants));

    // REOPEN
    println!("6. REOPEN - Loading the list from disk...");
    let reopened = TaskList::open(FileStorage::open(&data_dir)?, SequentialIds::new());
    let counts = reopened.counts();
    println!(
        "   {} total, {} active, {} completed",
        counts.total, counts.active, counts.completed
    );

    println!("\nExample complete!");
    Ok(())
}
