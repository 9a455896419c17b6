use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Result;
use crate::store::{SortBy, TaskStore, Warning};
use crate::task::Task;

/// Run the interactive menu loop until the user exits (or input ends).
///
/// Generic over the I/O pair so tests can script whole sessions; `main` passes
/// locked stdin/stdout. The caller persists the store after this returns —
/// the loop itself never touches the backing file.
pub fn run_menu<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        write_menu(output)?;
        let Some(choice) = prompt(input, output, "Your choice: ")? else {
            debug!("input closed, leaving menu loop");
            return Ok(());
        };

        match choice.trim() {
            "1" => add_task(store, input, output)?,
            "2" => render_tasks(output, store.tasks())?,
            "3" => complete_task(store, input, output)?,
            "4" => delete_task(store, input, output)?,
            "5" => edit_task(store, input, output)?,
            "6" => search_tasks(store, input, output)?,
            "7" => sort_tasks(store, input, output)?,
            "8" => clear_all(store, input, output)?,
            "9" => {
                writeln!(output, "All tasks saved. Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid option.")?,
        }
    }
}

fn write_menu<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "\n==== TO-DO LIST MENU ====")?;
    writeln!(output, "1. Add Task")?;
    writeln!(output, "2. View Tasks")?;
    writeln!(output, "3. Complete Task")?;
    writeln!(output, "4. Delete Task")?;
    writeln!(output, "5. Edit Task")?;
    writeln!(output, "6. Search Task")?;
    writeln!(output, "7. Sort Tasks")?;
    writeln!(output, "8. Clear All Tasks")?;
    writeln!(output, "9. Exit")?;
    Ok(())
}

/// Write a prompt and read one line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn render_tasks<W: Write>(output: &mut W, tasks: &[Task]) -> Result<()> {
    if tasks.is_empty() {
        writeln!(output, "No tasks found.")?;
        return Ok(());
    }

    writeln!(output, "\n--- YOUR TASKS ---")?;
    for (i, task) in tasks.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, task.summary())?;
    }
    writeln!(output, "-------------------\n")?;
    Ok(())
}

fn report_warnings<W: Write>(output: &mut W, warnings: &[Warning]) -> Result<()> {
    for warning in warnings {
        writeln!(output, "warning: {warning}")?;
    }
    Ok(())
}

fn add_task<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let Some(title) = prompt(input, output, "Enter task title: ")? else {
        return Ok(());
    };
    let Some(priority) = prompt(input, output, "Priority (High/Medium/Low): ")? else {
        return Ok(());
    };
    let Some(due) = prompt(input, output, "Enter due date (YYYY-MM-DD) or leave blank: ")? else {
        return Ok(());
    };

    match store.add(&title, &priority, &due) {
        Ok(outcome) => {
            report_warnings(output, &outcome.warnings)?;
            writeln!(output, "Task added successfully!")?;
        }
        Err(e) => writeln!(output, "error: {e}")?,
    }
    Ok(())
}

/// Re-display the list and read a task selection. `None` when the list is
/// empty, the selection is invalid, or input ended; re-displaying first keeps
/// the numbering aligned with what the user last saw.
fn choose_index<R: BufRead, W: Write>(
    store: &TaskStore,
    input: &mut R,
    output: &mut W,
    text: &str,
) -> Result<Option<usize>> {
    render_tasks(output, store.tasks())?;
    if store.is_empty() {
        return Ok(None);
    }

    let Some(number) = prompt(input, output, text)? else {
        return Ok(None);
    };
    match store.resolve_index(&number) {
        Ok(index) => Ok(Some(index)),
        Err(e) => {
            writeln!(output, "error: {e}")?;
            Ok(None)
        }
    }
}

fn complete_task<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    if let Some(index) = choose_index(store, input, output, "Enter task number to mark complete: ")?
    {
        store.complete(index)?;
        writeln!(output, "Task marked as completed!")?;
    }
    Ok(())
}

fn delete_task<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    if let Some(index) = choose_index(store, input, output, "Enter task number to delete: ")? {
        store.delete(index)?;
        writeln!(output, "Task deleted successfully!")?;
    }
    Ok(())
}

fn edit_task<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let Some(index) = choose_index(store, input, output, "Enter task number to edit: ")? else {
        return Ok(());
    };

    let Some(title) = prompt(input, output, "New title (leave blank to keep current): ")? else {
        return Ok(());
    };
    let Some(priority) = prompt(input, output, "New priority (High/Medium/Low, leave blank to keep): ")?
    else {
        return Ok(());
    };
    let Some(due) = prompt(input, output, "New due date (YYYY-MM-DD, blank to keep): ")? else {
        return Ok(());
    };

    let warnings = store.edit(index, &title, &priority, &due)?;
    report_warnings(output, &warnings)?;
    writeln!(output, "Task updated!")?;
    Ok(())
}

fn search_tasks<R: BufRead, W: Write>(
    store: &TaskStore,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let Some(keyword) = prompt(input, output, "Enter keyword to search: ")? else {
        return Ok(());
    };

    let results = store.search(&keyword);
    if results.is_empty() {
        writeln!(output, "No matching tasks found.")?;
        return Ok(());
    }

    writeln!(output, "\n--- SEARCH RESULTS ---")?;
    for task in results {
        writeln!(output, "- {}", task.summary())?;
    }
    writeln!(output, "-----------------------\n")?;
    Ok(())
}

fn sort_tasks<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "1. Sort by priority")?;
    writeln!(output, "2. Sort by due date")?;
    let Some(choice) = prompt(input, output, "Choose sorting method: ")? else {
        return Ok(());
    };

    match choice.trim() {
        "1" => {
            store.sort(SortBy::Priority);
            writeln!(output, "Sorted by priority.")?;
        }
        "2" => {
            store.sort(SortBy::DueDate);
            writeln!(output, "Sorted by due date.")?;
        }
        _ => writeln!(output, "Invalid choice.")?,
    }
    Ok(())
}

fn clear_all<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let Some(answer) = prompt(
        input,
        output,
        "Are you sure you want to delete ALL tasks? (yes/no): ",
    )?
    else {
        return Ok(());
    };

    let confirmed = answer.trim().eq_ignore_ascii_case("yes");
    store.clear_all(confirmed);
    if confirmed {
        writeln!(output, "All tasks cleared!")?;
    } else {
        writeln!(output, "Cancelled.")?;
    }
    Ok(())
}
