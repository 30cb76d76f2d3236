use super::utils::load_records;
use super::TableKind;
use song_stats::Pipeline;
use std::path::Path;

/// Handle the table command: title, member total, then one line per year
pub fn handle_table_command(
    pipeline: &Pipeline,
    dump: &Path,
    kind: TableKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_records(pipeline, dump)?;
    let name = kind.view();
    let views = pipeline.compute_selected(&records, &[name]);

    let table = views
        .table(name)
        .ok_or_else(|| format!("view '{name}' is not a table"))?;

    println!("{}", name.title());
    println!("{}", table.total_members());
    print!("{table}");

    Ok(())
}
