use super::summary_output::{output_event, SummaryEvent};
use super::utils::load_records;
use song_stats::Pipeline;
use std::path::Path;

/// Handle the summary command
pub fn handle_summary_command(
    pipeline: &Pipeline,
    dump: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_records(pipeline, dump)?;
    output_event(&SummaryEvent::Loaded {
        path: dump.display().to_string(),
        records: records.len(),
    });

    let views = pipeline.compute_views(&records);
    output_event(&SummaryEvent::Normalized {
        report: views.report,
    });

    for (name, view) in &views.views {
        output_event(&SummaryEvent::ViewComputed {
            view: *name,
            title: name.title().to_string(),
            size: view.size(),
        });
    }

    if views.report.dropped() > 0 {
        log::info!(
            "{} of {} records were skipped",
            views.report.dropped(),
            records.len()
        );
    }

    output_event(&SummaryEvent::Finished {
        songs: views.track_count,
    });

    Ok(())
}
