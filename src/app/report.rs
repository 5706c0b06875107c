use super::weekly::{WeeklyOutcome, WeeklyReport};
use crate::calendar::{WeekSpan, month_label, prior_week_label};

pub fn render_week(week: &WeekSpan) -> String {
    [
        format!("◆ Week {}", week.label),
        format!("  range    {} → {}", week.monday, week.sunday),
        format!("  previous {}", prior_week_label(week.monday)),
        format!("  month    {}", month_label(week.monday)),
    ]
    .join("\n")
}

pub fn render_report(report: &WeeklyReport) -> String {
    let mut lines = vec![
        format!("◆ Week {} (previous {})", report.week.label, report.prior_label),
        match report.prior_page_id.as_deref() {
            Some(id) => format!("  previous page  {id}"),
            None => "  previous page  (not found)".to_string(),
        },
    ];

    match &report.outcome {
        WeeklyOutcome::Skipped { existing_page_id } => {
            lines.push(format!(
                "  already exists {existing_page_id}; nothing created"
            ));
        }
        WeeklyOutcome::Planned {
            first_batch,
            append_chunks,
            month_index,
        } => {
            lines.push(format!(
                "  carry-over     {} block(s)",
                report.carried_over
            ));
            lines.push(format!(
                "  template       {} block(s) × 7 days",
                report.template_blocks
            ));
            lines.push(format!("  create         {first_batch} block(s)"));
            for (i, size) in append_chunks.iter().enumerate() {
                lines.push(format!("  append #{}      {size} block(s)", i + 1));
            }
            if *month_index {
                lines.push(format!("  month index    link under {}", report.month_label));
            }
            lines.push("  (dry run: nothing written)".to_string());
        }
        WeeklyOutcome::Created {
            page,
            first_batch,
            appended,
            month_page_id,
        } => {
            lines.push(format!(
                "  carry-over     {} block(s)",
                report.carried_over
            ));
            lines.push(format!(
                "✅ created {} → {}",
                page.id,
                page.url.as_deref().unwrap_or("(no url)")
            ));
            lines.push(format!("  first batch    {first_batch} block(s)"));
            for range in appended {
                lines.push(format!(
                    "🔧 appended blocks {}–{}",
                    range.start + 1,
                    range.end
                ));
            }
            if let Some(month_page) = month_page_id {
                lines.push(format!(
                    "  filed under    {} ({month_page})",
                    report.month_label
                ));
            }
        }
    }

    lines.join("\n")
}
