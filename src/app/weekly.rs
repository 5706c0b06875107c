//! The weekly run: resolve the week, read last week's carry-over and the
//! template, then create and file this week's page.

use crate::blocks::{Block, CreatedPage, PageParent};
use crate::calendar::{WeekSpan, month_label, prior_week_label, week_of};
use crate::config::{OnExisting, RunSettings};
use crate::store::{BatchPlan, DocumentStore, TreeReader, TreeWriter, child_page_id, plan_batches};
use crate::template::{
    builtin_day_template, copy_monthly_task_toggle, load_template, materialize_week,
};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::ops::Range;
use tracing::{info, warn};

/// Whether the run may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Apply,
    DryRun,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    pub week: WeekSpan,
    pub prior_label: String,
    pub month_label: String,
    /// Id of last week's page, when one was found.
    pub prior_page_id: Option<String>,
    /// Blocks carried over inside the carry-over toggle.
    pub carried_over: usize,
    /// Blocks in one day of the template.
    pub template_blocks: usize,
    pub outcome: WeeklyOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeeklyOutcome {
    /// This week's page already existed and `on_existing = skip`.
    Skipped { existing_page_id: String },
    /// Reads only; nothing was written.
    Planned {
        first_batch: usize,
        append_chunks: Vec<usize>,
        month_index: bool,
    },
    Created {
        page: CreatedPage,
        first_batch: usize,
        appended: Vec<Range<usize>>,
        month_page_id: Option<String>,
    },
}

pub async fn run_weekly(
    store: &dyn DocumentStore,
    settings: &RunSettings,
    today: NaiveDate,
    mode: RunMode,
) -> Result<WeeklyReport> {
    let reader = TreeReader::new(store);
    let week = week_of(today);
    let prior_label = prior_week_label(week.monday);
    let month = month_label(week.monday);
    info!(week = %week.label, prior = %prior_label, month = %month, "resolved week");

    let siblings = reader
        .list_children(&settings.parent_page_id)
        .await
        .context("Failed to list the parent page")?;

    let prior_page_id = child_page_id(&siblings, &prior_label).map(str::to_string);
    let report = |carried_over, template_blocks, outcome| WeeklyReport {
        week: week.clone(),
        prior_label: prior_label.clone(),
        month_label: month.clone(),
        prior_page_id: prior_page_id.clone(),
        carried_over,
        template_blocks,
        outcome,
    };

    if let Some(existing) = child_page_id(&siblings, &week.label) {
        match settings.on_existing {
            OnExisting::Skip => {
                info!(page_id = existing, "this week's page already exists; skipping");
                let outcome = WeeklyOutcome::Skipped {
                    existing_page_id: existing.to_string(),
                };
                return Ok(report(0, 0, outcome));
            }
            OnExisting::Error => bail!("page {} already exists ({existing})", week.label),
            OnExisting::Create => {
                warn!(page_id = existing, "this week's page already exists; creating another");
            }
        }
    }

    let carry_over = carry_over_toggle(&reader, prior_page_id.as_deref(), settings).await?;
    let carried_over = carry_over.children().len();

    let template = match settings.template_page_id.as_deref() {
        Some(template_id) => load_template(&reader, template_id)
            .await
            .context("Failed to read the template page")?,
        None => builtin_day_template(&settings.placeholder),
    };
    if template.is_empty() {
        warn!("template has no copyable blocks; the page will only hold the carry-over");
    }
    let template_blocks = template.len();

    let content = materialize_week(&template, &week, &settings.placeholder);
    let plan = plan_batches(carry_over, content);
    info!(
        blocks = plan.total_blocks(),
        first_batch = plan.first.len(),
        appends = plan.append_chunk_sizes().len(),
        "planned page content"
    );

    if mode == RunMode::DryRun {
        let outcome = WeeklyOutcome::Planned {
            first_batch: plan.first.len(),
            append_chunks: plan.append_chunk_sizes(),
            month_index: settings.month_index.is_some(),
        };
        return Ok(report(carried_over, template_blocks, outcome));
    }

    let writer = TreeWriter::new(store);
    let (page, appended) = create_week_page(&writer, settings, &week, &plan).await?;

    let month_page_id = match settings.month_index.as_ref() {
        Some(index) => {
            let toggle = writer
                .ensure_toggle(&index.container_id, &index.toggle_label)
                .await
                .context("Failed to find or create the month toggle")?;
            let month_page = writer
                .ensure_month_page(&toggle, &month, &settings.carry_over_label)
                .await
                .context("Failed to find or create the month page")?;
            writer
                .link_week_into_month(&month_page, &page.id)
                .await
                .context("Failed to link the week into its month page")?;
            Some(month_page)
        }
        None => None,
    };

    let outcome = WeeklyOutcome::Created {
        page,
        first_batch: plan.first.len(),
        appended,
        month_page_id,
    };
    Ok(report(carried_over, template_blocks, outcome))
}

async fn carry_over_toggle(
    reader: &TreeReader<'_>,
    prior_page_id: Option<&str>,
    settings: &RunSettings,
) -> Result<Block> {
    let Some(prior_page_id) = prior_page_id else {
        info!("no page for last week; starting with an empty carry-over");
        return Ok(Block::toggle(&settings.carry_over_label, Vec::new()));
    };
    let page_blocks = reader
        .list_children(prior_page_id)
        .await
        .context("Failed to read last week's page")?;
    copy_monthly_task_toggle(reader, &page_blocks, &settings.carry_over_label)
        .await
        .context("Failed to copy the carry-over toggle")
}

async fn create_week_page(
    writer: &TreeWriter<'_>,
    settings: &RunSettings,
    week: &WeekSpan,
    plan: &BatchPlan,
) -> Result<(CreatedPage, Vec<Range<usize>>)> {
    let page = writer
        .create_page(
            &PageParent::page(settings.parent_page_id.as_str()),
            &week.label,
            &plan.first,
        )
        .await
        .context("Failed to create this week's page")?;
    // No rollback: a failed append leaves the page partially filled.
    let appended = writer
        .append_remaining(&page.id, &plan.rest)
        .await
        .with_context(|| format!("Page {} was created but appending its content failed", page.id))?;
    Ok((page, appended))
}
