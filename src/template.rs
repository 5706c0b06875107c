//! Weekly page content: the day template replicated across the week, and
//! the carry-over toggle copied from last week's page.

use crate::blocks::{Block, BlockKind, RemoteBlock, RichText, sanitize_blocks};
use crate::calendar::{WeekSpan, format_mmdd};
use crate::error::StoreError;
use crate::store::TreeReader;
use serde_json::json;
use tracing::{debug, warn};

pub const DEFAULT_PLACEHOLDER: &str = "XXXX";
pub const DEFAULT_CARRY_OVER_LABEL: &str = "Monthly TASK";

/// Seven copies of `template`, day-major, with `placeholder` replaced by
/// each day's `MMDD` in every text run at any depth.
pub fn materialize_week(template: &[Block], span: &WeekSpan, placeholder: &str) -> Vec<Block> {
    let mut week = Vec::with_capacity(template.len() * 7);
    for date in span.days() {
        let day = format_mmdd(date);
        for source in template {
            let mut block = source.clone();
            block.for_each_run_mut(&mut |run| {
                run.replace_token(placeholder, &day);
            });
            week.push(block);
        }
    }
    week
}

/// The day layout used when no template page is configured: a dated
/// heading followed by plan / todo / memo bullets.
pub fn builtin_day_template(placeholder: &str) -> Vec<Block> {
    let heading = RichText::text(placeholder).with_annotations(json!({"color": "blue_background"}));
    let mut day = vec![Block::text_block(BlockKind::Heading3, vec![heading])];
    day.extend(
        ["予定", "TODO", "メモ"]
            .into_iter()
            .map(|label| Block::text_block(BlockKind::BulletedListItem, vec![RichText::text(label)])),
    );
    day
}

/// Load and sanitize the template page's blocks, nested content included.
pub async fn load_template(
    reader: &TreeReader<'_>,
    template_page_id: &str,
) -> Result<Vec<Block>, StoreError> {
    let raw = reader.load_tree(template_page_id).await?;
    let blocks = sanitize_blocks(&raw);
    if blocks.len() < raw.len() {
        warn!(
            template_page_id,
            read = raw.len(),
            kept = blocks.len(),
            "some template blocks could not be copied"
        );
    }
    Ok(blocks)
}

/// A fresh `label` toggle holding a copy of the matching toggle's entire
/// content in `page_blocks`, or an empty one when there is no match. The
/// source toggle is only read. The copy may exceed what one request can
/// carry; the writer splits it.
pub async fn copy_monthly_task_toggle(
    reader: &TreeReader<'_>,
    page_blocks: &[RemoteBlock],
    label: &str,
) -> Result<Block, StoreError> {
    let Some(source) = page_blocks.iter().find(|b| b.is_toggle_labelled(label)) else {
        debug!(label, "no carry-over toggle on last week's page");
        return Ok(Block::toggle(label, Vec::new()));
    };
    let Some(source_id) = source.id.as_deref() else {
        warn!(label, "carry-over toggle has no id; starting empty");
        return Ok(Block::toggle(label, Vec::new()));
    };
    let children = reader.load_tree(source_id).await?;
    let copied = sanitize_blocks(&children);
    debug!(label, source_id, copied = copied.len(), "copied carry-over toggle");
    Ok(Block::toggle(label, copied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::week_of;
    use chrono::NaiveDate;

    fn span() -> WeekSpan {
        week_of(NaiveDate::from_ymd_opt(2025, 7, 7).unwrap())
    }

    fn texts(block: &Block) -> Vec<&str> {
        block.rich_text().iter().filter_map(RichText::text_content).collect()
    }

    fn dated_toggle() -> Block {
        let grandchild = Block::text_block(BlockKind::Paragraph, vec![RichText::text("deep XXXX")]);
        let mut child = Block::text_block(BlockKind::ToDo, vec![RichText::text("do XXXX")]);
        child.payload.children = Some(vec![grandchild]);
        let mut toggle = Block::toggle("XXXX (log)", vec![child]);
        toggle.payload.rich_text.as_mut().unwrap().push(RichText::text("XXXX again"));
        toggle
    }

    #[test]
    fn output_is_day_major_in_template_order() {
        let template = vec![
            Block::text_block(BlockKind::Heading3, vec![RichText::text("XXXX")]),
            Block::text_block(BlockKind::Paragraph, vec![RichText::text("note")]),
        ];
        let week = materialize_week(&template, &span(), DEFAULT_PLACEHOLDER);
        assert_eq!(week.len(), 14);
        let labels: Vec<&str> = week.iter().map(|b| texts(b)[0]).collect();
        assert_eq!(
            labels,
            vec![
                "0707", "note", "0708", "note", "0709", "note", "0710", "note", "0711", "note",
                "0712", "note", "0713", "note"
            ]
        );
    }

    #[test]
    fn every_occurrence_at_every_depth_is_replaced() {
        let template = vec![dated_toggle()];
        let week = materialize_week(&template, &span(), DEFAULT_PLACEHOLDER);
        let rendered = serde_json::to_string(&week).unwrap();
        assert!(!rendered.contains("XXXX"));

        let thursday = &week[3];
        assert_eq!(texts(thursday), vec!["0710 (log)", "0710 again"]);
        let child = &thursday.children()[0];
        assert_eq!(texts(child), vec!["do 0710"]);
        assert_eq!(texts(&child.children()[0]), vec!["deep 0710"]);
    }

    #[test]
    fn template_and_daily_copies_do_not_alias() {
        let template = vec![dated_toggle()];
        let before = template.clone();
        let mut week = materialize_week(&template, &span(), DEFAULT_PLACEHOLDER);
        assert_eq!(template, before);

        week[0].payload.rich_text.as_mut().unwrap()[0] = RichText::text("edited");
        assert_eq!(texts(&week[1])[0], "0708 (log)");
        assert_eq!(template, before);
    }

    #[test]
    fn non_text_runs_are_untouched() {
        let mention: RichText = serde_json::from_value(json!({
            "type": "mention", "mention": {"type": "user", "user": {"id": "u"}}, "plain_text": "XXXX"
        }))
        .unwrap();
        let template = vec![Block::text_block(BlockKind::Paragraph, vec![mention.clone()])];
        let week = materialize_week(&template, &span(), DEFAULT_PLACEHOLDER);
        assert!(week.iter().all(|b| b.rich_text()[0] == mention));
    }

    #[test]
    fn twelve_block_template_yields_eighty_four() {
        let template: Vec<Block> = (0..12)
            .map(|i| Block::text_block(BlockKind::Paragraph, vec![RichText::text(format!("{i} XXXX"))]))
            .collect();
        assert_eq!(materialize_week(&template, &span(), DEFAULT_PLACEHOLDER).len(), 84);
    }

    #[test]
    fn builtin_template_has_a_dated_heading_and_three_bullets() {
        let day = builtin_day_template(DEFAULT_PLACEHOLDER);
        assert_eq!(day.len(), 4);
        assert_eq!(day[0].kind, BlockKind::Heading3);
        let week = materialize_week(&day, &span(), DEFAULT_PLACEHOLDER);
        assert_eq!(texts(&week[4]), vec!["0708"]);
        assert_eq!(
            serde_json::to_value(&week[4]).unwrap()["heading_3"]["rich_text"][0]["annotations"],
            json!({"color": "blue_background"})
        );
        assert_eq!(texts(&week[7]), vec!["メモ"]);
    }
}
