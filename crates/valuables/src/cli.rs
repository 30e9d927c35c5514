//! Output formatting for the valuables commands

use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use valuables_core::form::FormErrors;
use valuables_core::inventory::{cards, EMPTY_MESSAGE};
use valuables_core::{format_price, InventorySummary, Item};

// ============================================================================
// Formatters
// ============================================================================

/// Format items as table (human) or JSON
pub fn format_item_table(items: &[Item], json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
    }

    if items.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers = ["ID", "Name", "Value", "Description", "Photo"];
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }

    for (item, card) in items.iter().zip(cards(items)) {
        let id = item
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let description = truncate(&item.description, 40);
        let photo = if card.uri.is_empty() {
            "-".to_string()
        } else {
            truncate(&card.uri, 40)
        };

        table.add_row(Row::from(vec![
            id,
            card.title,
            card.amount,
            description,
            photo,
        ]));
    }

    table.to_string()
}

/// Total value and remaining allowance
pub fn format_summary(summary: &InventorySummary) -> String {
    let mut lines = vec![];
    lines.push(format!("Valuables:  {}", summary.count));
    lines.push(format!("Total:      €{}", format_price(summary.total_value)));
    lines.push(format!(
        "Remaining:  €{} of €{}",
        format_price(summary.remaining()),
        format_price(summary.ceiling)
    ));
    lines.join("\n")
}

/// One line per invalid field, in form order
pub fn format_form_errors(errors: &FormErrors) -> String {
    [
        ("Photo", &errors.photo),
        ("Name", &errors.name),
        ("Value", &errors.value),
    ]
    .into_iter()
    .filter_map(|(label, field)| {
        field
            .as_ref()
            .filter(|v| !v.is_valid)
            .map(|v| format!("{}: {}", label, v.error_message))
    })
    .collect::<Vec<_>>()
    .join("\n")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
