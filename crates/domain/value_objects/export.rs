use crate::domain::{
    entities::subscriptions::SubscriptionEntity,
    value_objects::{metrics, next_billing},
};

pub const CSV_HEADER: [&str; 6] = [
    "Service",
    "Status",
    "Monthly Cost",
    "Next Billing",
    "Category",
    "Shared",
];

pub const EXPORT_FILE_NAME: &str = "subcentral-export.csv";

/// Renders the ledger as CSV: header, one row per subscription, then the
/// spend/save/waste trailer rows.
pub fn render_csv(subscriptions: &[SubscriptionEntity]) -> String {
    let mut rows: Vec<String> = Vec::with_capacity(subscriptions.len() + 4);
    rows.push(CSV_HEADER.join(","));

    for entity in subscriptions {
        let cost = format!("{:.2}", entity.monthly_cost);
        let billing = next_billing::display(entity.next_billing);
        let shared = if entity.shared { "Yes" } else { "No" };
        let fields = [
            entity.service.as_str(),
            entity.status.as_str(),
            cost.as_str(),
            billing.as_str(),
            entity.category.as_str(),
            shared,
        ];
        rows.push(
            fields
                .iter()
                .map(|field| escape_field(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    rows.push(format!("Monthly Spend,{:.2}", metrics::monthly_spend(subscriptions)));
    rows.push(format!("Monthly Save,{:.2}", metrics::savings_realized(subscriptions)));
    rows.push(format!("Monthly Waste,{:.2}", metrics::waste(subscriptions)));

    rows.join("\n")
}

/// Quotes a field only when it would otherwise break the row.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
