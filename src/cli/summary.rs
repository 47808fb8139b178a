use super::ui;
use crate::core::{
    CountryDirectory, EntryCount, LedgerSource, RateProvider, SummaryResult,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::Cell;

impl SummaryResult {
    pub fn display_as_table(&self) -> String {
        let home = &self.home_currency;

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Country"),
            ui::header_cell("Currency"),
            ui::header_cell("Average (local)"),
            ui::header_cell(&format!("Average ({home})")),
        ]);
        for avg in &self.per_country {
            table.add_row(vec![
                Cell::new(&avg.country),
                Cell::new(&avg.currency),
                ui::amount_cell(avg.average_local),
                ui::amount_cell(avg.average_home),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Average Spending by Country", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{}\n",
            ui::style_text("Spending Stats Overview", ui::StyleType::Title)
        ));

        if let Some(message) = &self.recency_message {
            output.push_str(&format!("{message}\n"));
        }

        let last = &self.last_country_average;
        output.push_str(&format!(
            "Your daily spending average in {} is {} {} ({home} {})\n",
            ui::style_text(&self.last_country_name, ui::StyleType::Label),
            last.currency,
            ui::money(last.average_local),
            ui::style_text(&ui::money(last.average_home), ui::StyleType::Value),
        ));
        output.push_str(&format!(
            "Your overall daily average (excluding one off purchases) is {home} {}\n",
            ui::style_text(&ui::money(self.overall_daily_average), ui::StyleType::Value),
        ));
        output.push_str(&format!(
            "Your overall average is {home} {}",
            ui::style_text(&ui::money(self.overall_average), ui::StyleType::Value),
        ));

        output
    }
}

pub async fn run(
    directory: &CountryDirectory,
    source: &(dyn LedgerSource + Send + Sync),
    rate_provider: &(dyn RateProvider + Send + Sync),
    home_currency: &str,
    entry_count: EntryCount,
    today: NaiveDate,
    as_json: bool,
) -> Result<()> {
    let engine =
        super::prepare_engine(directory, source, rate_provider, home_currency, entry_count)
            .await?;
    let summary = engine.summarize(today)?;

    if as_json {
        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{json}");
    } else {
        println!("{}", summary.display_as_table());
    }
    Ok(())
}
