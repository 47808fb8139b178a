use super::ui;
use crate::core::{CountryDirectory, CountryRecord};
use anyhow::Result;
use comfy_table::Cell;

fn display_record(record: &CountryRecord) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Country"),
        ui::header_cell("Currency"),
    ]);
    table.add_row(vec![
        Cell::new(&record.country_code),
        Cell::new(&record.country_name),
        Cell::new(&record.currency_code),
    ]);
    table.to_string()
}

/// Prints the directory entry for a country code.
pub fn run(directory: &CountryDirectory, country_code: &str) -> Result<()> {
    let record = directory.record(country_code)?;
    println!("{}", display_record(record));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LedgerError;

    #[test]
    fn test_display_record() {
        let directory = CountryDirectory::bundled().unwrap();
        let output = display_record(directory.record("JP").unwrap());
        assert!(output.contains("Japan"));
        assert!(output.contains("JPY"));
    }

    #[test]
    fn test_unknown_code_fails() {
        let directory = CountryDirectory::bundled().unwrap();
        let err = run(&directory, "QQ").unwrap_err();
        assert_eq!(
            err.downcast_ref::<LedgerError>(),
            Some(&LedgerError::CountryNotFound("QQ".to_string()))
        );
    }
}
