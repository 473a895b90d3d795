//! Terminal date picker and date argument parsing

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use colored::Colorize;
use dialoguer::Input;
use voyage::{DatePickerHost, DatePickerResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parse `YYYY-MM-DD` (midnight) or `YYYY-MM-DDTHH:MM`
pub fn parse_date_arg(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    if let Ok(at) = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT) {
        return Ok(at);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            format!(
                "Invalid date '{}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM",
                value
            )
        })
}

/// Prompts for a date on the terminal. An empty answer cancels.
pub struct TerminalDatePicker {
    label: String,
}

impl TerminalDatePicker {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl DatePickerHost for TerminalDatePicker {
    async fn pick_date(&self, initial: NaiveDateTime, min: NaiveDateTime) -> DatePickerResult {
        let prompt = format!(
            "{} (earliest {}, empty to keep {})",
            self.label,
            min.format(DATE_TIME_FORMAT),
            initial.format(DATE_TIME_FORMAT)
        );

        loop {
            let answer: String = match Input::<String>::new()
                .with_prompt(&prompt)
                .allow_empty(true)
                .interact_text()
            {
                Ok(answer) => answer,
                Err(_) => return DatePickerResult::Cancelled,
            };

            if answer.trim().is_empty() {
                return DatePickerResult::Cancelled;
            }

            match parse_date_arg(&answer) {
                Ok(picked) if picked >= min => return DatePickerResult::Picked(picked),
                Ok(_) => println!("{}", "Date is before the earliest allowed.".red()),
                Err(e) => println!("{}", e.red()),
            }
        }
    }
}
