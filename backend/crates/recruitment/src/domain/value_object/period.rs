//! Date ranges of courses and professional experiences

use chrono::NaiveDate;

use crate::domain::value_object::fields::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub started_on: NaiveDate,
    /// `None` while ongoing
    pub finished_on: Option<NaiveDate>,
}

impl Period {
    pub fn new(started_on: NaiveDate, finished_on: Option<NaiveDate>) -> Result<Self, String> {
        if finished_on.is_some_and(|end| end < started_on) {
            return Err("A data de término deve ser igual ou posterior à data de início.".into());
        }
        Ok(Self {
            started_on,
            finished_on,
        })
    }

    /// Parse `YYYY-MM-DD` inputs (what `<input type="date">` sends).
    pub fn parse(started: &str, finished: &str, errors: &mut FieldErrors) -> Option<Self> {
        let started_on = match started.trim() {
            "" => {
                errors.push("Data de início é obrigatória.");
                None
            }
            raw => errors.check(parse_date(raw, "Data de início inválida.")),
        };
        let finished_on = match finished.trim() {
            "" => Some(None),
            raw => errors.check(parse_date(raw, "Data de término inválida.")).map(Some),
        };

        let (started_on, finished_on) = (started_on?, finished_on?);
        errors.check(Self::new(started_on, finished_on))
    }

    pub fn is_ongoing(&self) -> bool {
        self.finished_on.is_none()
    }

    /// `03/2021 - 12/2023` or `03/2021 - atual`
    pub fn label(&self) -> String {
        let end = self
            .finished_on
            .map(|d| d.format("%m/%Y").to_string())
            .unwrap_or_else(|| "atual".to_string());
        format!("{} - {end}", self.started_on.format("%m/%Y"))
    }
}

fn parse_date(raw: &str, message: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| message.to_string())
}
