//! Semana exibida na grade do timesheet (segunda a domingo)

use crate::utils::logging::log_validation_error;
use crate::utils::{AppError, AppResult};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAYS_IN_WEEK: usize = 7;

/// Destaque das 7 células de uma linha, alinhado com `WeekDates`
pub type WeekHighlights = [bool; DAYS_IN_WEEK];

/// Resultado seguro enquanto os dados não estão disponíveis
pub const NO_HIGHLIGHTS: WeekHighlights = [false; DAYS_IN_WEEK];

/// As 7 datas (`YYYY-MM-DD`) de uma semana, na ordem da grade
///
/// As strings não são validadas individualmente: uma data malformada apenas
/// deixa a célula correspondente sem destaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WeekDates {
    dates: [String; DAYS_IN_WEEK],
}

impl WeekDates {
    pub fn new<I, S>(dates: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dates: Vec<String> = dates.into_iter().map(Into::into).collect();
        let count = dates.len();

        let dates: [String; DAYS_IN_WEEK] = dates.try_into().map_err(|_| {
            let message = format!("a semana precisa de {} datas, recebeu {}", DAYS_IN_WEEK, count);
            log_validation_error("week_dates", &message);
            AppError::ValidationError(message)
        })?;

        Ok(Self { dates })
    }

    /// Semana de 7 dias consecutivos a partir de `first_day`
    ///
    /// Falha apenas quando a semana ultrapassa o intervalo de datas do chrono.
    pub fn starting(first_day: NaiveDate) -> AppResult<Self> {
        let mut dates = Vec::with_capacity(DAYS_IN_WEEK);
        for offset in 0..DAYS_IN_WEEK as u64 {
            let day = first_day
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| out_of_range(first_day))?;
            dates.push(day.format("%Y-%m-%d").to_string());
        }
        Self::new(dates)
    }

    /// Semana (segunda a domingo) que contém `date`
    pub fn containing(date: NaiveDate) -> AppResult<Self> {
        let monday = date
            .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
            .ok_or_else(|| out_of_range(date))?;
        Self::starting(monday)
    }

    /// Data da segunda-feira (`week_start` na API)
    pub fn week_start(&self) -> &str {
        &self.dates[0]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.dates
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dates.iter().map(String::as_str)
    }
}

fn out_of_range(date: NaiveDate) -> AppError {
    let message = format!("semana de {} fora do intervalo de datas suportado", date);
    log_validation_error("week_dates", &message);
    AppError::ValidationError(message)
}

impl TryFrom<Vec<String>> for WeekDates {
    type Error = AppError;

    fn try_from(dates: Vec<String>) -> AppResult<Self> {
        Self::new(dates)
    }
}

impl From<WeekDates> for Vec<String> {
    fn from(week: WeekDates) -> Self {
        week.dates.into()
    }
}
