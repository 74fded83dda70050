use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    #[error("invalid time {0:?}, expected H:MM AM|PM")]
    Time(String),

    #[error("invalid weekday code {0:?}")]
    Weekday(char),

    #[error("office hours table error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} has no grouping key")]
    MissingGroupKey(String),

    #[error("office hours row names unknown instructor {0:?}")]
    UnknownInstructor(String),

    #[error("{0} is before the first row of the grid")]
    OffGrid(String),

    #[error("{0} ends before its first grid row")]
    EmptySlot(String),
}

impl Error {
    pub fn html_parse(msg: impl Into<String>) -> Self {
        Self::HtmlParse(msg.into())
    }

    pub fn workbook(msg: impl ToString) -> Self {
        Self::Workbook(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
