use serde::Serialize;

/// What the panel shows about the message next to the verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageInfo {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub date: String,
    pub date_epoch: Option<i64>,
}
