use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub id: i64,
    pub timestamp: String,
    pub action: String,
    pub details: String,
}
