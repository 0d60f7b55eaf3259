//! Basic types for the core ledger module

use serde::{Deserialize, Serialize};

/// Account fields that can be masked for display (privacy mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensitiveField {
    #[serde(rename = "saldo_anterior")]
    OpeningBalance,
    #[serde(rename = "entradas")]
    InflowTotal,
    #[serde(rename = "saidas")]
    OutflowTotal,
    #[serde(rename = "saldo_atual")]
    ClosingBalance,
}

impl SensitiveField {
    pub const ALL: [SensitiveField; 4] = [
        SensitiveField::OpeningBalance,
        SensitiveField::InflowTotal,
        SensitiveField::OutflowTotal,
        SensitiveField::ClosingBalance,
    ];

    /// Persisted key of the field
    pub fn key(&self) -> &'static str {
        match self {
            SensitiveField::OpeningBalance => "saldo_anterior",
            SensitiveField::InflowTotal => "entradas",
            SensitiveField::OutflowTotal => "saidas",
            SensitiveField::ClosingBalance => "saldo_atual",
        }
    }
}

impl std::str::FromStr for SensitiveField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "saldo_anterior" | "opening_balance" => Ok(SensitiveField::OpeningBalance),
            "entradas" | "inflow_total" => Ok(SensitiveField::InflowTotal),
            "saidas" | "outflow_total" => Ok(SensitiveField::OutflowTotal),
            "saldo_atual" | "closing_balance" => Ok(SensitiveField::ClosingBalance),
            _ => Err(format!("Invalid sensitive field: {}", s)),
        }
    }
}

impl std::fmt::Display for SensitiveField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Which itemized list of an account a transaction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Money coming into the account
    Inflow,
    /// Money leaving the account
    Outflow,
}

impl std::str::FromStr for FlowKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inflow" | "entrada" | "entradas" => Ok(FlowKind::Inflow),
            "outflow" | "saida" | "saidas" => Ok(FlowKind::Outflow),
            _ => Err(format!("Invalid flow kind: {}", s)),
        }
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowKind::Inflow => write!(f, "inflow"),
            FlowKind::Outflow => write!(f, "outflow"),
        }
    }
}

/// Kind of change recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Create => write!(f, "create"),
            AuditAction::Update => write!(f, "update"),
            AuditAction::Delete => write!(f, "delete"),
        }
    }
}
