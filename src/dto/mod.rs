use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Single-player game payloads.
pub mod game;
/// Health check payload.
pub mod health;
/// Status enums as exposed to clients.
pub mod phase;
/// Room payloads.
pub mod room;
/// Reusable field validators.
pub mod validation;

fn format_timestamp(time: OffsetDateTime) -> String {
    time.format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
