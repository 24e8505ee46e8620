//! Folder naming for folder-mode output.
//!
//! Names are `<prefix>_<timestamp>`. The prefix is a sanitized user label or,
//! without one, the diagram type name. The timestamp has second resolution, so
//! two runs with the same label inside the same second produce the same name.

use chrono::{DateTime, Utc};

use crate::diagram::DiagramType;

/// Length in characters of the timestamp token produced by [`timestamp_token`].
pub const TIMESTAMP_TOKEN_LEN: usize = 15;

/// Replace every character outside `[a-zA-Z0-9_-]` with `-` and lower-case the result.
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Compact UTC timestamp token, `YYYYMMDDhhmmss_`.
pub fn timestamp_token(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S_").to_string()
}

/// Build the output folder name for a run.
///
/// # Arguments
///
/// * `label` - Optional user-supplied name; sanitized before use
/// * `diagram_type` - Used as the prefix when no label is given
/// * `now` - Time of the run
pub fn folder_name(label: Option<&str>, diagram_type: DiagramType, now: DateTime<Utc>) -> String {
    let prefix = match label {
        Some(label) => sanitize_label(label),
        None => diagram_type.as_str().to_string(),
    };
    format!("{prefix}_{}", timestamp_token(now))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 2).unwrap()
    }

    #[test]
    fn test_timestamp_token_shape() {
        let token = timestamp_token(fixed_time());
        assert_eq!(token, "20260307090502_");
        assert_eq!(token.len(), TIMESTAMP_TOKEN_LEN);
    }

    #[test]
    fn test_folder_name_with_label() {
        let name = folder_name(
            Some("Light Controller!"),
            DiagramType::StateMachine,
            fixed_time(),
        );
        assert_eq!(name, "light-controller-_20260307090502_");
    }

    #[test]
    fn test_folder_name_defaults_to_diagram_type() {
        assert_eq!(
            folder_name(None, DiagramType::ClassDiagram, fixed_time()),
            "class-diagram_20260307090502_"
        );
        assert_eq!(
            folder_name(None, DiagramType::StateMachine, fixed_time()),
            "state-machine_20260307090502_"
        );
    }

    #[test]
    fn test_same_second_names_collide() {
        let a = folder_name(Some("x"), DiagramType::StateMachine, fixed_time());
        let b = folder_name(Some("x"), DiagramType::StateMachine, fixed_time());
        assert_eq!(a, b);
    }

    #[test]
    fn test_sanitize_keeps_allowed_characters() {
        assert_eq!(sanitize_label("user_auth-v2"), "user_auth-v2");
        assert_eq!(sanitize_label("a/b\\c.d"), "a-b-c-d");
        assert_eq!(sanitize_label("Ünïcode"), "-n-code");
    }

    proptest! {
        #[test]
        fn prop_sanitized_label_is_filesystem_safe(label in "\\PC*") {
            let sanitized = sanitize_label(&label);
            prop_assert_eq!(sanitized.chars().count(), label.chars().count());
            prop_assert!(sanitized
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
        }

        #[test]
        fn prop_folder_name_starts_with_sanitized_label(label in "[a-zA-Z0-9 ._-]{1,24}") {
            let name = folder_name(Some(&label), DiagramType::StateMachine, fixed_time());
            let prefix = format!("{}_", sanitize_label(&label));
            prop_assert!(name.starts_with(&prefix));
            prop_assert_eq!(name.len(), prefix.len() + TIMESTAMP_TOKEN_LEN);
        }
    }
}
