//! Diagram types supported by the generation pipeline.
//!
//! A diagram type is the user-facing name (`state-machine`, `class-diagram`)
//! that selects which generator the external model compiler runs.

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Names of every supported diagram type, in help-text order.
pub const SUPPORTED_TYPES: [&str; 2] = ["state-machine", "class-diagram"];

/// A diagram kind the model compiler knows how to emit as a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramType {
    /// State machine diagram (default)
    #[default]
    StateMachine,
    /// Class diagram
    ClassDiagram,
}

impl DiagramType {
    /// Returns the compiler generator flag for this diagram type.
    pub fn generator_flag(self) -> &'static str {
        match self {
            Self::StateMachine => "GvStateDiagram",
            Self::ClassDiagram => "GvClassDiagram",
        }
    }

    /// Returns the user-facing name of this diagram type.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl FromStr for DiagramType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state-machine" => Ok(Self::StateMachine),
            "class-diagram" => Ok(Self::ClassDiagram),
            _ => Err("Unsupported diagram type"),
        }
    }
}

impl From<DiagramType> for &'static str {
    fn from(val: DiagramType) -> Self {
        match val {
            DiagramType::StateMachine => "state-machine",
            DiagramType::ClassDiagram => "class-diagram",
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag_for(name: &str) -> Option<&'static str> {
        name.parse::<DiagramType>()
            .ok()
            .map(DiagramType::generator_flag)
    }

    #[test]
    fn test_resolve_known_types() {
        assert_eq!(flag_for("state-machine"), Some("GvStateDiagram"));
        assert_eq!(flag_for("class-diagram"), Some("GvClassDiagram"));
    }

    #[test]
    fn test_resolve_unknown_types() {
        assert_eq!(flag_for("sequence"), None);
        assert_eq!(flag_for(""), None);
        // Matching is exact, not case-insensitive
        assert_eq!(flag_for("State-Machine"), None);
    }

    #[test]
    fn test_default_is_state_machine() {
        assert_eq!(DiagramType::default(), DiagramType::StateMachine);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for name in SUPPORTED_TYPES {
            let ty: DiagramType = name.parse().unwrap();
            assert_eq!(ty.to_string(), name);
        }
    }
}
