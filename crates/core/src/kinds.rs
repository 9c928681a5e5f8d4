//! Closed value sets accepted by the platform.
//!
//! The platform takes these as plain strings on the wire. Modelling them as
//! enums means an unsupported channel or agent type is rejected before a
//! request is ever built.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}' (expected one of: {expected})")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Defines a lowercase wire enum with `as_str`, `Display` and `FromStr`.
macro_rules! define_kind {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in wire order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The string the platform expects for this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseKindError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ParseKindError {
                        kind: $label,
                        value: s.to_string(),
                        expected: concat!($($wire, " "),+).trim_ascii_end(),
                    }),
                }
            }
        }
    };
}

define_kind! {
    /// Delivery channel for `notify`.
    NotifyChannel, "channel" {
        Telegram => "telegram",
        Discord => "discord",
        Slack => "slack",
        Email => "email",
        /// Fan out to every channel the platform has configured
        All => "all",
    }
}

define_kind! {
    /// Notification urgency.
    #[derive(Default)]
    Priority, "priority" {
        Low => "low",
        #[default]
        Normal => "normal",
        High => "high",
        Urgent => "urgent",
    }
}

define_kind! {
    /// How the platform files a stored memory.
    #[derive(Default)]
    MemoryType, "memory type" {
        /// Events tied to a point in time
        Episodic => "episodic",
        /// Facts and general knowledge
        #[default]
        Semantic => "semantic",
        /// How-to knowledge
        Procedural => "procedural",
    }
}

define_kind! {
    /// Specialisation of a spawned sub-agent.
    AgentType, "agent type" {
        Research => "research",
        Coding => "coding",
        Writing => "writing",
        Analysis => "analysis",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Slack".parse::<NotifyChannel>().unwrap(), NotifyChannel::Slack);
        assert_eq!(" URGENT ".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!("procedural".parse::<MemoryType>().unwrap(), MemoryType::Procedural);
        assert_eq!("coding".parse::<AgentType>().unwrap(), AgentType::Coding);
    }

    #[test]
    fn rejects_unknown_values_with_choices() {
        let err = "sms".parse::<NotifyChannel>().unwrap_err();
        assert_eq!(err.kind, "channel");
        assert_eq!(err.value, "sms");
        let msg = err.to_string();
        assert!(msg.contains("telegram discord slack email all"));
    }

    #[test]
    fn defaults_match_platform_defaults() {
        assert_eq!(Priority::default(), Priority::Normal);
        assert_eq!(MemoryType::default(), MemoryType::Semantic);
    }

    #[test]
    fn serializes_as_lowercase_strings() {
        let json = serde_json::to_value(AgentType::Analysis).unwrap();
        assert_eq!(json, serde_json::json!("analysis"));
        let back: NotifyChannel = serde_json::from_value(serde_json::json!("all")).unwrap();
        assert_eq!(back, NotifyChannel::All);
    }

    #[test]
    fn display_matches_wire_form() {
        for kind in AgentType::ALL {
            assert_eq!(kind.to_string(), serde_json::to_value(kind).unwrap());
        }
        assert_eq!(Priority::ALL.len(), 4);
        assert_eq!(NotifyChannel::ALL.len(), 5);
    }
}
