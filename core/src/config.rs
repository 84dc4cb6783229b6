use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How repeated adjacency entries between the same pair are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgePolicy {
    /// Every adjacency entry with u < v is processed, so a parallel edge
    /// is reported and summed once per occurrence.
    #[default]
    PerOccurrence,
    /// Each unordered pair is processed once.
    Distinct,
}

/// What to do when the declared vertex count disagrees with the edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VertexCheck {
    Off,
    #[default]
    Warn,
    Strict,
}

/// Settings for one Mostar computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MostarConfig {
    pub edge_policy: EdgePolicy,
    pub vertex_check: VertexCheck,
    /// Reuse one distance vector per source vertex across edges.
    pub memoize: bool,
}

impl MostarConfig {
    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    pub fn with_vertex_check(mut self, vertex_check: VertexCheck) -> Self {
        self.vertex_check = vertex_check;
        self
    }

    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }
}

/// Error returned when a setting name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSetting {
    pub setting: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl fmt::Display for UnknownSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} '{}', use {}",
            self.setting, self.value, self.expected
        )
    }
}

impl std::error::Error for UnknownSetting {}

impl FromStr for EdgePolicy {
    type Err = UnknownSetting;

    /// Accepts "per-occurrence" or "distinct" (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-occurrence" | "occurrence" => Ok(EdgePolicy::PerOccurrence),
            "distinct" | "dedup" => Ok(EdgePolicy::Distinct),
            _ => Err(UnknownSetting {
                setting: "edge policy",
                value: s.to_string(),
                expected: "'per-occurrence' or 'distinct'",
            }),
        }
    }
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EdgePolicy::PerOccurrence => "per-occurrence",
            EdgePolicy::Distinct => "distinct",
        })
    }
}

impl FromStr for VertexCheck {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(VertexCheck::Off),
            "warn" => Ok(VertexCheck::Warn),
            "strict" => Ok(VertexCheck::Strict),
            _ => Err(UnknownSetting {
                setting: "vertex check",
                value: s.to_string(),
                expected: "'off', 'warn', or 'strict'",
            }),
        }
    }
}

impl fmt::Display for VertexCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VertexCheck::Off => "off",
            VertexCheck::Warn => "warn",
            VertexCheck::Strict => "strict",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MostarConfig::default();
        assert_eq!(config.edge_policy, EdgePolicy::PerOccurrence);
        assert_eq!(config.vertex_check, VertexCheck::Warn);
        assert!(!config.memoize);
    }

    #[test]
    fn test_parse_edge_policy() {
        assert_eq!("distinct".parse::<EdgePolicy>(), Ok(EdgePolicy::Distinct));
        assert_eq!("Per-Occurrence".parse::<EdgePolicy>(), Ok(EdgePolicy::PerOccurrence));
        assert!("both".parse::<EdgePolicy>().is_err());
    }

    #[test]
    fn test_parse_vertex_check() {
        assert_eq!("STRICT".parse::<VertexCheck>(), Ok(VertexCheck::Strict));
        let err = "loud".parse::<VertexCheck>().unwrap_err();
        assert_eq!(err.to_string(), "invalid vertex check 'loud', use 'off', 'warn', or 'strict'");
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for policy in [EdgePolicy::PerOccurrence, EdgePolicy::Distinct] {
            assert_eq!(policy.to_string().parse::<EdgePolicy>(), Ok(policy));
        }
        for check in [VertexCheck::Off, VertexCheck::Warn, VertexCheck::Strict] {
            assert_eq!(check.to_string().parse::<VertexCheck>(), Ok(check));
        }
    }

    #[test]
    fn test_builder_methods() {
        let config = MostarConfig::default()
            .with_edge_policy(EdgePolicy::Distinct)
            .with_vertex_check(VertexCheck::Off)
            .with_memoize(true);
        assert_eq!(config.edge_policy, EdgePolicy::Distinct);
        assert_eq!(config.vertex_check, VertexCheck::Off);
        assert!(config.memoize);
    }
}
