//! Runtime form of the load-balancing configuration.

use gridloc_common::{LoadBalancingKind, LoadBalancingSpec, LoadSample};

/// Load-balancing strategy of a replica group.
///
/// Dispatch is a plain match at resolution time; each variant carries only
/// what its ordering needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBalancingPolicy {
    /// Uniformly shuffled candidate order.
    Random,
    /// Rotating candidate order; the rotation advances once per resolution.
    RoundRobin,
    /// Ascending by each member's priority; lower is preferred.
    Ordered,
    /// Ascending by the hosting node's sampled load.
    Adaptive { sample: LoadSample },
}

/// Parsed and normalized load-balancing configuration of a replica group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadBalancing {
    pub policy: LoadBalancingPolicy,
    /// Number of replicas reported to the locator; `0` means "all known
    /// replicas". Never negative after normalization.
    pub n_replicas: i32,
}

/// Reads a leading decimal integer the way C stream extraction does: skip
/// leading whitespace, accept an optional sign, then consume the longest
/// run of digits and ignore whatever follows (`"1.5"` reads as 1). `None`
/// when no digit was consumed. A run that exceeds the integer range
/// saturates.
pub(crate) fn parse_leading_i32(value: &str) -> Option<i32> {
    let rest = value.trim_start();
    let (negative, digits) = match rest.as_bytes().first() {
        Some(&b'-') => (true, &rest[1..]),
        Some(&b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let parsed = match digits[..len].parse::<i64>() {
        Ok(magnitude) => {
            let signed = if negative { -magnitude } else { magnitude };
            signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
        }
        Err(_) => {
            if negative {
                i32::MIN
            } else {
                i32::MAX
            }
        }
    };
    Some(parsed)
}

impl LoadBalancing {
    /// Builds the runtime configuration from its descriptor form.
    ///
    /// `n_replicas` is a decimal string, read as a leading integer (so
    /// `"2.5"` reads as 2): values with no leading integer are read as 0
    /// ("all"), negative values are clamped up to 1. The adaptive sample
    /// window follows [`LoadSample::parse`], so an unknown window silently
    /// selects the 1-minute average.
    pub fn from_spec(spec: &LoadBalancingSpec) -> Self {
        let parsed = parse_leading_i32(&spec.n_replicas).unwrap_or(0);
        let n_replicas = if parsed < 0 { 1 } else { parsed };

        let policy = match spec.kind {
            LoadBalancingKind::Random => LoadBalancingPolicy::Random,
            LoadBalancingKind::RoundRobin => LoadBalancingPolicy::RoundRobin,
            LoadBalancingKind::Ordered => LoadBalancingPolicy::Ordered,
            LoadBalancingKind::Adaptive => LoadBalancingPolicy::Adaptive {
                sample: LoadSample::parse(&spec.load_sample),
            },
        };

        LoadBalancing { policy, n_replicas }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: LoadBalancingKind, n_replicas: &str) -> LoadBalancingSpec {
        LoadBalancingSpec::new(kind, n_replicas)
    }

    #[test]
    fn test_n_replicas_parses_decimal() {
        let lb = LoadBalancing::from_spec(&spec(LoadBalancingKind::Random, "3"));
        assert_eq!(lb.n_replicas, 3);
        assert_eq!(lb.policy, LoadBalancingPolicy::Random);
    }

    #[test]
    fn test_n_replicas_zero_means_all() {
        let lb = LoadBalancing::from_spec(&spec(LoadBalancingKind::RoundRobin, "0"));
        assert_eq!(lb.n_replicas, 0);
    }

    #[test]
    fn test_n_replicas_negative_clamps_to_one() {
        let lb = LoadBalancing::from_spec(&spec(LoadBalancingKind::Ordered, "-7"));
        assert_eq!(lb.n_replicas, 1);
    }

    #[test]
    fn test_n_replicas_malformed_reads_as_zero() {
        for raw in ["", "many", ".5"] {
            let lb = LoadBalancing::from_spec(&spec(LoadBalancingKind::Random, raw));
            assert_eq!(lb.n_replicas, 0, "raw value {:?}", raw);
        }
    }

    #[test]
    fn test_n_replicas_reads_the_leading_integer() {
        // Stream-style extraction stops at the first non-digit.
        let lb = LoadBalancing::from_spec(&spec(LoadBalancingKind::Random, "2.5"));
        assert_eq!(lb.n_replicas, 2);

        let lb = LoadBalancing::from_spec(&spec(LoadBalancingKind::Random, "3 replicas"));
        assert_eq!(lb.n_replicas, 3);
    }

    #[test]
    fn test_n_replicas_tolerates_surrounding_whitespace() {
        let lb = LoadBalancing::from_spec(&spec(LoadBalancingKind::Random, " 4 "));
        assert_eq!(lb.n_replicas, 4);
    }

    #[test]
    fn test_parse_leading_i32() {
        assert_eq!(parse_leading_i32("10"), Some(10));
        assert_eq!(parse_leading_i32("+7"), Some(7));
        assert_eq!(parse_leading_i32("-7"), Some(-7));
        assert_eq!(parse_leading_i32("1.5"), Some(1));
        assert_eq!(parse_leading_i32("-3x"), Some(-3));
        assert_eq!(parse_leading_i32("  42abc"), Some(42));
        assert_eq!(parse_leading_i32(""), None);
        assert_eq!(parse_leading_i32("high"), None);
        assert_eq!(parse_leading_i32("-"), None);
        assert_eq!(parse_leading_i32(".5"), None);
        // Runs beyond the integer range saturate.
        assert_eq!(parse_leading_i32("99999999999"), Some(i32::MAX));
        assert_eq!(parse_leading_i32("-99999999999"), Some(i32::MIN));
    }

    #[test]
    fn test_adaptive_sample_window() {
        let lb = LoadBalancing::from_spec(
            &spec(LoadBalancingKind::Adaptive, "0").with_load_sample("15"),
        );
        assert_eq!(
            lb.policy,
            LoadBalancingPolicy::Adaptive {
                sample: LoadSample::Avg15
            }
        );
    }

    #[test]
    fn test_adaptive_sample_window_defaults_to_one_minute() {
        let lb = LoadBalancing::from_spec(&spec(LoadBalancingKind::Adaptive, "0"));
        assert_eq!(
            lb.policy,
            LoadBalancingPolicy::Adaptive {
                sample: LoadSample::Avg1
            }
        );
    }
}
