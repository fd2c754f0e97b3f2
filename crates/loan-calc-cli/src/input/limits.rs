use log::debug;
use std::path::Path;

use loan_calc_core::compliance::{LimitsOverride, RegulatoryLimits};

use super::file;

/// Load a ceiling override file (JSON or YAML, by extension) and merge it
/// over the statutory defaults. With no path the defaults are returned.
pub fn load_limits(path: Option<&str>) -> Result<RegulatoryLimits, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(RegulatoryLimits::default());
    };

    let canonical = file::resolve_path(path)?;
    let contents = file::read_to_string(&canonical)?;
    let overrides = parse_overrides(&contents, &canonical)?;
    debug!(
        "loaded {} ceiling override(s) from {}",
        overrides.ceilings.len(),
        canonical.display()
    );

    Ok(RegulatoryLimits::default().merged_with(overrides)?)
}

fn parse_overrides(contents: &str, path: &Path) -> Result<LimitsOverride, Box<dyn std::error::Error>> {
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let overrides = if is_yaml {
        serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?
    } else {
        serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?
    };
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_calc_core::LoanCategory;
    use rust_decimal::Decimal;

    #[test]
    fn test_yaml_overrides() {
        let yaml = "default_ceiling: 16\nceilings:\n  mortgage: 10.5\n  creditCard: 20\n";
        let o = parse_overrides(yaml, Path::new("limits.yaml")).unwrap();
        assert_eq!(o.default_ceiling, Some(Decimal::from(16)));
        assert_eq!(o.ceilings[&LoanCategory::Mortgage], Decimal::new(105, 1));
        assert_eq!(o.ceilings[&LoanCategory::CreditCard], Decimal::from(20));
    }

    #[test]
    fn test_json_overrides() {
        let json = r#"{"ceilings": {"personal": "14"}}"#;
        let o = parse_overrides(json, Path::new("limits.json")).unwrap();
        assert_eq!(o.default_ceiling, None);
        assert_eq!(o.ceilings[&LoanCategory::Personal], Decimal::from(14));
    }

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(load_limits(None).unwrap(), RegulatoryLimits::default());
    }
}
