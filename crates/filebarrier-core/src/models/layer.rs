use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The check-points an uploaded file can be sent through.
///
/// `AllLayers` is a wildcard: when present, every other check runs whether or not it
/// was requested individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckLayer {
    ExtensionAllowlist,
    ContentTypeToExtensionConsistency,
    ContentTypeAllowlist,
    SizeCeiling,
    AllLayers,
}

impl CheckLayer {
    /// Every concrete check, in pipeline order. Excludes the `AllLayers` wildcard.
    pub const CHECKS: [CheckLayer; 4] = [
        CheckLayer::ExtensionAllowlist,
        CheckLayer::ContentTypeToExtensionConsistency,
        CheckLayer::ContentTypeAllowlist,
        CheckLayer::SizeCeiling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckLayer::ExtensionAllowlist => "extension_allowlist",
            CheckLayer::ContentTypeToExtensionConsistency => {
                "content_type_to_extension_consistency"
            }
            CheckLayer::ContentTypeAllowlist => "content_type_allowlist",
            CheckLayer::SizeCeiling => "size_ceiling",
            CheckLayer::AllLayers => "all_layers",
        }
    }

    fn bit(self) -> u8 {
        match self {
            CheckLayer::ExtensionAllowlist => 1 << 0,
            CheckLayer::ContentTypeToExtensionConsistency => 1 << 1,
            CheckLayer::ContentTypeAllowlist => 1 << 2,
            CheckLayer::SizeCeiling => 1 << 3,
            CheckLayer::AllLayers => 1 << 4,
        }
    }
}

impl FromStr for CheckLayer {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "extension_allowlist" | "extensions" => Ok(CheckLayer::ExtensionAllowlist),
            "content_type_to_extension_consistency" | "consistency" => {
                Ok(CheckLayer::ContentTypeToExtensionConsistency)
            }
            "content_type_allowlist" | "content_types" => Ok(CheckLayer::ContentTypeAllowlist),
            "size_ceiling" | "size" => Ok(CheckLayer::SizeCeiling),
            "all_layers" | "all" => Ok(CheckLayer::AllLayers),
            _ => Err(anyhow::anyhow!("Invalid check layer: {}", s)),
        }
    }
}

impl Display for CheckLayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Membership test over the requested layers.
///
/// Duplicates collapse; `AllLayers` selects every check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerSet(u8);

impl LayerSet {
    pub fn from_layers(layers: &[CheckLayer]) -> Self {
        layers.iter().copied().collect()
    }

    /// Whether no layer at all was requested.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_selected(&self, layer: CheckLayer) -> bool {
        self.0 & (layer.bit() | CheckLayer::AllLayers.bit()) != 0
    }

    /// Concrete checks that will run, in pipeline order.
    pub fn selected_checks(&self) -> impl Iterator<Item = CheckLayer> + '_ {
        CheckLayer::CHECKS
            .into_iter()
            .filter(move |layer| self.is_selected(*layer))
    }
}

impl FromIterator<CheckLayer> for LayerSet {
    fn from_iter<I: IntoIterator<Item = CheckLayer>>(iter: I) -> Self {
        LayerSet(iter.into_iter().fold(0, |bits, layer| bits | layer.bit()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_selects_nothing() {
        let set = LayerSet::from_layers(&[]);
        assert!(set.is_empty());
        assert_eq!(set.selected_checks().count(), 0);
    }

    #[test]
    fn test_individual_layer_selection() {
        let set = LayerSet::from_layers(&[CheckLayer::SizeCeiling]);
        assert!(set.is_selected(CheckLayer::SizeCeiling));
        assert!(!set.is_selected(CheckLayer::ExtensionAllowlist));
        assert!(!set.is_selected(CheckLayer::ContentTypeAllowlist));
    }

    #[test]
    fn test_all_layers_selects_every_check() {
        let set = LayerSet::from_layers(&[CheckLayer::AllLayers]);
        for layer in CheckLayer::CHECKS {
            assert!(set.is_selected(layer), "{} should be selected", layer);
        }
        assert_eq!(
            set.selected_checks().collect::<Vec<_>>(),
            CheckLayer::CHECKS.to_vec()
        );
    }

    #[test]
    fn test_all_layers_alongside_individual_layers() {
        let set = LayerSet::from_layers(&[CheckLayer::SizeCeiling, CheckLayer::AllLayers]);
        assert!(set.is_selected(CheckLayer::ContentTypeToExtensionConsistency));
    }

    #[test]
    fn test_duplicates_collapse() {
        let once = LayerSet::from_layers(&[CheckLayer::SizeCeiling]);
        let twice = LayerSet::from_layers(&[CheckLayer::SizeCeiling, CheckLayer::SizeCeiling]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_collect_matches_from_layers() {
        let layers = [CheckLayer::SizeCeiling, CheckLayer::ExtensionAllowlist];
        let collected: LayerSet = layers.into_iter().collect();
        assert_eq!(collected, LayerSet::from_layers(&layers));
    }

    #[test]
    fn test_selected_checks_follow_pipeline_order() {
        let set = LayerSet::from_layers(&[CheckLayer::SizeCeiling, CheckLayer::ExtensionAllowlist]);
        assert_eq!(
            set.selected_checks().collect::<Vec<_>>(),
            vec![CheckLayer::ExtensionAllowlist, CheckLayer::SizeCeiling]
        );
    }

    #[test]
    fn test_layer_from_str() {
        assert_eq!(
            "extension_allowlist".parse::<CheckLayer>().unwrap(),
            CheckLayer::ExtensionAllowlist
        );
        assert_eq!(
            "Content-Type-Allowlist".parse::<CheckLayer>().unwrap(),
            CheckLayer::ContentTypeAllowlist
        );
        assert_eq!("all".parse::<CheckLayer>().unwrap(), CheckLayer::AllLayers);
        assert!("virus_scan".parse::<CheckLayer>().is_err());
    }

    #[test]
    fn test_layer_display_round_trips_through_from_str() {
        for layer in CheckLayer::CHECKS {
            assert_eq!(layer.to_string().parse::<CheckLayer>().unwrap(), layer);
        }
    }

    #[test]
    fn test_layer_serde_uses_snake_case() {
        let json = serde_json::to_string(&CheckLayer::SizeCeiling).unwrap();
        assert_eq!(json, "\"size_ceiling\"");
    }
}
