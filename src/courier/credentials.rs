//! Credential routing by package-type prefix.
//!
//! Merchants with several API accesses encode the account in the first four
//! characters of the package-type identifier (`SPA-`, `SPB-`, `SPC-`). The
//! selected pair is re-derived for every outbound call; packages within one
//! order may route to different accounts, so nothing is cached.

use crate::config::{CourierConfig, Credentials};

/// Selects the credential pair for a package-type identifier.
///
/// `SPC-` routes to the C pair, `SPB-` to the B pair, and `SPA-` (or any
/// other prefix, or no identifier at all) to the default pair. There is no
/// error path: unset pairs resolve to empty credentials, and the remote API
/// reports authentication problems as request-level errors.
#[must_use]
pub fn for_package_type(config: &CourierConfig, package_type: Option<&str>) -> Credentials {
    let prefix = package_type.and_then(|name| name.get(..4)).unwrap_or("");

    match prefix {
        "SPC-" => config.credentials_c().clone(),
        "SPB-" => config.credentials_b().clone(),
        _ => config.credentials().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CourierConfig;

    fn config() -> CourierConfig {
        CourierConfig::builder()
            .credentials(Credentials::new("user-a", "token-a"))
            .credentials_b(Credentials::new("user-b", "token-b"))
            .credentials_c(Credentials::new("user-c", "token-c"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_prefixes_route_to_their_pairs() {
        let config = config();
        assert_eq!(
            for_package_type(&config, Some("SPA-Standard")).username(),
            "user-a"
        );
        assert_eq!(
            for_package_type(&config, Some("SPB-Maxi")).username(),
            "user-b"
        );
        assert_eq!(
            for_package_type(&config, Some("SPC-Pallet")).username(),
            "user-c"
        );
    }

    #[test]
    fn test_same_prefix_always_routes_identically() {
        let config = config();
        let first = for_package_type(&config, Some("SPB-Mini"));
        let second = for_package_type(&config, Some("SPB-Jumbo XXL"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_prefix_falls_back_to_default() {
        let config = config();
        assert_eq!(for_package_type(&config, Some("DHL-X")).username(), "user-a");
        assert_eq!(for_package_type(&config, Some("SP")).username(), "user-a");
        assert_eq!(for_package_type(&config, Some("")).username(), "user-a");
    }

    #[test]
    fn test_missing_identifier_falls_back_to_default() {
        let config = config();
        assert_eq!(for_package_type(&config, None).username(), "user-a");
    }

    #[test]
    fn test_unset_variant_yields_empty_pair_not_default() {
        let config = CourierConfig::builder()
            .credentials(Credentials::new("user-a", "token-a"))
            .build()
            .unwrap();
        let selected = for_package_type(&config, Some("SPB-Maxi"));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_multibyte_identifier_does_not_panic() {
        let config = config();
        assert_eq!(for_package_type(&config, Some("日本語タイプ")).username(), "user-a");
    }
}
