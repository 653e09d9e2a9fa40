//! The standard releases, oldest first.

mod v1_0;
mod v1_1;
mod v1_2;
mod v1_3;
mod v2_0;

pub use v1_0::Release10;
pub use v1_1::Release11;
pub use v1_2::Release12;
pub use v1_3::Release13;
pub use v2_0::Release20;

use omtypes_core::{BuildError, ReleaseChain};

/// Labels of the standard releases, oldest first.
pub const RELEASE_LABELS: [&str; 5] = ["1.0", "1.1", "1.2", "1.3", "2.0"];

/// The standard release chain, stamped with `originator` and `time`.
pub fn standard_chain(originator: &str, time: u64) -> Result<ReleaseChain, BuildError> {
    ReleaseChain::new()
        .with_origin(originator, time)
        .with_release(Release10)?
        .with_release(Release11)?
        .with_release(Release12)?
        .with_release(Release13)?
        .with_release(Release20)
}

#[cfg(test)]
mod tests {
    use super::*;
    use omtypes_core::{Definition, TypeRegistry};

    #[test]
    fn test_chain_order() {
        let chain = standard_chain("tester", 0).unwrap();
        assert_eq!(chain.labels(), RELEASE_LABELS.to_vec());
    }

    #[test]
    fn test_guid_constants_match_definitions() {
        let mut registry = TypeRegistry::new();
        standard_chain("tester", 0)
            .unwrap()
            .populate(&mut registry)
            .unwrap();

        for (name, guid) in [
            ("Referenceable", v1_0::REFERENCEABLE_GUID),
            ("Asset", v1_0::ASSET_GUID),
            ("DataSet", v1_0::DATA_SET_GUID),
            ("SearchKeyword", v1_0::SEARCH_KEYWORD_GUID),
            ("GlossaryTerm", v1_1::GLOSSARY_TERM_GUID),
        ] {
            assert_eq!(registry.get_type_by_guid(guid).map(|t| t.name()), Some(name));
        }
    }
}
