use crate::{
    families::{FAMILY_LISTS, ZERO_FINALITY_CHAINS},
    policy, ChainFamily, ChainSlug, FinalityBucket, FinalityPolicy, GasOverridePolicy,
    GLOBAL_FINALITY, ZERO_FINALITY,
};
use std::{
    collections::{HashMap, HashSet},
    sync::OnceLock,
};

/// Configuration-integrity errors found while building a [`ChainRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A slug appears in more than one family list.
    #[error("chain {slug} is listed as both {first} and {second}")]
    AmbiguousFamilyMembership {
        /// The offending chain.
        slug: ChainSlug,
        /// The family it was first assigned to.
        first: ChainFamily,
        /// The conflicting family.
        second: ChainFamily,
    },
    /// A slug appears twice in the same list.
    #[error("chain {0} is listed twice")]
    DuplicateEntry(ChainSlug),
    /// A zero-finality chain also has an explicit finality override.
    #[error("chain {0} has a finality override and is in the zero-finality set")]
    ShadowedZeroFinality(ChainSlug),
}

/// Process-wide, read-only chain classification.
///
/// Built once from the family lists, validated for unique membership, and
/// then used to resolve finality, gas and re-sync policy for any chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRegistry {
    families: HashMap<ChainSlug, ChainFamily>,
    zero_finality: HashSet<ChainSlug>,
}

static REGISTRY: OnceLock<Result<ChainRegistry, RegistryError>> = OnceLock::new();

impl ChainRegistry {
    /// Build a registry from family membership lists and the zero-finality
    /// set.
    pub fn new(
        family_lists: &[(ChainFamily, &[ChainSlug])],
        zero_finality: &[ChainSlug],
    ) -> Result<Self, RegistryError> {
        let mut families = HashMap::new();
        for (family, slugs) in family_lists {
            for slug in slugs.iter().copied() {
                match families.insert(slug, *family) {
                    None => {}
                    Some(first) if first == *family => {
                        return Err(RegistryError::DuplicateEntry(slug))
                    }
                    Some(first) => {
                        return Err(RegistryError::AmbiguousFamilyMembership {
                            slug,
                            first,
                            second: *family,
                        })
                    }
                }
            }
        }

        let mut set = HashSet::new();
        for slug in zero_finality.iter().copied() {
            if !set.insert(slug) {
                return Err(RegistryError::DuplicateEntry(slug));
            }
        }

        Ok(Self { families, zero_finality: set })
    }

    /// The registry built from the built-in tables.
    ///
    /// Built on first access. Call this at startup so that an integrity
    /// violation fails the process before any chain is touched.
    pub fn global() -> Result<&'static Self, RegistryError> {
        REGISTRY
            .get_or_init(|| Self::new(FAMILY_LISTS, ZERO_FINALITY_CHAINS))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Family of the chain. Unclassified chains are [`ChainFamily::EthLike`].
    pub fn family(&self, slug: ChainSlug) -> ChainFamily {
        self.families.get(&slug).copied().unwrap_or_default()
    }

    /// `true` if the chain settles effectively instantly.
    pub fn is_zero_finality(&self, slug: ChainSlug) -> bool {
        self.zero_finality.contains(&slug)
    }

    /// Resolve the finality policy of a chain.
    ///
    /// Lookup order: explicit override, zero-finality set, family default,
    /// global default. Exactly one branch applies. The policy's default
    /// bucket is always [`Self::default_finality_bucket`].
    pub fn finality(&self, slug: ChainSlug) -> FinalityPolicy {
        let policy = if let Some(policy) = policy::finality_override(slug) {
            policy
        } else if self.is_zero_finality(slug) {
            ZERO_FINALITY
        } else {
            FinalityPolicy::family_default(self.family(slug))
        };
        policy.with_default_bucket(self.default_finality_bucket(slug))
    }

    /// Resolve the finality policy for a raw slug. Unregistered slugs get the
    /// global default.
    pub fn finality_for_raw(&self, slug: u32) -> FinalityPolicy {
        ChainSlug::from_u32(slug).map(|slug| self.finality(slug)).unwrap_or(GLOBAL_FINALITY)
    }

    /// Default finality bucket of a chain.
    pub fn default_finality_bucket(&self, slug: ChainSlug) -> FinalityBucket {
        policy::default_bucket_override(slug).unwrap_or_default()
    }

    /// Built-in gas overrides of a chain. Chains with no entry get the empty
    /// policy (live price, default multiplier, legacy transactions).
    pub fn gas_overrides(&self, slug: ChainSlug) -> GasOverridePolicy {
        policy::gas_override(slug).unwrap_or_default()
    }

    /// Periodic re-sync interval of a chain. `0` means no re-sync.
    pub fn resync_interval(&self, slug: ChainSlug) -> u64 {
        policy::resync_interval(slug).unwrap_or(0)
    }

    /// Startup consistency check of the built-in tables.
    ///
    /// Fails if family membership is ambiguous, or if a zero-finality chain
    /// also carries an explicit finality override, which would shadow it.
    pub fn validate() -> Result<(), RegistryError> {
        let registry = Self::global()?;
        match policy::overridden_slugs().find(|slug| registry.is_zero_finality(*slug)) {
            Some(slug) => Err(RegistryError::ShadowedZeroFinality(slug)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> &'static ChainRegistry {
        ChainRegistry::global().unwrap()
    }

    #[test]
    fn builtin_tables_are_valid() {
        ChainRegistry::validate().unwrap();
    }

    #[test]
    fn ambiguous_membership_is_rejected() {
        let lists: &[(ChainFamily, &[ChainSlug])] = &[
            (ChainFamily::OpStack, &[ChainSlug::Base]),
            (ChainFamily::ArbitrumL3, &[ChainSlug::Base]),
        ];
        assert_eq!(
            ChainRegistry::new(lists, &[]),
            Err(RegistryError::AmbiguousFamilyMembership {
                slug: ChainSlug::Base,
                first: ChainFamily::OpStack,
                second: ChainFamily::ArbitrumL3,
            })
        );
    }

    #[test]
    fn duplicates_are_rejected() {
        let lists: &[(ChainFamily, &[ChainSlug])] =
            &[(ChainFamily::OpStack, &[ChainSlug::Base, ChainSlug::Base])];
        assert_eq!(
            ChainRegistry::new(lists, &[]),
            Err(RegistryError::DuplicateEntry(ChainSlug::Base))
        );
        assert_eq!(
            ChainRegistry::new(&[], &[ChainSlug::Reya, ChainSlug::Reya]),
            Err(RegistryError::DuplicateEntry(ChainSlug::Reya))
        );
    }

    #[test]
    fn finality_resolves_for_every_chain() {
        for slug in ChainSlug::ALL {
            let policy = registry().finality(*slug);
            assert!(policy.fast <= policy.medium && policy.medium <= policy.slow, "{slug}");
        }
    }

    #[test]
    fn finality_priority_chain() {
        let r = registry();
        // explicit override
        assert_eq!(r.finality(ChainSlug::Arbitrum), FinalityPolicy::blocks(1, 120, 900));
        // zero finality
        assert_eq!(r.finality(ChainSlug::Reya), ZERO_FINALITY);
        assert_eq!(r.finality(ChainSlug::Reya), FinalityPolicy::seconds(30, 60, 120));
        // family defaults
        assert_eq!(
            r.finality(ChainSlug::Base),
            FinalityPolicy::family_default(ChainFamily::OpStack)
        );
        assert_eq!(
            r.finality(ChainSlug::XaiTestnet),
            FinalityPolicy::family_default(ChainFamily::ArbitrumL3)
        );
        assert_eq!(
            r.finality(ChainSlug::CdkTestnet),
            FinalityPolicy::family_default(ChainFamily::PolygonCdk)
        );
        // global default
        assert_eq!(r.finality(ChainSlug::ArbitrumSepolia), GLOBAL_FINALITY);
        assert_eq!(GLOBAL_FINALITY, FinalityPolicy::blocks(1, 10, 20));
    }

    #[test]
    fn unknown_raw_slug_gets_global_default() {
        assert_eq!(registry().finality_for_raw(123_456), GLOBAL_FINALITY);
        assert_eq!(registry().finality_for_raw(8453), registry().finality(ChainSlug::Base));
    }

    #[test]
    fn default_bucket() {
        assert_eq!(registry().default_finality_bucket(ChainSlug::Polygon), FinalityBucket::Medium);
        assert_eq!(registry().default_finality_bucket(ChainSlug::Base), FinalityBucket::Fast);
        assert_eq!(registry().finality(ChainSlug::Polygon).default_threshold(), 256);
    }

    #[test]
    fn resync_and_gas_lookups() {
        assert_eq!(registry().resync_interval(ChainSlug::Polygon), 100);
        assert_eq!(registry().resync_interval(ChainSlug::Base), 0);
        assert_eq!(registry().gas_overrides(ChainSlug::Base), GasOverridePolicy::new());
        assert_eq!(registry().gas_overrides(ChainSlug::Bsc).gas_limit, Some(6_000_000));
    }
}
