/// Declare the chain registry.
///
/// Each entry produces a [`ChainSlug`] variant, a row in [`ChainSlug::ALL`]
/// and the matching [`ChainInfo`] record.
///
/// [`ChainSlug`]: crate::ChainSlug
/// [`ChainSlug::ALL`]: crate::ChainSlug::ALL
/// [`ChainInfo`]: crate::ChainInfo
macro_rules! define_chains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident = $slug:literal {
                chain_id: $chain_id:literal,
                key: $key:literal,
                name: $name:literal,
                mainnet: $mainnet:literal,
                layer: $layer:ident $(,)?
            }
        ),+ $(,)?
    ) => {
        /// A chain slug: Socket's stable identifier for a chain.
        ///
        /// Slugs are `uint32` on-chain. For most chains the slug equals the
        /// native chain id, but not for all of them (see [`ChainInfo`]).
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "u32", into = "u32")]
        #[repr(u32)]
        pub enum ChainSlug {
            $(
                $(#[$meta])*
                $variant = $slug,
            )+
        }

        impl ChainSlug {
            /// Every registered chain, in declaration order.
            pub const ALL: &'static [ChainSlug] = &[$(ChainSlug::$variant),+];

            /// Get the registry record for this chain.
            pub const fn info(self) -> ChainInfo {
                match self {
                    $(
                        ChainSlug::$variant => ChainInfo {
                            slug: $slug,
                            chain_id: $chain_id,
                            network_key: $key,
                            name: $name,
                            is_mainnet: $mainnet,
                            layer: Layer::$layer,
                        },
                    )+
                }
            }

            /// Look up a slug by its numeric value.
            pub const fn from_u32(slug: u32) -> Option<Self> {
                match slug {
                    $($slug => Some(ChainSlug::$variant),)+
                    _ => None,
                }
            }
        }
    };
}
